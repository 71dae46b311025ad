pub mod config;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use config::loader::ConfigFormat;
pub use config::{baseserver, Configuration};
pub use utils::error::{ConfigError, Result};
