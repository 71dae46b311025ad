use crate::config::loader::ConfigFormat;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "public-api-config")]
#[command(about = "Load, validate and inspect the public API configuration")]
pub struct CliArgs {
    /// Path to the configuration file (.json or .toml)
    #[arg(short, long)]
    pub config: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Print the effective configuration after loading it
    #[arg(long)]
    pub print: bool,

    /// Output format used by --print
    #[arg(long, value_enum, default_value_t = ConfigFormat::Json)]
    pub format: ConfigFormat,
}
