pub mod error;
pub mod logger;
pub mod scrubbing;
pub mod validation;
