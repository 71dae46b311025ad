use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to parse {format} configuration: {message}")]
    ParseError { format: String, message: String },

    #[error("Failed to render {format} configuration: {message}")]
    RenderError { format: String, message: String },

    #[error("Unsupported configuration format: {path}")]
    UnsupportedFormatError { path: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl ConfigError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            ConfigError::IoError(e) => format!("Could not read the configuration file: {}", e),
            ConfigError::SerializationError(e) => {
                format!("Configuration could not be converted to JSON: {}", e)
            }
            ConfigError::ParseError { format, .. } => {
                format!("The configuration file is not valid {}", format)
            }
            ConfigError::RenderError { format, .. } => {
                format!("The configuration could not be written as {}", format)
            }
            ConfigError::UnsupportedFormatError { path } => {
                format!("Don't know how to read '{}'", path)
            }
            ConfigError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
            ConfigError::MissingConfigError { field } => {
                format!("Configuration field '{}' is required", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ConfigError::IoError(_) => "Check the file path and its permissions",
            ConfigError::SerializationError(_) | ConfigError::RenderError { .. } => {
                "Try another output format"
            }
            ConfigError::ParseError { .. } => {
                "Check the file syntax and that every ${VAR} reference is set"
            }
            ConfigError::UnsupportedFormatError { .. } => {
                "Use a .json or .toml configuration file"
            }
            ConfigError::InvalidConfigValueError { .. } => {
                "Fix the value of the named field and try again"
            }
            ConfigError::MissingConfigError { .. } => "Add the named field to the configuration",
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
