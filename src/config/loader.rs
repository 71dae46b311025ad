use crate::config::baseserver::ServerConfiguration;
use crate::config::Configuration;
use crate::utils::error::{ConfigError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_url, Validate};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::path::Path;
use tracing::debug;

const SERVICE_URL_SCHEMES: &[&str] = &["http", "https", "ws", "wss"];

lazy_static! {
    static ref ENV_VAR: Regex = Regex::new(r"\$\{([^}]+)\}").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Picks the format from the file extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Ok(ConfigFormat::Json),
            Some("toml") => Ok(ConfigFormat::Toml),
            _ => Err(ConfigError::UnsupportedFormatError {
                path: path.display().to_string(),
            }),
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigFormat::Json => write!(f, "JSON"),
            ConfigFormat::Toml => write!(f, "TOML"),
        }
    }
}

/// Reads and decodes a configuration file. Does not validate.
pub fn read<P: AsRef<Path>>(path: P) -> Result<Configuration> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;
    debug!("Reading {} configuration from {}", format, path.display());

    let content = std::fs::read_to_string(path)?;
    parse(&content, format)
}

/// Decodes configuration text after substituting `${VAR}` references.
pub fn parse(content: &str, format: ConfigFormat) -> Result<Configuration> {
    let processed_content = substitute_env_vars(content);

    match format {
        ConfigFormat::Json => {
            serde_json::from_str(&processed_content).map_err(|e| ConfigError::ParseError {
                format: format.to_string(),
                message: e.to_string(),
            })
        }
        ConfigFormat::Toml => {
            toml::from_str(&processed_content).map_err(|e| ConfigError::ParseError {
                format: format.to_string(),
                message: e.to_string(),
            })
        }
    }
}

pub fn render(config: &Configuration, format: ConfigFormat) -> Result<String> {
    match format {
        ConfigFormat::Json => Ok(serde_json::to_string_pretty(config)?),
        ConfigFormat::Toml => {
            toml::to_string_pretty(config).map_err(|e| ConfigError::RenderError {
                format: format.to_string(),
                message: e.to_string(),
            })
        }
    }
}

/// Unknown variables are left as written. Values are escaped as string
/// content; JSON and TOML basic strings share the same escapes.
fn substitute_env_vars(content: &str) -> String {
    ENV_VAR
        .replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => escape_string_content(&value),
                Err(_) => format!("${{{}}}", var_name),
            }
        })
        .into_owned()
}

fn escape_string_content(value: &str) -> String {
    let quoted = serde_json::Value::String(value.to_string()).to_string();
    quoted[1..quoted.len() - 1].to_string()
}

fn validate_service(prefix: &str, service: &ServerConfiguration) -> Result<()> {
    let address_field = format!("{}.address", prefix);
    validate_non_empty_string(&address_field, &service.address)?;
    service.listen_address().map_err(|e| match e {
        ConfigError::InvalidConfigValueError { value, reason, .. } => {
            ConfigError::InvalidConfigValueError {
                field: address_field.clone(),
                value,
                reason,
            }
        }
        other => other,
    })?;

    if let Some(tls) = &service.tls {
        validate_path(&format!("{}.tls.certPath", prefix), &tls.cert_path)?;
        validate_path(&format!("{}.tls.keyPath", prefix), &tls.key_path)?;
    }

    Ok(())
}

impl Validate for Configuration {
    fn validate(&self) -> Result<()> {
        if self.gitpod_service_url.trim().is_empty() {
            return Err(ConfigError::MissingConfigError {
                field: "gitpodServiceUrl".to_string(),
            });
        }
        validate_url("gitpodServiceUrl", &self.gitpod_service_url, SERVICE_URL_SCHEMES)?;

        if let Some(server) = &self.server {
            let services = [
                ("grpc", server.services.grpc.as_ref()),
                ("http", server.services.http.as_ref()),
            ];
            for (name, service) in services {
                if let Some(service) = service {
                    validate_service(&format!("server.services.{}", name), service)?;
                }
            }
        }

        Ok(())
    }
}
