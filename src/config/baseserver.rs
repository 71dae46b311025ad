use crate::utils::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;

/// Listener settings shared by every service built on the base server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub services: ServicesConfiguration,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicesConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grpc: Option<ServerConfiguration>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http: Option<ServerConfiguration>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfiguration {
    pub address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsConfiguration>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TlsConfiguration {
    #[serde(default)]
    pub ca_path: String,
    #[serde(default)]
    pub cert_path: String,
    #[serde(default)]
    pub key_path: String,
}

/// A listen address checked by syntax only; host names are left for the
/// listener to resolve at bind time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenAddress {
    Ip(SocketAddr),
    Host { host: String, port: u16 },
}

impl fmt::Display for ListenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListenAddress::Ip(addr) => write!(f, "{}", addr),
            ListenAddress::Host { host, port } => write!(f, "{}:{}", host, port),
        }
    }
}

impl ServerConfiguration {
    /// Parses the listen address. A bare `:port` listens on all interfaces.
    pub fn listen_address(&self) -> Result<ListenAddress> {
        let address = self.address.trim();
        let address = if address.starts_with(':') {
            format!("0.0.0.0{}", address)
        } else {
            address.to_string()
        };

        if let Ok(addr) = address.parse::<SocketAddr>() {
            return Ok(ListenAddress::Ip(addr));
        }

        let invalid = |reason: &str| ConfigError::InvalidConfigValueError {
            field: "address".to_string(),
            value: self.address.clone(),
            reason: reason.to_string(),
        };

        let (host, port) = address
            .rsplit_once(':')
            .ok_or_else(|| invalid("Expected <host>:<port>"))?;
        if host.is_empty() || host.contains(':') || host.contains(char::is_whitespace) {
            return Err(invalid("Invalid host"));
        }
        let port = port
            .parse::<u16>()
            .map_err(|_| invalid("Port must be a number between 0 and 65535"))?;

        Ok(ListenAddress::Host {
            host: host.to_string(),
            port,
        })
    }

    pub fn is_tls(&self) -> bool {
        self.tls.is_some()
    }
}
