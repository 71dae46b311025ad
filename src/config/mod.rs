pub mod baseserver;
#[cfg(feature = "cli")]
pub mod cli;
pub mod loader;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(rename = "gitpodServiceUrl", default)]
    pub gitpod_service_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<baseserver::Configuration>,
}
