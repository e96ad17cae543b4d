use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::api::{MetadataGateway, NoApi, DEFAULT_BASE_URL};

/// Metadata service settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "API", inline)]
#[serde(default)]
pub struct ApiOptions {
    /// Root URL of the PDBe REST API.
    #[schemars(title = "Base URL")]
    pub base_url: String,
    /// Work offline with neutral metadata.
    #[schemars(title = "No API")]
    pub no_api: bool,
}

impl Default for ApiOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            no_api: false,
        }
    }
}

impl ApiOptions {
    /// The gateway these options select.
    #[must_use]
    pub fn gateway(&self) -> Box<dyn MetadataGateway> {
        if self.no_api {
            log::info!("metadata API disabled, using neutral defaults");
            return Box::new(NoApi);
        }
        remote_gateway(&self.base_url)
    }
}

#[cfg(feature = "api")]
fn remote_gateway(base_url: &str) -> Box<dyn MetadataGateway> {
    Box::new(crate::api::PdbeApi::new(base_url))
}

#[cfg(not(feature = "api"))]
fn remote_gateway(base_url: &str) -> Box<dyn MetadataGateway> {
    log::warn!("built without the `api` feature, ignoring {base_url}");
    Box::new(NoApi)
}
