//! Service endpoints.
//!
//! Defaults point at the public OBahia hosts. Each one can be overridden at
//! build time (`OBA_API_URL`, `OBA_WMS_URL`, `OBA_DOWNLOAD_URL`), which is how the
//! WASM bundle gets pointed at a staging backend.

use serde::{Deserialize, Serialize};

/// Base URL of the statistics / geometry REST API.
pub const DEFAULT_API_URL: &str = "http://obahia.dea.ufv.br";

/// Mapserver CGI prefix; mapfile names are appended directly.
pub const DEFAULT_WMS_URL: &str =
    "http://obahia.dea.ufv.br:8085/cgi-bin/mapserv.fcgi?map=/var/www/geodb/mapfiles/";

/// Root of the raster download tree.
pub const DEFAULT_DOWNLOAD_URL: &str = "ftp://obahia.dea.ufv.br";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub api_base_url: String,
    pub wms_base_url: String,
    pub download_base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            wms_base_url: DEFAULT_WMS_URL.to_string(),
            download_base_url: DEFAULT_DOWNLOAD_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Defaults with any build-time overrides applied.
    pub fn from_env() -> Self {
        let mut endpoints = Self::default();
        if let Some(url) = option_env!("OBA_API_URL") {
            endpoints.api_base_url = url.to_string();
        }
        if let Some(url) = option_env!("OBA_WMS_URL") {
            endpoints.wms_base_url = url.to_string();
        }
        if let Some(url) = option_env!("OBA_DOWNLOAD_URL") {
            endpoints.download_base_url = url.to_string();
        }
        endpoints
    }

    /// Join an API path such as `geom/` onto the API base URL.
    pub fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Full mapserver URL for a mapfile.
    pub fn mapfile_url(&self, mapfile: &str) -> String {
        format!("{}{}", self.wms_base_url, mapfile)
    }

    /// Download root without a trailing slash.
    pub fn download_root(&self) -> &str {
        self.download_base_url.trim_end_matches('/')
    }
}
