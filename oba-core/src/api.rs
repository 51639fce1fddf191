//! Access to the OBahia backend: stats, geometry and mapserver fragments.

use crate::config::Endpoints;
use crate::error::{ApiError, Result};
use crate::geometry::{GeometryRecord, GeometryRequest};
use crate::scope::{Scope, ScopeKind};
use crate::stats::{StatsRecord, StatsRequest};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Every remote call the dashboard makes.
///
/// The browser runtime is single threaded, so futures are not required to be `Send`.
#[async_trait(?Send)]
pub trait DashboardApi {
    /// Monthly aggregates for a scope, oldest first.
    async fn fetch_stats(&self, scope: &Scope) -> Result<Vec<StatsRecord>>;

    /// All geometry rows of a scope kind.
    async fn fetch_geometry(&self, kind: ScopeKind) -> Result<Vec<GeometryRecord>>;

    /// Plain GET returning the body, used for feature info and legends.
    async fn fetch_text(&self, url: &str) -> Result<String>;
}

/// [`DashboardApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    endpoints: Endpoints,
}

impl HttpApi {
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            client: Client::new(),
            endpoints,
        }
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoints.api_url(path);
        log::debug!("POST {}", url);
        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
            });
        }
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(format!("{}: {}", url, e)))
    }
}

#[async_trait(?Send)]
impl DashboardApi for HttpApi {
    async fn fetch_stats(&self, scope: &Scope) -> Result<Vec<StatsRecord>> {
        let request = StatsRequest::for_scope(scope);
        self.post_json(scope.kind().stats_endpoint(), &request).await
    }

    async fn fetch_geometry(&self, kind: ScopeKind) -> Result<Vec<GeometryRecord>> {
        let table_name = kind
            .geometry_table()
            .ok_or_else(|| ApiError::GeometryNotFound(kind.to_string()))?;
        self.post_json("geom/", &GeometryRequest { table_name }).await
    }

    async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_region_has_no_geometry() {
        let api = HttpApi::new(Endpoints::default());
        let result = api.fetch_geometry(ScopeKind::Region).await;
        assert!(matches!(result, Err(ApiError::GeometryNotFound(_))));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let api = HttpApi::new(Endpoints {
            api_base_url: "http://127.0.0.1:9".to_string(),
            ..Endpoints::default()
        });
        let err = api.fetch_stats(&Scope::Region).await.unwrap_err();
        assert!(err.is_network());
    }
}
