/// Error types for backend and WMS requests
use thiserror::Error;

/// Failure of a request against the stats, geometry or WMS services.
///
/// Transport failures and data-shape mismatches are both errors; a feature-info
/// query landing outside a layer is not (see [`crate::feature_info::FeatureValue`]).
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    /// Response body did not have the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Geometry lookup had no entry for the requested scope
    #[error("Geometry not found: {0}")]
    GeometryNotFound(String),

    /// A request URL could not be assembled
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// True for transport-level failures (as opposed to data-shape problems).
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::HttpRequest(_) | ApiError::Status { .. })
    }
}

/// Type alias for Results using ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::ApiError;

    #[test]
    fn test_error_taxonomy() {
        let status = ApiError::Status {
            status: 502,
            url: "http://obahia.dea.ufv.br/geom/".to_string(),
        };
        assert!(status.is_network());
        assert!(!ApiError::Decode("missing centroid".to_string()).is_network());
        assert!(!ApiError::GeometryNotFound("GRANDE".to_string()).is_network());
    }

    #[test]
    fn test_error_messages() {
        let err = ApiError::GeometryNotFound("county 2903201".to_string());
        assert_eq!(err.to_string(), "Geometry not found: county 2903201");
    }
}
