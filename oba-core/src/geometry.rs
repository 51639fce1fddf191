//! Wire types of the `geom/` endpoint and centroid resolution.

use crate::error::{ApiError, Result};
use crate::geo::Coordinate;
use crate::scope::{CodeName, Scope};
use serde::{Deserialize, Serialize};

/// Request body of `geom/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeometryRequest<'a> {
    pub table_name: &'a str,
}

/// Centroid as sent by the server: usually a JSON-encoded `"[lon, lat]"`
/// string, occasionally already an array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Centroid {
    Pair([f64; 2]),
    Encoded(String),
}

impl Centroid {
    /// Second decode step: turn the encoded string into a coordinate.
    pub fn decode(&self) -> Result<Coordinate> {
        let pair = match self {
            Centroid::Pair(pair) => *pair,
            Centroid::Encoded(text) => serde_json::from_str::<[f64; 2]>(text)
                .map_err(|e| ApiError::Decode(format!("centroid {:?}: {}", text, e)))?,
        };
        let coordinate = Coordinate::from(pair);
        if !coordinate.is_finite() {
            return Err(ApiError::Decode(format!("centroid {:?} is not finite", pair)));
        }
        Ok(coordinate)
    }
}

/// One row of `geom/`: a watershed (by name) or a basin/county (by code).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeometryRecord {
    #[serde(default, deserialize_with = "crate::de::opt_code")]
    pub code: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub centroid: Option<Centroid>,
}

impl GeometryRecord {
    /// Whether this row describes `scope`.
    pub fn matches(&self, scope: &Scope) -> bool {
        match scope {
            Scope::Region => false,
            Scope::Watershed(ws) => self
                .name
                .as_deref()
                .is_some_and(|name| name.trim() == ws.geometry_name()),
            Scope::Drainage(cn) | Scope::County(cn) => self.code == Some(cn.code),
        }
    }

    /// Structured entry for the secondary picker, if the row has both fields.
    pub fn code_name(&self) -> Option<CodeName> {
        match (self.code, &self.name) {
            (Some(code), Some(name)) => Some(CodeName::new(code, name.trim())),
            _ => None,
        }
    }
}

/// Centroid of `scope` among `records`.
pub fn find_centroid(records: &[GeometryRecord], scope: &Scope) -> Result<Coordinate> {
    let record = records
        .iter()
        .find(|r| r.matches(scope))
        .ok_or_else(|| ApiError::GeometryNotFound(scope.to_string()))?;
    record
        .centroid
        .as_ref()
        .ok_or_else(|| ApiError::Decode(format!("no centroid for {}", scope)))?
        .decode()
}

/// Selectable entities, in server order. Rows missing a code or name are skipped.
pub fn entity_list(records: &[GeometryRecord]) -> Vec<CodeName> {
    records.iter().filter_map(GeometryRecord::code_name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::Watershed;

    const COUNTIES: &str = r#"[
        {"code": 2900702, "name": "ANGICAL", "centroid": "[-44.69, -12.0]"},
        {"code": "2903201", "name": "BARREIRAS", "centroid": "[-45.2581, -12.6521]"},
        {"code": 2928901, "name": "SAO DESIDERIO", "centroid": [-45.3, -12.9]}
    ]"#;

    fn counties() -> Vec<GeometryRecord> {
        serde_json::from_str(COUNTIES).unwrap()
    }

    #[test]
    fn test_county_centroid_by_code() {
        let scope = Scope::County(CodeName::new(2903201, "BARREIRAS"));
        let c = find_centroid(&counties(), &scope).unwrap();
        assert_eq!(c, Coordinate::new(-45.2581, -12.6521));

        let scope = Scope::County(CodeName::new(2928901, "SAO DESIDERIO"));
        assert_eq!(
            find_centroid(&counties(), &scope).unwrap(),
            Coordinate::new(-45.3, -12.9)
        );
    }

    #[test]
    fn test_watershed_centroid_by_upper_name() {
        let records: Vec<GeometryRecord> = serde_json::from_str(
            r#"[{"name": "GRANDE", "centroid": "[-45.0, -11.9]"},
                {"name": "CORRENTE", "centroid": "[-44.5, -13.4]"}]"#,
        )
        .unwrap();
        let c = find_centroid(&records, &Scope::Watershed(Watershed::Corrente)).unwrap();
        assert_eq!(c, Coordinate::new(-44.5, -13.4));
    }

    #[test]
    fn test_missing_geometry() {
        let scope = Scope::County(CodeName::new(1, "NOWHERE"));
        assert!(matches!(
            find_centroid(&counties(), &scope),
            Err(ApiError::GeometryNotFound(_))
        ));
    }

    #[test]
    fn test_bad_centroid_is_decode_error() {
        let records: Vec<GeometryRecord> =
            serde_json::from_str(r#"[{"code": 5, "name": "X", "centroid": "POINT(1 2)"}]"#)
                .unwrap();
        let scope = Scope::Drainage(CodeName::new(5, "X"));
        assert!(matches!(
            find_centroid(&records, &scope),
            Err(ApiError::Decode(_))
        ));

        let records: Vec<GeometryRecord> =
            serde_json::from_str(r#"[{"code": 5, "name": "X"}]"#).unwrap();
        assert!(matches!(
            find_centroid(&records, &scope),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn test_entity_list_keeps_structure() {
        let mut records = counties();
        records.push(GeometryRecord {
            code: None,
            name: Some("NO CODE".to_string()),
            centroid: None,
        });
        let entities = entity_list(&records);
        assert_eq!(entities.len(), 3);
        assert_eq!(entities[1], CodeName::new(2903201, "BARREIRAS"));
    }

    #[test]
    fn test_request_body() {
        let body = serde_json::to_string(&GeometryRequest {
            table_name: "counties",
        })
        .unwrap();
        assert_eq!(body, r#"{"table_name":"counties"}"#);
    }
}
