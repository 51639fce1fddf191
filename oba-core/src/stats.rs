//! Wire types of the per-scope statistics endpoints.

use crate::scope::Scope;
use serde::{Deserialize, Serialize};

/// Request body of a stats endpoint. Each scope keys its table differently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StatsRequest {
    TableName { table_name: String },
    Gcc { gcc: String },
    Code { code: u64 },
}

impl StatsRequest {
    pub fn for_scope(scope: &Scope) -> Self {
        match scope {
            Scope::Region => StatsRequest::TableName {
                table_name: "irrigation".to_string(),
            },
            Scope::Watershed(ws) => StatsRequest::Gcc { gcc: ws.key() },
            Scope::Drainage(cn) | Scope::County(cn) => StatsRequest::Code { code: cn.code },
        }
    }
}

/// One monthly aggregate. Which totals are present depends on the scope.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatsRecord {
    #[serde(default)]
    pub datestring: Option<String>,
    #[serde(default, deserialize_with = "crate::de::opt_number")]
    pub totalamount: Option<f64>,
    #[serde(default, deserialize_with = "crate::de::opt_number")]
    pub totalvolume: Option<f64>,
    #[serde(default, deserialize_with = "crate::de::opt_number")]
    pub totalflow: Option<f64>,
    #[serde(default, deserialize_with = "crate::de::opt_number")]
    pub totalarea: Option<f64>,
    #[serde(default, deserialize_with = "crate::de::opt_number")]
    pub totalevapo: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::{CodeName, ScopeKind, Watershed};

    #[test]
    fn test_request_bodies() {
        let county = Scope::County(CodeName::new(2903201, "BARREIRAS"));
        assert_eq!(
            serde_json::to_string(&StatsRequest::for_scope(&county)).unwrap(),
            r#"{"code":2903201}"#
        );
        assert_eq!(
            serde_json::to_string(&StatsRequest::for_scope(&Scope::Watershed(Watershed::Grande)))
                .unwrap(),
            r#"{"gcc":"grande"}"#
        );
        assert_eq!(
            serde_json::to_string(&StatsRequest::for_scope(&Scope::Region)).unwrap(),
            r#"{"table_name":"irrigation"}"#
        );
        assert_eq!(
            serde_json::to_string(&StatsRequest::for_scope(&Scope::default_for(
                ScopeKind::Drainage
            )))
            .unwrap(),
            r#"{"code":46543000}"#
        );
    }

    #[test]
    fn test_records_accept_numeric_strings() {
        let records: Vec<StatsRecord> = serde_json::from_str(
            r#"[
                {"datestring": "2001-01-15", "totalamount": "12.50", "totalflow": 3, "totalarea": null},
                {"datestring": "2001-02-15", "totalamount": 7.25, "totalevapo": "abc"}
            ]"#,
        )
        .unwrap();
        assert_eq!(records[0].totalamount, Some(12.5));
        assert_eq!(records[0].totalflow, Some(3.0));
        assert_eq!(records[0].totalarea, None);
        assert_eq!(records[0].totalvolume, None);
        assert_eq!(records[1].totalamount, Some(7.25));
        assert_eq!(records[1].totalevapo, None);
    }
}
