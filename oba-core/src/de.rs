//! Lenient deserializers for backend fields.
//!
//! The stats and geometry endpoints serialize numbers inconsistently: decimal
//! columns come back as strings (`"12.50"`), codes sometimes as strings too.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberLike {
    Number(f64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CodeLike {
    Number(u64),
    Text(String),
}

/// `Option<f64>` from a number, a numeric string, or null. Unparseable text is `None`.
pub(crate) fn opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberLike>::deserialize(deserializer)?;
    Ok(match value {
        Some(NumberLike::Number(n)) => Some(n),
        Some(NumberLike::Text(s)) => s.trim().parse::<f64>().ok(),
        None => None,
    }
    .filter(|n| n.is_finite()))
}

/// `Option<u64>` from an integer or a numeric string.
pub(crate) fn opt_code<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<CodeLike>::deserialize(deserializer)?;
    Ok(match value {
        Some(CodeLike::Number(n)) => Some(n),
        Some(CodeLike::Text(s)) => s.trim().parse::<u64>().ok(),
        None => None,
    })
}
