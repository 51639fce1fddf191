//! Decoding of GetFeatureInfo responses.

use crate::layer::ThematicLayer;
use oba_utils::html::strip_tags;
use serde::Serialize;
use std::fmt;

/// Shown when a click falls outside a layer's data.
pub const OUTSIDE_LAYER: &str = "Outside layer";

/// Land-use classes of the irrigation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IrrigationClass {
    Irrigated,
    NotIrrigated,
}

impl IrrigationClass {
    /// Class for a raster code; codes start at 1.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(IrrigationClass::Irrigated),
            2 => Some(IrrigationClass::NotIrrigated),
            _ => None,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            IrrigationClass::Irrigated => 1,
            IrrigationClass::NotIrrigated => 2,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IrrigationClass::Irrigated => "Irrigated",
            IrrigationClass::NotIrrigated => "Not irrigated",
        }
    }
}

/// What a feature-info query found at the clicked point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FeatureValue {
    /// A raster value, as text.
    Value(String),
    /// A decoded irrigation class.
    Class(IrrigationClass),
    /// No data at this point. A normal outcome, not an error.
    OutsideLayer,
}

impl FeatureValue {
    /// Decode a `text/html` feature-info body for `layer`.
    pub fn decode(layer: ThematicLayer, body: &str) -> FeatureValue {
        let text = strip_tags(body);
        if text.is_empty() {
            return FeatureValue::OutsideLayer;
        }
        match layer {
            ThematicLayer::Irrigation => match parse_class_code(&text) {
                Some(class) => FeatureValue::Class(class),
                None => {
                    log::warn!("Unrecognized irrigation class {:?}", text);
                    FeatureValue::OutsideLayer
                }
            },
            _ => FeatureValue::Value(text),
        }
    }

    pub fn is_outside(&self) -> bool {
        matches!(self, FeatureValue::OutsideLayer)
    }

    /// Text for the pop-up, with `unit` appended to raster values.
    pub fn display(&self, unit: Option<&str>) -> String {
        match (self, unit) {
            (FeatureValue::Value(v), Some(unit)) => format!("{} {}", v, unit),
            (FeatureValue::Value(v), None) => v.clone(),
            (FeatureValue::Class(class), _) => class.label().to_string(),
            (FeatureValue::OutsideLayer, _) => OUTSIDE_LAYER.to_string(),
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display(None))
    }
}

/// Mapserver may render the class as "1" or "1.0".
fn parse_class_code(text: &str) -> Option<IrrigationClass> {
    let code = match text.parse::<i64>() {
        Ok(code) => code,
        Err(_) => {
            let value = text.parse::<f64>().ok()?;
            if value.fract() != 0.0 {
                return None;
            }
            value as i64
        }
    };
    IrrigationClass::from_code(code)
}
