//! Map layers: the three mutually exclusive thematic layers and the
//! independently toggled reference layers.

use crate::scope::ScopeKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayerError {
    #[error("Unknown layer: {0}")]
    Unknown(String),

    #[error("Layer {layer} is not offered at {scope} level")]
    Unavailable {
        layer: &'static str,
        scope: &'static str,
    },

    #[error("Invalid opacity: {0}")]
    InvalidOpacity(f64),
}

/// Raster layers computed per year-month. Exactly one is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ThematicLayer {
    Amount,
    Evapotranspiration,
    Irrigation,
}

impl ThematicLayer {
    /// Fixed order used for feature queries and the layer switcher.
    pub const ALL: [ThematicLayer; 3] = [
        ThematicLayer::Amount,
        ThematicLayer::Evapotranspiration,
        ThematicLayer::Irrigation,
    ];

    pub fn index(&self) -> usize {
        match self {
            ThematicLayer::Amount => 0,
            ThematicLayer::Evapotranspiration => 1,
            ThematicLayer::Irrigation => 2,
        }
    }

    /// Layer name on the map and in mapfile names; also the WMS `LAYERS` value.
    pub fn name(&self) -> &'static str {
        match self {
            ThematicLayer::Amount => "amount",
            ThematicLayer::Evapotranspiration => "evapotranspiration",
            ThematicLayer::Irrigation => "irrigation",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ThematicLayer::Amount => "Irrigation amount",
            ThematicLayer::Evapotranspiration => "Evapotranspiration",
            ThematicLayer::Irrigation => "Irrigated areas",
        }
    }

    /// Display color shared by the switch, legend and chart series.
    pub const fn color(&self) -> &'static str {
        match self {
            ThematicLayer::Amount => "#3e8ec4",
            ThematicLayer::Evapotranspiration => "#ffa500",
            ThematicLayer::Irrigation => "#006400",
        }
    }

    /// Unit appended to feature-info values.
    pub fn unit(&self) -> Option<&'static str> {
        match self {
            ThematicLayer::Amount | ThematicLayer::Evapotranspiration => Some("mm"),
            ThematicLayer::Irrigation => None,
        }
    }
}

/// Reference layers drawn over the thematic rasters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StaticLayer {
    Hydrography,
    Highways,
    Watersheds,
    Counties,
    FlowStations,
}

impl StaticLayer {
    pub const ALL: [StaticLayer; 5] = [
        StaticLayer::Hydrography,
        StaticLayer::Highways,
        StaticLayer::Watersheds,
        StaticLayer::Counties,
        StaticLayer::FlowStations,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StaticLayer::Hydrography => "hidrography",
            StaticLayer::Highways => "highways",
            StaticLayer::Watersheds => "watersheds",
            StaticLayer::Counties => "counties",
            StaticLayer::FlowStations => "estacoes",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StaticLayer::Hydrography => "Hydrography",
            StaticLayer::Highways => "Highways",
            StaticLayer::Watersheds => "Watersheds",
            StaticLayer::Counties => "Counties",
            StaticLayer::FlowStations => "Flow stations",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            StaticLayer::Hydrography => "#0000ff",
            StaticLayer::Highways => "#800000",
            StaticLayer::Watersheds => "#000000",
            StaticLayer::Counties => "#696969",
            StaticLayer::FlowStations => "#1f5582",
        }
    }

    /// WMS `LAYERS` value.
    pub fn wms_layer(&self) -> &'static str {
        match self {
            StaticLayer::Hydrography => "hidrografia",
            StaticLayer::Highways => "Rodovias",
            StaticLayer::Watersheds => "watersheds",
            StaticLayer::Counties => "counties",
            StaticLayer::FlowStations => "estacoes",
        }
    }

    pub fn mapfile(&self, kind: ScopeKind) -> String {
        match self {
            StaticLayer::Hydrography => format!("hidrography{}.map", kind.mapfile_suffix()),
            StaticLayer::Highways => format!("highways{}.map", kind.mapfile_suffix()),
            StaticLayer::Watersheds => "watersheds.map".to_string(),
            StaticLayer::Counties => "counties.map".to_string(),
            StaticLayer::FlowStations => "estacoesFluviometricas.map".to_string(),
        }
    }

    /// Watershed and county outlines only make sense region-wide; flow
    /// stations only inside a drainage basin.
    pub fn available_in(&self, kind: ScopeKind) -> bool {
        match self {
            StaticLayer::Hydrography | StaticLayer::Highways => true,
            StaticLayer::Watersheds | StaticLayer::Counties => kind == ScopeKind::Region,
            StaticLayer::FlowStations => kind == ScopeKind::Drainage,
        }
    }

    pub fn default_visible(&self, kind: ScopeKind) -> bool {
        match self {
            StaticLayer::Watersheds => kind == ScopeKind::Region,
            StaticLayer::FlowStations => kind == ScopeKind::Drainage,
            _ => false,
        }
    }
}

/// Any layer the coordinator manages, addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LayerId {
    Thematic(ThematicLayer),
    Static(StaticLayer),
}

impl LayerId {
    pub fn name(&self) -> &'static str {
        match self {
            LayerId::Thematic(layer) => layer.name(),
            LayerId::Static(layer) => layer.name(),
        }
    }

    pub fn all() -> impl Iterator<Item = LayerId> {
        ThematicLayer::ALL
            .into_iter()
            .map(LayerId::Thematic)
            .chain(StaticLayer::ALL.into_iter().map(LayerId::Static))
    }
}

impl From<ThematicLayer> for LayerId {
    fn from(layer: ThematicLayer) -> Self {
        LayerId::Thematic(layer)
    }
}

impl From<StaticLayer> for LayerId {
    fn from(layer: StaticLayer) -> Self {
        LayerId::Static(layer)
    }
}

impl FromStr for LayerId {
    type Err = LayerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayerId::all()
            .find(|layer| layer.name() == s)
            .ok_or_else(|| LayerError::Unknown(s.to_string()))
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_names_parse() {
        for layer in LayerId::all() {
            assert_eq!(layer.name().parse::<LayerId>(), Ok(layer));
        }
        assert_eq!(
            "landcover".parse::<LayerId>(),
            Err(LayerError::Unknown("landcover".to_string()))
        );
    }

    #[test]
    fn test_query_order() {
        let names: Vec<_> = ThematicLayer::ALL.iter().map(|l| l.name()).collect();
        assert_eq!(names, ["amount", "evapotranspiration", "irrigation"]);
        for (i, layer) in ThematicLayer::ALL.iter().enumerate() {
            assert_eq!(layer.index(), i);
        }
    }

    #[test]
    fn test_static_availability() {
        assert!(StaticLayer::Watersheds.available_in(ScopeKind::Region));
        assert!(!StaticLayer::Watersheds.available_in(ScopeKind::County));
        assert!(StaticLayer::FlowStations.available_in(ScopeKind::Drainage));
        assert!(!StaticLayer::FlowStations.available_in(ScopeKind::Region));
        assert!(StaticLayer::Highways.available_in(ScopeKind::Watershed));
    }

    #[test]
    fn test_static_mapfiles() {
        assert_eq!(
            StaticLayer::Hydrography.mapfile(ScopeKind::County),
            "hidrographyCounties.map"
        );
        assert_eq!(
            StaticLayer::FlowStations.mapfile(ScopeKind::Drainage),
            "estacoesFluviometricas.map"
        );
    }
}
