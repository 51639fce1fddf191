//! Commands drained from the store to the map renderer.

use oba_core::geo::Coordinate;
use oba_core::tile_source::TileSourceDescriptor;
use serde::Serialize;

/// DOM id of the pop-up overlay element.
pub const POPUP_ELEMENT_ID: &str = "popup";

/// Auto-pan duration when the pop-up is attached near the map edge.
pub const POPUP_AUTO_PAN_MS: u32 = 500;

/// One mutation of the map, serialized for the JS renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum MapCommand {
    SetView {
        center: Coordinate,
        zoom: f64,
    },
    Animate {
        center: Coordinate,
        zoom: f64,
        duration_ms: u32,
    },
    SetSource {
        layer: &'static str,
        url: String,
        params: Vec<(String, String)>,
    },
    RefreshSource {
        layer: &'static str,
    },
    SetVisible {
        layer: &'static str,
        visible: bool,
    },
    SetOpacity {
        layer: &'static str,
        opacity: f64,
    },
    AttachOverlay {
        element_id: &'static str,
        position: Coordinate,
        auto_pan_ms: u32,
    },
    DetachOverlay {
        element_id: &'static str,
    },
}

impl MapCommand {
    pub fn set_source(source: &TileSourceDescriptor) -> Self {
        MapCommand::SetSource {
            layer: source.layer,
            url: source.url.clone(),
            params: source.params(),
        }
    }

    /// Layer the command targets, if any.
    pub fn layer(&self) -> Option<&'static str> {
        match self {
            MapCommand::SetSource { layer, .. }
            | MapCommand::RefreshSource { layer }
            | MapCommand::SetVisible { layer, .. }
            | MapCommand::SetOpacity { layer, .. } => Some(*layer),
            _ => None,
        }
    }
}
