//! Viewport state of the map.

use crate::command::MapCommand;
use oba_core::geo::{Coordinate, Extent, Projection};
use serde::Serialize;

/// Center of western Bahia, where the region scope is framed.
pub const REGION_CENTER: Coordinate = Coordinate {
    x: -45.2471,
    y: -12.4818,
};

/// Zoom used when flying to a selected scope.
pub const RECENTER_ZOOM: f64 = 7.0;

pub const RECENTER_DURATION_MS: u32 = 1000;

pub const MIN_ZOOM: f64 = 7.0;
pub const MAX_ZOOM: f64 = 12.0;

/// Area the view is constrained to.
pub const VIEW_EXTENT: Extent = Extent::new(-56.0, -20.0, -33.0, -6.0);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub center: Coordinate,
    pub zoom: f64,
    pub projection: Projection,
    pub extent: Extent,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            center: REGION_CENTER,
            zoom: RECENTER_ZOOM,
            projection: Projection::Epsg4326,
            extent: VIEW_EXTENT,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }
}

impl ViewState {
    /// Explicit navigation. Zoom is clamped to the allowed range.
    pub fn navigate(&mut self, center: Coordinate, zoom: f64) -> MapCommand {
        self.center = center;
        self.zoom = self.clamp_zoom(zoom);
        MapCommand::SetView {
            center: self.center,
            zoom: self.zoom,
        }
    }

    /// Fly to `center` at the recenter zoom.
    pub fn fly_to(&mut self, center: Coordinate) -> MapCommand {
        self.center = center;
        self.zoom = self.clamp_zoom(RECENTER_ZOOM);
        MapCommand::Animate {
            center,
            zoom: self.zoom,
            duration_ms: RECENTER_DURATION_MS,
        }
    }

    /// Command restoring the renderer to this state.
    pub fn to_command(&self) -> MapCommand {
        MapCommand::SetView {
            center: self.center,
            zoom: self.zoom,
        }
    }

    fn clamp_zoom(&self, zoom: f64) -> f64 {
        if zoom.is_finite() {
            zoom.clamp(self.min_zoom, self.max_zoom)
        } else {
            self.zoom
        }
    }
}
