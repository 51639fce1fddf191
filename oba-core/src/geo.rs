//! Coordinates, extents and the default WMS tile grid.

use serde::{Deserialize, Serialize};

/// Side of a WMS tile in pixels.
pub const TILE_SIZE: u32 = 256;

/// Deepest zoom level of the default tile grid.
const MAX_GRID_ZOOM: u32 = 42;

/// A point in map projection units (lon/lat degrees for EPSG:4326).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// "x, y" with a fixed number of decimals.
    pub fn to_string_xy(&self, digits: usize) -> String {
        format!("{:.*}, {:.*}", digits, self.x, digits, self.y)
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from(pair: [f64; 2]) -> Self {
        Coordinate::new(pair[0], pair[1])
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.x, c.y]
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extent {
    pub const fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn contains(&self, c: Coordinate) -> bool {
        c.x >= self.min_x && c.x <= self.max_x && c.y >= self.min_y && c.y <= self.max_y
    }
}

impl From<[f64; 4]> for Extent {
    fn from(e: [f64; 4]) -> Self {
        Extent::new(e[0], e[1], e[2], e[3])
    }
}

impl From<Extent> for [f64; 4] {
    fn from(e: Extent) -> Self {
        [e.min_x, e.min_y, e.max_x, e.max_y]
    }
}

/// Map projection. The dashboard works in geographic coordinates only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Projection {
    #[default]
    #[serde(rename = "EPSG:4326")]
    Epsg4326,
}

impl Projection {
    pub fn code(&self) -> &'static str {
        match self {
            Projection::Epsg4326 => "EPSG:4326",
        }
    }

    pub fn extent(&self) -> Extent {
        match self {
            Projection::Epsg4326 => Extent::new(-180.0, -90.0, 180.0, 90.0),
        }
    }

    /// WMS 1.3.0 puts latitude first for EPSG:4326.
    pub fn wms13_lat_first(&self) -> bool {
        matches!(self, Projection::Epsg4326)
    }

    /// Resolution of zoom level 0 for a view in this projection.
    pub fn max_resolution(&self) -> f64 {
        self.extent().width() / TILE_SIZE as f64
    }
}

/// The tile grid a TileWMS source uses when none is configured: square
/// tiles anchored at the top-left of the projection extent, each zoom level
/// halving the resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileGrid {
    origin: Coordinate,
    max_resolution: f64,
    tile_size: u32,
}

impl TileGrid {
    pub fn for_projection(projection: Projection) -> Self {
        let extent = projection.extent();
        let max_resolution =
            extent.width().max(extent.height()) / TILE_SIZE as f64;
        Self {
            origin: Coordinate::new(extent.min_x, extent.max_y),
            max_resolution,
            tile_size: TILE_SIZE,
        }
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn resolution(&self, z: u32) -> f64 {
        self.max_resolution / 2f64.powi(z as i32)
    }

    /// Zoom level whose resolution is nearest to `resolution`.
    pub fn z_for_resolution(&self, resolution: f64) -> u32 {
        if !(resolution.is_finite() && resolution > 0.0) {
            return 0;
        }
        let z = (self.max_resolution / resolution).log2().round();
        z.clamp(0.0, MAX_GRID_ZOOM as f64) as u32
    }

    /// Extent of the tile containing `c` at zoom `z`.
    pub fn tile_extent_at(&self, c: Coordinate, z: u32) -> Extent {
        let span = self.resolution(z) * self.tile_size as f64;
        let col = ((c.x - self.origin.x) / span).floor();
        let row = ((self.origin.y - c.y) / span).floor();
        let min_x = self.origin.x + col * span;
        let max_y = self.origin.y - row * span;
        Extent::new(min_x, max_y - span, min_x + span, max_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_formatting() {
        let c = Coordinate::new(-45.258123456, -12.6521);
        assert_eq!(c.to_string_xy(5), "-45.25812, -12.65210");
    }

    #[test]
    fn test_coordinate_serializes_as_pair() {
        let c: Coordinate = serde_json::from_str("[-45.2471, -12.4818]").unwrap();
        assert_eq!(c, Coordinate::new(-45.2471, -12.4818));
        assert_eq!(serde_json::to_string(&c).unwrap(), "[-45.2471,-12.4818]");
    }

    #[test]
    fn test_grid_resolutions() {
        let grid = TileGrid::for_projection(Projection::Epsg4326);
        assert_eq!(grid.resolution(0), 1.40625);
        assert_eq!(grid.resolution(7), 1.40625 / 128.0);
        assert_eq!(grid.z_for_resolution(1.40625 / 128.0), 7);
        // Nearest level wins for in-between resolutions.
        assert_eq!(grid.z_for_resolution(1.40625 / 130.0), 7);
        assert_eq!(grid.z_for_resolution(0.0), 0);
    }

    #[test]
    fn test_tile_extent_contains_point() {
        let grid = TileGrid::for_projection(Projection::Epsg4326);
        let c = Coordinate::new(-45.2581, -12.6521);
        for z in [0, 5, 7, 12] {
            let extent = grid.tile_extent_at(c, z);
            assert!(extent.contains(c), "zoom {z}: {extent:?}");
            let span = grid.resolution(z) * 256.0;
            assert!((extent.width() - span).abs() < 1e-9);
            assert!((extent.height() - span).abs() < 1e-9);
        }
    }
}
