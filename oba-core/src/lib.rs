//! Core types and service clients for the OBahia irrigation dashboard.
//!
//! This crate provides:
//! - `scope` / `period` / `layer`: what the user can pick (spatial scope,
//!   year-month, thematic and reference layers)
//! - `tile_source`: WMS tile source descriptors and the registry that rebuilds
//!   them whenever scope or period change
//! - `feature_info`: decoding of mapserver GetFeatureInfo fragments
//! - `geometry` / `stats`: wire types of the backend REST API
//! - `api`: the `DashboardApi` trait and its `reqwest` implementation

pub mod api;
pub mod config;
mod de;
pub mod download;
pub mod error;
pub mod feature_info;
pub mod geo;
pub mod geometry;
pub mod layer;
pub mod period;
pub mod scope;
pub mod stats;
pub mod tile_source;

pub use error::ApiError;
