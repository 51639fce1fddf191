//! Dioxus components and JS bridge for the OBahia irrigation dashboard.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the OpenLayers map and Plotly chart globals via `js_sys::eval()`
//! - `state`: AppState with Dioxus Signals around the dashboard store
//! - `components`: RSX components (menu, layer switcher, pop-up, chart panel, ...)

pub mod components;
pub mod js_bridge;
pub mod state;
