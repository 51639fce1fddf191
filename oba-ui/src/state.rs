//! Application state managed via Dioxus context.
//!
//! `AppState` bundles the dashboard store and its reactive signals into a
//! single struct provided via `use_context_provider`. Child components
//! retrieve it with `use_context::<AppState>()`.

use crate::js_bridge;
use dioxus::prelude::*;
use oba_core::api::HttpApi;
use oba_core::config::Endpoints;
use oba_state::chart::ChartState;
use oba_state::{Dashboard, DashboardModel, Update};

/// DOM id of the map target div.
pub const MAP_CONTAINER_ID: &str = "map";

/// DOM id of the Plotly chart div.
pub const CHART_CONTAINER_ID: &str = "time-series-chart";

/// Shared application state for the dashboard.
#[derive(Clone, Copy)]
pub struct AppState {
    /// The store every component reads from and sends commands to
    pub dashboard: Signal<Dashboard>,
    /// Backend client
    pub api: Signal<HttpApi>,
    /// Bumped after every store mutation so readers re-render
    pub revision: Signal<u64>,
    /// Whether the first load is still running
    pub loading: Signal<bool>,
}

impl AppState {
    /// Create a new AppState against the configured endpoints.
    pub fn new() -> Self {
        let endpoints = Endpoints::from_env();
        Self {
            dashboard: Signal::new(Dashboard::new(endpoints.clone())),
            api: Signal::new(HttpApi::new(endpoints)),
            revision: Signal::new(0),
            loading: Signal::new(true),
        }
    }

    pub fn dashboard(&self) -> Dashboard {
        self.dashboard.peek().clone()
    }

    pub fn api(&self) -> HttpApi {
        self.api.peek().clone()
    }

    /// Read the model and subscribe the calling component to store updates.
    pub fn model<R>(&self, f: impl FnOnce(&DashboardModel) -> R) -> R {
        let _ = (self.revision)();
        Dashboard::read(&self.dashboard.peek(), f)
    }

    /// Forward store updates to the JS renderers and wake the components.
    pub fn connect(&self) {
        let dashboard = self.dashboard();
        let reader = dashboard.clone();
        let revision = self.revision;
        dashboard.subscribe(move |update: &Update| {
            js_bridge::apply_map_commands(&update.commands);
            if update.chart_changed {
                render_chart(&reader);
            }
            let mut revision = revision;
            revision += 1;
        });
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

fn render_chart(dashboard: &Dashboard) {
    let spec = dashboard.read(|m| match m.chart() {
        ChartState::Ready { spec, .. } => Some(spec.to_json()),
        _ => None,
    });
    match spec {
        Some(json) => js_bridge::render_time_series_chart(CHART_CONTAINER_ID, &json),
        None => js_bridge::destroy_chart(CHART_CONTAINER_ID),
    }
}
