//! OBahia irrigation dashboard
//!
//! A map of Western Bahia with monthly irrigation rasters and a time-series
//! chart for the selected region, watershed, drainage basin or county.
//!
//! Data flow:
//! 1. On mount: load OpenLayers and Plotly, build the map, connect the store
//!    to the renderers and load the default scope.
//! 2. Menu changes run through the store, which recenters the map, refreshes
//!    the layers and refetches the chart. Older answers are dropped.
//! 3. Map clicks arrive over a channel and open the feature-info pop-up.

use dioxus::prelude::*;
use futures::channel::mpsc;
use futures::StreamExt;
use oba_ui::components::{ErrorDisplay, LoadingSpinner, MapContainer, Menu, Popup, TimeSeriesPanel};
use oba_ui::js_bridge::{self, MapClick};
use oba_ui::state::{AppState, MAP_CONTAINER_ID};

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("oba-dashboard-root"))
        .launch(App);
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    // ─── Effect: build the map and load the default scope once ───
    use_effect(move || {
        js_bridge::load_vendor_scripts();
        js_bridge::init_map(MAP_CONTAINER_ID);
        state.connect();

        let dashboard = state.dashboard();
        let api = state.api();
        spawn(async move {
            dashboard.start(&api).await;
            state.loading.set(false);
            log::info!("Dashboard ready");
        });
    });

    // ─── Map clicks: JS callback -> channel -> store ───
    use_future(move || async move {
        let (sender, mut receiver) = mpsc::unbounded::<MapClick>();
        js_bridge::register_click_handler(sender);
        while let Some(click) = receiver.next().await {
            let dashboard = state.dashboard();
            let api = state.api();
            spawn(async move {
                if let Err(e) = dashboard.click(&api, click.coordinate, click.resolution).await {
                    log::warn!("Feature query failed: {e}");
                }
            });
        }
    });

    let error = state.model(|m| m.error().map(str::to_string));

    rsx! {
        div {
            style: "display: flex; height: 100vh; font-family: system-ui, -apple-system, sans-serif;",
            Menu {}
            main {
                style: "flex: 1; display: flex; flex-direction: column; min-width: 0;",
                if let Some(message) = error {
                    ErrorDisplay {
                        message,
                        on_dismiss: move |_| state.dashboard().dismiss_error(),
                    }
                }
                if *state.loading.read() {
                    LoadingSpinner {}
                }
                div {
                    style: "flex: 3; position: relative;",
                    MapContainer {}
                    Popup {}
                }
                div {
                    style: "flex: 2; border-top: 1px solid #e0e0e0;",
                    TimeSeriesPanel {}
                }
            }
        }
    }
}
