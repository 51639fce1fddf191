//! Side menu: scope and period selection plus layer controls.

use super::{EntitySelector, LayerSwitcher, MonthPicker, ScopeSelector, StaticLayerSwitcher};
use crate::state::AppState;
use dioxus::prelude::*;
use oba_state::view::{REGION_CENTER, RECENTER_ZOOM};

#[component]
pub fn Menu() -> Element {
    let state = use_context::<AppState>();

    rsx! {
        aside {
            style: "width: 280px; padding: 12px 16px; border-right: 1px solid #ddd; overflow-y: auto;",
            h2 {
                style: "margin: 0 0 8px 0; font-size: 18px;",
                "Irrigation in Western Bahia"
            }
            ScopeSelector {}
            EntitySelector {}
            MonthPicker {}
            hr {}
            LayerSwitcher {}
            StaticLayerSwitcher {}
            button {
                style: "margin-top: 8px;",
                onclick: move |_| state.dashboard().navigate(REGION_CENTER, RECENTER_ZOOM),
                "Back to region"
            }
        }
    }
}
