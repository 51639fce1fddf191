//! Checkboxes for the reference layers offered at the current level.

use crate::state::AppState;
use dioxus::prelude::*;
use oba_core::layer::{LayerId, StaticLayer};

#[component]
pub fn StaticLayerSwitcher() -> Element {
    let state = use_context::<AppState>();
    let layers: Vec<(StaticLayer, bool)> = state.model(|m| {
        let kind = m.menu().kind();
        StaticLayer::ALL
            .into_iter()
            .filter(|layer| layer.available_in(kind))
            .map(|layer| (layer, m.layers().is_visible(LayerId::Static(layer))))
            .collect()
    });

    rsx! {
        div {
            style: "margin: 8px 0;",
            div {
                style: "font-weight: bold; margin-bottom: 4px;",
                "Reference layers"
            }
            for (layer, visible) in layers {
                label {
                    style: "display: block; cursor: pointer;",
                    input {
                        r#type: "checkbox",
                        checked: visible,
                        onchange: move |evt: Event<FormData>| {
                            if let Err(e) = state.dashboard().set_static_layer_visible(layer, evt.checked()) {
                                log::warn!("{e}");
                            }
                        },
                    }
                    span {
                        style: "margin-left: 4px; border-bottom: 2px solid {layer.color()};",
                        "{layer.label()}"
                    }
                }
            }
        }
    }
}
