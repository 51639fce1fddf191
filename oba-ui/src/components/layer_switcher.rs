//! Thematic layer switcher with opacity, legend and raster downloads.

use crate::state::AppState;
use dioxus::prelude::*;
use oba_core::layer::{LayerId, ThematicLayer};

/// Radio group choosing the visible thematic layer.
#[component]
pub fn LayerSwitcher() -> Element {
    let state = use_context::<AppState>();
    let (active, opacity, legend, downloads) = state.model(|m| {
        let active = m.layers().active();
        (
            active,
            m.layers().opacity(LayerId::Thematic(active)),
            m.legend(active).map(str::to_string),
            m.download_links(),
        )
    });

    let on_opacity = move |evt: Event<FormData>| {
        let value = evt.value();
        let Ok(opacity) = value.parse::<f64>() else {
            log::warn!("Ignoring opacity {value}");
            return;
        };
        if let Err(e) = state.dashboard().set_opacity(LayerId::Thematic(active), opacity) {
            log::warn!("{e}");
        }
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            div {
                style: "font-weight: bold; margin-bottom: 4px;",
                "Layers"
            }
            for layer in ThematicLayer::ALL {
                label {
                    style: "display: block; cursor: pointer;",
                    input {
                        r#type: "radio",
                        name: "thematic-layer",
                        value: "{layer.name()}",
                        checked: layer == active,
                        onchange: move |_| state.dashboard().set_thematic_layer(layer),
                    }
                    span {
                        style: "margin-left: 4px; color: {layer.color()};",
                        "{layer.label()}"
                    }
                }
            }
            label {
                style: "display: block; margin-top: 6px; font-size: 12px;",
                "Opacity "
                input {
                    r#type: "range",
                    min: "0",
                    max: "1",
                    step: "0.05",
                    value: "{opacity}",
                    oninput: on_opacity,
                }
            }
            if let Some(legend) = legend {
                div {
                    style: "margin-top: 6px;",
                    dangerous_inner_html: "{legend}",
                }
            }
            if !downloads.is_empty() {
                div {
                    style: "margin-top: 6px; font-size: 12px;",
                    "Download: "
                    for (layer, url) in downloads {
                        a {
                            style: "margin-right: 8px;",
                            href: "{url}",
                            target: "_blank",
                            "{layer.label()}"
                        }
                    }
                }
            }
        }
    }
}
