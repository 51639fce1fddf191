//! Plotly target div with an overlay for loading and empty states.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartContainerProps {
    /// DOM id Plotly renders into
    pub id: String,
    #[props(default = false)]
    pub loading: bool,
    /// Shown over an empty plot area when there is nothing to draw
    #[props(default = None)]
    pub no_data: Option<String>,
    #[props(default = 360)]
    pub min_height: u32,
}

/// The overlay text wins over the plot; the plot div itself is never
/// unmounted so Plotly keeps its handle between renders.
#[component]
pub fn ChartContainer(props: ChartContainerProps) -> Element {
    let overlay = if props.loading {
        Some(("Loading statistics...".to_string(), "#666"))
    } else {
        props.no_data.clone().map(|message| (message, "#999"))
    };
    let plot_visibility = if overlay.is_some() { "hidden" } else { "visible" };

    rsx! {
        div {
            style: "min-height: {props.min_height}px; position: relative; width: 100%;",
            if let Some((message, color)) = overlay {
                div {
                    style: "position: absolute; inset: 0; display: flex; align-items: center; justify-content: center; color: {color}; font-size: 14px;",
                    "{message}"
                }
            }
            div {
                id: "{props.id}",
                style: "width: 100%; min-height: {props.min_height}px; visibility: {plot_visibility};",
            }
        }
    }
}
