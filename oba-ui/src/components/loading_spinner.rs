use dioxus::prelude::*;

/// Thin banner shown while the first scope loads.
#[component]
pub fn LoadingSpinner(#[props(default = "Loading map and statistics...".to_string())] message: String) -> Element {
    rsx! {
        div {
            style: "padding: 6px 12px; background: #E3F2FD; color: #1565C0; font-size: 12px;",
            "{message}"
        }
    }
}
