//! Banner for the latest reported error.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
    /// Close button handler; no button without it
    #[props(default)]
    pub on_dismiss: Option<EventHandler<()>>,
}

#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    rsx! {
        div {
            role: "alert",
            style: "display: flex; align-items: center; gap: 8px; padding: 8px 12px; background: #FFEBEE; color: #C62828; border-bottom: 1px solid #EF9A9A; font-size: 13px;",
            span {
                style: "flex: 1;",
                "{props.message}"
            }
            if let Some(on_dismiss) = props.on_dismiss {
                button {
                    title: "Dismiss",
                    style: "background: none; border: none; color: #C62828; cursor: pointer; font-size: 16px;",
                    onclick: move |_| on_dismiss.call(()),
                    "×"
                }
            }
        }
    }
}
