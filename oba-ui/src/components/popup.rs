//! Feature-info pop-up anchored on the map by the overlay command.

use crate::state::AppState;
use dioxus::prelude::*;
use oba_state::command::POPUP_ELEMENT_ID;
use oba_state::popup::SlotState;

/// Always rendered so the map overlay keeps a stable element; hidden when closed.
#[component]
pub fn Popup() -> Element {
    let state = use_context::<AppState>();
    let (visible, pending, header, rows) = state.model(|m| {
        let popup = m.popup();
        let rows: Vec<(String, String, bool)> = popup
            .slots()
            .map(|(layer, slot)| {
                (
                    layer.label().to_string(),
                    slot.text(layer),
                    matches!(slot, SlotState::Failed(_)),
                )
            })
            .collect();
        (
            popup.is_visible(),
            !popup.is_complete(),
            popup.coordinate_text().unwrap_or_default(),
            rows,
        )
    });
    let display = if visible { "block" } else { "none" };

    rsx! {
        div {
            id: POPUP_ELEMENT_ID,
            style: "display: {display}; background: white; padding: 8px 12px; border: 1px solid #ccc; border-radius: 6px; box-shadow: 0 1px 4px rgba(0,0,0,0.2); min-width: 220px; font-size: 12px;",
            div {
                style: "display: flex; justify-content: space-between; margin-bottom: 4px;",
                code { "{header}" }
                if pending {
                    span { style: "color: #888;", "querying…" }
                }
                button {
                    style: "background: none; border: none; cursor: pointer;",
                    onclick: move |_| state.dashboard().close_popup(),
                    "×"
                }
            }
            for (label, text, failed) in rows {
                div {
                    strong { "{label}: " }
                    span {
                        style: if failed { "color: #C62828;" } else { "" },
                        "{text}"
                    }
                }
            }
        }
    }
}
