//! Dropdown selector for the scope category.

use crate::state::AppState;
use dioxus::prelude::*;
use oba_core::scope::ScopeKind;

/// Scope category dropdown (region, watershed, drainage basin, county).
#[component]
pub fn ScopeSelector() -> Element {
    let state = use_context::<AppState>();
    let selected = state.model(|m| m.menu().kind());

    let on_change = move |evt: Event<FormData>| {
        let Some(kind) = ScopeKind::from_slug(&evt.value()) else {
            log::warn!("Unknown scope category: {}", evt.value());
            return;
        };
        let dashboard = state.dashboard();
        let api = state.api();
        spawn(async move {
            if let Err(e) = dashboard.select_kind(&api, kind).await {
                log::warn!("Failed to switch to {kind}: {e}");
            }
        });
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "scope-select",
                style: "font-weight: bold; margin-right: 8px;",
                "Level: "
            }
            select {
                id: "scope-select",
                onchange: on_change,
                for kind in ScopeKind::ALL {
                    option {
                        value: "{kind.slug()}",
                        selected: kind == selected,
                        "{kind.label()}"
                    }
                }
            }
        }
    }
}
