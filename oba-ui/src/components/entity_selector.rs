//! Secondary picker: which watershed, drainage basin or county.

use crate::state::AppState;
use dioxus::prelude::*;
use oba_core::scope::{CodeName, Scope, ScopeKind, Watershed};

/// One option of the secondary picker.
#[derive(Clone, PartialEq)]
struct Choice {
    value: String,
    label: String,
}

/// Secondary dropdown. Hidden at region level.
#[component]
pub fn EntitySelector() -> Element {
    let state = use_context::<AppState>();
    let (scope, entities) = state.model(|m| (m.menu().scope().clone(), m.menu().entities().to_vec()));
    let kind = scope.kind();

    let (selected, choices) = match &scope {
        Scope::Region => return rsx! {},
        Scope::Watershed(current) => (
            current.key(),
            Watershed::ALL
                .into_iter()
                .map(|ws| Choice {
                    value: ws.key(),
                    label: ws.name().to_string(),
                })
                .collect::<Vec<_>>(),
        ),
        Scope::Drainage(current) | Scope::County(current) => (
            current.code.to_string(),
            entity_choices(current, &entities),
        ),
    };

    let on_change = move |evt: Event<FormData>| {
        let value = evt.value();
        let dashboard = state.dashboard();
        let api = state.api();
        match kind {
            ScopeKind::Watershed => {
                let Some(ws) = Watershed::from_name(&value) else {
                    log::warn!("Unknown watershed: {value}");
                    return;
                };
                spawn(async move {
                    if let Err(e) = dashboard.select_watershed(&api, ws).await {
                        log::warn!("Failed to select watershed {}: {e}", ws.name());
                    }
                });
            }
            ScopeKind::Drainage | ScopeKind::County => {
                let entity = value.parse::<u64>().ok().and_then(|code| {
                    dashboard.read(|m| {
                        m.menu()
                            .entities()
                            .iter()
                            .find(|e| e.code == code)
                            .cloned()
                    })
                });
                let Some(entity) = entity else {
                    log::warn!("Unknown {kind} code: {value}");
                    return;
                };
                spawn(async move {
                    if let Err(e) = dashboard.select_entity(&api, entity).await {
                        log::warn!("Failed to select {kind}: {e}");
                    }
                });
            }
            ScopeKind::Region => {}
        }
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "entity-select",
                style: "font-weight: bold; margin-right: 8px;",
                "{kind.label()}: "
            }
            select {
                id: "entity-select",
                onchange: on_change,
                for choice in choices.iter() {
                    option {
                        value: "{choice.value}",
                        selected: choice.value == selected,
                        "{choice.label}"
                    }
                }
            }
        }
    }
}

/// The fetched list, or just the current selection while it loads.
fn entity_choices(current: &CodeName, entities: &[CodeName]) -> Vec<Choice> {
    let to_choice = |e: &CodeName| Choice {
        value: e.code.to_string(),
        label: e.name.clone(),
    };
    if entities.is_empty() {
        vec![to_choice(current)]
    } else {
        entities.iter().map(to_choice).collect()
    }
}
