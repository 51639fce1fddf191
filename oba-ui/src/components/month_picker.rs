//! Month input for the period shown by the thematic layers and downloads.

use crate::state::AppState;
use dioxus::prelude::*;
use oba_core::period::{YearMonth, FIRST_PERIOD, LATEST_PERIOD};

#[component]
pub fn MonthPicker() -> Element {
    let state = use_context::<AppState>();
    let period = state.model(|m| m.menu().period());

    let on_change = move |evt: Event<FormData>| {
        let value = evt.value();
        let period = match value.parse::<YearMonth>() {
            Ok(period) => period,
            Err(e) => {
                log::warn!("Ignoring month {value}: {e}");
                return;
            }
        };
        let dashboard = state.dashboard();
        let api = state.api();
        spawn(async move {
            if let Err(e) = dashboard.set_period(&api, period).await {
                log::warn!("Failed to set period {period}: {e}");
            }
        });
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                style: "font-weight: bold;",
                "Month: "
                input {
                    r#type: "month",
                    min: "{FIRST_PERIOD}",
                    max: "{LATEST_PERIOD}",
                    value: "{period}",
                    onchange: on_change,
                }
            }
        }
    }
}
