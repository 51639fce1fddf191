//! Time-series panel for the selected scope.

use super::{ChartContainer, ChartHeader};
use crate::state::{AppState, CHART_CONTAINER_ID};
use dioxus::prelude::*;
use oba_state::chart::ChartState;

#[component]
pub fn TimeSeriesPanel() -> Element {
    let state = use_context::<AppState>();
    let loading = state.model(|m| m.chart().is_loading());
    let (scope, units, no_data) = state.model(|m| match m.chart() {
        ChartState::Idle => (String::new(), Vec::new(), None),
        ChartState::Loading(scope) => (format!("{} …", scope), Vec::new(), None),
        ChartState::Ready { scope, spec } => (
            scope.to_string(),
            spec.traces
                .iter()
                .map(|t| format!("{} ({})", t.name, t.unit))
                .collect(),
            None,
        ),
        ChartState::NoData { scope, .. } => (
            scope.to_string(),
            Vec::new(),
            Some("No data available for this selection".to_string()),
        ),
    });

    rsx! {
        div {
            style: "padding: 8px 16px;",
            ChartHeader {
                title: "Irrigation time series".to_string(),
                scope,
                units,
            }
            ChartContainer {
                id: CHART_CONTAINER_ID.to_string(),
                loading,
                no_data,
            }
        }
    }
}
