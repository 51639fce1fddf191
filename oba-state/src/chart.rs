//! Time-series chart state.

use oba_core::scope::Scope;
use oba_data::ChartSpec;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ChartState {
    #[default]
    Idle,
    Loading(Scope),
    Ready { scope: Scope, spec: ChartSpec },
    /// Fetch or decode failed. Nothing is plotted.
    NoData { scope: Scope, reason: String },
}

impl ChartState {
    pub fn spec(&self) -> Option<&ChartSpec> {
        match self {
            ChartState::Ready { spec, .. } => Some(spec),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ChartState::Loading(_))
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, ChartState::NoData { .. })
    }
}
