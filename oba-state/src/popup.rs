//! Feature-info pop-up: one slot per thematic layer, filled as answers arrive.

use crate::sequence::Ticket;
use oba_core::feature_info::FeatureValue;
use oba_core::geo::Coordinate;
use oba_core::layer::ThematicLayer;

/// Decimals of the clicked coordinate shown in the header.
pub const COORDINATE_DIGITS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub enum SlotState {
    Pending,
    Ready(FeatureValue),
    Failed(String),
}

impl SlotState {
    pub fn text(&self, layer: ThematicLayer) -> String {
        match self {
            SlotState::Pending => "...".to_string(),
            SlotState::Ready(value) => value.display(layer.unit()),
            SlotState::Failed(_) => "Unavailable".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopupState {
    visible: bool,
    coordinate: Option<Coordinate>,
    cycle: Option<Ticket>,
    slots: [SlotState; 3],
}

impl Default for PopupState {
    fn default() -> Self {
        Self {
            visible: false,
            coordinate: None,
            cycle: None,
            slots: [SlotState::Pending, SlotState::Pending, SlotState::Pending],
        }
    }
}

impl PopupState {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }

    /// "lon, lat" header text.
    pub fn coordinate_text(&self) -> Option<String> {
        self.coordinate.map(|c| c.to_string_xy(COORDINATE_DIGITS))
    }

    pub fn slot(&self, layer: ThematicLayer) -> &SlotState {
        &self.slots[layer.index()]
    }

    /// Slots in query order.
    pub fn slots(&self) -> impl Iterator<Item = (ThematicLayer, &SlotState)> {
        ThematicLayer::ALL
            .into_iter()
            .map(move |layer| (layer, self.slot(layer)))
    }

    /// Start a query cycle: open at `coordinate` with every slot pending.
    pub fn begin(&mut self, cycle: Ticket, coordinate: Coordinate) {
        self.visible = true;
        self.coordinate = Some(coordinate);
        self.cycle = Some(cycle);
        self.slots = [SlotState::Pending, SlotState::Pending, SlotState::Pending];
    }

    /// Store one answer. Returns false when it belongs to an older cycle or
    /// the pop-up was closed in the meantime.
    pub fn resolve(&mut self, cycle: Ticket, layer: ThematicLayer, state: SlotState) -> bool {
        if !self.visible || self.cycle != Some(cycle) {
            return false;
        }
        self.slots[layer.index()] = state;
        true
    }

    /// Hide the pop-up. In-flight answers are discarded when they arrive.
    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|s| !matches!(s, SlotState::Pending))
    }
}
