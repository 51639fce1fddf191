//! Layer visibility and opacity.
//!
//! The three thematic layers are mutually exclusive; reference layers are
//! toggled independently but only where the current scope offers them.

use crate::command::MapCommand;
use oba_core::layer::{LayerError, LayerId, StaticLayer, ThematicLayer};
use oba_core::scope::ScopeKind;
use std::collections::BTreeMap;

pub const DEFAULT_OPACITY: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct LayerCoordinator {
    kind: ScopeKind,
    active: ThematicLayer,
    statics: BTreeMap<StaticLayer, bool>,
    opacity: BTreeMap<LayerId, f64>,
}

impl LayerCoordinator {
    pub fn new(kind: ScopeKind) -> Self {
        Self {
            kind,
            active: ThematicLayer::Amount,
            statics: StaticLayer::ALL
                .into_iter()
                .map(|layer| (layer, layer.default_visible(kind)))
                .collect(),
            opacity: LayerId::all().map(|id| (id, DEFAULT_OPACITY)).collect(),
        }
    }

    pub fn active(&self) -> ThematicLayer {
        self.active
    }

    pub fn is_visible(&self, layer: LayerId) -> bool {
        match layer {
            LayerId::Thematic(layer) => layer == self.active,
            LayerId::Static(layer) => self.statics.get(&layer).copied().unwrap_or(false),
        }
    }

    pub fn opacity(&self, layer: LayerId) -> f64 {
        self.opacity.get(&layer).copied().unwrap_or(DEFAULT_OPACITY)
    }

    /// Make `layer` the only visible thematic layer.
    pub fn set_thematic_layer(&mut self, layer: ThematicLayer) -> Vec<MapCommand> {
        if layer == self.active {
            return Vec::new();
        }
        let previous = std::mem::replace(&mut self.active, layer);
        log::debug!("Thematic layer {} -> {}", previous.name(), layer.name());
        vec![
            MapCommand::SetVisible {
                layer: previous.name(),
                visible: false,
            },
            MapCommand::RefreshSource {
                layer: previous.name(),
            },
            MapCommand::SetVisible {
                layer: layer.name(),
                visible: true,
            },
            MapCommand::RefreshSource {
                layer: layer.name(),
            },
        ]
    }

    pub fn set_static_layer_visible(
        &mut self,
        layer: StaticLayer,
        visible: bool,
    ) -> Result<Vec<MapCommand>, LayerError> {
        if !layer.available_in(self.kind) {
            return Err(LayerError::Unavailable {
                layer: layer.name(),
                scope: self.kind.label(),
            });
        }
        if self.statics.insert(layer, visible) == Some(visible) {
            return Ok(Vec::new());
        }
        Ok(vec![
            MapCommand::SetVisible {
                layer: layer.name(),
                visible,
            },
            MapCommand::RefreshSource {
                layer: layer.name(),
            },
        ])
    }

    /// Set opacity without touching visibility. Values outside [0, 1] are clamped.
    pub fn set_opacity(&mut self, layer: LayerId, value: f64) -> Result<MapCommand, LayerError> {
        if !value.is_finite() {
            return Err(LayerError::InvalidOpacity(value));
        }
        let opacity = value.clamp(0.0, 1.0);
        self.opacity.insert(layer, opacity);
        Ok(MapCommand::SetOpacity {
            layer: layer.name(),
            opacity,
        })
    }

    /// Name-addressed form of the setters used by the layer switcher.
    pub fn set_visible_by_name(
        &mut self,
        name: &str,
        visible: bool,
    ) -> Result<Vec<MapCommand>, LayerError> {
        match name.parse::<LayerId>()? {
            LayerId::Thematic(layer) if visible => Ok(self.set_thematic_layer(layer)),
            // Hiding the active thematic layer would leave none visible.
            LayerId::Thematic(_) => Ok(Vec::new()),
            LayerId::Static(layer) => self.set_static_layer_visible(layer, visible),
        }
    }

    /// Reset reference layers to the defaults of a newly entered scope kind.
    pub fn enter_scope(&mut self, kind: ScopeKind) -> Vec<MapCommand> {
        self.kind = kind;
        let mut commands = Vec::new();
        for layer in StaticLayer::ALL {
            let visible = layer.available_in(kind) && layer.default_visible(kind);
            if self.statics.insert(layer, visible) != Some(visible) {
                commands.push(MapCommand::SetVisible {
                    layer: layer.name(),
                    visible,
                });
                commands.push(MapCommand::RefreshSource { layer: layer.name() });
            }
        }
        commands
    }

    /// Commands bringing a fresh renderer in line with this state.
    pub fn sync_commands(&self) -> Vec<MapCommand> {
        LayerId::all()
            .flat_map(|id| {
                [
                    MapCommand::SetVisible {
                        layer: id.name(),
                        visible: self.is_visible(id),
                    },
                    MapCommand::SetOpacity {
                        layer: id.name(),
                        opacity: self.opacity(id),
                    },
                ]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn visible_thematic(coordinator: &LayerCoordinator) -> usize {
        ThematicLayer::ALL
            .into_iter()
            .filter(|l| coordinator.is_visible(LayerId::Thematic(*l)))
            .count()
    }

    #[test]
    fn test_switch_emits_refresh_for_both_layers() {
        let mut coordinator = LayerCoordinator::new(ScopeKind::Region);
        let commands = coordinator.set_thematic_layer(ThematicLayer::Irrigation);
        assert_eq!(coordinator.active(), ThematicLayer::Irrigation);
        let refreshed: Vec<_> = commands
            .iter()
            .filter(|c| matches!(c, MapCommand::RefreshSource { .. }))
            .filter_map(MapCommand::layer)
            .collect();
        assert_eq!(refreshed, vec!["amount", "irrigation"]);
        assert!(coordinator.set_thematic_layer(ThematicLayer::Irrigation).is_empty());
    }

    #[test]
    fn test_static_layers_are_independent() {
        let mut coordinator = LayerCoordinator::new(ScopeKind::Region);
        assert!(coordinator.is_visible(StaticLayer::Watersheds.into()));
        coordinator
            .set_static_layer_visible(StaticLayer::Highways, true)
            .unwrap();
        coordinator.set_thematic_layer(ThematicLayer::Evapotranspiration);
        assert!(coordinator.is_visible(StaticLayer::Highways.into()));
        assert!(coordinator.is_visible(StaticLayer::Watersheds.into()));
    }

    #[test]
    fn test_unavailable_static_layer_is_rejected() {
        let mut coordinator = LayerCoordinator::new(ScopeKind::County);
        assert!(matches!(
            coordinator.set_static_layer_visible(StaticLayer::FlowStations, true),
            Err(LayerError::Unavailable { .. })
        ));
        let commands = coordinator.enter_scope(ScopeKind::Drainage);
        assert!(coordinator.is_visible(StaticLayer::FlowStations.into()));
        let stations = StaticLayer::FlowStations.name();
        assert!(commands.contains(&MapCommand::SetVisible {
            layer: stations,
            visible: true
        }));
        assert!(commands.contains(&MapCommand::RefreshSource { layer: stations }));
        // Every toggle is paired with a refresh, as with a manual toggle.
        let toggled = commands
            .iter()
            .filter(|c| matches!(c, MapCommand::SetVisible { .. }))
            .count();
        let refreshed = commands
            .iter()
            .filter(|c| matches!(c, MapCommand::RefreshSource { .. }))
            .count();
        assert_eq!(toggled, refreshed);
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let mut coordinator = LayerCoordinator::new(ScopeKind::Region);
        assert_eq!(
            coordinator.set_visible_by_name("rainfall", true),
            Err(LayerError::Unknown("rainfall".to_string()))
        );
        coordinator.set_visible_by_name("irrigation", false).unwrap();
        assert_eq!(visible_thematic(&coordinator), 1);
    }

    #[test]
    fn test_opacity_clamps_and_keeps_visibility() {
        let mut coordinator = LayerCoordinator::new(ScopeKind::Region);
        let amount = LayerId::Thematic(ThematicLayer::Amount);
        assert_eq!(
            coordinator.set_opacity(amount, 1.7).unwrap(),
            MapCommand::SetOpacity {
                layer: "amount",
                opacity: 1.0
            }
        );
        coordinator.set_opacity(amount, -0.2).unwrap();
        assert_eq!(coordinator.opacity(amount), 0.0);
        assert!(coordinator.is_visible(amount));
        assert!(matches!(
            coordinator.set_opacity(amount, f64::NAN),
            Err(LayerError::InvalidOpacity(_))
        ));
        assert_eq!(coordinator.opacity(amount), 0.0);
    }

    #[test]
    fn test_sync_commands_cover_every_layer() {
        let coordinator = LayerCoordinator::new(ScopeKind::Region);
        let commands = coordinator.sync_commands();
        assert_eq!(commands.len(), LayerId::all().count() * 2);
    }

    fn thematic() -> impl Strategy<Value = ThematicLayer> {
        prop_oneof![
            Just(ThematicLayer::Amount),
            Just(ThematicLayer::Evapotranspiration),
            Just(ThematicLayer::Irrigation),
        ]
    }

    proptest! {
        #[test]
        fn exactly_one_thematic_layer_visible(layers in prop::collection::vec(thematic(), 1..40)) {
            let mut coordinator = LayerCoordinator::new(ScopeKind::Region);
            for layer in layers {
                coordinator.set_thematic_layer(layer);
                prop_assert_eq!(visible_thematic(&coordinator), 1);
                prop_assert!(coordinator.is_visible(LayerId::Thematic(layer)));
            }
        }
    }
}
