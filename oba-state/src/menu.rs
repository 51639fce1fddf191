//! Scope and period selection.
//!
//! Region, Watershed, Drainage and County are the top-level states. Entering
//! one resets the secondary selection to that kind's default; the secondary
//! pick is always a structured value, never a display string.

use oba_core::config::Endpoints;
use oba_core::download::download_url;
use oba_core::layer::ThematicLayer;
use oba_core::period::YearMonth;
use oba_core::scope::{CodeName, Scope, ScopeKind, Watershed};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MenuError {
    #[error("{0} is not selected")]
    WrongKind(ScopeKind),

    #[error("Unknown entity code {0}")]
    UnknownEntity(u64),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MenuEvent {
    SelectKind(ScopeKind),
    SelectWatershed(Watershed),
    SelectEntity(CodeName),
    SetPeriod(YearMonth),
}

/// What a menu event changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuChange {
    pub kind_changed: bool,
    pub scope_changed: bool,
    pub period_changed: bool,
}

impl MenuChange {
    pub fn is_empty(&self) -> bool {
        !(self.kind_changed || self.scope_changed || self.period_changed)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuState {
    scope: Scope,
    period: YearMonth,
    entities: Vec<CodeName>,
}

impl Default for MenuState {
    fn default() -> Self {
        Self {
            scope: Scope::Region,
            period: YearMonth::default(),
            entities: Vec::new(),
        }
    }
}

impl MenuState {
    pub fn kind(&self) -> ScopeKind {
        self.scope.kind()
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn period(&self) -> YearMonth {
        self.period
    }

    /// Entities offered by the secondary picker of the current kind.
    pub fn entities(&self) -> &[CodeName] {
        &self.entities
    }

    pub fn apply(&mut self, event: MenuEvent) -> Result<MenuChange, MenuError> {
        let mut change = MenuChange::default();
        match event {
            MenuEvent::SelectKind(kind) => {
                if kind != self.kind() {
                    self.scope = Scope::default_for(kind);
                    self.entities.clear();
                    change.kind_changed = true;
                    change.scope_changed = true;
                }
            }
            MenuEvent::SelectWatershed(ws) => {
                if self.kind() != ScopeKind::Watershed {
                    return Err(MenuError::WrongKind(ScopeKind::Watershed));
                }
                let scope = Scope::Watershed(ws);
                change.scope_changed = scope != self.scope;
                self.scope = scope;
            }
            MenuEvent::SelectEntity(entity) => {
                if !self.entities.is_empty() && !self.entities.iter().any(|e| e.code == entity.code) {
                    return Err(MenuError::UnknownEntity(entity.code));
                }
                let scope = match self.kind() {
                    ScopeKind::Drainage => Scope::Drainage(entity),
                    ScopeKind::County => Scope::County(entity),
                    kind => return Err(MenuError::WrongKind(kind)),
                };
                change.scope_changed = scope != self.scope;
                self.scope = scope;
            }
            MenuEvent::SetPeriod(period) => {
                change.period_changed = period != self.period;
                self.period = period;
            }
        }
        Ok(change)
    }

    /// Install a fetched entity list. Ignored if the user has since left `kind`.
    pub fn set_entities(&mut self, kind: ScopeKind, mut entities: Vec<CodeName>) -> bool {
        if kind != self.kind() {
            return false;
        }
        entities.sort_by(|a, b| a.name.cmp(&b.name));
        self.entities = entities;
        true
    }

    /// Raster download links for the current selection.
    pub fn download_links(&self, endpoints: &Endpoints) -> Vec<(ThematicLayer, String)> {
        ThematicLayer::ALL
            .into_iter()
            .filter_map(|layer| {
                download_url(endpoints, &self.scope, self.period, layer).map(|url| (layer, url))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entering_kind_resets_secondary() {
        let mut menu = MenuState::default();
        let change = menu.apply(MenuEvent::SelectKind(ScopeKind::County)).unwrap();
        assert!(change.kind_changed && change.scope_changed);
        assert_eq!(menu.scope(), &Scope::County(CodeName::new(2903201, "BARREIRAS")));

        menu.set_entities(
            ScopeKind::County,
            vec![CodeName::new(2900702, "ANGICAL"), CodeName::new(2903201, "BARREIRAS")],
        );
        menu.apply(MenuEvent::SelectEntity(CodeName::new(2900702, "ANGICAL")))
            .unwrap();

        menu.apply(MenuEvent::SelectKind(ScopeKind::Drainage)).unwrap();
        assert_eq!(
            menu.scope(),
            &Scope::Drainage(CodeName::new(46543000, "RIO DE ONDAS"))
        );
        assert!(menu.entities().is_empty());

        menu.apply(MenuEvent::SelectKind(ScopeKind::Watershed)).unwrap();
        assert_eq!(menu.scope(), &Scope::Watershed(Watershed::Grande));
    }

    #[test]
    fn test_reselecting_kind_is_a_no_op() {
        let mut menu = MenuState::default();
        menu.apply(MenuEvent::SelectKind(ScopeKind::Watershed)).unwrap();
        menu.apply(MenuEvent::SelectWatershed(Watershed::Corrente)).unwrap();
        let change = menu.apply(MenuEvent::SelectKind(ScopeKind::Watershed)).unwrap();
        assert!(change.is_empty());
        assert_eq!(menu.scope(), &Scope::Watershed(Watershed::Corrente));
    }

    #[test]
    fn test_secondary_pick_must_fit_kind() {
        let mut menu = MenuState::default();
        assert_eq!(
            menu.apply(MenuEvent::SelectWatershed(Watershed::Grande)),
            Err(MenuError::WrongKind(ScopeKind::Watershed))
        );
        assert_eq!(
            menu.apply(MenuEvent::SelectEntity(CodeName::new(1, "X"))),
            Err(MenuError::WrongKind(ScopeKind::Region))
        );

        menu.apply(MenuEvent::SelectKind(ScopeKind::County)).unwrap();
        menu.set_entities(ScopeKind::County, vec![CodeName::new(2903201, "BARREIRAS")]);
        assert_eq!(
            menu.apply(MenuEvent::SelectEntity(CodeName::new(42, "NOWHERE"))),
            Err(MenuError::UnknownEntity(42))
        );
    }

    #[test]
    fn test_names_with_separators_survive() {
        let mut menu = MenuState::default();
        menu.apply(MenuEvent::SelectKind(ScopeKind::Drainage)).unwrap();
        let entity = CodeName::new(45910001, "RIO GRANDE - BARREIRAS");
        menu.set_entities(ScopeKind::Drainage, vec![entity.clone()]);
        menu.apply(MenuEvent::SelectEntity(entity.clone())).unwrap();
        assert_eq!(menu.scope(), &Scope::Drainage(entity));
    }

    #[test]
    fn test_late_entity_list_is_ignored() {
        let mut menu = MenuState::default();
        menu.apply(MenuEvent::SelectKind(ScopeKind::County)).unwrap();
        menu.apply(MenuEvent::SelectKind(ScopeKind::Region)).unwrap();
        assert!(!menu.set_entities(ScopeKind::County, vec![CodeName::new(1, "A")]));
        assert!(menu.entities().is_empty());
    }

    #[test]
    fn test_period_and_downloads() {
        let mut menu = MenuState::default();
        let period = YearMonth::new(2020, 12).unwrap();
        assert!(menu.apply(MenuEvent::SetPeriod(period)).unwrap().period_changed);
        assert!(menu.apply(MenuEvent::SetPeriod(period)).unwrap().is_empty());

        let links = menu.download_links(&Endpoints::default());
        assert_eq!(links.len(), 2);
        assert_eq!(
            links[1].1,
            "ftp://obahia.dea.ufv.br/irrigation/region/irrigation_2020_12.tif"
        );
    }
}
