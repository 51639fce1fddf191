//! Spatial scopes: the region as a whole, a watershed, a drainage basin or a county.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level scope category picked in the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScopeKind {
    Region,
    Watershed,
    Drainage,
    County,
}

impl ScopeKind {
    pub const ALL: [ScopeKind; 4] = [
        ScopeKind::Region,
        ScopeKind::Watershed,
        ScopeKind::Drainage,
        ScopeKind::County,
    ];

    /// Stable identifier used in select values.
    pub fn slug(&self) -> &'static str {
        match self {
            ScopeKind::Region => "regional",
            ScopeKind::Watershed => "gcc",
            ScopeKind::Drainage => "drainage",
            ScopeKind::County => "counties",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        ScopeKind::ALL.into_iter().find(|k| k.slug() == slug)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScopeKind::Region => "Region",
            ScopeKind::Watershed => "Watershed",
            ScopeKind::Drainage => "Drainage basin",
            ScopeKind::County => "County",
        }
    }

    /// Suffix of the per-scope mapfiles (`amountCounties.map`).
    pub fn mapfile_suffix(&self) -> &'static str {
        match self {
            ScopeKind::Region => "Region",
            ScopeKind::Watershed => "Watersheds",
            ScopeKind::Drainage => "Drainage",
            ScopeKind::County => "Counties",
        }
    }

    /// Table name sent to `geom/`. The region has no geometry table.
    pub fn geometry_table(&self) -> Option<&'static str> {
        match self {
            ScopeKind::Region => None,
            ScopeKind::Watershed => Some("gcc"),
            ScopeKind::Drainage => Some("drainage"),
            ScopeKind::County => Some("counties"),
        }
    }

    /// Stats endpoint path, relative to the API base URL.
    pub fn stats_endpoint(&self) -> &'static str {
        match self {
            ScopeKind::Region => "irrigation/",
            ScopeKind::Watershed => "irrigationgccstats/",
            ScopeKind::Drainage => "irrigationdrainstats/",
            ScopeKind::County => "irrigationcountiesstats/",
        }
    }

    /// Whether the secondary picker is populated from the geometry API.
    pub fn has_entity_list(&self) -> bool {
        matches!(self, ScopeKind::Drainage | ScopeKind::County)
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The three managed watersheds (GCC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Watershed {
    Grande,
    Corrente,
    Carinhanha,
}

impl Watershed {
    pub const ALL: [Watershed; 3] = [Watershed::Grande, Watershed::Corrente, Watershed::Carinhanha];

    pub fn name(&self) -> &'static str {
        match self {
            Watershed::Grande => "Grande",
            Watershed::Corrente => "Corrente",
            Watershed::Carinhanha => "Carinhanha",
        }
    }

    /// Lower-case key used as the `ws` WMS parameter and the `gcc` stats key.
    pub fn key(&self) -> String {
        self.name().to_lowercase()
    }

    /// Upper-case name as stored in the geometry table.
    pub fn geometry_name(&self) -> String {
        self.name().to_uppercase()
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Watershed::ALL
            .into_iter()
            .find(|w| w.name().eq_ignore_ascii_case(name.trim()))
    }
}

/// A drainage basin or county: numeric code plus display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodeName {
    pub code: u64,
    pub name: String,
}

impl CodeName {
    pub fn new(code: u64, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
        }
    }
}

impl fmt::Display for CodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

/// A fully resolved scope: the category plus its key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    Region,
    Watershed(Watershed),
    Drainage(CodeName),
    County(CodeName),
}

impl Scope {
    pub fn kind(&self) -> ScopeKind {
        match self {
            Scope::Region => ScopeKind::Region,
            Scope::Watershed(_) => ScopeKind::Watershed,
            Scope::Drainage(_) => ScopeKind::Drainage,
            Scope::County(_) => ScopeKind::County,
        }
    }

    /// The scope each category opens on.
    pub fn default_for(kind: ScopeKind) -> Scope {
        match kind {
            ScopeKind::Region => Scope::Region,
            ScopeKind::Watershed => Scope::Watershed(Watershed::Grande),
            ScopeKind::Drainage => Scope::Drainage(CodeName::new(46543000, "RIO DE ONDAS")),
            ScopeKind::County => Scope::County(CodeName::new(2903201, "BARREIRAS")),
        }
    }

    /// Extra WMS parameter selecting the scope inside a mapfile, if any.
    pub fn wms_key(&self) -> Option<(&'static str, String)> {
        match self {
            Scope::Region => None,
            Scope::Watershed(ws) => Some(("ws", ws.key())),
            Scope::Drainage(cn) | Scope::County(cn) => Some(("code", cn.code.to_string())),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Scope::Region => "Western Bahia".to_string(),
            Scope::Watershed(ws) => ws.name().to_string(),
            Scope::Drainage(cn) | Scope::County(cn) => cn.to_string(),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind(), self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trip() {
        for kind in ScopeKind::ALL {
            assert_eq!(ScopeKind::from_slug(kind.slug()), Some(kind));
        }
        assert_eq!(ScopeKind::from_slug("nowhere"), None);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Scope::default_for(ScopeKind::Region), Scope::Region);
        assert_eq!(
            Scope::default_for(ScopeKind::County),
            Scope::County(CodeName::new(2903201, "BARREIRAS"))
        );
        assert_eq!(
            Scope::default_for(ScopeKind::Watershed),
            Scope::Watershed(Watershed::Grande)
        );
    }

    #[test]
    fn test_wms_keys() {
        assert_eq!(Scope::Region.wms_key(), None);
        assert_eq!(
            Scope::Watershed(Watershed::Corrente).wms_key(),
            Some(("ws", "corrente".to_string()))
        );
        assert_eq!(
            Scope::default_for(ScopeKind::Drainage).wms_key(),
            Some(("code", "46543000".to_string()))
        );
    }

    #[test]
    fn test_watershed_names() {
        assert_eq!(Watershed::from_name("grande"), Some(Watershed::Grande));
        assert_eq!(Watershed::from_name("CARINHANHA"), Some(Watershed::Carinhanha));
        assert_eq!(Watershed::Corrente.geometry_name(), "CORRENTE");
        assert_eq!(Watershed::from_name("Amazonas"), None);
    }

    #[test]
    fn test_names_with_separator_survive() {
        // Names may contain " - "; the code travels separately.
        let cn = CodeName::new(42, "SAO DESIDERIO - NORTE");
        let scope = Scope::County(cn.clone());
        assert_eq!(scope.wms_key(), Some(("code", "42".to_string())));
        assert_eq!(scope.label(), "SAO DESIDERIO - NORTE (42)");
    }

    #[test]
    fn test_secondary_requirements() {
        assert!(!ScopeKind::Watershed.has_entity_list());
        assert!(ScopeKind::County.has_entity_list());
        assert_eq!(ScopeKind::Region.geometry_table(), None);
    }
}
