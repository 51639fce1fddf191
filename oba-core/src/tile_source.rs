//! WMS tile source descriptors and the registry that builds them.
//!
//! A [`TileSourceSet`] is built for one (scope, period) pair and never
//! mutated. When either changes the registry builds a new set under the next
//! revision; feature queries are always issued from the current set, so a
//! query can never carry a stale year, month or scope key.

use crate::config::Endpoints;
use crate::error::{ApiError, Result};
use crate::geo::{Coordinate, Projection, TileGrid};
use crate::layer::{LayerId, StaticLayer, ThematicLayer};
use crate::period::YearMonth;
use crate::scope::Scope;
use reqwest::Url;
use serde::Serialize;

pub const WMS_VERSION: &str = "1.3.0";
pub const FEATURE_INFO_FORMAT: &str = "text/html";

/// Everything needed to request tiles or feature info for one layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileSourceDescriptor {
    /// Map layer this source feeds.
    pub layer: &'static str,
    /// Mapserver URL including the `map=` query.
    pub url: String,
    /// WMS `LAYERS` value.
    pub layer_name: String,
    /// Scope parameter (`code` or `ws`) and its value.
    pub scope_key: Option<(String, String)>,
    /// Period, for layers computed per month.
    pub period: Option<YearMonth>,
}

impl TileSourceDescriptor {
    /// Tile request parameters, in the order mapserver receives them.
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = Vec::with_capacity(5);
        if let Some(period) = self.period {
            params.push(("year".to_string(), period.year().to_string()));
            params.push(("month".to_string(), period.month_padded()));
        }
        if let Some((key, value)) = &self.scope_key {
            params.push((key.clone(), value.clone()));
        }
        params.push(("LAYERS".to_string(), self.layer_name.clone()));
        params.push(("TILED".to_string(), "true".to_string()));
        params
    }

    /// WMS 1.3.0 GetFeatureInfo URL for a click at `coordinate`.
    ///
    /// The request addresses the tile of the default grid that contains the
    /// point at the grid level nearest to `resolution`, with `I`/`J` the
    /// pixel offsets inside that tile.
    pub fn feature_info_url(
        &self,
        coordinate: Coordinate,
        resolution: f64,
        projection: Projection,
    ) -> Result<String> {
        if !coordinate.is_finite() {
            return Err(ApiError::InvalidUrl(format!(
                "non-finite coordinate {:?}",
                coordinate
            )));
        }
        let grid = TileGrid::for_projection(projection);
        let z = grid.z_for_resolution(resolution);
        let tile_resolution = grid.resolution(z);
        let extent = grid.tile_extent_at(coordinate, z);
        let i = ((coordinate.x - extent.min_x) / tile_resolution).floor() as i64;
        let j = ((extent.max_y - coordinate.y) / tile_resolution).floor() as i64;
        let bbox = if projection.wms13_lat_first() {
            [extent.min_y, extent.min_x, extent.max_y, extent.max_x]
        } else {
            [extent.min_x, extent.min_y, extent.max_x, extent.max_y]
        };
        let bbox = bbox
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let size = grid.tile_size().to_string();

        let mut url = Url::parse(&self.url).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("SERVICE", "WMS")
                .append_pair("VERSION", WMS_VERSION)
                .append_pair("REQUEST", "GetFeatureInfo")
                .append_pair("FORMAT", "image/png")
                .append_pair("TRANSPARENT", "true")
                .append_pair("QUERY_LAYERS", &self.layer_name);
            for (key, value) in self.params() {
                query.append_pair(&key, &value);
            }
            query
                .append_pair("INFO_FORMAT", FEATURE_INFO_FORMAT)
                .append_pair("I", &i.to_string())
                .append_pair("J", &j.to_string())
                .append_pair("WIDTH", &size)
                .append_pair("HEIGHT", &size)
                .append_pair("CRS", projection.code())
                .append_pair("STYLES", "")
                .append_pair("BBOX", &bbox);
        }
        Ok(url.into())
    }
}

/// The descriptors for every layer of one (scope, period) render.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSourceSet {
    scope: Scope,
    period: YearMonth,
    thematic: [TileSourceDescriptor; 3],
    statics: Vec<(StaticLayer, TileSourceDescriptor)>,
}

impl TileSourceSet {
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn period(&self) -> YearMonth {
        self.period
    }

    pub fn thematic(&self, layer: ThematicLayer) -> &TileSourceDescriptor {
        &self.thematic[layer.index()]
    }

    /// Source of a reference layer, if it is offered for this scope.
    pub fn static_layer(&self, layer: StaticLayer) -> Option<&TileSourceDescriptor> {
        self.statics
            .iter()
            .find(|(l, _)| *l == layer)
            .map(|(_, source)| source)
    }

    /// All sources, thematic first.
    pub fn iter(&self) -> impl Iterator<Item = (LayerId, &TileSourceDescriptor)> {
        ThematicLayer::ALL
            .into_iter()
            .map(move |l| (LayerId::Thematic(l), self.thematic(l)))
            .chain(self.statics.iter().map(|(l, s)| (LayerId::Static(*l), s)))
    }

    /// Feature-info URLs for the thematic layers, in query order.
    pub fn feature_queries(
        &self,
        coordinate: Coordinate,
        resolution: f64,
        projection: Projection,
    ) -> Result<Vec<(ThematicLayer, String)>> {
        ThematicLayer::ALL
            .into_iter()
            .map(|layer| {
                self.thematic(layer)
                    .feature_info_url(coordinate, resolution, projection)
                    .map(|url| (layer, url))
            })
            .collect()
    }
}

/// Builds [`TileSourceSet`]s against the configured mapserver.
#[derive(Debug, Clone)]
pub struct TileSourceRegistry {
    endpoints: Endpoints,
    revision: u64,
}

impl TileSourceRegistry {
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            endpoints,
            revision: 0,
        }
    }

    /// Build a fresh set for `scope` and `period`.
    pub fn build(&mut self, scope: &Scope, period: YearMonth) -> TileSourceSet {
        self.revision += 1;
        let thematic = ThematicLayer::ALL.map(|layer| self.thematic_source(scope, period, layer));
        let statics = StaticLayer::ALL
            .into_iter()
            .filter(|layer| layer.available_in(scope.kind()))
            .map(|layer| (layer, self.static_source(scope, layer)))
            .collect();
        log::debug!(
            "Built tile sources rev {} for {} at {}",
            self.revision,
            scope,
            period
        );
        TileSourceSet {
            scope: scope.clone(),
            period,
            thematic,
            statics,
        }
    }

    pub fn thematic_source(
        &self,
        scope: &Scope,
        period: YearMonth,
        layer: ThematicLayer,
    ) -> TileSourceDescriptor {
        let mapfile = format!("{}{}.map", layer.name(), scope.kind().mapfile_suffix());
        TileSourceDescriptor {
            layer: layer.name(),
            url: self.endpoints.mapfile_url(&mapfile),
            layer_name: layer.name().to_string(),
            scope_key: scope.wms_key().map(|(k, v)| (k.to_string(), v)),
            period: Some(period),
        }
    }

    pub fn static_source(&self, scope: &Scope, layer: StaticLayer) -> TileSourceDescriptor {
        // Region-wide outlines are not filtered by any key.
        let scope_key = match layer {
            StaticLayer::Watersheds | StaticLayer::Counties => None,
            _ => scope.wms_key().map(|(k, v)| (k.to_string(), v)),
        };
        TileSourceDescriptor {
            layer: layer.name(),
            url: self.endpoints.mapfile_url(&layer.mapfile(scope.kind())),
            layer_name: layer.wms_layer().to_string(),
            scope_key,
            period: None,
        }
    }

    /// Legend fragment URL for a thematic layer.
    pub fn legend_url(&self, layer: ThematicLayer, period: YearMonth) -> String {
        format!(
            "{}&mode=legend&year={}",
            self.endpoints
                .mapfile_url(&format!("{}Region.map", layer.name())),
            period.year()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::{CodeName, ScopeKind, Watershed};
    use std::collections::HashMap;

    fn query_map(url: &str) -> HashMap<String, String> {
        Url::parse(url)
            .unwrap()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    fn period() -> YearMonth {
        YearMonth::new(2020, 3).unwrap()
    }

    #[test]
    fn test_county_thematic_params() {
        let mut registry = TileSourceRegistry::new(Endpoints::default());
        let scope = Scope::County(CodeName::new(2903201, "BARREIRAS"));
        let set = registry.build(&scope, period());
        let amount = set.thematic(ThematicLayer::Amount);
        assert!(amount.url.ends_with("amountCounties.map"));
        assert_eq!(
            amount.params(),
            vec![
                ("year".to_string(), "2020".to_string()),
                ("month".to_string(), "03".to_string()),
                ("code".to_string(), "2903201".to_string()),
                ("LAYERS".to_string(), "amount".to_string()),
                ("TILED".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_watershed_uses_ws_key() {
        let mut registry = TileSourceRegistry::new(Endpoints::default());
        let set = registry.build(&Scope::Watershed(Watershed::Grande), period());
        let evapo = set.thematic(ThematicLayer::Evapotranspiration);
        assert!(evapo.url.ends_with("evapotranspirationWatersheds.map"));
        assert_eq!(
            evapo.scope_key,
            Some(("ws".to_string(), "grande".to_string()))
        );
    }

    #[test]
    fn test_statics_follow_scope() {
        let mut registry = TileSourceRegistry::new(Endpoints::default());
        let region = registry.build(&Scope::Region, period());
        assert!(region.static_layer(StaticLayer::Watersheds).is_some());
        assert!(region.static_layer(StaticLayer::FlowStations).is_none());
        assert_eq!(
            region.static_layer(StaticLayer::Highways).unwrap().layer_name,
            "Rodovias"
        );

        let drainage = registry.build(&Scope::default_for(ScopeKind::Drainage), period());
        let stations = drainage.static_layer(StaticLayer::FlowStations).unwrap();
        assert!(stations.url.ends_with("estacoesFluviometricas.map"));
        assert_eq!(stations.period, None);
        assert_eq!(
            stations.scope_key,
            Some(("code".to_string(), "46543000".to_string()))
        );
        assert!(drainage.static_layer(StaticLayer::Counties).is_none());
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let mut registry = TileSourceRegistry::new(Endpoints::default());
        let a = registry.build(&Scope::Region, period());
        let b = registry.build(&Scope::Region, period());
        assert_eq!(a, b);
        assert_eq!(a.iter().count(), 7);
    }

    #[test]
    fn test_feature_info_url() {
        let mut registry = TileSourceRegistry::new(Endpoints::default());
        let set = registry.build(&Scope::Region, period());
        let resolution = Projection::Epsg4326.max_resolution() / 128.0;
        let click = Coordinate::new(-45.2471, -12.4818);
        let url = set
            .thematic(ThematicLayer::Irrigation)
            .feature_info_url(click, resolution, Projection::Epsg4326)
            .unwrap();
        let q = query_map(&url);
        assert_eq!(q["map"], "/var/www/geodb/mapfiles/irrigationRegion.map");
        assert_eq!(q["REQUEST"], "GetFeatureInfo");
        assert_eq!(q["VERSION"], "1.3.0");
        assert_eq!(q["QUERY_LAYERS"], "irrigation");
        assert_eq!(q["LAYERS"], "irrigation");
        assert_eq!(q["INFO_FORMAT"], "text/html");
        assert_eq!(q["CRS"], "EPSG:4326");
        assert_eq!(q["year"], "2020");
        assert_eq!(q["month"], "03");
        assert_eq!(q["WIDTH"], "256");

        let i: i64 = q["I"].parse().unwrap();
        let j: i64 = q["J"].parse().unwrap();
        assert!((0..256).contains(&i));
        assert!((0..256).contains(&j));

        // Latitude first in the 1.3.0 bounding box.
        let bbox: Vec<f64> = q["BBOX"].split(',').map(|v| v.parse().unwrap()).collect();
        assert!(bbox[0] <= click.y && click.y <= bbox[2]);
        assert!(bbox[1] <= click.x && click.x <= bbox[3]);
    }

    #[test]
    fn test_feature_queries_in_fixed_order() {
        let mut registry = TileSourceRegistry::new(Endpoints::default());
        let set = registry.build(&Scope::Region, period());
        let queries = set
            .feature_queries(Coordinate::new(-45.0, -12.0), 0.01, Projection::Epsg4326)
            .unwrap();
        let layers: Vec<_> = queries.iter().map(|(l, _)| *l).collect();
        assert_eq!(layers, ThematicLayer::ALL.to_vec());
    }

    #[test]
    fn test_non_finite_click_is_rejected() {
        let mut registry = TileSourceRegistry::new(Endpoints::default());
        let set = registry.build(&Scope::Region, period());
        let result = set.thematic(ThematicLayer::Amount).feature_info_url(
            Coordinate::new(f64::NAN, 0.0),
            0.01,
            Projection::Epsg4326,
        );
        assert!(matches!(result, Err(ApiError::InvalidUrl(_))));
    }

    #[test]
    fn test_legend_url() {
        let registry = TileSourceRegistry::new(Endpoints::default());
        let url = registry.legend_url(ThematicLayer::Evapotranspiration, period());
        assert!(url.ends_with("evapotranspirationRegion.map&mode=legend&year=2020"));
    }
}
