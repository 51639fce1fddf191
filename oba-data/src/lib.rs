//! Stats processing for the dashboard charts.
//!
//! This crate turns the array-of-records answered by the stats endpoints into
//! index-aligned per-metric series, and those into the declarative chart
//! description the JS renderer consumes.

pub mod chart;
pub mod series;

pub use chart::ChartSpec;
pub use series::{SeriesError, TimeSeries};

/// Metrics plotted per scope and their styling.
pub mod metrics {
    use oba_core::layer::ThematicLayer;
    use oba_core::scope::ScopeKind;
    use oba_core::stats::StatsRecord;
    use serde::Serialize;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Metric {
        Amount,
        Volume,
        Flow,
        Area,
        Evapotranspiration,
    }

    impl Metric {
        pub fn label(&self) -> &'static str {
            match self {
                Metric::Amount => "Amount",
                Metric::Volume => "Volume",
                Metric::Flow => "Flow",
                Metric::Area => "Area",
                Metric::Evapotranspiration => "Evapotranspiration",
            }
        }

        pub fn unit(&self) -> &'static str {
            match self {
                Metric::Amount => "mm",
                Metric::Volume => "litres",
                Metric::Flow => "m³/s",
                Metric::Area => "ha",
                Metric::Evapotranspiration => "mm/month",
            }
        }

        /// Name of the record field carrying this metric.
        pub fn field(&self) -> &'static str {
            match self {
                Metric::Amount => "totalamount",
                Metric::Volume => "totalvolume",
                Metric::Flow => "totalflow",
                Metric::Area => "totalarea",
                Metric::Evapotranspiration => "totalevapo",
            }
        }

        /// Map layer showing the same quantity, whose color the series reuses.
        pub fn layer(&self) -> Option<ThematicLayer> {
            match self {
                Metric::Amount => Some(ThematicLayer::Amount),
                Metric::Evapotranspiration => Some(ThematicLayer::Evapotranspiration),
                _ => None,
            }
        }

        pub fn value(&self, record: &StatsRecord) -> Option<f64> {
            match self {
                Metric::Amount => record.totalamount,
                Metric::Volume => record.totalvolume,
                Metric::Flow => record.totalflow,
                Metric::Area => record.totalarea,
                Metric::Evapotranspiration => record.totalevapo,
            }
        }
    }

    /// A metric as plotted for one scope kind.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
    pub struct MetricStyle {
        pub metric: Metric,
        pub color: &'static str,
    }

    const fn style(metric: Metric, color: &'static str) -> MetricStyle {
        MetricStyle { metric, color }
    }

    const AMOUNT: MetricStyle = style(Metric::Amount, ThematicLayer::Amount.color());
    const EVAPOTRANSPIRATION: MetricStyle = style(
        Metric::Evapotranspiration,
        ThematicLayer::Evapotranspiration.color(),
    );

    const REGION: [MetricStyle; 4] = [
        AMOUNT,
        style(Metric::Volume, "#f76707"),
        style(Metric::Flow, "#6495ed"),
        style(Metric::Area, "#016513"),
    ];

    const WATERSHED: [MetricStyle; 3] = [
        AMOUNT,
        style(Metric::Flow, "#868e96"),
        style(Metric::Area, "#9e1e1c"),
    ];

    const DRAINAGE: [MetricStyle; 3] = [
        AMOUNT,
        style(Metric::Flow, "#f76707"),
        style(Metric::Area, "#016513"),
    ];

    const COUNTY: [MetricStyle; 4] = [
        AMOUNT,
        style(Metric::Flow, "#868e96"),
        style(Metric::Area, "#9e1e1c"),
        EVAPOTRANSPIRATION,
    ];

    /// Metrics plotted for a scope kind, in trace order.
    pub fn metrics_for(kind: ScopeKind) -> &'static [MetricStyle] {
        match kind {
            ScopeKind::Region => &REGION,
            ScopeKind::Watershed => &WATERSHED,
            ScopeKind::Drainage => &DRAINAGE,
            ScopeKind::County => &COUNTY,
        }
    }

}
