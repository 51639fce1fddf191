//! Declarative multi-axis chart description handed to the JS renderer.

use crate::series::TimeSeries;
use oba_utils::dates::format_date;
use serde::Serialize;

/// Left end of the x-axis: the mid-month date of the first published period.
pub const X_AXIS_START: &str = "2001-01-15";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trace {
    pub name: String,
    pub unit: String,
    pub color: String,
    /// 1-based y-axis index (`y`, `y2`, ...).
    pub axis: usize,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub title: String,
    pub color: String,
}

/// One time axis, one independently scaled y-axis per trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub title: String,
    pub dates: Vec<String>,
    pub traces: Vec<Trace>,
    pub axes: Vec<Axis>,
    pub x_range: [String; 2],
}

impl ChartSpec {
    pub fn from_series(title: impl Into<String>, series: &TimeSeries) -> Self {
        let dates: Vec<String> = series.dates().iter().map(format_date).collect();
        let mut traces = Vec::new();
        let mut axes = Vec::new();
        for (i, (style, values)) in series.series().enumerate() {
            let metric = style.metric;
            traces.push(Trace {
                name: metric.label().to_string(),
                unit: metric.unit().to_string(),
                color: style.color.to_string(),
                axis: i + 1,
                values: values.to_vec(),
            });
            axes.push(Axis {
                title: format!("{} ({})", metric.label(), metric.unit()),
                color: style.color.to_string(),
            });
        }
        let x_end = dates
            .last()
            .cloned()
            .unwrap_or_else(|| X_AXIS_START.to_string());
        Self {
            title: title.into(),
            dates,
            traces,
            axes,
            x_range: [X_AXIS_START.to_string(), x_end],
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oba_core::scope::ScopeKind;
    use oba_core::stats::StatsRecord;

    fn county_series() -> TimeSeries {
        let records: Vec<StatsRecord> = (1..=3)
            .map(|m| StatsRecord {
                datestring: Some(format!("2020-{:02}-15", m)),
                totalamount: Some(m as f64),
                totalflow: Some(0.1 * m as f64),
                totalarea: Some(10.0 * m as f64),
                totalevapo: Some(80.0 + m as f64),
                ..StatsRecord::default()
            })
            .collect();
        TimeSeries::from_records(ScopeKind::County, &records).unwrap()
    }

    #[test]
    fn test_one_axis_per_trace_colored_like_it() {
        let spec = ChartSpec::from_series("BARREIRAS", &county_series());
        assert_eq!(spec.traces.len(), 4);
        assert_eq!(spec.axes.len(), 4);
        for (trace, axis) in spec.traces.iter().zip(&spec.axes) {
            assert_eq!(trace.color, axis.color);
            assert_eq!(trace.values.len(), spec.dates.len());
        }
        let axes: Vec<usize> = spec.traces.iter().map(|t| t.axis).collect();
        assert_eq!(axes, vec![1, 2, 3, 4]);
        assert_eq!(spec.axes[3].title, "Evapotranspiration (mm/month)");
    }

    #[test]
    fn test_x_range_and_json_shape() {
        let spec = ChartSpec::from_series("BARREIRAS", &county_series());
        assert_eq!(spec.x_range, ["2001-01-15".to_string(), "2020-03-15".to_string()]);

        let json: serde_json::Value = serde_json::from_str(&spec.to_json()).unwrap();
        assert_eq!(json["xRange"][1], "2020-03-15");
        assert_eq!(json["traces"][0]["color"], "#3e8ec4");
        assert_eq!(json["dates"][0], "2020-01-15");
    }
}
