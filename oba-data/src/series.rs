//! Decomposition of stats records into index-aligned series.

use crate::metrics::{metrics_for, Metric, MetricStyle};
use chrono::NaiveDate;
use oba_core::scope::ScopeKind;
use oba_core::stats::StatsRecord;
use oba_utils::dates::parse_series_date;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    #[error("No records")]
    Empty,

    #[error("Record {index} has no date")]
    MissingDate { index: usize },

    #[error("Record {index} has an invalid date {value:?}")]
    InvalidDate { index: usize, value: String },

    /// The field is absent from every record, so the response is not the
    /// shape expected for this scope.
    #[error("No record carries {0}")]
    MissingMetric(&'static str),
}

/// Parallel arrays sharing one date axis. Every `values` vector has the same
/// length as `dates`; a month without a value is a `None` gap.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    kind: ScopeKind,
    dates: Vec<NaiveDate>,
    series: Vec<(MetricStyle, Vec<Option<f64>>)>,
}

impl TimeSeries {
    pub fn from_records(kind: ScopeKind, records: &[StatsRecord]) -> Result<Self, SeriesError> {
        if records.is_empty() {
            return Err(SeriesError::Empty);
        }

        let mut rows = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let raw = record
                .datestring
                .as_deref()
                .ok_or(SeriesError::MissingDate { index })?;
            let date = parse_series_date(raw).map_err(|_| SeriesError::InvalidDate {
                index,
                value: raw.to_string(),
            })?;
            rows.push((date, record));
        }
        // Stable, so same-date rows keep their server order.
        rows.sort_by_key(|(date, _)| *date);

        let dates = rows.iter().map(|(date, _)| *date).collect();
        let mut series = Vec::new();
        for style in metrics_for(kind) {
            let values: Vec<Option<f64>> = rows
                .iter()
                .map(|(_, record)| style.metric.value(record))
                .collect();
            if values.iter().all(Option::is_none) {
                return Err(SeriesError::MissingMetric(style.metric.field()));
            }
            series.push((*style, values));
        }

        log::debug!(
            "Decomposed {} {} records into {} series",
            records.len(),
            kind,
            series.len()
        );
        Ok(Self {
            kind,
            dates,
            series,
        })
    }

    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn series(&self) -> impl Iterator<Item = (&MetricStyle, &[Option<f64>])> {
        self.series.iter().map(|(style, values)| (style, values.as_slice()))
    }

    pub fn values(&self, metric: Metric) -> Option<&[Option<f64>]> {
        self.series
            .iter()
            .find(|(style, _)| style.metric == metric)
            .map(|(_, values)| values.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, amount: f64, flow: f64, area: f64) -> StatsRecord {
        StatsRecord {
            datestring: Some(date.to_string()),
            totalamount: Some(amount),
            totalflow: Some(flow),
            totalarea: Some(area),
            ..StatsRecord::default()
        }
    }

    #[test]
    fn test_arrays_are_index_aligned() {
        let records = vec![
            record("2001-01-15", 1.0, 10.0, 100.0),
            record("2001-02-15", 2.0, 20.0, 200.0),
            record("2001-03-15", 3.0, 30.0, 300.0),
        ];
        let series = TimeSeries::from_records(ScopeKind::Watershed, &records).unwrap();
        assert_eq!(series.len(), 3);
        for (_, values) in series.series() {
            assert_eq!(values.len(), 3);
        }
        assert_eq!(
            series.values(Metric::Flow).unwrap(),
            &[Some(10.0), Some(20.0), Some(30.0)]
        );
        assert_eq!(series.values(Metric::Volume), None);
        assert_eq!(
            series.dates().last().copied(),
            NaiveDate::from_ymd_opt(2001, 3, 15)
        );
    }

    #[test]
    fn test_rows_are_ordered_by_date() {
        let records = vec![
            record("2001-02-15", 2.0, 20.0, 200.0),
            record("2001-01-15", 1.0, 10.0, 100.0),
        ];
        let series = TimeSeries::from_records(ScopeKind::Drainage, &records).unwrap();
        assert_eq!(series.values(Metric::Amount).unwrap(), &[Some(1.0), Some(2.0)]);
        assert_eq!(series.values(Metric::Area).unwrap(), &[Some(100.0), Some(200.0)]);
    }

    #[test]
    fn test_gaps_keep_alignment() {
        let mut gap = record("2001-02-15", 2.0, 20.0, 200.0);
        gap.totalflow = None;
        let records = vec![record("2001-01-15", 1.0, 10.0, 100.0), gap];
        let series = TimeSeries::from_records(ScopeKind::Drainage, &records).unwrap();
        assert_eq!(series.values(Metric::Flow).unwrap(), &[Some(10.0), None]);
    }

    #[test]
    fn test_malformed_input_is_an_error() {
        assert_eq!(
            TimeSeries::from_records(ScopeKind::Region, &[]),
            Err(SeriesError::Empty)
        );

        let mut undated = record("2001-01-15", 1.0, 1.0, 1.0);
        undated.datestring = None;
        assert_eq!(
            TimeSeries::from_records(ScopeKind::Drainage, &[undated]),
            Err(SeriesError::MissingDate { index: 0 })
        );

        let bad_date = record("January", 1.0, 1.0, 1.0);
        assert!(matches!(
            TimeSeries::from_records(ScopeKind::Drainage, &[bad_date]),
            Err(SeriesError::InvalidDate { index: 0, .. })
        ));

        // Region also plots volume, which these records never carry.
        let records = vec![record("2001-01-15", 1.0, 1.0, 1.0)];
        assert_eq!(
            TimeSeries::from_records(ScopeKind::Region, &records),
            Err(SeriesError::MissingMetric("totalvolume"))
        );
    }

    #[test]
    fn test_from_wire_json() {
        let records: Vec<StatsRecord> = serde_json::from_str(
            r#"[{"datestring":"2020-11-15","totalamount":"1.5","totalflow":"0.2","totalarea":"10","totalevapo":"90.1"},
                {"datestring":"2020-12-15","totalamount":2,"totalflow":0.3,"totalarea":11,"totalevapo":95}]"#,
        )
        .unwrap();
        let series = TimeSeries::from_records(ScopeKind::County, &records).unwrap();
        assert_eq!(
            series.values(Metric::Evapotranspiration).unwrap(),
            &[Some(90.1), Some(95.0)]
        );
    }
}
