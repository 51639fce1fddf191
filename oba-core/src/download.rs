//! Raster download links for the currently selected scope and period.

use crate::config::Endpoints;
use crate::layer::ThematicLayer;
use crate::period::YearMonth;
use crate::scope::Scope;

/// Metric name as it appears in the download tree; other metrics substitute it.
const METRIC_TOKEN: &str = "evapotranspiration";

/// Download URL of the monthly raster behind `layer`, if one is published.
///
/// Only evapotranspiration and irrigation rasters are published; the month is
/// not zero padded in file names.
pub fn download_url(
    endpoints: &Endpoints,
    scope: &Scope,
    period: YearMonth,
    layer: ThematicLayer,
) -> Option<String> {
    let metric = match layer {
        ThematicLayer::Amount => return None,
        ThematicLayer::Evapotranspiration | ThematicLayer::Irrigation => layer.name(),
    };
    let (year, month) = (period.year(), period.month());
    let path = match scope {
        Scope::Region => format!("{METRIC_TOKEN}/region/{METRIC_TOKEN}_{year}_{month}.tif"),
        Scope::Watershed(ws) => format!(
            "{METRIC_TOKEN}/gcc/{}/{METRIC_TOKEN}_{year}_{month}.tif",
            ws.key()
        ),
        Scope::Drainage(cn) => format!(
            "{METRIC_TOKEN}/drainage/{code}/{METRIC_TOKEN}_{code}_{year}_{month}.tif",
            code = cn.code
        ),
        Scope::County(cn) => format!(
            "{METRIC_TOKEN}/counties/{METRIC_TOKEN}_{}_{year}_{month}.tif",
            cn.code
        ),
    };
    Some(format!(
        "{}/{}",
        endpoints.download_root(),
        path.replace(METRIC_TOKEN, metric)
    ))
}
