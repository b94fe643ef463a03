use super::error::Result;
use super::normalize::{normalize, NormalizeReport};
use super::record::read_archive;
use super::resample::{resample_records, HourlySeries, ResampleReport};
use std::path::PathBuf;
use tracing::{info, trace};

pub const D_LOAD_FILE: &str = "D_load_fcst_archive.csv";
pub const J_LOAD_FILE: &str = "J_load_fcst_archive.csv";

/// A named line color, the css name for the html chart and the rgb for the svg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineColor {
    pub css: &'static str,
    pub rgb: (u8, u8, u8),
}

pub const GREEN: LineColor = LineColor {
    css: "green",
    rgb: (0, 128, 0),
};
pub const RED: LineColor = LineColor {
    css: "red",
    rgb: (255, 0, 0),
};

/// One named forecast series and where to read it from.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSpec {
    pub name: &'static str,
    pub title: &'static str,
    pub path: PathBuf,
    pub color: LineColor,
}

impl SeriesSpec {
    pub fn d_load(path: PathBuf) -> SeriesSpec {
        SeriesSpec {
            name: "D",
            title: "D Load Forecast",
            path,
            color: GREEN,
        }
    }

    pub fn j_load(path: PathBuf) -> SeriesSpec {
        SeriesSpec {
            name: "J",
            title: "J Load Forecast",
            path,
            color: RED,
        }
    }
}

/// A resampled series ready to be drawn, plus what happened on the way.
#[derive(Debug, Clone)]
pub struct ForecastPanel {
    pub spec: SeriesSpec,
    pub series: HourlySeries,
    pub normalized: NormalizeReport,
    pub resampled: ResampleReport,
}

/// read -> normalize -> resample for one series
pub fn run_series(spec: &SeriesSpec) -> Result<ForecastPanel> {
    info!(series = spec.name, path = %spec.path.display(), "reading forecast archive");
    let raw = read_archive(&spec.path)?;
    let canonical = normalize(&raw);
    let normalized = NormalizeReport::from_records(&canonical);
    let (series, resampled) = resample_records(&canonical);
    match series.span() {
        Some((first, last)) => info!(
            series = spec.name,
            rows = normalized.rows,
            hours = resampled.hours,
            %first,
            %last,
            "resampled forecast to hourly"
        ),
        None => info!(
            series = spec.name,
            rows = normalized.rows,
            "no valid datetime, the resampled forecast is empty"
        ),
    }
    trace!(series = spec.name, "hourly forecast\n{}", series);
    Ok(ForecastPanel {
        spec: spec.clone(),
        series,
        normalized,
        resampled,
    })
}

/// Runs the two independent series, any structural error aborts the report.
pub fn run_report(specs: &[SeriesSpec; 2]) -> Result<[ForecastPanel; 2]> {
    Ok([run_series(&specs[0])?, run_series(&specs[1])?])
}
