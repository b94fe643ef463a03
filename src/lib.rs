pub mod error;
pub mod hourrange;
pub mod html;
pub mod logging;
pub mod normalize;
pub mod pipeline;
pub mod plot;
pub mod record;
pub mod report;
pub mod resample;
pub mod svg;

pub use error::{Error, Result};
pub use normalize::{normalize, CanonicalRecord};
pub use pipeline::{run_report, run_series, ForecastPanel, SeriesSpec};
pub use record::{read_archive, RawRecord};
pub use resample::{resample_hourly, resample_records, HourlySeries, ResampleReport};

pub const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

pub const DT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const REVISION_FORMAT: &str = "%d/%m/%Y %H:%M";

pub const COL_DATE: &str = "date";
pub const COL_TIME: &str = "time";
pub const COL_LOAD_FCST: &str = "load_fcst";
pub const COL_REVISION: &str = "revision";

/// None for an empty slice
pub fn min_and_max<T: std::cmp::PartialOrd + Copy>(s: &[T]) -> Option<(T, T)> {
    let mut self_iter = s.iter();
    let (mut min, mut max) = match self_iter.next() {
        Some(v) => (*v, *v),
        None => return None,
    };
    for es in self_iter {
        if *es > max {
            max = *es
        }
        if *es < min {
            min = *es
        }
    }
    Some((min, max))
}

pub fn suitable_xfmt(d: chrono::Duration) -> &'static str {
    if d > chrono::Duration::weeks(1) {
        "%y-%m-%d"
    } else if d > chrono::Duration::days(1) {
        "%m-%d %H"
    } else {
        "%d %H:%M"
    }
}
