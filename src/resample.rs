use super::hourrange::HourRange;
use super::normalize::CanonicalRecord;
use super::DT_FORMAT;
use chrono::{NaiveDateTime, Timelike};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// The hourly load forecast time series:
/// one entry per hour, no gaps, None where no value is known yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourlySeries {
    pub time: Vec<NaiveDateTime>,
    pub load: Vec<Option<f64>>,
}

impl HourlySeries {
    pub fn new(capacity: usize) -> HourlySeries {
        HourlySeries {
            time: Vec::with_capacity(capacity),
            load: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDateTime, Option<f64>)> + '_ {
        self.time.iter().copied().zip(self.load.iter().copied())
    }

    /// first and last hour, None for an empty series
    pub fn span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        Some((*self.time.first()?, *self.time.last()?))
    }
}

/// csv text of the series, used for trace logging
impl std::fmt::Display for HourlySeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "datetime,load_fcst")?;
        for (t, w) in self.iter() {
            match w {
                Some(w) => writeln!(f, "{},{}", t.format(DT_FORMAT), w)?,
                None => writeln!(f, "{},", t.format(DT_FORMAT))?,
            }
        }
        Ok(())
    }
}

/// What the resampling did to the rows it was given.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResampleReport {
    pub rows: usize,
    /// rows without a datetime, they cannot be placed in an hour
    pub dropped_null_datetime: usize,
    pub hours: usize,
    /// hours that got their value from the forward-fill
    pub filled: usize,
    /// hours still None after the forward-fill
    pub leading_null: usize,
}

pub fn floor_hour(dt: NaiveDateTime) -> NaiveDateTime {
    dt.date().and_hms_opt(dt.hour(), 0, 0).unwrap_or(dt)
}

/// Resamples (datetime, load) pairs to one value per hour:
/// mean of the non-null loads in each hour, every hour between the first and the last one,
/// then forward-fill of the hours without a value.
/// Pairs without datetime are dropped here (and counted in the report).
pub fn resample_hourly<I>(pairs: I) -> (HourlySeries, ResampleReport)
where
    I: IntoIterator<Item = (Option<NaiveDateTime>, Option<f64>)>,
{
    let mut report = ResampleReport::default();
    // hour -> (sum, count) of the non-null loads
    let mut buckets: BTreeMap<NaiveDateTime, (f64, usize)> = BTreeMap::new();
    for (dt, load) in pairs {
        report.rows += 1;
        let dt = match dt {
            Some(dt) => dt,
            None => {
                report.dropped_null_datetime += 1;
                continue;
            }
        };
        let bucket = buckets.entry(floor_hour(dt)).or_insert((0., 0));
        if let Some(w) = load {
            bucket.0 += w;
            bucket.1 += 1;
        }
    }
    if report.dropped_null_datetime > 0 {
        warn!(
            dropped = report.dropped_null_datetime,
            rows = report.rows,
            "dropping rows without datetime before resampling"
        );
    }

    let (first, last) = match (buckets.keys().next(), buckets.keys().next_back()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => {
            debug!(rows = report.rows, "nothing to resample");
            return (HourlySeries::new(0), report);
        }
    };

    let hours = HourRange::new(first, last);
    let mut series = HourlySeries::new(hours.len());
    let mut previous: Option<f64> = None;
    for hour in hours {
        let mean = buckets
            .get(&hour)
            .filter(|(_, n)| *n > 0)
            .map(|(sum, n)| sum / *n as f64);
        let value = match mean {
            Some(w) => {
                previous = Some(w);
                Some(w)
            }
            None if previous.is_some() => {
                report.filled += 1;
                previous
            }
            None => {
                report.leading_null += 1;
                None
            }
        };
        series.time.push(hour);
        series.load.push(value);
    }
    report.hours = series.len();
    debug!(
        hours = report.hours,
        filled = report.filled,
        leading_null = report.leading_null,
        "resampled to hourly"
    );
    (series, report)
}

/// `resample_hourly` over the datetime and load of canonical records
pub fn resample_records(records: &[CanonicalRecord]) -> (HourlySeries, ResampleReport) {
    resample_hourly(records.iter().map(|r| (r.datetime, r.load_fcst)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn empty_input_gives_empty_series() {
        let (series, report) = resample_hourly(Vec::<(Option<NaiveDateTime>, Option<f64>)>::new());
        assert!(series.is_empty());
        assert_eq!(report, ResampleReport::default());
    }

    #[test]
    fn only_null_datetimes_gives_empty_series() {
        let (series, report) = resample_hourly(vec![(None::<NaiveDateTime>, Some(1.)), (None, None)]);
        assert!(series.is_empty());
        assert_eq!(report.dropped_null_datetime, 2);
    }

    #[test]
    fn duplicate_hours_are_averaged() {
        let (series, _) = resample_hourly(vec![(Some(at(14)), Some(10.)), (Some(at(14)), Some(20.))]);
        assert_eq!(series.time, vec![at(14)]);
        assert_eq!(series.load, vec![Some(15.0)]);
    }

    #[test]
    fn minutes_fall_in_their_hour() {
        let half_past = at(14) + chrono::Duration::minutes(30);
        let (series, _) = resample_hourly(vec![(Some(half_past), Some(4.)), (Some(at(14)), Some(2.))]);
        assert_eq!(series.time, vec![at(14)]);
        assert_eq!(series.load, vec![Some(3.)]);
    }

    #[test]
    fn nulls_are_ignored_in_the_mean() {
        let (series, _) = resample_hourly(vec![(Some(at(1)), None), (Some(at(1)), Some(7.))]);
        assert_eq!(series.load, vec![Some(7.)]);
    }

    #[test]
    fn gaps_are_forward_filled() {
        let (series, report) = resample_hourly(vec![(Some(at(1)), Some(10.)), (Some(at(4)), Some(20.))]);
        assert_eq!(series.time, vec![at(1), at(2), at(3), at(4)]);
        assert_eq!(series.load, vec![Some(10.), Some(10.), Some(10.), Some(20.)]);
        assert_eq!(report.filled, 2);
    }

    #[test]
    fn all_null_bucket_is_forward_filled() {
        let (series, _) = resample_hourly(vec![
            (Some(at(1)), Some(10.)),
            (Some(at(2)), None),
            (Some(at(3)), Some(30.)),
        ]);
        assert_eq!(series.load, vec![Some(10.), Some(10.), Some(30.)]);
    }

    #[test]
    fn leading_nulls_are_not_back_filled() {
        let (series, report) = resample_hourly(vec![
            (Some(at(0)), None),
            (Some(at(1)), None),
            (Some(at(2)), None),
            (Some(at(3)), Some(5.)),
            (Some(at(5)), Some(6.)),
        ]);
        assert_eq!(
            series.load,
            vec![None, None, None, Some(5.), Some(5.), Some(6.)]
        );
        assert_eq!(report.leading_null, 3);
        assert_eq!(report.filled, 1);
    }

    #[test]
    fn one_row_per_hour_between_min_and_max() {
        // unsorted, with a null datetime in the middle
        let pairs = vec![
            (Some(at(20)), Some(1.)),
            (Some(at(3)), Some(2.)),
            (None, Some(3.)),
            (Some(at(11)), Some(4.)),
        ];
        let (series, report) = resample_hourly(pairs);
        assert_eq!(series.len(), 20 - 3 + 1);
        assert_eq!(series.span(), Some((at(3), at(20))));
        assert_eq!(report.rows, 4);
        assert_eq!(report.dropped_null_datetime, 1);
        assert!(series.time.windows(2).all(|w| w[1] - w[0] == chrono::Duration::hours(1)));
    }

    #[test]
    fn resampling_is_idempotent() {
        let pairs: Vec<_> = (0..24).map(|h| (Some(at(h)), Some(h as f64 * 1.5))).collect();
        let (once, _) = resample_hourly(pairs);
        let (twice, report) = resample_hourly(once.iter().map(|(t, w)| (Some(t), w)));
        assert_eq!(once, twice);
        assert_eq!(report.filled, 0);
    }

    #[test]
    fn displays_as_csv() {
        let (series, _) = resample_hourly(vec![(Some(at(0)), None), (Some(at(1)), Some(2.5))]);
        assert_eq!(
            series.to_string(),
            "datetime,load_fcst\n2024-03-05 00:00:00,\n2024-03-05 01:00:00,2.5\n"
        );
    }
}
