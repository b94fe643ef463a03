use super::record::RawRecord;
use super::REVISION_FORMAT;
use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

/// A forecast row with canonical timestamps.
/// `time` is the zero-padded HHMM text the hour was taken from.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRecord {
    pub date: String,
    pub time: String,
    pub datetime: Option<NaiveDateTime>,
    pub load_fcst: Option<f64>,
    pub revision: Option<NaiveDateTime>,
}

/// counts of the values coerced to null by `normalize`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NormalizeReport {
    pub rows: usize,
    pub null_datetime: usize,
    pub null_revision: usize,
}

impl NormalizeReport {
    pub fn from_records(records: &[CanonicalRecord]) -> NormalizeReport {
        NormalizeReport {
            rows: records.len(),
            null_datetime: records.iter().filter(|r| r.datetime.is_none()).count(),
            null_revision: records.iter().filter(|r| r.revision.is_none()).count(),
        }
    }
}

/// Left pads with zeros up to `width` characters,
/// keeping a leading sign in front of the zeros.
/// Longer strings are returned unchanged.
pub fn zfill(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }
    let zeros = "0".repeat(width - len);
    match s.chars().next() {
        Some(sign @ '+') | Some(sign @ '-') => format!("{}{}{}", sign, zeros, &s[1..]),
        _ => format!("{}{}", zeros, s),
    }
}

/// Keeps timestamps that fit in i64 nanoseconds since the epoch,
/// 1677-09-21 00:12:43.145224193 to 2262-04-11 23:47:16.854775807.
pub fn within_timestamp_bounds(dt: NaiveDateTime) -> Option<NaiveDateTime> {
    let min = NaiveDate::from_ymd_opt(1677, 9, 21)?.and_hms_nano_opt(0, 12, 43, 145_224_193)?;
    let max = NaiveDate::from_ymd_opt(2262, 4, 11)?.and_hms_nano_opt(23, 47, 16, 854_775_807)?;
    Some(dt).filter(|dt| min <= *dt && *dt <= max)
}

/// Parses exactly ten ascii digits as YYYYMMDDHH.
pub fn parse_hour_stamp(stamp: &str) -> Option<NaiveDateTime> {
    if stamp.len() != 10 || !stamp.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = stamp[0..4].parse().ok()?;
    let month: u32 = stamp[4..6].parse().ok()?;
    let day: u32 = stamp[6..8].parse().ok()?;
    let hour: u32 = stamp[8..10].parse().ok()?;
    within_timestamp_bounds(NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, 0, 0)?)
}

/// date (YYYYMMDD) at the hour of time (HHMM, zero-padded to 4),
/// the minutes are not used.
pub fn parse_datetime(date: &str, time: &str) -> Option<NaiveDateTime> {
    let hour: String = zfill(time, 4).chars().take(2).collect();
    parse_hour_stamp(&format!("{}{}", date, hour))
}

/// revision as DD/MM/YYYY HH:MM
pub fn parse_revision(revision: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(revision.trim(), REVISION_FORMAT)
        .ok()
        .and_then(within_timestamp_bounds)
}

pub fn normalize_record(raw: &RawRecord) -> CanonicalRecord {
    CanonicalRecord {
        date: raw.date.clone(),
        time: zfill(&raw.time, 4),
        datetime: parse_datetime(&raw.date, &raw.time),
        load_fcst: raw.load_fcst,
        revision: parse_revision(&raw.revision),
    }
}

/// Canonicalizes every record, same length and order as the input.
/// Unparsable dates and revisions become None, no row is dropped.
pub fn normalize(records: &[RawRecord]) -> Vec<CanonicalRecord> {
    let canonical: Vec<CanonicalRecord> = records.iter().map(normalize_record).collect();
    let report = NormalizeReport::from_records(&canonical);
    if report.null_datetime > 0 {
        warn!(
            rows = report.rows,
            null_datetime = report.null_datetime,
            "could not parse date and time of some rows"
        );
    }
    if report.null_revision > 0 {
        warn!(
            rows = report.rows,
            null_revision = report.null_revision,
            "could not parse revision of some rows"
        );
    }
    debug!(rows = report.rows, "normalized records");
    canonical
}
