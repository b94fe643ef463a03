use super::error::{Error, Result};
use super::{COL_DATE, COL_LOAD_FCST, COL_REVISION, COL_TIME};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

pub const REQUIRED_COLUMNS: [&str; 4] = [COL_DATE, COL_TIME, COL_LOAD_FCST, COL_REVISION];

/// One row of a forecast archive, as read from the csv.
/// `date`, `time`, and `revision` are kept as (trimmed) text,
/// the normalizer decides what they mean.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub date: String,
    pub time: String,
    pub load_fcst: Option<f64>,
    pub revision: String,
}

impl RawRecord {
    pub fn new(date: &str, time: &str, load_fcst: Option<f64>, revision: &str) -> RawRecord {
        RawRecord {
            date: date.to_string(),
            time: time.to_string(),
            load_fcst,
            revision: revision.to_string(),
        }
    }
}

/// empty, non-numeric, and NaN cells are all missing values
pub fn parse_load(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Reads a forecast archive.
/// Fails for an unreadable file or a missing required column,
/// never for the content of a single cell.
pub fn read_archive<P: AsRef<Path>>(fin: P) -> Result<Vec<RawRecord>> {
    let fin = fin.as_ref();
    let file = File::open(fin).map_err(|source| Error::Io {
        path: fin.to_path_buf(),
        source,
    })?;
    from_reader(file, fin)
}

/// Same as `read_archive` for any reader; `origin` only labels the errors.
pub fn from_reader<R: Read>(rdr: R, origin: &Path) -> Result<Vec<RawRecord>> {
    let csv_err = |source: csv::Error| Error::Csv {
        path: origin.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(rdr);

    let headers = reader.headers().map_err(csv_err)?.clone();
    let mut idx = [0usize; 4];
    for (i, column) in REQUIRED_COLUMNS.iter().enumerate() {
        idx[i] = headers
            .iter()
            .position(|h| h == *column)
            .ok_or_else(|| Error::MissingColumn {
                path: origin.to_path_buf(),
                column: *column,
            })?;
    }
    let [i_date, i_time, i_load, i_revision] = idx;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(csv_err)?;
        // short rows miss trailing values, longer rows do not fit the header
        if row.len() > headers.len() {
            return Err(Error::LongRow {
                path: origin.to_path_buf(),
                line: row.position().map(|p| p.line()).unwrap_or(0),
                fields: row.len(),
                expected: headers.len(),
            });
        }
        let field = |i: usize| row.get(i).unwrap_or("");
        records.push(RawRecord::new(
            field(i_date),
            field(i_time),
            parse_load(field(i_load)),
            field(i_revision),
        ));
    }
    debug!(rows = records.len(), path = %origin.display(), "read forecast archive");
    Ok(records)
}
