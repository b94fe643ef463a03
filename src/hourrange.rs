use chrono::{Duration, NaiveDateTime};

/// produces: [ first + i hours | i <- 0..steps ]
/// (DOES include "last", the range is closed)
#[derive(Clone, Debug)]
pub struct HourRange {
    current: i64,
    current_back: i64,
    first: NaiveDateTime,
}

impl HourRange {
    /// closed hourly range from first to last,
    /// empty when last < first
    pub fn new(first: NaiveDateTime, last: NaiveDateTime) -> Self {
        let steps = if last < first {
            0
        } else {
            (last - first).num_hours() + 1
        };
        HourRange {
            current: 0,
            current_back: steps,
            first,
        }
    }

    pub fn length(&self) -> i64 {
        self.current_back - self.current
    }

    fn at(&self, pos: i64) -> NaiveDateTime {
        self.first + Duration::hours(pos)
    }
}

impl Iterator for HourRange {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current >= self.current_back {
            return None;
        }
        let result = self.at(self.current);
        self.current += 1;
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let l = self.length() as usize;
        (l, Some(l))
    }
}

impl ExactSizeIterator for HourRange {}
