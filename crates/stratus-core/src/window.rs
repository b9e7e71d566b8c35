// ── Date window resolution ──

use chrono::{DateTime, Months, NaiveDate, NaiveDateTime, Utc};

use crate::error::ReportError;

const FULL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// The reporting window, always `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    /// Resolve raw `--start` / `--end` strings into a window.
    ///
    /// `end` defaults to `now`; `start` defaults to `end` minus one
    /// calendar month. Accepted lexical forms are `YYYY-MM-DD HH:MM:SS`
    /// and `YYYY-MM-DD` (midnight).
    pub fn resolve(
        raw_start: Option<&str>,
        raw_end: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Self, ReportError> {
        let end = match raw_end {
            Some(raw) => parse_instant(raw, "end")?,
            None => now,
        };

        let start = match raw_start {
            Some(raw) => parse_instant(raw, "start")?,
            None => end.checked_sub_months(Months::new(1)).ok_or_else(|| {
                ReportError::usage("start", "default start (end minus one month) is out of range")
            })?,
        };

        if start > end {
            return Err(ReportError::usage("start", "start must be <= end"));
        }

        Ok(Self { start, end })
    }
}

fn parse_instant(raw: &str, field: &str) -> Result<DateTime<Utc>, ReportError> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, FULL_FORMAT) {
        return Ok(dt.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        // Date-only form means midnight UTC.
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt.and_utc());
        }
    }
    Err(ReportError::usage(
        field,
        format!("invalid date '{raw}' (use YYYY-MM-DD or YYYY-MM-DD HH:MM:SS)"),
    ))
}
