// ── Report driver ──
//
// Validation first: the sort key and date window are resolved before the
// source is touched, so caller mistakes never cost a network round trip.

use chrono::Utc;
use tracing::debug;

use crate::collect::collect;
use crate::error::ReportError;
use crate::model::{DeviceKind, ReportRow};
use crate::reduce::reduce;
use crate::sort::{SortKey, sort_rows};
use crate::source::UsageSource;
use crate::window::DateWindow;

/// Caller-supplied report parameters, raw as received from the CLI.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Window start, `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`. Defaults to
    /// one calendar month before the end.
    pub start: Option<String>,
    /// Window end in the same forms. Defaults to now.
    pub end: Option<String>,
    /// Sort key name. Defaults to `hostname`.
    pub sort_by: Option<String>,
    pub virtual_guests: bool,
    pub hardware: bool,
    pub pools: bool,
}

impl ReportOptions {
    /// Populations to collect, in the fixed virtual → hardware → pool
    /// order. No flags selects all three.
    fn populations(&self) -> Vec<DeviceKind> {
        if !self.virtual_guests && !self.hardware && !self.pools {
            return DeviceKind::ALL.to_vec();
        }
        let mut kinds = Vec::new();
        if self.virtual_guests {
            kinds.push(DeviceKind::Virtual);
        }
        if self.hardware {
            kinds.push(DeviceKind::Hardware);
        }
        if self.pools {
            kinds.push(DeviceKind::Pool);
        }
        kinds
    }
}

/// Produce the sorted bandwidth report for the requested populations.
pub async fn run_report<S: UsageSource>(
    source: &S,
    opts: &ReportOptions,
) -> Result<Vec<ReportRow>, ReportError> {
    let sort_key = match opts.sort_by.as_deref() {
        Some(raw) => raw.parse::<SortKey>()?,
        None => SortKey::Hostname,
    };
    let window = DateWindow::resolve(opts.start.as_deref(), opts.end.as_deref(), Utc::now())?;
    let populations = opts.populations();
    debug!(start = %window.start, end = %window.end, ?populations, "running bandwidth report");

    let records = collect(source, window, &populations).await?;

    let mut rows: Vec<ReportRow> = records.iter().map(reduce).collect();
    sort_rows(&mut rows, sort_key);
    Ok(rows)
}
