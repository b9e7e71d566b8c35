//! Bandwidth usage aggregation and reporting engine.
//!
//! The pipeline behind `stratus report bandwidth`:
//!
//! - **[`UsageSource`]** — narrow trait over the account API: three device
//!   inventories plus the metering subsystem's summary query. Implemented
//!   for [`stratus_api::ApiClient`]; tests substitute in-memory fakes.
//! - **[`collect`](collect::collect)** — fetches each requested device
//!   population, pulls per-device metric series with the population's
//!   fixed descriptor set, and produces normalized [`MetricRecord`]s.
//!   Fail-fast: the first inventory or metering error aborts the report.
//! - **[`reduce`](reduce::reduce)** — collapses a record's samples into
//!   the four per-direction byte totals of a [`ReportRow`].
//! - **[`sort_rows`](sort::sort_rows)** — stable, total ordering over any
//!   of the seven runtime-selected [`SortKey`]s.
//! - **[`run_report`](report::run_report)** — the driver: resolves the
//!   date window and population set, then collect → reduce → sort.

pub mod collect;
pub mod error;
pub mod model;
pub mod reduce;
pub mod report;
pub mod sort;
pub mod source;
pub mod window;

#[cfg(test)]
pub(crate) mod testutil;

pub use collect::collect;
pub use error::ReportError;
pub use model::{DeviceKind, MetricRecord, MetricTypeDescriptor, ReportRow, SummaryKind};
pub use report::{ReportOptions, run_report};
pub use sort::{SortKey, sort_rows};
pub use source::UsageSource;
pub use window::DateWindow;
