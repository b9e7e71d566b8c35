// ── Engine error types ──
//
// Two failure classes only: bad caller input (detected before any network
// activity) and a failed remote call during collection. Both are terminal
// for the invocation; nothing is retried here.

use thiserror::Error;

use crate::model::DeviceKind;

/// Unified error type for the report engine.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Invalid caller input: unknown sort key or unparsable date.
    /// Raised before any remote call is made.
    #[error("Invalid value for {field}: {reason}")]
    Usage { field: String, reason: String },

    /// A device-list or per-device metering call failed. The whole
    /// report is aborted; no partial rows are produced.
    #[error("Collecting {population} bandwidth data failed")]
    Collection {
        population: DeviceKind,
        #[source]
        source: stratus_api::Error,
    },
}

impl ReportError {
    pub(crate) fn usage(field: &str, reason: impl Into<String>) -> Self {
        Self::Usage {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
