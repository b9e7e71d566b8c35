//! Wire types for the account API.
//!
//! Field names mirror the JSON the endpoint emits (camelCase). Optional
//! fields stay optional here; interpretation (e.g. "no tracking object
//! means the device never reported usage") belongs to `stratus-core`.

use serde::{Deserialize, Serialize};

// ── Device inventories ───────────────────────────────────────────────

/// Reference to a private bandwidth allotment a device is attached to.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllotmentRef {
    pub id: i64,
    /// Allotment type code; `2` marks a private bandwidth pool.
    pub bandwidth_allotment_type_id: i32,
    pub name: String,
}

/// One virtual guest from the account inventory.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualGuest {
    pub id: i64,
    pub hostname: String,
    #[serde(default)]
    pub metric_tracking_object_id: Option<i64>,
    #[serde(default)]
    pub virtual_rack: Option<AllotmentRef>,
}

/// One physical server from the account inventory.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hardware {
    pub id: i64,
    pub hostname: String,
    #[serde(default)]
    pub metric_tracking_object_id: Option<i64>,
    #[serde(default)]
    pub allotment_detail: Option<AllotmentRef>,
}

/// One bandwidth pool (shared allotment) on the account.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BandwidthPool {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub metric_tracking_object_id: Option<i64>,
}

// ── Metering ─────────────────────────────────────────────────────────

/// One requested metric channel in a summary query.
///
/// `key_name` is the metering subsystem's bucket identifier (it differs
/// per device class); `name` is the label echoed back on each returned
/// sample; `summary_type` is `"sum"` or `"counter"`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDataType {
    pub key_name: String,
    pub name: String,
    pub summary_type: String,
}

/// One metering data point from a summary query.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetricDatum {
    /// Channel label, matching the `name` of the requested type.
    #[serde(rename = "type")]
    pub type_key: String,
    /// Byte count for this sample.
    pub counter: u64,
}
