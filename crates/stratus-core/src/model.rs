// ── Report domain types ──

use serde::Serialize;

use stratus_api::{MetricDatum, SummaryDataType};

/// Allotment type code marking a private bandwidth pool.
pub const POOL_ALLOTMENT_TYPE: i32 = 2;

/// Canonical channel keys, as echoed back on metering samples.
///
/// Every population's descriptor set labels its four channels with these
/// names, so the reducer can stay population-agnostic.
pub mod channel {
    pub const PUBLIC_IN: &str = "publicIn_net_octet";
    pub const PUBLIC_OUT: &str = "publicOut_net_octet";
    pub const PRIVATE_IN: &str = "privateIn_net_octet";
    pub const PRIVATE_OUT: &str = "privateOut_net_octet";
}

// ── Device populations ───────────────────────────────────────────────

/// The three device populations a report can cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Virtual,
    Hardware,
    Pool,
}

impl DeviceKind {
    /// Fixed population order: virtual → hardware → pool. Stable-sort
    /// tie-breaking depends on records being appended in this order.
    pub const ALL: [DeviceKind; 3] = [Self::Virtual, Self::Hardware, Self::Pool];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Virtual => "virtual",
            Self::Hardware => "hardware",
            Self::Pool => "pool",
        }
    }
}

impl std::fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Metric type descriptors ──────────────────────────────────────────

/// How the metering subsystem aggregates a channel: `Sum` series are
/// period totals, `Counter` series are cumulative counters read at the
/// window edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryKind {
    Sum,
    Counter,
}

impl SummaryKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Counter => "counter",
        }
    }
}

/// One traffic-direction channel to request from the metering subsystem.
#[derive(Debug, Clone, Copy)]
pub struct MetricTypeDescriptor {
    /// The metering subsystem's bucket identifier for this device class.
    pub key_name: &'static str,
    /// Canonical channel label echoed back on each sample.
    pub name: &'static str,
    pub summary_kind: SummaryKind,
}

impl MetricTypeDescriptor {
    const fn new(key_name: &'static str, name: &'static str, summary_kind: SummaryKind) -> Self {
        Self {
            key_name,
            name,
            summary_kind,
        }
    }

    pub fn to_wire(self) -> SummaryDataType {
        SummaryDataType {
            key_name: self.key_name.into(),
            name: self.name.into(),
            summary_type: self.summary_kind.as_str().into(),
        }
    }
}

/// The fixed descriptor set for one population.
///
/// The metering subsystem buckets each device class differently: virtual
/// guests report per-period octet sums under lowercase keys, hardware
/// reports cumulative counters under uppercase keys, and pools report
/// sums under the uppercase keys. The three sets must stay distinct.
pub fn descriptors_for(kind: DeviceKind) -> [MetricTypeDescriptor; 4] {
    use SummaryKind::{Counter, Sum};

    match kind {
        DeviceKind::Virtual => [
            MetricTypeDescriptor::new("publicIn_net_octet", channel::PUBLIC_IN, Sum),
            MetricTypeDescriptor::new("publicOut_net_octet", channel::PUBLIC_OUT, Sum),
            MetricTypeDescriptor::new("privateIn_net_octet", channel::PRIVATE_IN, Sum),
            MetricTypeDescriptor::new("privateOut_net_octet", channel::PRIVATE_OUT, Sum),
        ],
        DeviceKind::Hardware => [
            MetricTypeDescriptor::new("PUBLICIN_NET_OCTET", channel::PUBLIC_IN, Counter),
            MetricTypeDescriptor::new("PUBLICOUT_NET_OCTET", channel::PUBLIC_OUT, Counter),
            MetricTypeDescriptor::new("PRIVATEIN_NET_OCTET", channel::PRIVATE_IN, Counter),
            MetricTypeDescriptor::new("PRIVATEOUT_NET_OCTET", channel::PRIVATE_OUT, Counter),
        ],
        DeviceKind::Pool => [
            MetricTypeDescriptor::new("PUBLICIN_NET_OCTET", channel::PUBLIC_IN, Sum),
            MetricTypeDescriptor::new("PUBLICOUT_NET_OCTET", channel::PUBLIC_OUT, Sum),
            MetricTypeDescriptor::new("PRIVATEIN_NET_OCTET", channel::PRIVATE_IN, Sum),
            MetricTypeDescriptor::new("PRIVATEOUT_NET_OCTET", channel::PRIVATE_OUT, Sum),
        ],
    }
}

// ── Records and rows ─────────────────────────────────────────────────

/// One device's raw bandwidth usage for the report window.
///
/// Created once per device during collection, consumed by the reducer.
#[derive(Debug, Clone)]
pub struct MetricRecord {
    pub id: i64,
    pub kind: DeviceKind,
    pub name: String,
    /// Pool display name, or `"-"` when the device is not attached to a
    /// private bandwidth pool.
    pub pool_name: String,
    pub samples: Vec<MetricDatum>,
}

/// One reduced, user-facing report row. Totals are byte counts; the
/// renderer converts to GB for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    #[serde(rename = "type")]
    pub kind: DeviceKind,
    pub hostname: String,
    pub public_in: u64,
    pub public_out: u64,
    pub private_in: u64,
    pub private_out: u64,
    pub pool: String,
}
