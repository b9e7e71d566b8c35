// ── UsageSource trait ──
//
// The engine's seam over the account API: three inventories plus the
// metering query. Keeping the seam this narrow lets tests drive the whole
// pipeline with in-memory fakes.

use stratus_api::{ApiClient, BandwidthPool, Hardware, MetricDatum, VirtualGuest};

use crate::model::MetricTypeDescriptor;
use crate::window::DateWindow;

/// Read-only view of the account API consumed by the report engine.
#[allow(async_fn_in_trait)]
pub trait UsageSource {
    async fn virtual_guests(&self) -> Result<Vec<VirtualGuest>, stratus_api::Error>;

    async fn hardware(&self) -> Result<Vec<Hardware>, stratus_api::Error>;

    async fn bandwidth_pools(&self) -> Result<Vec<BandwidthPool>, stratus_api::Error>;

    /// Fetch summarized samples for one tracking object over the window.
    async fn summary_data(
        &self,
        tracking_id: i64,
        window: DateWindow,
        descriptors: &[MetricTypeDescriptor],
    ) -> Result<Vec<MetricDatum>, stratus_api::Error>;
}

impl UsageSource for ApiClient {
    async fn virtual_guests(&self) -> Result<Vec<VirtualGuest>, stratus_api::Error> {
        self.list_virtual_guests().await
    }

    async fn hardware(&self) -> Result<Vec<Hardware>, stratus_api::Error> {
        self.list_hardware().await
    }

    async fn bandwidth_pools(&self) -> Result<Vec<BandwidthPool>, stratus_api::Error> {
        self.list_bandwidth_pools().await
    }

    async fn summary_data(
        &self,
        tracking_id: i64,
        window: DateWindow,
        descriptors: &[MetricTypeDescriptor],
    ) -> Result<Vec<MetricDatum>, stratus_api::Error> {
        let wire: Vec<_> = descriptors.iter().map(|d| d.to_wire()).collect();
        self.get_summary_data(tracking_id, window.start, window.end, &wire)
            .await
    }
}
