// In-memory UsageSource fake shared by engine tests.

use std::cell::Cell;
use std::collections::HashMap;

use stratus_api::{AllotmentRef, BandwidthPool, Hardware, MetricDatum, VirtualGuest};

use crate::model::MetricTypeDescriptor;
use crate::source::UsageSource;
use crate::window::DateWindow;

#[derive(Default)]
pub(crate) struct FakeSource {
    pub guests: Vec<VirtualGuest>,
    pub hardware: Vec<Hardware>,
    pub pools: Vec<BandwidthPool>,
    /// Samples returned per tracking object id. Missing ids fail the fetch.
    pub samples: HashMap<i64, Vec<MetricDatum>>,
    pub fail_virtual_list: bool,
    pub fail_hardware_list: bool,
    /// Force the metering fetch for this tracking id to fail.
    pub fail_tracking: Option<i64>,
    pub pools_listed: Cell<bool>,
}

fn api_error(message: &str) -> stratus_api::Error {
    stratus_api::Error::Api {
        message: message.into(),
        code: None,
        status: 500,
    }
}

impl UsageSource for FakeSource {
    async fn virtual_guests(&self) -> Result<Vec<VirtualGuest>, stratus_api::Error> {
        if self.fail_virtual_list {
            return Err(api_error("virtual guest inventory unavailable"));
        }
        Ok(self.guests.clone())
    }

    async fn hardware(&self) -> Result<Vec<Hardware>, stratus_api::Error> {
        if self.fail_hardware_list {
            return Err(api_error("hardware inventory unavailable"));
        }
        Ok(self.hardware.clone())
    }

    async fn bandwidth_pools(&self) -> Result<Vec<BandwidthPool>, stratus_api::Error> {
        self.pools_listed.set(true);
        Ok(self.pools.clone())
    }

    async fn summary_data(
        &self,
        tracking_id: i64,
        _window: DateWindow,
        _descriptors: &[MetricTypeDescriptor],
    ) -> Result<Vec<MetricDatum>, stratus_api::Error> {
        if self.fail_tracking == Some(tracking_id) {
            return Err(api_error("metering query failed"));
        }
        self.samples
            .get(&tracking_id)
            .cloned()
            .ok_or_else(|| api_error("unknown tracking object"))
    }
}

// ── Builders ─────────────────────────────────────────────────────────

pub(crate) fn guest(
    id: i64,
    hostname: &str,
    tracking: Option<i64>,
    rack: Option<(i32, &str)>,
) -> VirtualGuest {
    VirtualGuest {
        id,
        hostname: hostname.into(),
        metric_tracking_object_id: tracking,
        virtual_rack: rack.map(|(type_id, name)| AllotmentRef {
            id: 1000 + id,
            bandwidth_allotment_type_id: type_id,
            name: name.into(),
        }),
    }
}

pub(crate) fn hardware_server(id: i64, hostname: &str, tracking: Option<i64>) -> Hardware {
    Hardware {
        id,
        hostname: hostname.into(),
        metric_tracking_object_id: tracking,
        allotment_detail: None,
    }
}

pub(crate) fn pool(id: i64, name: &str, tracking: Option<i64>) -> BandwidthPool {
    BandwidthPool {
        id,
        name: name.into(),
        metric_tracking_object_id: tracking,
    }
}

pub(crate) fn samples(entries: &[(&str, u64)]) -> Vec<MetricDatum> {
    entries
        .iter()
        .map(|(type_key, counter)| MetricDatum {
            type_key: (*type_key).into(),
            counter: *counter,
        })
        .collect()
}
