// ── Device collection ──
//
// For each requested population: list devices, skip those that have never
// reported usage (no metric tracking object), then pull each remaining
// device's summary series with the population's fixed descriptor set.
//
// Populations are always collected in the fixed order virtual → hardware
// → pool; within a population the per-device metering calls run with
// bounded concurrency, order-preserving, and the first failure cancels
// the outstanding fetches and aborts the whole report.

use futures_util::{StreamExt, TryStreamExt, stream};
use tracing::debug;

use stratus_api::AllotmentRef;

use crate::error::ReportError;
use crate::model::{DeviceKind, MetricRecord, POOL_ALLOTMENT_TYPE, descriptors_for};
use crate::source::UsageSource;
use crate::window::DateWindow;

/// Concurrent metering fetches per population.
const FETCH_CONCURRENCY: usize = 8;

/// Collect normalized usage records for the requested populations.
pub async fn collect<S: UsageSource>(
    source: &S,
    window: DateWindow,
    populations: &[DeviceKind],
) -> Result<Vec<MetricRecord>, ReportError> {
    let mut records = Vec::new();

    for kind in populations {
        let mut batch = match kind {
            DeviceKind::Virtual => collect_virtual(source, window).await?,
            DeviceKind::Hardware => collect_hardware(source, window).await?,
            DeviceKind::Pool => collect_pools(source, window).await?,
        };
        records.append(&mut batch);
    }

    Ok(records)
}

/// One device queued for a metering fetch.
struct FetchTarget {
    id: i64,
    name: String,
    pool_name: String,
    tracking: i64,
}

async fn collect_virtual<S: UsageSource>(
    source: &S,
    window: DateWindow,
) -> Result<Vec<MetricRecord>, ReportError> {
    let kind = DeviceKind::Virtual;
    let guests = source
        .virtual_guests()
        .await
        .map_err(|e| collection_error(kind, e))?;

    let targets: Vec<FetchTarget> = guests
        .into_iter()
        .filter_map(|guest| {
            guest.metric_tracking_object_id.map(|tracking| FetchTarget {
                id: guest.id,
                name: guest.hostname,
                pool_name: pool_label(guest.virtual_rack.as_ref()),
                tracking,
            })
        })
        .collect();

    fetch_population(source, kind, window, targets).await
}

async fn collect_hardware<S: UsageSource>(
    source: &S,
    window: DateWindow,
) -> Result<Vec<MetricRecord>, ReportError> {
    let kind = DeviceKind::Hardware;
    let servers = source
        .hardware()
        .await
        .map_err(|e| collection_error(kind, e))?;

    let targets: Vec<FetchTarget> = servers
        .into_iter()
        .filter_map(|server| {
            server.metric_tracking_object_id.map(|tracking| FetchTarget {
                id: server.id,
                name: server.hostname,
                pool_name: pool_label(server.allotment_detail.as_ref()),
                tracking,
            })
        })
        .collect();

    fetch_population(source, kind, window, targets).await
}

async fn collect_pools<S: UsageSource>(
    source: &S,
    window: DateWindow,
) -> Result<Vec<MetricRecord>, ReportError> {
    let kind = DeviceKind::Pool;
    let pools = source
        .bandwidth_pools()
        .await
        .map_err(|e| collection_error(kind, e))?;

    let targets: Vec<FetchTarget> = pools
        .into_iter()
        .filter_map(|pool| {
            pool.metric_tracking_object_id.map(|tracking| FetchTarget {
                id: pool.id,
                name: pool.name,
                pool_name: "-".into(),
                tracking,
            })
        })
        .collect();

    fetch_population(source, kind, window, targets).await
}

/// Run the per-device metering fetches for one population.
async fn fetch_population<S: UsageSource>(
    source: &S,
    kind: DeviceKind,
    window: DateWindow,
    targets: Vec<FetchTarget>,
) -> Result<Vec<MetricRecord>, ReportError> {
    debug!(population = %kind, devices = targets.len(), "fetching metric summaries");
    let descriptors = descriptors_for(kind);

    stream::iter(targets)
        .map(|target| {
            let descriptors = &descriptors;
            async move {
                let samples = source
                    .summary_data(target.tracking, window, descriptors)
                    .await
                    .map_err(|e| collection_error(kind, e))?;

                Ok(MetricRecord {
                    id: target.id,
                    kind,
                    name: target.name,
                    pool_name: target.pool_name,
                    samples,
                })
            }
        })
        .buffered(FETCH_CONCURRENCY)
        .try_collect()
        .await
}

/// Pool display name for a device's allotment reference, `"-"` when the
/// device is not attached to a private bandwidth pool.
fn pool_label(rack: Option<&AllotmentRef>) -> String {
    match rack {
        Some(r) if r.bandwidth_allotment_type_id == POOL_ALLOTMENT_TYPE => r.name.clone(),
        _ => "-".into(),
    }
}

fn collection_error(population: DeviceKind, source: stratus_api::Error) -> ReportError {
    ReportError::Collection { population, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{FakeSource, guest, hardware_server, pool, samples};

    fn window() -> DateWindow {
        DateWindow::resolve(Some("2024-05-01"), Some("2024-06-01"), chrono::Utc::now())
            .expect("valid window")
    }

    #[tokio::test]
    async fn skips_devices_without_tracking_objects() {
        let mut source = FakeSource::default();
        source.guests = vec![
            guest(1, "vm1", Some(11), None),
            guest(2, "vm2-untracked", None, None),
        ];
        source.samples.insert(11, samples(&[("publicIn_net_octet", 500)]));

        let records = collect(&source, window(), &[DeviceKind::Virtual])
            .await
            .expect("collect");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "vm1");
    }

    #[tokio::test]
    async fn resolves_pool_names_from_allotment_type() {
        let mut source = FakeSource::default();
        source.guests = vec![
            guest(1, "pooled", Some(11), Some((POOL_ALLOTMENT_TYPE, "east-pool"))),
            guest(2, "unpooled", Some(12), Some((1, "not-a-pool"))),
            guest(3, "bare", Some(13), None),
        ];
        for id in [11, 12, 13] {
            source.samples.insert(id, Vec::new());
        }

        let records = collect(&source, window(), &[DeviceKind::Virtual])
            .await
            .expect("collect");

        assert_eq!(records[0].pool_name, "east-pool");
        assert_eq!(records[1].pool_name, "-");
        assert_eq!(records[2].pool_name, "-");
    }

    #[tokio::test]
    async fn populations_append_in_fixed_order() {
        let mut source = FakeSource::default();
        source.guests = vec![guest(1, "vm1", Some(11), None)];
        source.hardware = vec![hardware_server(2, "hw1", Some(21))];
        source.pools = vec![pool(3, "pool1", Some(31))];
        for id in [11, 21, 31] {
            source.samples.insert(id, Vec::new());
        }

        let records = collect(&source, window(), &DeviceKind::ALL)
            .await
            .expect("collect");

        let kinds: Vec<_> = records.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![DeviceKind::Virtual, DeviceKind::Hardware, DeviceKind::Pool]
        );
    }

    #[tokio::test]
    async fn hardware_list_failure_aborts_whole_report() {
        let mut source = FakeSource::default();
        source.guests = vec![guest(1, "vm1", Some(11), None)];
        source.samples.insert(11, samples(&[("publicIn_net_octet", 500)]));
        source.fail_hardware_list = true;
        source.pools = vec![pool(3, "pool1", Some(31))];

        let result = collect(&source, window(), &DeviceKind::ALL).await;

        match result {
            Err(ReportError::Collection { population, .. }) => {
                assert_eq!(population, DeviceKind::Hardware);
            }
            other => panic!("expected Collection error, got: {other:?}"),
        }
        // Fail-fast: the pool inventory was never touched.
        assert!(!source.pools_listed.get());
    }

    #[tokio::test]
    async fn single_metering_failure_aborts_population() {
        let mut source = FakeSource::default();
        source.guests = vec![guest(1, "vm1", Some(11), None), guest(2, "vm2", Some(12), None)];
        source.samples.insert(11, Vec::new());
        source.fail_tracking = Some(12);

        let result = collect(&source, window(), &[DeviceKind::Virtual]).await;

        assert!(
            matches!(
                result,
                Err(ReportError::Collection {
                    population: DeviceKind::Virtual,
                    ..
                })
            ),
            "expected Collection error, got: {result:?}"
        );
    }
}
