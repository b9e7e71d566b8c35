// ── Sample reduction ──

use crate::model::{MetricRecord, ReportRow, channel};

/// Collapse one record's raw samples into the four per-direction totals.
///
/// Pure function: sums `counter` over the samples matching each canonical
/// channel key. A channel with no samples totals 0 — a device that moved
/// no traffic in a direction is not an error.
pub fn reduce(record: &MetricRecord) -> ReportRow {
    ReportRow {
        kind: record.kind,
        hostname: record.name.clone(),
        public_in: channel_total(record, channel::PUBLIC_IN),
        public_out: channel_total(record, channel::PUBLIC_OUT),
        private_in: channel_total(record, channel::PRIVATE_IN),
        private_out: channel_total(record, channel::PRIVATE_OUT),
        pool: record.pool_name.clone(),
    }
}

fn channel_total(record: &MetricRecord, key: &str) -> u64 {
    record
        .samples
        .iter()
        .filter(|s| s.type_key == key)
        .map(|s| s.counter)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DeviceKind;
    use crate::testutil::samples;

    fn record(entries: &[(&str, u64)]) -> MetricRecord {
        MetricRecord {
            id: 1,
            kind: DeviceKind::Virtual,
            name: "vm1".into(),
            pool_name: "-".into(),
            samples: samples(entries),
        }
    }

    #[test]
    fn sums_samples_per_channel() {
        let row = reduce(&record(&[
            ("publicIn_net_octet", 500),
            ("publicIn_net_octet", 250),
            ("publicOut_net_octet", 100),
            ("privateOut_net_octet", 9000),
        ]));

        assert_eq!(row.public_in, 750);
        assert_eq!(row.public_out, 100);
        assert_eq!(row.private_in, 0);
        assert_eq!(row.private_out, 9000);
    }

    #[test]
    fn empty_record_totals_zero() {
        let row = reduce(&record(&[]));

        assert_eq!(row.public_in, 0);
        assert_eq!(row.public_out, 0);
        assert_eq!(row.private_in, 0);
        assert_eq!(row.private_out, 0);
    }

    #[test]
    fn unknown_channel_keys_are_ignored() {
        let row = reduce(&record(&[
            ("cpu0", 42),
            ("publicIn_net_octet", 10),
        ]));

        assert_eq!(row.public_in, 10);
        assert_eq!(row.public_out, 0);
    }

    #[test]
    fn identity_fields_copied_verbatim() {
        let mut rec = record(&[]);
        rec.kind = DeviceKind::Pool;
        rec.name = "pool1".into();
        rec.pool_name = "east-pool".into();

        let row = reduce(&rec);

        assert_eq!(row.kind, DeviceKind::Pool);
        assert_eq!(row.hostname, "pool1");
        assert_eq!(row.pool, "east-pool");
    }
}
