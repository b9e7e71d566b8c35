// ── Row ordering ──
//
// One comparison function per key, dispatched through a closed enum so
// the comparator set is exhaustive and testable without the CLI layer.
// Sorting is stable: rows with equal keys keep their input order, which
// callers rely on because populations are appended virtual → hardware →
// pool.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::ReportError;
use crate::model::ReportRow;

/// The seven runtime-selectable sort keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Type,
    Hostname,
    PublicIn,
    PublicOut,
    PrivateIn,
    PrivateOut,
    Pool,
}

impl SortKey {
    pub const VALUES: &'static str =
        "type, hostname, publicIn, publicOut, privateIn, privateOut, pool";

    fn compare(self, a: &ReportRow, b: &ReportRow) -> Ordering {
        match self {
            Self::Type => a.kind.as_str().cmp(b.kind.as_str()),
            Self::Hostname => a.hostname.cmp(&b.hostname),
            Self::PublicIn => a.public_in.cmp(&b.public_in),
            Self::PublicOut => a.public_out.cmp(&b.public_out),
            Self::PrivateIn => a.private_in.cmp(&b.private_in),
            Self::PrivateOut => a.private_out.cmp(&b.private_out),
            Self::Pool => a.pool.cmp(&b.pool),
        }
    }
}

impl FromStr for SortKey {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "type" => Ok(Self::Type),
            "hostname" => Ok(Self::Hostname),
            "publicIn" => Ok(Self::PublicIn),
            "publicOut" => Ok(Self::PublicOut),
            "privateIn" => Ok(Self::PrivateIn),
            "privateOut" => Ok(Self::PrivateOut),
            "pool" => Ok(Self::Pool),
            other => Err(ReportError::usage(
                "sortby",
                format!("unknown sort key '{other}' (expected one of: {})", Self::VALUES),
            )),
        }
    }
}

/// Order rows in place by the selected key, ascending.
pub fn sort_rows(rows: &mut [ReportRow], key: SortKey) {
    // Vec::sort_by is stable, so equal keys preserve population order.
    rows.sort_by(|a, b| key.compare(a, b));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DeviceKind;

    fn row(kind: DeviceKind, hostname: &str, public_in: u64, pool: &str) -> ReportRow {
        ReportRow {
            kind,
            hostname: hostname.into(),
            public_in,
            public_out: 0,
            private_in: 0,
            private_out: 0,
            pool: pool.into(),
        }
    }

    #[test]
    fn sorts_by_hostname_lexically() {
        let mut rows = vec![
            row(DeviceKind::Virtual, "vm1", 500, "-"),
            row(DeviceKind::Hardware, "hw1", 200, "-"),
            row(DeviceKind::Pool, "pool1", 0, "-"),
        ];

        sort_rows(&mut rows, SortKey::Hostname);

        let names: Vec<_> = rows.iter().map(|r| r.hostname.as_str()).collect();
        assert_eq!(names, vec!["hw1", "pool1", "vm1"]);
    }

    #[test]
    fn sorts_numeric_keys_ascending() {
        let mut rows = vec![
            row(DeviceKind::Virtual, "vm1", 500, "-"),
            row(DeviceKind::Hardware, "hw1", 200, "-"),
            row(DeviceKind::Pool, "pool1", 0, "-"),
        ];

        sort_rows(&mut rows, SortKey::PublicIn);

        let names: Vec<_> = rows.iter().map(|r| r.hostname.as_str()).collect();
        assert_eq!(names, vec!["pool1", "hw1", "vm1"]);
    }

    #[test]
    fn ties_keep_population_order() {
        // All four totals equal: sorting by any numeric key must leave the
        // virtual → hardware → pool input order untouched.
        let mut rows = vec![
            row(DeviceKind::Virtual, "b-vm", 100, "-"),
            row(DeviceKind::Virtual, "a-vm", 100, "-"),
            row(DeviceKind::Hardware, "hw", 100, "-"),
            row(DeviceKind::Pool, "pool", 100, "-"),
        ];

        sort_rows(&mut rows, SortKey::PublicIn);

        let names: Vec<_> = rows.iter().map(|r| r.hostname.as_str()).collect();
        assert_eq!(names, vec!["b-vm", "a-vm", "hw", "pool"]);
    }

    #[test]
    fn sorts_by_type_then_stable_within_kind() {
        let mut rows = vec![
            row(DeviceKind::Virtual, "vm2", 0, "-"),
            row(DeviceKind::Virtual, "vm1", 0, "-"),
            row(DeviceKind::Hardware, "hw1", 0, "-"),
            row(DeviceKind::Pool, "pool1", 0, "-"),
        ];

        sort_rows(&mut rows, SortKey::Type);

        // "hardware" < "pool" < "virtual" byte-wise; vm2 stays before vm1.
        let names: Vec<_> = rows.iter().map(|r| r.hostname.as_str()).collect();
        assert_eq!(names, vec!["hw1", "pool1", "vm2", "vm1"]);
    }

    #[test]
    fn parses_all_seven_keys() {
        for (raw, key) in [
            ("type", SortKey::Type),
            ("hostname", SortKey::Hostname),
            ("publicIn", SortKey::PublicIn),
            ("publicOut", SortKey::PublicOut),
            ("privateIn", SortKey::PrivateIn),
            ("privateOut", SortKey::PrivateOut),
            ("pool", SortKey::Pool),
        ] {
            assert_eq!(raw.parse::<SortKey>().expect("valid key"), key);
        }
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = "bogus".parse::<SortKey>().unwrap_err();
        assert!(matches!(err, ReportError::Usage { ref field, .. } if field == "sortby"));
    }
}
