use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::region_codes;
use crate::core::{RawRecord, Record, RegionTotal};

/// Counters collected while building a [`DatasetStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoadReport {
    pub raw: usize,
    pub retained: usize,
    /// Rows whose alpha-2 code has no alpha-3 counterpart.
    pub dropped_unmapped: usize,
    /// Retained rows without a finite value; aggregates skip them.
    pub missing_values: usize,
    /// Region codes whose summed value overflowed and was clamped to `f64::MAX`.
    pub saturated_totals: usize,
}

/// Normalized, read-only record set.
///
/// Built once by [`DatasetStore::load`]; every query borrows and none mutates,
/// so one store can back any number of controllers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetStore {
    records: Vec<Record>,
    totals: IndexMap<String, f64>,
    report: LoadReport,
}

impl DatasetStore {
    /// Normalizes region codes and keeps every mapped row in input order.
    ///
    /// Rows whose code does not map are dropped without any diagnostic beyond a
    /// trace event. Rows with a missing value or time are kept as they are.
    #[must_use]
    pub fn load<I>(raw_records: I) -> Self
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut report = LoadReport::default();
        let mut records = Vec::new();

        for raw in raw_records {
            report.raw += 1;

            let Some(region_code3) = region_codes::normalize(&raw.region_code2) else {
                trace!(code2 = %raw.region_code2, "dropping record with unmapped region code");
                report.dropped_unmapped += 1;
                continue;
            };
            let num_value = raw.num_value.filter(|value| value.is_finite());
            if num_value.is_none() {
                report.missing_values += 1;
            }

            records.push(Record {
                region_name: raw.region_name,
                region_code2: raw.region_code2,
                region_code3: region_code3.to_owned(),
                time: raw.time,
                num_value,
            });
        }

        let (totals, saturated) = sum_by_region_code3(&records);
        report.retained = records.len();
        report.saturated_totals = saturated;
        if saturated > 0 {
            warn!(
                regions = saturated,
                "region totals overflowed and were clamped to the largest finite value"
            );
        }
        debug!(
            raw = report.raw,
            retained = report.retained,
            dropped_unmapped = report.dropped_unmapped,
            missing_values = report.missing_values,
            "loaded dataset store"
        );

        Self {
            records,
            totals,
            report,
        }
    }

    #[must_use]
    pub fn load_report(&self) -> LoadReport {
        self.report
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every record, in load order.
    #[must_use]
    pub fn all(&self) -> &[Record] {
        &self.records
    }

    /// Region names in first-seen order.
    #[must_use]
    pub fn distinct_region_names(&self) -> IndexSet<&str> {
        self.records
            .iter()
            .map(|record| record.region_name.as_str())
            .collect()
    }

    /// Alpha-3 codes in first-seen order.
    #[must_use]
    pub fn distinct_region_codes3(&self) -> IndexSet<&str> {
        self.records
            .iter()
            .map(|record| record.region_code3.as_str())
            .collect()
    }

    /// Records whose region name equals `name` exactly.
    #[must_use]
    pub fn filter_by_region_name(&self, name: &str) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|record| record.region_name == name)
            .collect()
    }

    /// Records whose alpha-3 code equals `code3` exactly.
    #[must_use]
    pub fn filter_by_region_code3(&self, code3: &str) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|record| record.region_code3 == code3)
            .collect()
    }

    /// Sum of the present values per alpha-3 code, keyed in first-seen order.
    ///
    /// Computed once at load; a sum that would overflow is clamped to
    /// `f64::MAX` (or its negation) and counted in the load report.
    #[must_use]
    pub fn region_totals(&self) -> IndexMap<&str, f64> {
        self.totals
            .iter()
            .map(|(code3, total)| (code3.as_str(), *total))
            .collect()
    }

    /// The `n` alpha-3 codes with the largest summed value, descending.
    ///
    /// Equal totals keep first-seen store order.
    #[must_use]
    pub fn top_n_by_region_code3(&self, n: usize) -> Vec<RegionTotal> {
        let mut totals: Vec<RegionTotal> = self
            .totals
            .iter()
            .map(|(code3, total)| RegionTotal::new(code3.as_str(), *total))
            .collect();
        totals.sort_by(|left, right| right.total.total_cmp(&left.total));
        totals.truncate(n);
        totals
    }
}

/// Returns the per-code sums and how many of them had to be clamped.
fn sum_by_region_code3(records: &[Record]) -> (IndexMap<String, f64>, usize) {
    let mut totals: IndexMap<String, f64> = IndexMap::new();
    for record in records {
        let entry = totals.entry(record.region_code3.clone()).or_insert(0.0);
        if let Some(value) = record.num_value {
            *entry += value;
        }
    }

    let mut saturated = 0;
    for total in totals.values_mut() {
        if !total.is_finite() {
            saturated += 1;
            *total = f64::MAX.copysign(*total);
        }
    }
    (totals, saturated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TimeValue;

    #[test]
    fn load_keeps_mapped_rows_without_values() {
        let mut missing_value = RawRecord::new("Austria", "AT", 3, 0.0);
        missing_value.num_value = None;
        let store = DatasetStore::load(vec![
            RawRecord::new("Austria", "AT", 1, 5.0),
            RawRecord::new("Nowhere", "ZZ", 1, 1.0),
            missing_value,
            RawRecord::new("Austria", "AT", 4, f64::NAN),
            RawRecord {
                region_name: "Austria".to_owned(),
                region_code2: "AT".to_owned(),
                time: TimeValue::label(""),
                num_value: Some(2.0),
            },
        ]);

        assert_eq!(
            store.load_report(),
            LoadReport {
                raw: 5,
                retained: 4,
                dropped_unmapped: 1,
                missing_values: 2,
                saturated_totals: 0,
            }
        );
        let values: Vec<Option<f64>> = store.all().iter().map(|r| r.num_value).collect();
        assert_eq!(values, vec![Some(5.0), None, None, Some(2.0)]);
        assert_eq!(store.region_totals().get("AUT"), Some(&7.0));
    }

    #[test]
    fn overflowing_totals_are_clamped_once_at_load() {
        let store = DatasetStore::load(vec![
            RawRecord::new("Germany", "DE", 1, f64::MAX),
            RawRecord::new("Germany", "DE", 2, f64::MAX),
            RawRecord::new("France", "FR", 1, -f64::MAX),
            RawRecord::new("France", "FR", 2, -f64::MAX),
            RawRecord::new("Austria", "AT", 1, 3.0),
        ]);

        assert_eq!(store.load_report().saturated_totals, 2);
        let totals = store.region_totals();
        assert_eq!(totals.get("DEU"), Some(&f64::MAX));
        assert_eq!(totals.get("FRA"), Some(&-f64::MAX));
        assert_eq!(totals.get("AUT"), Some(&3.0));
    }

    #[test]
    fn region_totals_follow_first_seen_order() {
        let store = DatasetStore::load(vec![
            RawRecord::new("Germany", "DE", 1, 1.0),
            RawRecord::new("Austria", "AT", 1, 2.0),
            RawRecord::new("Germany", "DE", 2, 3.0),
        ]);
        let keys: Vec<&str> = store.region_totals().keys().copied().collect();
        assert_eq!(keys, vec!["DEU", "AUT"]);
    }
}
