use std::collections::{BTreeSet, HashMap};

use crate::error::{GstError, Result};
use crate::models::{DiscrepancyRecord, RecordId, SupplierKey};

/// Discrepancy records of the current session, indexed by supplier key.
#[derive(Debug, Default)]
pub struct DiscrepancyStore {
    generation: u64,
    records: Vec<DiscrepancyRecord>,
    keys: Vec<SupplierKey>,
    by_supplier: HashMap<SupplierKey, Vec<usize>>,
}

fn validate(records: &[DiscrepancyRecord]) -> Result<()> {
    for (i, rec) in records.iter().enumerate() {
        if rec.supplier_name.trim().is_empty() {
            return Err(GstError::Validation {
                row: rec.source_row.unwrap_or(i + 1),
                field: "supplier_name",
                reason: "must not be empty".to_string(),
            });
        }
    }
    Ok(())
}

impl DiscrepancyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every record. Nothing changes if any record is invalid.
    pub fn load(&mut self, records: Vec<DiscrepancyRecord>) -> Result<()> {
        validate(&records)?;

        let keys: Vec<SupplierKey> = records.iter().map(|r| r.supplier_key()).collect();
        let mut by_supplier: HashMap<SupplierKey, Vec<usize>> = HashMap::new();
        for (i, key) in keys.iter().enumerate() {
            by_supplier.entry(key.clone()).or_default().push(i);
        }

        self.generation += 1;
        self.records = records;
        self.keys = keys;
        self.by_supplier = by_supplier;
        log::info!(
            "loaded {} discrepancies across {} suppliers",
            self.records.len(),
            self.by_supplier.len()
        );
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn id(&self, index: usize) -> RecordId {
        RecordId {
            generation: self.generation,
            index,
        }
    }

    /// Resolve an id handed out by this session. Ids from earlier loads
    /// resolve to `None`.
    pub fn record(&self, id: RecordId) -> Option<&DiscrepancyRecord> {
        if id.generation != self.generation {
            return None;
        }
        self.records.get(id.index)
    }

    pub fn key_of(&self, id: RecordId) -> Option<&SupplierKey> {
        if id.generation != self.generation {
            return None;
        }
        self.keys.get(id.index)
    }

    /// Records sharing `key`, in load order.
    pub fn records_for_supplier(&self, key: &SupplierKey) -> Vec<&DiscrepancyRecord> {
        self.entries_for_supplier(key).map(|(_, r)| r).collect()
    }

    pub fn ids_for_supplier(&self, key: &SupplierKey) -> Vec<RecordId> {
        self.entries_for_supplier(key).map(|(id, _)| id).collect()
    }

    pub fn entries_for_supplier<'a>(
        &'a self,
        key: &SupplierKey,
    ) -> impl Iterator<Item = (RecordId, &'a DiscrepancyRecord)> + 'a {
        self.by_supplier
            .get(key)
            .map(|v| v.as_slice())
            .unwrap_or_default()
            .iter()
            .map(move |&i| (self.id(i), &self.records[i]))
    }

    pub fn all_suppliers(&self) -> BTreeSet<SupplierKey> {
        self.by_supplier.keys().cloned().collect()
    }

    /// Every record with its id and key, in load order.
    pub fn iter(&self) -> impl Iterator<Item = (RecordId, &DiscrepancyRecord, &SupplierKey)> {
        self.records
            .iter()
            .zip(&self.keys)
            .enumerate()
            .map(move |(i, (r, k))| (self.id(i), r, k))
    }
}

#[cfg(test)]
pub(crate) fn record(
    company: &str,
    month: &str,
    supplier: &str,
    kind: crate::models::DiscrepancyType,
    gst: i64,
    doc: &str,
) -> DiscrepancyRecord {
    DiscrepancyRecord {
        company_name: company.to_string(),
        month: month.to_string(),
        supplier_name: supplier.to_string(),
        kind,
        total_gst: rust_decimal::Decimal::from(gst),
        document_number: doc.to_string(),
        document_date: None,
        source_row: None,
    }
}

/// The three-row upload used throughout the tests: two rows for Supplier A
/// and one for Supplier B, all TestCorp / Jan.
#[cfg(test)]
pub(crate) fn sample_records() -> Vec<DiscrepancyRecord> {
    use crate::models::DiscrepancyType::*;
    vec![
        record("TestCorp", "Jan", "Supplier A", MissingIn2BCumulative, 100, "DOC001"),
        record("TestCorp", "Jan", "Supplier A", MissingInPRCumulative, 200, "DOC002"),
        record("TestCorp", "Jan", "Supplier B", MissingIn2BCumulative, 50, "DOC003"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DiscrepancyType;

    fn loaded() -> DiscrepancyStore {
        let mut store = DiscrepancyStore::new();
        store.load(sample_records()).unwrap();
        store
    }

    #[test]
    fn test_records_for_supplier_in_load_order() {
        let store = loaded();
        let key = SupplierKey::new("TestCorp", "Jan", "Supplier A");
        let rows = store.records_for_supplier(&key);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].document_number, "DOC001");
        assert_eq!(rows[1].document_number, "DOC002");
    }

    #[test]
    fn test_unknown_supplier_has_no_records() {
        let store = loaded();
        let key = SupplierKey::new("TestCorp", "Jan", "Supplier C");
        assert!(store.records_for_supplier(&key).is_empty());
        assert!(store.ids_for_supplier(&key).is_empty());
    }

    #[test]
    fn test_all_suppliers() {
        let store = loaded();
        let all = store.all_suppliers();
        assert_eq!(all.len(), 2);
        assert!(all.contains(&SupplierKey::new("TestCorp", "Jan", "Supplier A")));
        assert!(all.contains(&SupplierKey::new("TestCorp", "Jan", "Supplier B")));
    }

    #[test]
    fn test_grouping_ignores_case_and_spacing() {
        let mut store = DiscrepancyStore::new();
        store
            .load(vec![
                record("TestCorp", "Jan", "Supplier A", DiscrepancyType::MissingIn2B, 1, "D1"),
                record("testcorp", " jan", "SUPPLIER  A ", DiscrepancyType::MissingInPR, 2, "D2"),
            ])
            .unwrap();
        assert_eq!(store.all_suppliers().len(), 1);
        // Display strings are kept as loaded.
        let (_, second, _) = store.iter().nth(1).unwrap();
        assert_eq!(second.supplier_name, "SUPPLIER  A ");
    }

    #[test]
    fn test_load_rejects_blank_supplier_without_partial_load() {
        let mut store = loaded();
        let mut bad = sample_records();
        bad[1].supplier_name = "   ".to_string();
        let err = store.load(bad).unwrap_err();
        assert!(matches!(err, GstError::Validation { row: 2, field: "supplier_name", .. }));
        assert_eq!(store.len(), 3);
        assert_eq!(store.all_suppliers().len(), 2);
    }

    #[test]
    fn test_load_replaces_and_invalidates_ids() {
        let mut store = loaded();
        let key = SupplierKey::new("TestCorp", "Jan", "Supplier A");
        let old_ids = store.ids_for_supplier(&key);
        assert!(store.record(old_ids[0]).is_some());

        store
            .load(vec![record("Other", "Feb", "Supplier Z", DiscrepancyType::MissingIn2B, 9, "D9")])
            .unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.record(old_ids[0]).is_none());
        assert!(store.key_of(old_ids[0]).is_none());
        assert!(store.records_for_supplier(&key).is_empty());
    }
}
