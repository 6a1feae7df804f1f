use std::collections::{BTreeSet, HashMap};

use rust_decimal::Decimal;

use crate::error::Result;
use crate::models::{Category, DiscrepancyRecord, RecordId, SupplierKey};
use crate::store::DiscrepancyStore;
use crate::sync::{AffectedSet, CategorySync};

/// One row of the supplier summary view.
#[derive(Debug, Clone)]
pub struct SupplierSummary {
    pub key: SupplierKey,
    pub company_name: String,
    pub month: String,
    pub supplier_name: String,
    pub record_count: usize,
    pub missing_in_2b: Decimal,
    pub missing_in_pr: Decimal,
    pub category: Category,
}

/// The records of one upload together with the operator's assignments.
#[derive(Debug, Default)]
pub struct Session {
    store: DiscrepancyStore,
    sync: CategorySync,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new session from a fresh upload. On a validation error the
    /// previous records and assignments stay in place.
    pub fn load(&mut self, records: Vec<DiscrepancyRecord>) -> Result<()> {
        self.store.load(records)?;
        self.sync.reset();
        Ok(())
    }

    pub fn store(&self) -> &DiscrepancyStore {
        &self.store
    }

    pub fn get_category(&self, key: &SupplierKey) -> Category {
        self.sync.get_category(key)
    }

    pub fn category_of(&self, id: RecordId) -> Option<Category> {
        self.sync.category_of(id, &self.store)
    }

    pub fn set_category(&mut self, key: &SupplierKey, label: &str) -> Result<AffectedSet> {
        self.sync.set_category(key, label, &self.store)
    }

    pub fn assign(&mut self, key: &SupplierKey, category: Category) -> AffectedSet {
        self.sync.assign(key, category, &self.store)
    }

    pub fn records_for_supplier(&self, key: &SupplierKey) -> Vec<&DiscrepancyRecord> {
        self.store.records_for_supplier(key)
    }

    pub fn all_suppliers(&self) -> BTreeSet<SupplierKey> {
        self.store.all_suppliers()
    }

    /// Per-supplier totals, ordered by each supplier's first row.
    pub fn summaries(&self) -> Vec<SupplierSummary> {
        let mut out: Vec<SupplierSummary> = Vec::new();
        let mut index: HashMap<&SupplierKey, usize> = HashMap::new();

        for (_, rec, key) in self.store.iter() {
            let i = *index.entry(key).or_insert_with(|| {
                out.push(SupplierSummary {
                    key: key.clone(),
                    company_name: rec.company_name.trim().to_string(),
                    month: rec.month.trim().to_string(),
                    supplier_name: rec.supplier_name.trim().to_string(),
                    record_count: 0,
                    missing_in_2b: Decimal::ZERO,
                    missing_in_pr: Decimal::ZERO,
                    category: self.sync.get_category(key),
                });
                out.len() - 1
            });
            let summary = &mut out[i];
            summary.record_count += 1;
            if rec.kind.is_missing_in_2b() {
                summary.missing_in_2b += rec.total_gst;
            } else {
                summary.missing_in_pr += rec.total_gst;
            }
        }
        out
    }
}
