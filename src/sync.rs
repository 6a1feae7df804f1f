use std::collections::HashMap;

use crate::error::Result;
use crate::models::{Category, RecordId, SupplierKey};
use crate::store::DiscrepancyStore;

/// Records whose displayed category changed after an assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AffectedSet {
    pub previous: Category,
    pub current: Category,
    pub records: Vec<RecordId>,
}

impl AffectedSet {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Owns the single category cell per supplier key. A record's category is
/// always read through here, so every row of a supplier agrees.
#[derive(Debug, Default)]
pub struct CategorySync {
    assignments: HashMap<SupplierKey, Category>,
}

impl CategorySync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_category(&self, key: &SupplierKey) -> Category {
        self.assignments.get(key).copied().unwrap_or_default()
    }

    /// Parse `label` and assign it to `key`. Unknown labels leave the table
    /// untouched.
    pub fn set_category(
        &mut self,
        key: &SupplierKey,
        label: &str,
        store: &DiscrepancyStore,
    ) -> Result<AffectedSet> {
        let category = label.parse::<Category>().inspect_err(|_| {
            log::warn!("rejected category '{label}' for {key}");
        })?;
        Ok(self.assign(key, category, store))
    }

    pub fn assign(
        &mut self,
        key: &SupplierKey,
        category: Category,
        store: &DiscrepancyStore,
    ) -> AffectedSet {
        let previous = self
            .assignments
            .insert(key.clone(), category)
            .unwrap_or_default();

        let records = if previous == category {
            Vec::new()
        } else {
            store.ids_for_supplier(key)
        };
        log::debug!(
            "{key}: {previous} -> {category} ({} rows refreshed)",
            records.len()
        );

        AffectedSet {
            previous,
            current: category,
            records,
        }
    }

    /// Category shown for one row, or `None` if the id is stale.
    pub fn category_of(&self, id: RecordId, store: &DiscrepancyStore) -> Option<Category> {
        store.key_of(id).map(|k| self.get_category(k))
    }

    #[allow(dead_code)]
    pub fn assigned_count(&self) -> usize {
        self.assignments.len()
    }

    pub fn reset(&mut self) {
        self.assignments.clear();
    }
}
