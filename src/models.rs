use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::GstError;

/// Operator-assigned disposition for every discrepancy of one supplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    None,
    Admin,
    Accounts,
    Purchase,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::None,
        Category::Admin,
        Category::Accounts,
        Category::Purchase,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Admin => "Admin",
            Self::Accounts => "Accounts",
            Self::Purchase => "Purchase",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for Category {
    type Err = GstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .iter()
            .find(|c| c.label().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| GstError::InvalidCategory(s.to_string()))
    }
}

/// Which ledger a document is missing from, as classified upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscrepancyType {
    MissingIn2BCumulative,
    MissingInPRCumulative,
    MissingIn2B,
    MissingInPR,
}

impl DiscrepancyType {
    pub const ALL: [DiscrepancyType; 4] = [
        DiscrepancyType::MissingIn2BCumulative,
        DiscrepancyType::MissingInPRCumulative,
        DiscrepancyType::MissingIn2B,
        DiscrepancyType::MissingInPR,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::MissingIn2BCumulative => "Missing_2B_Cumulative",
            Self::MissingInPRCumulative => "Missing_in_PR_Cumulative",
            Self::MissingIn2B => "Missing_2B",
            Self::MissingInPR => "Missing_in_PR",
        }
    }

    /// True when the document is in the purchase register but not in 2B.
    pub fn is_missing_in_2b(&self) -> bool {
        matches!(self, Self::MissingIn2BCumulative | Self::MissingIn2B)
    }
}

impl fmt::Display for DiscrepancyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for DiscrepancyType {
    type Err = GstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .iter()
            .find(|t| t.label().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| GstError::UnknownDiscrepancyType(s.to_string()))
    }
}

/// Trim, collapse whitespace runs, and lowercase one key component.
pub fn normalize_key_part(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// `(company, month, supplier)` scope shared by every row that must show
/// the same category. Components are stored normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SupplierKey {
    company: String,
    month: String,
    supplier: String,
}

impl SupplierKey {
    pub fn new(company: &str, month: &str, supplier: &str) -> Self {
        Self {
            company: normalize_key_part(company),
            month: normalize_key_part(month),
            supplier: normalize_key_part(supplier),
        }
    }

    pub fn supplier(&self) -> &str {
        &self.supplier
    }
}

impl fmt::Display for SupplierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}|{}", self.company, self.month, self.supplier)
    }
}

impl FromStr for SupplierKey {
    type Err = GstError;

    /// Parses `COMPANY|MONTH|SUPPLIER`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('|').collect();
        match parts.as_slice() {
            [company, month, supplier] if !supplier.trim().is_empty() => {
                Ok(Self::new(company, month, supplier))
            }
            _ => Err(GstError::Other(format!(
                "expected COMPANY|MONTH|SUPPLIER, got '{s}'"
            ))),
        }
    }
}

/// Identity of a record within one loaded session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId {
    pub(crate) generation: u64,
    pub(crate) index: usize,
}

impl RecordId {
    /// Position in load order.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// A document present in one ledger but not reconciled against the other.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscrepancyRecord {
    pub company_name: String,
    pub month: String,
    pub supplier_name: String,
    pub kind: DiscrepancyType,
    pub total_gst: Decimal,
    pub document_number: String,
    pub document_date: Option<NaiveDate>,
    /// 1-based data row in the uploaded sheet, blank rows included.
    pub source_row: Option<usize>,
}

impl DiscrepancyRecord {
    pub fn supplier_key(&self) -> SupplierKey {
        SupplierKey::new(&self.company_name, &self.month, &self.supplier_name)
    }
}
