use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{GstError, Result};
use crate::models::{DiscrepancyRecord, DiscrepancyType};
use crate::settings::Settings;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a GST amount, tolerating grouping commas, currency marks and
/// parenthesized negatives. Blank cells count as zero.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let s = raw
        .replace([',', '"', '₹'], "")
        .replace("Rs.", "")
        .replace("Rs", "");
    let s = s.trim();
    if s.is_empty() {
        return Some(Decimal::ZERO);
    }
    if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        return Decimal::from_str(inner.trim()).ok().map(|d| -d);
    }
    Decimal::from_str(s).ok()
}

pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    // 9999-12-31 is the last date Excel can represent
    if !(0.0..=2_958_465.0).contains(&serial) {
        return None;
    }
    // Excel epoch is 1899-12-30 (accounting for the 1900 leap year bug)
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    base.checked_add_signed(chrono::Duration::days(serial as i64))
}

/// Blank cells have no date. Numeric cells are Excel serials.
pub fn parse_document_date(raw: &str, format: &str) -> Option<Option<NaiveDate>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
        return Some(Some(date));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(Some(date));
    }
    raw.parse::<f64>().ok().and_then(excel_serial_to_date).map(Some)
}

// ---------------------------------------------------------------------------
// Column layout
// ---------------------------------------------------------------------------

const COL_COMPANY: &[&str] = &["Company Name", "Company"];
const COL_MONTH: &[&str] = &["Month", "Return Period"];
const COL_SUPPLIER: &[&str] = &["Supplier Name", "Supplier", "Trade Name"];
const COL_TYPE: &[&str] = &["Type", "Status"];
const COL_GST: &[&str] = &["Total GST", "Total Tax"];
const COL_DOC_NUMBER: &[&str] = &[
    "Document Number (2B)",
    "Document Number (PR)",
    "Document Number",
    "Invoice Number",
];
const COL_DOC_DATE: &[&str] = &[
    "Document Date (2B)",
    "Document Date (PR)",
    "Document Date",
    "Invoice Date",
];

struct Columns {
    company: Option<usize>,
    month: Option<usize>,
    supplier: usize,
    kind: usize,
    gst: usize,
    doc_number: Option<usize>,
    doc_date: Option<usize>,
}

fn find_column(headers: &[String], names: &[&str]) -> Option<usize> {
    names.iter().find_map(|name| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    })
}

fn require_column(headers: &[String], names: &[&str]) -> Result<usize> {
    find_column(headers, names)
        .ok_or_else(|| GstError::Other(format!("Missing column: {}", names[0])))
}

impl Columns {
    fn detect(headers: &[String]) -> Result<Self> {
        Ok(Self {
            company: find_column(headers, COL_COMPANY),
            month: find_column(headers, COL_MONTH),
            supplier: require_column(headers, COL_SUPPLIER)?,
            kind: require_column(headers, COL_TYPE)?,
            gst: require_column(headers, COL_GST)?,
            doc_number: find_column(headers, COL_DOC_NUMBER),
            doc_date: find_column(headers, COL_DOC_DATE),
        })
    }
}

fn cell(row: &[String], idx: Option<usize>) -> &str {
    idx.and_then(|i| row.get(i)).map(|s| s.trim()).unwrap_or("")
}

/// Turn a header row plus data rows into discrepancy records. Row numbers
/// in errors are 1-based data rows.
pub fn rows_to_records(
    headers: &[String],
    rows: &[Vec<String>],
    settings: &Settings,
) -> Result<Vec<DiscrepancyRecord>> {
    let cols = Columns::detect(headers)?;
    let mut records = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        if row.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        let row_no = i + 1;

        let raw_kind = cell(row, Some(cols.kind));
        let kind = DiscrepancyType::from_str(raw_kind).map_err(|_| GstError::Validation {
            row: row_no,
            field: "type",
            reason: format!("'{raw_kind}' is not a recognized discrepancy type"),
        })?;

        let raw_gst = cell(row, Some(cols.gst));
        let total_gst = parse_amount(raw_gst).ok_or_else(|| GstError::Validation {
            row: row_no,
            field: "total_gst",
            reason: format!("cannot parse amount '{raw_gst}'"),
        })?;

        let raw_date = cell(row, cols.doc_date);
        let document_date = parse_document_date(raw_date, &settings.date_format).ok_or_else(|| {
            GstError::Validation {
                row: row_no,
                field: "document_date",
                reason: format!("cannot parse date '{raw_date}'"),
            }
        })?;

        let company = cell(row, cols.company);
        let company_name = if company.is_empty() {
            settings.default_company.clone()
        } else {
            company.to_string()
        };

        records.push(DiscrepancyRecord {
            company_name,
            month: cell(row, cols.month).to_string(),
            supplier_name: cell(row, Some(cols.supplier)).to_string(),
            kind,
            total_gst,
            document_number: cell(row, cols.doc_number).to_string(),
            document_date,
            source_row: Some(row_no),
        });
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// File readers
// ---------------------------------------------------------------------------

fn read_csv(file_path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let file = std::fs::File::open(file_path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(std::io::BufReader::new(file));
    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok((headers, rows))
}

#[cfg(feature = "xlsx")]
fn read_workbook(file_path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    use calamine::Reader;

    let mut workbook = calamine::open_workbook_auto(file_path)
        .map_err(|e| GstError::Other(format!("Failed to open workbook: {e}")))?;
    let names = workbook.sheet_names();
    let sheet = names
        .iter()
        .find(|n| n.as_str() == "Transactions")
        .or_else(|| names.first())
        .cloned()
        .ok_or_else(|| GstError::Other("Workbook has no sheets".to_string()))?;
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| GstError::Other(format!("Failed to read sheet '{sheet}': {e}")))?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(|c| c.to_string()).collect::<Vec<String>>());
    let headers = rows.next().unwrap_or_default();
    Ok((headers, rows.collect()))
}

#[cfg(not(feature = "xlsx"))]
fn read_workbook(_file_path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    Err(GstError::Other(
        "Workbook support is disabled; export the sheet as CSV".to_string(),
    ))
}

fn is_workbook(file_path: &Path) -> bool {
    file_path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| ["xlsx", "xlsm", "xls", "ods"].contains(&e.to_ascii_lowercase().as_str()))
}

/// Read already-classified discrepancies from a CSV or workbook file.
pub fn import_file(file_path: &Path, settings: &Settings) -> Result<Vec<DiscrepancyRecord>> {
    let (headers, rows) = if is_workbook(file_path) {
        read_workbook(file_path)?
    } else {
        read_csv(file_path)?
    };
    let records = rows_to_records(&headers, &rows, settings)?;
    log::info!("read {} rows from {}", records.len(), file_path.display());
    Ok(records)
}
