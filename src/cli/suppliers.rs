use colored::Colorize;
use comfy_table::{Cell, Table};
use rust_decimal::Decimal;

use crate::error::Result;
use crate::fmt::money;
use crate::models::{normalize_key_part, Category, RecordId};
use crate::session::Session;
use crate::settings::{load_settings, Settings};

use super::{apply_assignments, open_session};

fn category_cell(category: Category) -> Cell {
    match category {
        Category::None => Cell::new(category.label()),
        other => Cell::new(other.label().green()),
    }
}

pub(crate) fn summary_table(session: &Session, settings: &Settings) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "Company",
        "Month",
        "Supplier",
        "Rows",
        "Missing in 2B",
        "Missing in PR",
        "Category",
    ]);
    let (mut total_2b, mut total_pr) = (Decimal::ZERO, Decimal::ZERO);
    for s in session.summaries() {
        total_2b += s.missing_in_2b;
        total_pr += s.missing_in_pr;
        table.add_row(vec![
            Cell::new(&s.company_name),
            Cell::new(&s.month),
            Cell::new(&s.supplier_name),
            Cell::new(s.record_count),
            Cell::new(money(s.missing_in_2b, &settings.currency_symbol)),
            Cell::new(money(s.missing_in_pr, &settings.currency_symbol)),
            category_cell(s.category),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total".bold()),
        Cell::new(""),
        Cell::new(""),
        Cell::new(session.store().len()),
        Cell::new(money(total_2b, &settings.currency_symbol)),
        Cell::new(money(total_pr, &settings.currency_symbol)),
        Cell::new(""),
    ]);
    table
}

pub(crate) fn rows_table(session: &Session, ids: &[RecordId], settings: &Settings) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "#", "Company", "Month", "Supplier", "Type", "Document", "Date", "Total GST", "Category",
    ]);
    for &id in ids {
        let Some(rec) = session.store().record(id) else {
            continue;
        };
        let date = rec.document_date.map(|d| d.to_string()).unwrap_or_default();
        table.add_row(vec![
            Cell::new(id.index() + 1),
            Cell::new(&rec.company_name),
            Cell::new(&rec.month),
            Cell::new(&rec.supplier_name),
            Cell::new(rec.kind.label()),
            Cell::new(&rec.document_number),
            Cell::new(date),
            Cell::new(money(rec.total_gst, &settings.currency_symbol)),
            category_cell(session.category_of(id).unwrap_or_default()),
        ]);
    }
    table
}

pub fn summary(file: &str, assign: &[String]) -> Result<()> {
    let settings = load_settings();
    let mut session = open_session(file, &settings)?;
    apply_assignments(&mut session, assign, &settings)?;

    if session.store().is_empty() {
        println!("{}", "No discrepancies in file.".yellow());
        return Ok(());
    }
    println!(
        "{} discrepancies across {} suppliers",
        session.store().len(),
        session.all_suppliers().len()
    );
    println!("Suppliers\n{}", summary_table(&session, &settings));
    Ok(())
}

pub fn discrepancies(file: &str, supplier: Option<&str>, assign: &[String]) -> Result<()> {
    let settings = load_settings();
    let mut session = open_session(file, &settings)?;
    apply_assignments(&mut session, assign, &settings)?;

    let wanted = supplier.map(normalize_key_part);
    let ids: Vec<RecordId> = session
        .store()
        .iter()
        .filter(|(_, _, key)| wanted.as_deref().map_or(true, |w| key.supplier() == w))
        .map(|(id, _, _)| id)
        .collect();

    if ids.is_empty() {
        println!("{}", "No matching discrepancies.".yellow());
        return Ok(());
    }
    println!("Discrepancies\n{}", rows_table(&session, &ids, &settings));
    Ok(())
}
