pub mod categories;
pub mod init;
pub mod review;
pub mod suppliers;

use std::path::Path;

use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::error::{GstError, Result};
use crate::fmt::money;
use crate::importer::import_file;
use crate::models::SupplierKey;
use crate::session::Session;
use crate::settings::Settings;
use crate::sync::AffectedSet;

#[derive(Parser)]
#[command(
    name = "gstrecon",
    about = "Categorize GST 2B / purchase register discrepancies by supplier."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write default settings to ~/.config/gstrecon/settings.json.
    Init {
        /// Company used for rows without a Company Name
        #[arg(long = "default-company")]
        default_company: Option<String>,
        /// chrono format of document dates, e.g. %d-%m-%Y
        #[arg(long = "date-format")]
        date_format: Option<String>,
    },
    /// List the categories a supplier can be assigned.
    Categories,
    /// Show per-supplier totals and categories.
    Suppliers {
        /// CSV or XLSX file of classified discrepancies
        file: String,
        /// Assign a category: "COMPANY|MONTH|SUPPLIER=CATEGORY" (repeatable)
        #[arg(long = "assign")]
        assign: Vec<String>,
    },
    /// Show every discrepancy row with its supplier's category.
    Discrepancies {
        /// CSV or XLSX file of classified discrepancies
        file: String,
        /// Only rows for this supplier name
        #[arg(long)]
        supplier: Option<String>,
        /// Assign a category: "COMPANY|MONTH|SUPPLIER=CATEGORY" (repeatable)
        #[arg(long = "assign")]
        assign: Vec<String>,
    },
    /// Interactively assign a category to each supplier.
    Review {
        /// CSV or XLSX file of classified discrepancies
        file: String,
    },
}

/// Split `COMPANY|MONTH|SUPPLIER=CATEGORY` into key and category label.
pub(crate) fn parse_assignment(raw: &str) -> Result<(SupplierKey, String)> {
    let (key, label) = raw
        .rsplit_once('=')
        .ok_or_else(|| GstError::Other(format!("expected KEY=CATEGORY, got '{raw}'")))?;
    Ok((key.parse()?, label.trim().to_string()))
}

pub(crate) fn open_session(file: &str, settings: &Settings) -> Result<Session> {
    let records = import_file(Path::new(file), settings)?;
    let mut session = Session::new();
    session.load(records)?;
    Ok(session)
}

/// Apply `--assign` values in order, reporting the rows each one touched.
pub(crate) fn apply_assignments(
    session: &mut Session,
    assignments: &[String],
    settings: &Settings,
) -> Result<()> {
    for raw in assignments {
        let (key, label) = parse_assignment(raw)?;
        let affected = session.set_category(&key, &label)?;
        print_affected(session, &key, &affected, settings);
    }
    Ok(())
}

pub(crate) fn print_affected(
    session: &Session,
    key: &SupplierKey,
    affected: &AffectedSet,
    settings: &Settings,
) {
    if affected.previous == affected.current {
        println!("{key}: already {}", affected.current);
        return;
    }
    println!(
        "{key}: {} \u{2192} {} ({} rows)",
        affected.previous,
        affected.current.to_string().green(),
        affected.len()
    );
    for id in &affected.records {
        if let Some(rec) = session.store().record(*id) {
            println!(
                "  #{:<4} {:<12} {:<26} {}",
                id.index() + 1,
                rec.document_number,
                rec.kind,
                money(rec.total_gst, &settings.currency_symbol)
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        let (key, label) = parse_assignment("TestCorp|Jan|Supplier A=Admin").unwrap();
        assert_eq!(key, SupplierKey::new("TestCorp", "Jan", "Supplier A"));
        assert_eq!(label, "Admin");
    }

    #[test]
    fn test_parse_assignment_supplier_with_equals_sign() {
        let (key, label) = parse_assignment("TestCorp|Jan|A=B Traders= None").unwrap();
        assert_eq!(key.supplier(), "a=b traders");
        assert_eq!(label, "None");
    }

    #[test]
    fn test_parse_assignment_rejects_malformed() {
        assert!(parse_assignment("TestCorp|Jan|Supplier A").is_err());
        assert!(parse_assignment("Supplier A=Admin").is_err());
    }

    #[test]
    fn test_cli_parses_repeated_assign() {
        let cli = Cli::try_parse_from([
            "gstrecon",
            "suppliers",
            "data.csv",
            "--assign",
            "TestCorp|Jan|Supplier A=Admin",
            "--assign",
            "TestCorp|Jan|Supplier B=Accounts",
        ])
        .unwrap();
        match cli.command {
            Commands::Suppliers { file, assign } => {
                assert_eq!(file, "data.csv");
                assert_eq!(assign.len(), 2);
            }
            _ => panic!("expected suppliers"),
        }
    }
}
