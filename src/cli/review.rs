use colored::Colorize;
use dialoguer::Select;

use crate::error::{GstError, Result};
use crate::models::Category;
use crate::settings::load_settings;

use super::open_session;
use super::suppliers::{rows_table, summary_table};

pub fn run(file: &str) -> Result<()> {
    let settings = load_settings();
    let mut session = open_session(file, &settings)?;

    let summaries = session.summaries();
    if summaries.is_empty() {
        println!("{}", "No discrepancies to review.".green());
        return Ok(());
    }
    println!("\n{} suppliers to review\n", summaries.len());

    let mut items: Vec<&str> = Category::ALL.iter().map(|c| c.label()).collect();
    items.push("Skip");
    items.push("Quit");

    for summary in &summaries {
        let key = &summary.key;
        let ids = session.store().ids_for_supplier(key);
        println!("{}", "\u{2500}".repeat(60));
        println!(
            "  {} ({}, {}): {} rows",
            summary.supplier_name.bold(),
            summary.company_name,
            summary.month,
            session.records_for_supplier(key).len()
        );
        println!("{}", rows_table(&session, &ids, &settings));

        let current = session.get_category(key);
        let default = Category::ALL
            .iter()
            .position(|c| *c == current)
            .unwrap_or_default();
        let choice = Select::new()
            .with_prompt("Category")
            .items(&items)
            .default(default)
            .interact()
            .map_err(|e| GstError::Other(format!("Prompt failed: {e}")))?;

        match items[choice] {
            "Quit" => {
                println!("{}", "Review paused.".yellow());
                break;
            }
            "Skip" => continue,
            _ => {
                let affected = session.assign(key, Category::ALL[choice]);
                if affected.is_empty() {
                    println!("Unchanged ({current}).");
                } else {
                    println!(
                        "{}",
                        format!("\u{2192} {} rows now {}", affected.len(), affected.current).green()
                    );
                    println!("{}", rows_table(&session, &affected.records, &settings));
                }
            }
        }
        println!();
    }

    println!("Suppliers\n{}", summary_table(&session, &settings));
    Ok(())
}
