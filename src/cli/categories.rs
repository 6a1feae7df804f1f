use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::models::Category;

pub fn list() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["#", "Category"]);
    for (i, cat) in Category::ALL.iter().enumerate() {
        table.add_row(vec![Cell::new(i + 1), Cell::new(cat.label())]);
    }
    println!("Categories\n{table}");
    Ok(())
}
