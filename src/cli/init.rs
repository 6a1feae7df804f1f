use crate::error::Result;
use crate::settings::{load_settings, save_settings, settings_path};

pub fn run(default_company: Option<String>, date_format: Option<String>) -> Result<()> {
    let mut settings = load_settings();
    if let Some(company) = default_company {
        settings.default_company = company.trim().to_string();
    }
    if let Some(format) = date_format {
        settings.date_format = format;
    }
    save_settings(&settings)?;
    println!("Wrote {}", settings_path().display());
    Ok(())
}
