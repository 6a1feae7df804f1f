mod cli;
mod error;
mod fmt;
mod importer;
mod models;
mod session;
mod settings;
mod store;
mod sync;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init {
            default_company,
            date_format,
        } => cli::init::run(default_company, date_format),
        Commands::Categories => cli::categories::list(),
        Commands::Suppliers { file, assign } => cli::suppliers::summary(&file, &assign),
        Commands::Discrepancies {
            file,
            supplier,
            assign,
        } => cli::suppliers::discrepancies(&file, supplier.as_deref(), &assign),
        Commands::Review { file } => cli::review::run(&file),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
