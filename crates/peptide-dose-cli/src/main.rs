mod cli;
mod commands;
mod config;
mod render;

use anyhow::Context;
use clap::Parser;
use peptide_dose_core::Database;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::config::{parse_locale, Config, MAX_DECIMALS};
use crate::render::NumberStyle;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;

    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Some(locale) = &cli.locale {
        config.locale = parse_locale(locale)?;
    }
    if let Some(decimals) = cli.decimals {
        config.decimals = decimals.min(MAX_DECIMALS);
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let style = NumberStyle {
        locale: config.locale,
        decimals: config.decimals,
    };

    let open_db = || {
        Database::open(&config.db_path).with_context(|| {
            format!("Failed to open state database {}", config.db_path.display())
        })
    };

    let output = match &cli.command {
        Commands::Calc(args) => commands::run_calc(&open_db()?, args, style)?,
        Commands::Inverse(args) => commands::run_inverse(&open_db()?, args, style)?,
        Commands::Pen(args) => commands::run_pen(args, style)?,
        Commands::Convert { conversion, value } => {
            commands::run_convert(*conversion, *value, style)
        }
        Commands::State { action } => commands::run_state(&open_db()?, action)?,
    };

    print!("{}", output);
    Ok(())
}
