mod cli;
mod config;
mod import;
mod sink;
mod source;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use colored::*;

use cli::commands::import::handler;
use cli::{Cli, Commands};
use config::Config;

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

async fn run(cli: Cli) -> Result<bool> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Products(args) => {
            let report = handler::handle_products(args, &config).await?;
            Ok(report.is_success())
        }
        Commands::Catalog(args) => {
            let report = handler::handle_catalog(args, &config).await?;
            Ok(report.is_success())
        }
        Commands::Mapping(args) => {
            handler::handle_mapping(args, &config)?;
            Ok(true)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
