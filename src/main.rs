use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use hotel_availability::model::parse_date;
use hotel_availability::{
    parse_command, CancelSignal, DataFileLocation, DataLoader, Query, QueryEngine, SearchConfig,
};

#[derive(Debug, Parser)]
#[command(about = "Room availability and availability search over hotel bookings")]
struct Args {
    /// Hotels JSON file
    #[arg(long)]
    hotels: PathBuf,

    /// Bookings JSON file
    #[arg(long)]
    bookings: PathBuf,

    /// Run this command instead of prompting for one
    #[arg(long)]
    command: Option<String>,

    /// First day of the search horizon (yyyyMMdd), defaults to today in UTC
    #[arg(long, value_parser = parse_today)]
    today: Option<NaiveDate>,

    /// Per-day reads a search may run concurrently
    #[arg(long, default_value_t = 1)]
    concurrency: usize,
}

fn parse_today(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).ok_or_else(|| format!("invalid date '{value}', expected yyyyMMdd"))
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let location = DataFileLocation::new(&args.hotels, &args.bookings);
    let (store, summary) = match DataLoader::load(&location) {
        Ok(loaded) => loaded,
        Err(e) => {
            error!("Failed to load data:\n{e}");
            return Ok(ExitCode::from(1));
        }
    };
    info!(
        "Inserted {} hotels and {} bookings",
        summary.hotel_count, summary.booking_count
    );

    let command = match args.command {
        Some(command) => command,
        None => prompt().await.context("reading command from stdin")?,
    };

    let query = match parse_command(&command) {
        Ok(query) => query,
        Err(errors) => {
            error!("Failed to parse command:\n{}", errors.join("\n"));
            return Ok(ExitCode::from(2));
        }
    };

    let config = SearchConfig {
        concurrent_day_reads: args.concurrency,
    };
    let engine = QueryEngine::new(Arc::new(store), config);
    let today = args.today.unwrap_or_else(|| Utc::now().date_naive());

    // Ctrl-C cancels the running query; no partial result is printed
    let cancel = CancelSignal::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_ctrl_c.cancel();
        }
    });

    match engine.execute(&query, today, &cancel).await {
        Ok(outcome) => {
            info!("{outcome}");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!("{}\n{e}", query.name());
            let code = match query {
                Query::Availability(_) => 3,
                Query::Search(_) => 4,
            };
            Ok(ExitCode::from(code))
        }
    }
}

async fn prompt() -> std::io::Result<String> {
    print!("Command > ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(line)
}
