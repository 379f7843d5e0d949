// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod config;

use std::process::ExitCode;
use std::time::Duration;

use chrono::{Days, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use log::warn;
use stats_client::{
    Failure, FetchState, RapidApiConfig, RapidApiSource, Report, StatsClient, TcpProbe, Totals,
};

use config::AppConfig;

#[derive(Debug, Parser)]
#[command(name = "covidtrack", version, about = "Pandemic statistics from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show worldwide totals
    Totals,

    /// Show the latest reports for a country
    Report {
        /// Country name, e.g. "Mexico"
        #[arg(long)]
        name: String,

        /// Report date in YYYY-MM-DD format; defaults to yesterday
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Print the configuration file location
    ConfigPath,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load configuration, using defaults: {}", e);
            AppConfig::default()
        }
    };

    match cli.command {
        Command::Totals => run_totals(&build_client(&config)).await,
        Command::Report { name, date } => {
            let date = date.unwrap_or_else(yesterday);
            run_report(&build_client(&config), &name, date).await
        }
        Command::ConfigPath => print_config_path(),
    }
}

fn build_client(config: &AppConfig) -> StatsClient {
    let api = RapidApiConfig {
        base_url: config.api_base_url.clone(),
        api_key: config.resolve_api_key(),
        api_host: config.api_host.clone(),
    };

    let probe = TcpProbe::new(
        config.probe_address.clone(),
        Duration::from_millis(config.probe_timeout_ms),
    );

    if api.api_key.is_none() {
        warn!("No API key configured; the statistics service may reject requests");
    }

    StatsClient::with_parts(probe, RapidApiSource::new(api))
}

fn yesterday() -> NaiveDate {
    let today = Utc::now().date_naive();
    today.checked_sub_days(Days::new(1)).unwrap_or(today)
}

async fn run_totals(client: &StatsClient) -> ExitCode {
    println!("Fetching worldwide totals...");

    match client.fetch_totals().wait_terminal().await {
        Some(FetchState::Success(totals)) => {
            render_totals(&totals);
            ExitCode::SUCCESS
        }
        Some(FetchState::Failed(failure)) => {
            eprintln!("{}", failure_message(&failure));
            ExitCode::FAILURE
        }
        _ => {
            eprintln!("Fetch did not complete");
            ExitCode::FAILURE
        }
    }
}

async fn run_report(client: &StatsClient, name: &str, date: NaiveDate) -> ExitCode {
    println!("Fetching reports for {} on {}...", name, date);

    match client.fetch_country_report(name, date).wait_terminal().await {
        Some(FetchState::Success(reports)) => {
            if reports.is_empty() {
                println!("No reports for {} on {}", name, date);
            } else {
                render_reports(&reports);
            }
            ExitCode::SUCCESS
        }
        Some(FetchState::Failed(failure)) => {
            eprintln!("{}", failure_message(&failure));
            ExitCode::FAILURE
        }
        _ => {
            eprintln!("Fetch did not complete");
            ExitCode::FAILURE
        }
    }
}

fn print_config_path() -> ExitCode {
    match AppConfig::get_config_path() {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Could not determine configuration path: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn render_totals(totals: &Totals) {
    println!("Worldwide totals:");
    println!("  {:<10} {:>12}", "Confirmed", totals.confirmed);
    println!("  {:<10} {:>12}", "Recovered", totals.recovered);
    println!("  {:<10} {:>12}", "Critical", totals.critical);
    println!("  {:<10} {:>12}", "Deaths", totals.deaths);
}

fn render_reports(reports: &[Report]) {
    for report in reports {
        let place = match &report.province {
            Some(province) => format!("{} / {}", report.country, province),
            None => report.country.clone(),
        };

        println!(
            "{} ({}): {} confirmed, {} deaths, {} recovered, {} active",
            place, report.date, report.confirmed, report.deaths, report.recovered, report.active
        );
    }
}

/// Turn a failure into user-facing text. The pipeline itself never formats
/// failures; that is this observer's job.
fn failure_message(failure: &Failure) -> &'static str {
    match failure {
        Failure::NetworkConnection => "No network connection. Check your link and try again.",
        Failure::ServerError => "The statistics service is unavailable right now. Try again later.",
    }
}
