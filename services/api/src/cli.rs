use crate::infra::{assemble_dashboard, parse_date};
use crate::render::render_dashboard;
use crate::server;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use property_pulse::config::{AppConfig, SourceMode};
use property_pulse::error::AppError;
use property_pulse::reports::today_in;
use property_pulse::telemetry;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "Property Pulse",
    about = "Serve or print property management dashboards built from reporting API data",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Assemble a dashboard once and print it to stdout
    Dashboard(DashboardArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DashboardArgs {
    /// Property group id (defaults to REPORTS_PROPERTY_ID)
    #[arg(long)]
    pub(crate) property_id: Option<u64>,
    /// Reference date (YYYY-MM-DD). Defaults to today in REPORTS_TIMEZONE.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Use canned payloads instead of calling the reporting API
    #[arg(long)]
    pub(crate) fixtures: bool,
    /// Print the snapshot as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Dashboard(args) => run_dashboard(args).await,
    }
}

pub(crate) async fn run_dashboard(args: DashboardArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let DashboardArgs {
        property_id,
        today,
        fixtures,
        json,
    } = args;

    let reports = Arc::new(config.reports);
    let property_id = property_id.unwrap_or(reports.property_id);
    let today = today.unwrap_or_else(|| today_in(reports.timezone));
    let mode = if fixtures {
        SourceMode::Fixture
    } else {
        reports.source
    };

    let snapshot = assemble_dashboard(reports, mode, property_id, today).await?;

    if json {
        let body = serde_json::to_string_pretty(&snapshot)
            .map_err(|err| AppError::Internal(format!("unable to encode dashboard: {err}")))?;
        println!("{body}");
    } else {
        let text = render_dashboard(&snapshot)
            .map_err(|err| AppError::Internal(format!("unable to render dashboard: {err}")))?;
        print!("{text}");
    }
    Ok(())
}
