use crate::server;
use clap::{Args, Parser, Subcommand};
use loan_engine::config::AppConfig;
use loan_engine::decision::{DecisionEngine, DecisionResponse, LoanRequest};
use loan_engine::error::AppError;
use loan_engine::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "Loan Decision Engine",
    about = "Serve or run loan decisions from the command line",
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
    /// Run a single decision against the configured lending bounds
    Decide(DecideArgs),
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

#[derive(Args, Debug)]
pub(crate) struct DecideArgs {
    /// Applicant's Estonian personal identification code
    #[arg(long)]
    pub(crate) personal_code: String,
    /// Requested loan amount
    #[arg(long)]
    pub(crate) amount: i64,
    /// Requested loan period in months
    #[arg(long)]
    pub(crate) period: i32,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Decide(args) => run_decision(args),
    }
}

fn run_decision(args: DecideArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let (response, outcome) = decide(&config, args);

    let rendered = serde_json::to_string_pretty(&response)
        .map_err(|err| AppError::Io(std::io::Error::other(err)))?;
    println!("{rendered}");
    outcome
}

/// Runs one decision with the lending bounds from `config`.
fn decide(config: &AppConfig, args: DecideArgs) -> (DecisionResponse, Result<(), AppError>) {
    let engine = DecisionEngine::new(config.lending.clone());
    let request = LoanRequest::new(args.personal_code, args.amount, args.period);

    match engine.decide(&request) {
        Ok(offer) => (DecisionResponse::approved(offer), Ok(())),
        Err(err) => (DecisionResponse::from(&err), Err(AppError::from(err))),
    }
}
