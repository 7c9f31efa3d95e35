use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use guardrail_core::DEFAULT_TIMEZONE;
use guardrail_finance::report::render_kpis_json;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod run;


const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GUARDRAIL_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(
    name = "guardrail",
    version,
    long_version = LONG_VERSION,
    about = "Monthly budget KPIs and guardrail alerts from bank CSV exports"
)]
struct Cli {
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute KPIs, write the Markdown report + alerts.json, print KPIs as JSON
    Run {
        /// Directory holding bank CSV exports
        #[arg(long, default_value = "data/transactions")]
        data_dir: PathBuf,

        /// YAML rule file
        #[arg(long, default_value = "config/budget_rules.yml")]
        config: PathBuf,

        /// Optional balance snapshot (used only if the file exists)
        #[arg(long, default_value = "data/balances.csv")]
        balances: PathBuf,

        /// Output directory for finance_report.md and alerts.json
        #[arg(long, default_value = "docs")]
        docs_dir: PathBuf,

        /// Reference date (YYYY-MM-DD) instead of today
        #[arg(long)]
        today: Option<String>,

        /// IANA timezone used to determine today
        #[arg(long, default_value = DEFAULT_TIMEZONE)]
        tz: String,
    },

    /// Show which category each description lands in
    Categorize {
        /// YAML rule file
        #[arg(long, default_value = "config/budget_rules.yml")]
        config: PathBuf,

        /// Descriptions to categorize
        #[arg(required = true)]
        descriptions: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // stderr keeps stdout clean for the JSON result
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false).compact())
        .init();

    match cli.command {
        Command::Run {
            data_dir,
            config,
            balances,
            docs_dir,
            today,
            tz,
        } => {
            let opts = run::RunOptions {
                data_dir,
                config,
                balances,
                docs_dir,
                today,
                tz,
            };
            let kpis = run::run(&opts)?;
            println!("{}", render_kpis_json(&kpis).context("serialize KPIs")?);
        }

        Command::Categorize {
            config,
            descriptions,
        } => {
            for line in run::categorize(&config, &descriptions)? {
                println!("{}", line);
            }
        }
    }

    Ok(())
}
