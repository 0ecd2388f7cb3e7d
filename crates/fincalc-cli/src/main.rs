mod commands;
mod config;
mod input;
mod output;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process;

use commands::bond::BondArgs;
use commands::scenario::ScenarioArgs;
use output::OutputFormat;

/// Fixed-rate bond pricing, risk metrics and saved scenarios
#[derive(Parser)]
#[command(
    name = "fincalc",
    version,
    about = "Fixed-rate bond pricing, risk metrics and saved scenarios",
    long_about = "A CLI for pricing plain fixed-rate coupon bonds by discounting their \
                  cash flows. Reports price, current yield, Macaulay and modified \
                  duration, convexity, returns, qualitative risk levels and a \
                  price-yield curve, and keeps named scenarios on disk for comparison."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Directory holding saved scenarios
    #[arg(long, env = "FINCALC_STORE", global = true)]
    store: Option<PathBuf>,

    /// Log calculation details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a bond and report every metric, cash flow and curve point
    Price(BondArgs),
    /// Headline figures rounded for display
    Summary(BondArgs),
    /// Cash-flow schedule with present values
    Cashflows(BondArgs),
    /// Price-yield curve around the input yield
    Curve(BondArgs),
    /// Encode the inputs as a shareable query string
    Share(BondArgs),
    /// Save, list, load, delete and compare named scenarios
    Scenario(ScenarioArgs),
    /// Print version information
    Version,
}

fn main() {
    let cli = Cli::parse();
    config::init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Price(args) => commands::bond::run_price(args),
        Commands::Summary(args) => commands::bond::run_summary(args),
        Commands::Cashflows(args) => commands::bond::run_cashflows(args),
        Commands::Curve(args) => commands::bond::run_curve(args),
        Commands::Share(args) => commands::bond::run_share(args),
        Commands::Scenario(args) => {
            let dir = config::resolve_store_dir(cli.store);
            commands::scenario::run_scenario(args, dir)
        }
        Commands::Version => {
            println!("fincalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
