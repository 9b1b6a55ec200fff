//! Subscribely savings quote
//!
//! Prints the calculator's estimate for one or more monthly spends, using the
//! same config the site is built with.

use subscribely_site::app::savings::{estimate, format_grouped, parse_spend};
use subscribely_site::config;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Spends shown when none are given on the command line
const SAMPLE_SPENDS: &[i64] = &[0, 100, 500];

#[derive(Parser, Debug)]
#[command(
    name = "subscribely-quote",
    about = "Print the savings calculator's estimate for monthly spends",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SUBSCRIBELY_GIT_SHA"), ")")
)]
struct Args {
    /// Monthly spend in dollars (defaults to 0, 100 and 500)
    #[arg(value_parser = monthly_spend, allow_negative_numbers = true)]
    spends: Vec<i64>,
}

fn monthly_spend(raw: &str) -> std::result::Result<i64, String> {
    parse_spend(raw).ok_or_else(|| format!("not a monthly spend: {:?}", raw))
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "subscribely_site=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = config::load_config()?;
    let model = &config.savings;
    tracing::debug!(
        plan_savings = model.plan_savings,
        optimization_rate = model.optimization_rate,
        "Configuration loaded"
    );

    let spends = if args.spends.is_empty() {
        SAMPLE_SPENDS.to_vec()
    } else {
        args.spends
    };

    let sep = &model.thousands_separator;
    for spend in spends {
        println!(
            "${}/mo -> ${}/yr saved",
            format_grouped(spend, sep),
            format_grouped(estimate(model, spend), sep)
        );
    }

    Ok(())
}
