use std::sync::Arc;

use anyhow::bail;
use clap::{Args, Parser, Subcommand};
use num_bigint::BigUint;
use quotient_common::{
    models::{Quote, Tolerance},
    QuoteBackend,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    config::OracleConfig, convergence::ConvergenceChecker, normalize::normalize,
    scenario::EquivalenceOracle,
};

/// Quotient Oracle
///
/// Cross-checks swap quotes from independent pricing backends and fails
/// when they disagree beyond a configured tolerance.
#[derive(Parser, PartialEq, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    global_args: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn args(&self) -> GlobalArgs {
        self.global_args.clone()
    }

    pub fn command(&self) -> Command {
        self.command.clone()
    }
}

#[derive(Subcommand, Clone, PartialEq, Debug)]
pub enum Command {
    /// Runs every scenario of a config file and exits non-zero if any
    /// pair's quotes diverge.
    Run(RunArgs),
    /// One-shot convergence check over quotes given on the command line.
    Check(CheckArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct GlobalArgs {
    /// Log filter directive, e.g. "info" or "quotient_oracle=debug"
    #[clap(long, env = "QUOTIENT_LOG", default_value = "info")]
    pub log: String,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct RunArgs {
    /// Path to the JSON oracle config (token table, pairs, backends)
    #[clap(long, env = "QUOTIENT_CONFIG")]
    pub config: String,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct CheckArgs {
    /// A quote to compare, as label:raw_amount:decimals. Give at least
    /// two, e.g. --quote lens:3057857924:6 --quote quoter:3060000000:6
    #[clap(long = "quote", value_parser = parse_quote_arg, required = true, num_args = 1)]
    pub quotes: Vec<QuoteArg>,

    /// Maximum allowed relative deviation, in basis points
    #[clap(long, default_value = "100")]
    pub tolerance_bps: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteArg {
    pub label: String,
    pub amount: u128,
    pub decimals: u32,
}

fn parse_quote_arg(raw: &str) -> Result<QuoteArg, String> {
    let parts: Vec<&str> = raw.split(':').collect();
    let [label, amount, decimals] = parts.as_slice() else {
        return Err(format!("expected label:amount:decimals, got '{raw}'"));
    };
    if label.is_empty() {
        return Err("quote label must not be empty".to_string());
    }
    Ok(QuoteArg {
        label: label.to_string(),
        amount: amount
            .parse()
            .map_err(|e| format!("bad amount '{amount}': {e}"))?,
        decimals: decimals
            .parse()
            .map_err(|e| format!("bad decimals '{decimals}': {e}"))?,
    })
}

pub async fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.args().log)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    match cli.command() {
        Command::Run(args) => run_scenarios(args).await,
        Command::Check(args) => run_check(args),
    }
}

async fn run_scenarios(args: RunArgs) -> anyhow::Result<()> {
    let config = OracleConfig::from_file(&args.config)?;
    let backends: Vec<Arc<dyn QuoteBackend>> = config.build_backends()?;
    if backends.len() < 2 {
        bail!("config must define at least two backends to compare, got {}", backends.len());
    }

    let oracle = EquivalenceOracle::new(backends, config.tolerance, config.timeout());
    let scenarios = config.scenarios()?;

    let mut failures = 0usize;
    for scenario in &scenarios {
        let report = oracle.run_scenario(scenario).await;
        if !report.passed() {
            failures += 1;
        }
    }

    if failures > 0 {
        bail!("{failures} of {} scenario(s) failed", scenarios.len());
    }
    info!("all {} scenario(s) passed", scenarios.len());
    Ok(())
}

fn run_check(args: CheckArgs) -> anyhow::Result<()> {
    let quotes: Vec<Quote> = args
        .quotes
        .iter()
        .map(|quote| Quote::new(quote.label.clone(), BigUint::from(quote.amount), quote.decimals))
        .collect();

    let checker = ConvergenceChecker::new(Tolerance::from_bps(args.tolerance_bps));
    let result = checker.check(&normalize(&quotes))?;

    if !result.passed {
        bail!("Oracle price mismatch: {result}");
    }
    info!("quotes agree: {result}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_parses_check_command() {
        let cli = Cli::try_parse_from([
            "quotient-oracle",
            "check",
            "--quote",
            "lens:3057857924:6",
            "--quote",
            "quoter:3060000000:6",
            "--tolerance-bps",
            "50",
        ])
        .unwrap();

        let Command::Check(args) = cli.command() else {
            panic!("expected check command");
        };
        assert_eq!(args.quotes.len(), 2);
        assert_eq!(
            args.quotes[0],
            QuoteArg { label: "lens".to_string(), amount: 3_057_857_924, decimals: 6 }
        );
        assert_eq!(args.tolerance_bps, 50);
    }

    #[test]
    fn test_parses_run_command_with_config_path() {
        let cli =
            Cli::try_parse_from(["quotient-oracle", "run", "--config", "oracle.json"]).unwrap();

        assert_eq!(cli.command(), Command::Run(RunArgs { config: "oracle.json".to_string() }));
        assert_eq!(cli.args().log, "info");
    }

    #[rstest]
    #[case::missing_field("lens:3057857924")]
    #[case::empty_label(":100:6")]
    #[case::non_numeric_amount("lens:abc:6")]
    fn test_rejects_malformed_quote_args(#[case] raw: &str) {
        assert!(parse_quote_arg(raw).is_err());
    }
}
