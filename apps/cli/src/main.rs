#![deny(warnings)]

//! Headless CLI: load a scenario, run the empire and print its KPIs.

use anyhow::{Context, Result};
use empire_core::{validate_scenario, Scenario};
use empire_runtime::{log_report, Empire, EmpireSnapshot};
use std::str::FromStr;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Args {
    scenario: Option<String>,
    months: Option<u32>,
    seed: Option<u64>,
    json: bool,
}

fn parse_args<I: IntoIterator<Item = String>>(argv: I) -> Result<Args> {
    let mut args = Args::default();
    let mut it = argv.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--scenario" => args.scenario = Some(flag_value(&mut it, "--scenario")?),
            "--months" => args.months = Some(parse_flag(&mut it, "--months")?),
            "--seed" => args.seed = Some(parse_flag(&mut it, "--seed")?),
            "--json" => args.json = true,
            _ => {}
        }
    }
    Ok(args)
}

fn flag_value(it: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    it.next().with_context(|| format!("{flag} requires a value"))
}

fn parse_flag<T>(it: &mut impl Iterator<Item = String>, flag: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = flag_value(it, flag)?;
    raw.parse()
        .with_context(|| format!("invalid value for {flag}: {raw:?}"))
}

fn load_scenario(path: Option<&str>) -> Result<Scenario> {
    let Some(path) = path else {
        return Ok(Scenario::default());
    };
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading scenario {path}"))?;
    let scenario: Scenario =
        serde_yaml::from_str(&text).with_context(|| format!("parsing scenario {path}"))?;
    Ok(scenario)
}

fn print_kpis(snap: &EmpireSnapshot) {
    println!(
        "Empire | months: {} | date: {} | companies: {} | ARR: ${} | valuation: ${} | monthly profit: ${}",
        snap.months_run,
        snap.date,
        snap.companies,
        snap.total_arr.round_dp(0),
        snap.valuation.round_dp(0),
        snap.monthly_profit.round_dp(0)
    );
    println!(
        "Holdings | deals: {} (${}) | trades: {} | trading book: ${} | properties: {} (${}) | rent: ${}/mo",
        snap.deals_completed,
        snap.total_deal_value.round_dp(0),
        snap.trades_executed,
        snap.trading_portfolio.round_dp(0),
        snap.properties,
        snap.real_estate_value.round_dp(0),
        snap.monthly_rental_income.round_dp(0)
    );
    for c in &snap.top_companies {
        let forecast = c
            .revenue_forecast
            .map(|t| format!("{:.0}", t.forecast))
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "  {} [{}] | ARR: ${} | margin: {:.1}% | next month: ${}",
            c.name,
            c.industry.label(),
            c.arr.round_dp(0),
            c.profit_margin * 100.0,
            forecast
        );
    }
}

fn main() -> Result<()> {
    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    info!(?args, "starting CLI");

    let mut scenario = load_scenario(args.scenario.as_deref())?;
    if let Some(seed) = args.seed {
        scenario.config.rng_seed = seed;
    }
    validate_scenario(&scenario)?;
    let months = args.months.unwrap_or(scenario.config.months);

    let mut empire = Empire::bootstrap(&scenario)?;
    let snap = empire.run_months(months)?;
    log_report(&snap);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snap)?);
    } else {
        print_kpis(&snap);
    }
    Ok(())
}
