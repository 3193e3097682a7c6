//! Compare the final-month job outcome of two named integration
//! proposals for the same roster.
//!
//! Usage: cargo run --bin compare_scenarios -- --roster roster.csv --start-date 2020-01-01

use std::collections::HashMap;
use std::path::PathBuf;

use clap::Parser;
use seniority_integration::{load_roster_csv, Calendar, EngineConfig, IntegrationProposal, ScenarioRunner};

#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    roster: PathBuf,

    #[arg(long)]
    start_date: String,

    #[arg(long, default_value_t = 1)]
    num_of_job_levels: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let employees = load_roster_csv(&args.roster)?;
    let start_date = chrono::NaiveDate::parse_from_str(&args.start_date, "%Y-%m-%d")?;
    let config = EngineConfig::new(args.num_of_job_levels);

    let mut job_counts_by_group: HashMap<u32, Vec<i64>> = HashMap::new();
    for emp in &employees {
        job_counts_by_group
            .entry(emp.eg)
            .or_insert_with(|| vec![employees.iter().filter(|e| e.eg == emp.eg).count() as i64 / args.num_of_job_levels as i64; args.num_of_job_levels]);
    }

    let baseline = IntegrationProposal {
        name: "baseline".to_string(),
        initial_job_counts_by_group: job_counts_by_group.clone(),
        initial_prex_rights: vec![],
        integrated_job_counts: vec![employees.len() as i64 / args.num_of_job_levels as i64; args.num_of_job_levels],
        job_schedules: vec![],
        conditions: vec![],
        recalls: vec![],
    };

    let reduced = IntegrationProposal {
        name: "reduced".to_string(),
        initial_job_counts_by_group: job_counts_by_group,
        initial_prex_rights: vec![],
        integrated_job_counts: vec![
            (employees.len() as i64 * 8 / 10) / args.num_of_job_levels as i64;
            args.num_of_job_levels
        ],
        job_schedules: vec![],
        conditions: vec![],
        recalls: vec![],
    };

    let runner = ScenarioRunner::new(employees.clone(), config, start_date);
    let calendar = Calendar::build(start_date, &employees);
    let last_month = calendar.num_months().saturating_sub(1) as u32;

    println!("{}", "=".repeat(60));
    println!("Comparing '{}' vs '{}'", baseline.name, reduced.name);
    println!("{}", "=".repeat(60));

    for proposal in [&baseline, &reduced] {
        let rows = runner.run(proposal)?;
        let furloughed = rows.iter().filter(|r| r.mnum == last_month && r.fur).count();
        let active = rows.iter().filter(|r| r.mnum == last_month && !r.fur).count();
        println!(
            "{:>10}: active={active:>5} furloughed={furloughed:>5} (month {last_month})",
            proposal.name
        );
    }

    Ok(())
}
