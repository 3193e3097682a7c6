//! Run several integration proposals for the same roster and report
//! aggregated headcount-by-job-level outcomes for each, in parallel.
//!
//! Usage: cargo run --bin run_batch -- --roster roster.csv --start-date 2020-01-01

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

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
    let start = Instant::now();

    println!("Loading roster from {:?}...", args.roster);
    let employees = load_roster_csv(&args.roster)?;
    println!("Loaded {} employees in {:?}", employees.len(), start.elapsed());

    let start_date = chrono::NaiveDate::parse_from_str(&args.start_date, "%Y-%m-%d")?;
    let config = EngineConfig::new(args.num_of_job_levels);
    let runner = ScenarioRunner::new(employees.clone(), config.clone(), start_date);

    let mut job_counts_by_group: HashMap<u32, Vec<i64>> = HashMap::new();
    for emp in &employees {
        job_counts_by_group
            .entry(emp.eg)
            .or_insert_with(|| vec![employees.iter().filter(|e| e.eg == emp.eg).count() as i64 / args.num_of_job_levels as i64; args.num_of_job_levels]);
    }

    // A small bracket of flat job-count scenarios, one per proposal.
    let scenarios: Vec<i64> = vec![
        employees.len() as i64,
        (employees.len() as i64 * 9) / 10,
        (employees.len() as i64 * 8) / 10,
    ];

    let proposals: Vec<IntegrationProposal> = scenarios
        .iter()
        .enumerate()
        .map(|(i, &total)| IntegrationProposal {
            name: format!("scenario_{i}"),
            initial_job_counts_by_group: job_counts_by_group.clone(),
            initial_prex_rights: vec![],
            integrated_job_counts: vec![total / args.num_of_job_levels as i64; args.num_of_job_levels],
            job_schedules: vec![],
            conditions: vec![],
            recalls: vec![],
        })
        .collect();

    println!("Running {} proposals in parallel...", proposals.len());
    let proj_start = Instant::now();
    let results = runner.run_batch(&proposals);
    println!("Completed in {:?}", proj_start.elapsed());

    let calendar = Calendar::build(start_date, &employees);
    let last_month = calendar.num_months().saturating_sub(1) as u32;

    for (proposal, result) in proposals.iter().zip(results) {
        match result {
            Ok(rows) => {
                let furloughed = rows.iter().filter(|r| r.mnum == last_month && r.fur).count();
                println!(
                    "{}: {} rows, {} furloughed at month {}",
                    proposal.name,
                    rows.len(),
                    furloughed,
                    last_month
                );
            }
            Err(e) => println!("{}: failed ({e})", proposal.name),
        }
    }

    Ok(())
}
