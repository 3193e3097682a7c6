//! Seniority integration CLI
//!
//! Loads a roster, runs one integration proposal through the monthly
//! assignment engine, and writes the long-form result to CSV.

use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use seniority_integration::roster::{order_sorted_indices, validate_ordering};
use seniority_integration::{
    assign_initial_jobs, build_job_count_table, derive, job_change_months, load_roster_csv, run_engine, Calendar,
    EngineConfig, PreExRight, Skeleton,
};

#[derive(Parser, Debug)]
#[command(name = "seniority_integration", about = "Run a monthly seniority-integration projection")]
struct Args {
    /// Path to a roster CSV (empkey,eg,sg,fur0,dob,ldate,retdate,order)
    #[arg(long)]
    roster: PathBuf,

    /// Integration start date, YYYY-MM-DD
    #[arg(long)]
    start_date: String,

    /// Number of real job levels
    #[arg(long, default_value_t = 1)]
    num_of_job_levels: usize,

    /// Initial job count for each level, comma-separated (e.g. "40,60")
    #[arg(long)]
    job_counts: String,

    /// Output CSV path
    #[arg(long, default_value = "projection_output.csv")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    println!("Seniority Integration Engine v0.1.0");
    println!("====================================\n");

    let loaded = load_roster_csv(&args.roster)?;
    validate_ordering(&loaded)?;
    let order = order_sorted_indices(&loaded);
    let employees: Vec<_> = order.into_iter().map(|i| loaded[i].clone()).collect();
    println!("Loaded {} employees from {:?}", employees.len(), args.roster);

    let start_date = chrono::NaiveDate::parse_from_str(&args.start_date, "%Y-%m-%d")?;
    let job_counts: Vec<i64> = args
        .job_counts
        .split(',')
        .map(|s| s.trim().parse::<i64>())
        .collect::<Result<_, _>>()?;

    let config = EngineConfig::new(args.num_of_job_levels);
    let calendar = Calendar::build(start_date, &employees);
    let skeleton = Skeleton::build(&calendar, &employees);

    let mut job_counts_by_group: HashMap<u32, Vec<i64>> = HashMap::new();
    for emp in &employees {
        job_counts_by_group.entry(emp.eg).or_insert_with(|| job_counts.clone());
    }
    let prex_rights: Vec<PreExRight> = Vec::new();

    let initial_jobs = assign_initial_jobs(
        &employees,
        config.num_of_job_levels,
        &job_counts_by_group,
        &prex_rights,
    );

    let job_table = build_job_count_table(calendar.num_months(), config.num_of_job_levels, &job_counts, &[])?;
    let jcm = job_change_months(&[]);

    println!("Running engine over {} months for {} employees...", calendar.num_months(), employees.len());
    let rows = run_engine(&employees, &skeleton, &config, &job_table, &jcm, &initial_jobs, vec![], &[])?;
    let derived = derive(&rows, &job_table, &config);

    println!("Produced {} long-form rows", rows.len());

    let mut file = File::create(&args.out)?;
    writeln!(file, "mnum,empkey,idx,orig_job,held_job,assigned_job,fur,jcount,snum,spcnt,lnum,lspcnt")?;
    for (row, d) in rows.iter().zip(derived.iter()) {
        writeln!(
            file,
            "{},{},{},{},{},{},{},{},{},{},{},{:.6}",
            row.mnum,
            row.empkey,
            row.idx,
            row.orig_job,
            row.held_job,
            row.assigned_job,
            row.fur as u8,
            row.jcount,
            d.snum.map(|s| s.to_string()).unwrap_or_default(),
            d.spcnt.map(|s| format!("{:.6}", s)).unwrap_or_default(),
            d.lnum,
            d.lspcnt,
        )?;
    }

    println!("\nFull results written to: {:?}", args.out);

    Ok(())
}
