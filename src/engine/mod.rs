//! The monthly job assignment engine.
//!
//! Each month: employees working a job the reduced headcount no longer
//! supports are furloughed first, then a scheduled recall may pull
//! furloughees back in. Then, for each job level in ascending order,
//! active quota conditions are applied (pre-ex, then ratio, then
//! capped-ratio), then employees keep their prior job if it is still
//! within reach (the no-bump/no-flush rule), then any remaining slots
//! are filled by plain seniority. Whoever is left unassigned after
//! every level has been processed is furloughed for the month.

pub mod distribute;
pub mod quota;
pub mod recall;
pub mod slice;

use log::{debug, warn};

use crate::config::{EngineConfig, RecallMethod};
use crate::error::EngineError;
use crate::jobs::table::{JobChangeMonths, JobCountTable};
use crate::roster::{EmpKey, Employee};
use crate::skeleton::Skeleton;
use quota::QuotaCondition;
use slice::MonthSlice;

/// A scheduled recall-from-furlough event: at `month`, promote up to
/// `count` furloughed employees back into the active assignment pool
/// using `method`.
#[derive(Debug, Clone)]
pub struct RecallEvent {
    pub month: u32,
    pub count: usize,
    pub method: RecallMethod,
}

/// One employee-month row of the long-form result.
#[derive(Debug, Clone, PartialEq)]
pub struct LongFormRow {
    pub mnum: u32,
    pub empkey: EmpKey,
    pub idx: usize,
    /// Job held going into this month (the NBNF reference value).
    pub orig_job: usize,
    /// Mirrors `orig_job`: both represent the carried-forward NBNF
    /// reference for the month, kept as two fields because downstream
    /// consumers (snum/spcnt derivation, prior-rights reporting) read
    /// them under different names.
    pub held_job: usize,
    pub assigned_job: usize,
    pub fur: bool,
    pub jcount: i64,
}

fn quota_rank(q: &QuotaCondition) -> u8 {
    match q {
        QuotaCondition::PreEx(_) => 0,
        QuotaCondition::Ratio(_) => 1,
        QuotaCondition::CappedRatio(_) => 2,
    }
}

/// Run the monthly assignment engine across the full calendar, given
/// each employee's initial job (`initial_jobs`, short-form, `fur_level`
/// for initial furloughees) and the set of special conditions to apply.
pub fn run(
    employees: &[Employee],
    skeleton: &Skeleton,
    config: &EngineConfig,
    job_table: &JobCountTable,
    job_change_months: &JobChangeMonths,
    initial_jobs: &[usize],
    mut conditions: Vec<QuotaCondition>,
    recalls: &[RecallEvent],
) -> Result<Vec<LongFormRow>, EngineError> {
    let num_levels = config.num_of_job_levels;
    let fur_level = config.fur_level();

    if initial_jobs.len() != employees.len() {
        return Err(EngineError::InvariantViolation {
            month: 0,
            level: None,
            reason: "initial_jobs length does not match employee roster".to_string(),
        });
    }

    let num_months = skeleton.mnum.iter().max().map(|&m| m + 1).unwrap_or(0) as usize;
    let start_month = config.start_month;

    let mut orig_all: Vec<usize> = initial_jobs.to_vec();
    let mut fur_all: Vec<bool> = employees
        .iter()
        .enumerate()
        .map(|(i, e)| e.fur0 || orig_all[i] == fur_level)
        .collect();

    let mut rows = Vec::with_capacity(skeleton.mnum.len());

    for month in 0..num_months as u32 {
        let mut members: Vec<usize> = skeleton
            .mnum
            .iter()
            .zip(&skeleton.idx)
            .filter(|(&m, _)| m == month)
            .map(|(_, &idx)| idx)
            .collect();
        members.sort_by_key(|&i| employees[i].order);

        if members.is_empty() {
            continue;
        }
        debug!("month {month}: {} active employees", members.len());

        let mut slice = MonthSlice::new(members.clone(), employees, &orig_all, &fur_all, config);

        if config.delayed_implementation && month < start_month {
            for i in 0..slice.len() {
                slice.assigned[i] = slice.orig[i];
            }
        } else {
            // Step B: furlough for job-count reductions, ahead of recall
            // and every quota condition.
            if job_change_months.reduction_months.contains(&month) {
                let total_jobs = job_table.total(month as usize);
                let working: Vec<usize> = (0..slice.len()).filter(|&i| !slice.fur[i]).collect();
                let excess = (working.len() as i64 - total_jobs).max(0) as usize;
                if excess > 0 {
                    debug!("month {month}: furloughing {excess} for job count reduction");
                    let fl = slice.fur_level();
                    for pos in recall::mark_for_furlough(&working, excess) {
                        slice.fur[pos] = true;
                        slice.assigned[pos] = fl;
                        slice.orig[pos] = fl;
                    }
                }
            }

            // Step C: recall from furlough.
            if let Some(recall) = recalls.iter().find(|r| r.month == month) {
                let furloughed: Vec<usize> = (0..slice.len()).filter(|&i| slice.fur[i]).collect();
                let recalled_positions = recall::mark_for_recall(&furloughed, recall.count, &recall.method);
                for pos in recalled_positions {
                    slice.fur[pos] = false;
                }
            }

            for level in 1..=num_levels {
                let this_job_count = job_table.job_count(month as usize, level);

                let mut active: Vec<&mut QuotaCondition> = conditions
                    .iter_mut()
                    .filter(|q| q.in_range(month) && q.affects(level))
                    .collect();
                active.sort_by_key(|q| quota_rank(q));
                for cond in active {
                    cond.apply(month, level, this_job_count, &mut slice);
                }

                let nbnf_avail = this_job_count - slice.count_assigned(level) as i64;
                slice.take_first_n(level, nbnf_avail.max(0) as usize, |i, s| {
                    s.orig[i] <= level && !s.fur[i]
                });

                let seniority_avail = this_job_count - slice.count_assigned(level) as i64;
                slice.take_first_n(level, seniority_avail.max(0) as usize, |i, s| !s.fur[i]);

                let filled = slice.count_assigned(level) as i64;
                if filled > this_job_count {
                    return Err(EngineError::InvariantViolation {
                        month,
                        level: Some(level),
                        reason: format!("assigned count {filled} exceeds job count {this_job_count}"),
                    });
                }
            }

            for i in 0..slice.len() {
                if slice.assigned[i] == slice.fur_level() {
                    slice.fur[i] = true;
                }
            }
        }

        let fur_count = slice.fur.iter().filter(|&&f| f).count() as i64;
        if fur_count as usize == slice.len() {
            warn!("month {month}: every active employee is furloughed");
        }

        for i in 0..slice.len() {
            let global_idx = slice.members[i];
            let assigned = slice.assigned[i];
            let prior_orig = slice.orig[i];

            orig_all[global_idx] = if slice.fur[i] { fur_level } else { assigned };
            fur_all[global_idx] = slice.fur[i];

            let jcount = if slice.fur[i] {
                fur_count
            } else {
                job_table.job_count(month as usize, assigned)
            };

            rows.push(LongFormRow {
                mnum: month,
                empkey: employees[global_idx].empkey,
                idx: global_idx,
                orig_job: prior_orig,
                held_job: prior_orig,
                assigned_job: assigned,
                fur: slice.fur[i],
                jcount,
            });
        }
    }

    Ok(rows)
}
