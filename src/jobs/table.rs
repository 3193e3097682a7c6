//! Job-count table builder: monthly job counts per level, linear-ramp schedules.

use crate::error::EngineError;

/// A job-change schedule: job `level` ramps linearly by `total_delta`
/// over the half-open month range `[start_month, end_month)`, then
/// holds the final delta for all months `>= end_month`.
#[derive(Debug, Clone)]
pub struct JobChangeSchedule {
    /// 1-based job level.
    pub level: usize,
    pub start_month: u32,
    pub end_month: u32,
    pub total_delta: i64,
}

/// `J[m][k]` plus row totals `T[m]`.
#[derive(Debug, Clone)]
pub struct JobCountTable {
    /// `counts[m][k-1]` = count of job level `k` available in month `m`.
    pub counts: Vec<Vec<i64>>,
    /// `totals[m] = sum_k counts[m][k-1]`.
    pub totals: Vec<i64>,
}

impl JobCountTable {
    pub fn job_count(&self, month: usize, level: usize) -> i64 {
        self.counts[month][level - 1]
    }

    pub fn total(&self, month: usize) -> i64 {
        self.totals[month]
    }
}

/// Build the job-count table by broadcasting `initial_counts` down every
/// month and applying each schedule's linear ramp.
pub fn build_job_count_table(
    num_months: usize,
    num_levels: usize,
    initial_counts: &[i64],
    schedules: &[JobChangeSchedule],
) -> Result<JobCountTable, EngineError> {
    if initial_counts.len() != num_levels {
        return Err(EngineError::InvalidJobSchedule {
            level: 0,
            month: 0,
            reason: format!(
                "initial_counts has {} entries, expected {num_levels}",
                initial_counts.len()
            ),
        });
    }

    let mut table = vec![initial_counts.to_vec(); num_months];

    for sched in schedules {
        if sched.level == 0 || sched.level > num_levels {
            return Err(EngineError::InvalidJobSchedule {
                level: sched.level,
                month: sched.start_month,
                reason: "level outside 1..=num_levels".to_string(),
            });
        }
        if sched.start_month >= sched.end_month {
            return Err(EngineError::InvalidJobSchedule {
                level: sched.level,
                month: sched.start_month,
                reason: "start_month >= end_month".to_string(),
            });
        }

        let col = sched.level - 1;
        let start = sched.start_month as usize;
        let end = (sched.end_month as usize).min(num_months);
        let n = sched.end_month as usize - sched.start_month as usize;

        // linspace(0, total_delta, n+1)[1:], truncated toward zero.
        let additives: Vec<i64> = (1..=n)
            .map(|i| ((i as f64) * sched.total_delta as f64 / (n as f64)) as i64)
            .collect();

        for (offset, m) in (start..end).enumerate() {
            table[m][col] += additives[offset];
        }
        if let Some(&last) = additives.last() {
            for m in end..num_months {
                table[m][col] += last;
            }
        }
    }

    for (m, row) in table.iter().enumerate() {
        for (i, &count) in row.iter().enumerate() {
            if count < 0 {
                return Err(EngineError::InvalidJobSchedule {
                    level: i + 1,
                    month: m as u32,
                    reason: format!("resulting job count {count} is negative"),
                });
            }
        }
    }

    let totals = table.iter().map(|row| row.iter().sum()).collect();

    Ok(JobCountTable {
        counts: table,
        totals,
    })
}

/// Sorted, unique months touched by any schedule, and the subset of
/// those whose `total_delta < 0` (reductions).
pub struct JobChangeMonths {
    pub change_months: Vec<u32>,
    pub reduction_months: Vec<u32>,
}

pub fn job_change_months(schedules: &[JobChangeSchedule]) -> JobChangeMonths {
    use std::collections::BTreeSet;
    let mut change = BTreeSet::new();
    let mut reduction = BTreeSet::new();
    for sched in schedules {
        for m in sched.start_month..sched.end_month {
            change.insert(m);
            if sched.total_delta < 0 {
                reduction.insert(m);
            }
        }
    }
    JobChangeMonths {
        change_months: change.into_iter().collect(),
        reduction_months: reduction.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_reaches_total_delta_and_holds() {
        let schedules = vec![JobChangeSchedule {
            level: 1,
            start_month: 2,
            end_month: 4,
            total_delta: -4,
        }];
        let table = build_job_count_table(6, 1, &[10], &schedules).unwrap();
        assert_eq!(table.job_count(0, 1), 10);
        assert_eq!(table.job_count(1, 1), 10);
        assert_eq!(table.job_count(3, 1), 6);
        assert_eq!(table.job_count(5, 1), 6);
    }

    #[test]
    fn negative_job_count_rejected() {
        let schedules = vec![JobChangeSchedule {
            level: 1,
            start_month: 0,
            end_month: 1,
            total_delta: -100,
        }];
        assert!(build_job_count_table(2, 1, &[10], &schedules).is_err());
    }

    #[test]
    fn change_and_reduction_months() {
        let schedules = vec![
            JobChangeSchedule {
                level: 1,
                start_month: 2,
                end_month: 4,
                total_delta: 5,
            },
            JobChangeSchedule {
                level: 2,
                start_month: 5,
                end_month: 6,
                total_delta: -1,
            },
        ];
        let months = job_change_months(&schedules);
        assert_eq!(months.change_months, vec![2, 3, 5]);
        assert_eq!(months.reduction_months, vec![5]);
    }
}
