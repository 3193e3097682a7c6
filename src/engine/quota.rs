//! Conditional allocation rules: pre-ex, ratio, and capped-ratio quotas.
//!
//! Pre-ex, ratio, and capped-ratio quotas are three variants of a common
//! "apply this condition to this (month, level)" interface, applied in
//! fixed precedence order by the engine driver (D1 -> D2 -> D3). This is
//! a tagged enum rather than a trait-object hierarchy, per the "no deep
//! inheritance" design note.

use std::collections::{HashMap, HashSet};

use super::distribute::distribute_vacancies_by_weights;
use super::slice::MonthSlice;
use crate::error::EngineError;

/// Pre-existing-rights quota (D1): reserve a fixed count of a job level
/// for `sg == true` employees during a month range.
#[derive(Debug, Clone)]
pub struct PreExQuota {
    pub level: usize,
    pub count: usize,
    pub start_month: u32,
    pub end_month: u32,
}

impl PreExQuota {
    pub fn in_range(&self, month: u32) -> bool {
        month >= self.start_month && month < self.end_month
    }

    fn apply(&self, this_job_count: i64, slice: &mut MonthSlice) {
        let cap = self.count.min(this_job_count.max(0) as usize);
        slice.take_first_n(self.level, cap, |i, s| s.sg[i] && !s.fur[i]);
    }
}

/// Frozen-ratio quota (D2): a per-level share of a job, frozen at the
/// first month of the ratio period, reserved for `eg_ref`.
#[derive(Debug, Clone)]
pub struct RatioQuota {
    pub eg_ref: u32,
    pub jobs: Vec<usize>,
    pub start_month: u32,
    pub end_month: u32,
    /// level -> frozen ratio, populated lazily on first use.
    ratio: HashMap<usize, f64>,
}

impl RatioQuota {
    pub fn new(eg_ref: u32, jobs: Vec<usize>, start_month: u32, end_month: u32) -> Self {
        Self {
            eg_ref,
            jobs,
            start_month,
            end_month,
            ratio: HashMap::new(),
        }
    }

    pub fn in_range(&self, month: u32) -> bool {
        month >= self.start_month && month < self.end_month
    }

    pub fn affects(&self, level: usize) -> bool {
        self.jobs.contains(&level)
    }

    /// Decision: initialize the frozen ratio at the first month the ratio
    /// period is entered and the first ratio-affected job of that month
    /// is processed, not hardcoded to job level 1.
    fn maybe_init(&mut self, month: u32, level: usize, slice: &MonthSlice) {
        if month != self.start_month || self.ratio.contains_key(&level) {
            return;
        }
        if !self.ratio.is_empty() {
            // Already initialized this month for an earlier job level.
            return;
        }
        for &job in &self.jobs {
            let total = slice.count_orig(job);
            let eg_count = slice.count_orig_eg(job, self.eg_ref);
            let r = if total > 0 {
                (eg_count as f64 / total as f64 * 100.0).round() / 100.0
            } else {
                0.0
            };
            self.ratio.insert(job, r);
        }
    }

    fn apply(&mut self, month: u32, level: usize, this_job_count: i64, slice: &mut MonthSlice) {
        self.maybe_init(month, level, slice);
        let r = *self.ratio.get(&level).unwrap_or(&0.0);
        let eg_job_count = (r * this_job_count as f64).round() as i64;
        let not_eg_job_count = (this_job_count - eg_job_count).max(0) as usize;

        slice.take_first_n(level, eg_job_count.max(0) as usize, |i, s| s.eg[i] == self.eg_ref && !s.fur[i]);

        let nbnf_filled = slice.take_first_n(level, not_eg_job_count, |i, s| {
            s.eg[i] != self.eg_ref && s.orig[i] <= level && !s.fur[i]
        });

        let remaining = not_eg_job_count.saturating_sub(nbnf_filled);
        slice.take_first_n(level, remaining, |i, s| s.eg[i] != self.eg_ref && !s.fur[i]);
    }
}

/// Capped-ratio quota (D3): two group-sets share a job level by weight,
/// bounded by an absolute cap.
#[derive(Debug, Clone)]
pub struct CappedRatioQuota {
    pub jobs: Vec<usize>,
    pub start_month: u32,
    pub end_month: u32,
    pub groups_a: Vec<u32>,
    pub groups_b: Vec<u32>,
    pub weight_a: f64,
    pub weight_b: f64,
    pub limit: f64,
    pub pct: f64,
}

impl CappedRatioQuota {
    pub fn in_range(&self, month: u32) -> bool {
        month >= self.start_month && month < self.end_month
    }

    pub fn affects(&self, level: usize) -> bool {
        self.jobs.contains(&level)
    }

    fn apply(&self, level: usize, this_job_count: i64, slice: &mut MonthSlice) {
        let in_a = self.groups_a.clone();
        let in_b = self.groups_b.clone();

        // NBNF for excluded (not in A union B) employees who held this
        // level last month.
        slice.take_first_n(level, usize::MAX, |i, s| {
            !in_a.contains(&s.eg[i]) && !in_b.contains(&s.eg[i]) && s.orig[i] == level && !s.fur[i]
        });
        let exclude_count = slice.count_assigned(level);

        // NBNF within A union B, up to remaining capacity.
        let nbnf_cap = (this_job_count - exclude_count as i64).max(0) as usize;
        slice.take_first_n(level, nbnf_cap, |i, s| {
            (in_a.contains(&s.eg[i]) || in_b.contains(&s.eg[i])) && s.orig[i] == level && !s.fur[i]
        });

        let c_a = slice.count_assigned_where(level, |i, s| in_a.contains(&s.eg[i]));
        let c_b = slice.count_assigned_where(level, |i, s| in_b.contains(&s.eg[i]));

        let cap = self.limit * self.pct;
        let max_quota = (this_job_count.min(cap.round() as i64)).max(0);
        let available = max_quota - exclude_count as i64;

        let additives = distribute_vacancies_by_weights(
            available.max(0),
            &[c_a as i64, c_b as i64],
            &[self.weight_a, self.weight_b],
        );

        if additives.iter().any(|&a| a > 0) {
            let a_quota = additives[0].max(0) as usize;
            let b_quota = additives[1].max(0) as usize;
            if a_quota > 0 {
                let in_a2 = self.groups_a.clone();
                slice.take_first_n(level, a_quota, move |i, s| in_a2.contains(&s.eg[i]) && !s.fur[i]);
            }
            if b_quota > 0 {
                let in_b2 = self.groups_b.clone();
                slice.take_first_n(level, b_quota, move |i, s| in_b2.contains(&s.eg[i]) && !s.fur[i]);
            }
        } else {
            let eg_quotas = super::distribute::distribute(cap.round() as i64, &[self.weight_a, self.weight_b]);
            let open_jobs = this_job_count - exclude_count as i64 - c_a as i64 - c_b as i64;

            let a_shortfall = (eg_quotas[0] - c_a as i64).max(0);
            let b_shortfall = (eg_quotas[1] - c_b as i64).max(0);

            // Decision: fill the larger shortfall first, ties broken by
            // group id ascending (group A before group B).
            let a_first = a_shortfall >= b_shortfall;
            let mut open_jobs = open_jobs.max(0);

            let mut fill_a = |slice: &mut MonthSlice, open_jobs: &mut i64| {
                if a_shortfall > 0 && *open_jobs > 0 {
                    let n = a_shortfall.min(*open_jobs) as usize;
                    let in_a2 = self.groups_a.clone();
                    let filled = slice.take_first_n(level, n, move |i, s| in_a2.contains(&s.eg[i]) && !s.fur[i]);
                    *open_jobs -= filled as i64;
                }
            };
            let mut fill_b = |slice: &mut MonthSlice, open_jobs: &mut i64| {
                if b_shortfall > 0 && *open_jobs > 0 {
                    let n = b_shortfall.min(*open_jobs) as usize;
                    let in_b2 = self.groups_b.clone();
                    let filled = slice.take_first_n(level, n, move |i, s| in_b2.contains(&s.eg[i]) && !s.fur[i]);
                    *open_jobs -= filled as i64;
                }
            };

            if a_first {
                fill_a(slice, &mut open_jobs);
                fill_b(slice, &mut open_jobs);
            } else {
                fill_b(slice, &mut open_jobs);
                fill_a(slice, &mut open_jobs);
            }
        }
    }
}

/// Tagged variant over the three condition kinds, applied to a single
/// (month, level) by the engine driver in D1 -> D2 -> D3 order.
#[derive(Debug, Clone)]
pub enum QuotaCondition {
    PreEx(PreExQuota),
    Ratio(RatioQuota),
    CappedRatio(CappedRatioQuota),
}

impl QuotaCondition {
    pub fn in_range(&self, month: u32) -> bool {
        match self {
            QuotaCondition::PreEx(q) => q.in_range(month),
            QuotaCondition::Ratio(q) => q.in_range(month),
            QuotaCondition::CappedRatio(q) => q.in_range(month),
        }
    }

    pub fn affects(&self, level: usize) -> bool {
        match self {
            QuotaCondition::PreEx(q) => q.level == level,
            QuotaCondition::Ratio(q) => q.affects(level),
            QuotaCondition::CappedRatio(q) => q.affects(level),
        }
    }

    pub fn apply(&mut self, month: u32, level: usize, this_job_count: i64, slice: &mut MonthSlice) {
        match self {
            QuotaCondition::PreEx(q) => q.apply(this_job_count, slice),
            QuotaCondition::Ratio(q) => q.apply(month, level, this_job_count, slice),
            QuotaCondition::CappedRatio(q) => q.apply(level, this_job_count, slice),
        }
    }

    /// Check that every job level and employee group this condition
    /// references actually exists, before the monthly loop starts.
    pub fn validate(&self, num_of_job_levels: usize, groups: &HashSet<u32>) -> Result<(), EngineError> {
        let check_level = |level: usize| -> Result<(), EngineError> {
            if level == 0 || level > num_of_job_levels {
                return Err(EngineError::InvalidCondition {
                    reason: format!("level {level} outside 1..={num_of_job_levels}"),
                });
            }
            Ok(())
        };
        let check_group = |eg: u32| -> Result<(), EngineError> {
            if !groups.contains(&eg) {
                return Err(EngineError::InvalidCondition {
                    reason: format!("group {eg} is not present in the roster"),
                });
            }
            Ok(())
        };

        match self {
            QuotaCondition::PreEx(q) => check_level(q.level),
            QuotaCondition::Ratio(q) => {
                for &job in &q.jobs {
                    check_level(job)?;
                }
                check_group(q.eg_ref)
            }
            QuotaCondition::CappedRatio(q) => {
                for &job in &q.jobs {
                    check_level(job)?;
                }
                for &eg in q.groups_a.iter().chain(q.groups_b.iter()) {
                    check_group(eg)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod validate_tests {
    use super::*;

    fn groups(gs: &[u32]) -> HashSet<u32> {
        gs.iter().copied().collect()
    }

    #[test]
    fn pre_ex_rejects_level_outside_range() {
        let q = QuotaCondition::PreEx(PreExQuota {
            level: 3,
            count: 1,
            start_month: 0,
            end_month: 1,
        });
        assert!(q.validate(2, &groups(&[1])).is_err());
    }

    #[test]
    fn ratio_rejects_unknown_group() {
        let q = QuotaCondition::Ratio(RatioQuota::new(9, vec![1], 0, 1));
        assert!(q.validate(2, &groups(&[1, 2])).is_err());
    }

    #[test]
    fn capped_ratio_accepts_known_groups_and_levels() {
        let q = QuotaCondition::CappedRatio(CappedRatioQuota {
            jobs: vec![1],
            start_month: 0,
            end_month: 1,
            groups_a: vec![1],
            groups_b: vec![2],
            weight_a: 1.0,
            weight_b: 1.0,
            limit: 10.0,
            pct: 1.0,
        });
        assert!(q.validate(2, &groups(&[1, 2])).is_ok());
    }
}
