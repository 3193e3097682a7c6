//! Per-month mutable view over the employees active in a given month.
//!
//! This is the masked-prefix-take primitive shared by assignment steps
//! B through D6: every step narrows down to "take the first N
//! still-unassigned members (in seniority order) matching some
//! predicate and give them this job level." Keeping that primitive in
//! one place means the quota variants and the core B/C/E/F steps never
//! duplicate the scan-and-mark loop.

use crate::config::EngineConfig;
use crate::roster::Employee;

/// A single month's worth of active employees, already ordered by
/// seniority (`order` ascending), carrying the prior month's held job
/// (`orig`) and accumulating this month's `assigned` job.
pub struct MonthSlice<'a> {
    /// Seniority-ordered list of indices into the parent roster.
    pub members: Vec<usize>,
    pub eg: Vec<u32>,
    pub sg: Vec<bool>,
    /// Job held at the end of the previous month (NBNF reference value).
    /// `fur_level` for new entrants and employees without a prior month.
    pub orig: Vec<usize>,
    /// Job assigned this month; `fur_level` until a step fills it in.
    pub assigned: Vec<usize>,
    /// Furlough status carried forward from the previous month.
    pub fur: Vec<bool>,
    fur_level: usize,
    _roster: &'a [Employee],
}

impl<'a> MonthSlice<'a> {
    pub fn new(
        members: Vec<usize>,
        roster: &'a [Employee],
        prior_orig: &[usize],
        prior_fur: &[bool],
        config: &EngineConfig,
    ) -> Self {
        let fur_level = config.fur_level();
        let eg = members.iter().map(|&i| roster[i].eg).collect();
        let sg = members.iter().map(|&i| roster[i].sg).collect();
        let orig = members.iter().map(|&i| prior_orig.get(i).copied().unwrap_or(fur_level)).collect();
        let fur = members
            .iter()
            .map(|&i| prior_fur.get(i).copied().unwrap_or(false) || roster[i].fur0)
            .collect();
        let assigned = vec![fur_level; members.len()];
        MonthSlice {
            members,
            eg,
            sg,
            orig,
            assigned,
            fur,
            fur_level,
            _roster: roster,
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Take up to `n` still-unassigned members (in seniority order)
    /// matching `pred`, assign them `level`, and return the count taken.
    /// `n == usize::MAX` takes every matching member (used by NBNF
    /// passes that have no count limit of their own).
    pub fn take_first_n(&mut self, level: usize, n: usize, pred: impl Fn(usize, &Self) -> bool) -> usize {
        let mut taken = 0;
        let mut i = 0;
        while i < self.assigned.len() && taken < n {
            if self.assigned[i] == self.fur_level && pred(i, self) {
                self.assigned[i] = level;
                taken += 1;
            }
            i += 1;
        }
        taken
    }

    pub fn count_assigned(&self, level: usize) -> usize {
        self.assigned.iter().filter(|&&a| a == level).count()
    }

    pub fn count_assigned_where(&self, level: usize, pred: impl Fn(usize, &Self) -> bool) -> usize {
        (0..self.assigned.len())
            .filter(|&i| self.assigned[i] == level && pred(i, self))
            .count()
    }

    pub fn count_orig(&self, level: usize) -> usize {
        self.orig.iter().filter(|&&o| o == level).count()
    }

    pub fn count_orig_eg(&self, level: usize, eg: u32) -> usize {
        (0..self.orig.len()).filter(|&i| self.orig[i] == level && self.eg[i] == eg).count()
    }

    /// Unassigned count, irrespective of predicate.
    pub fn unfilled(&self) -> usize {
        self.assigned.iter().filter(|&&a| a == self.fur_level).count()
    }

    pub fn fur_level(&self) -> usize {
        self.fur_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn roster() -> Vec<Employee> {
        vec![
            Employee {
                empkey: 1,
                eg: 1,
                sg: false,
                fur0: false,
                dob: NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(),
                longevity_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
                retdate: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
                order: 1,
            },
            Employee {
                empkey: 2,
                eg: 1,
                sg: false,
                fur0: false,
                dob: NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(),
                longevity_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
                retdate: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
                order: 2,
            },
        ]
    }

    #[test]
    fn take_first_n_respects_seniority_order() {
        let r = roster();
        let config = EngineConfig::new(3);
        let prior = vec![config.fur_level(); 2];
        let prior_fur = vec![false; 2];
        let mut slice = MonthSlice::new(vec![0, 1], &r, &prior, &prior_fur, &config);
        let taken = slice.take_first_n(1, 1, |_, _| true);
        assert_eq!(taken, 1);
        assert_eq!(slice.assigned, vec![1, config.fur_level()]);
    }

    #[test]
    fn take_first_n_max_takes_all_matches() {
        let r = roster();
        let config = EngineConfig::new(3);
        let prior = vec![config.fur_level(); 2];
        let prior_fur = vec![false; 2];
        let mut slice = MonthSlice::new(vec![0, 1], &r, &prior, &prior_fur, &config);
        let taken = slice.take_first_n(2, usize::MAX, |_, _| true);
        assert_eq!(taken, 2);
    }
}
