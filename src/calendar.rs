//! Calendar builder: career months, active headcount, cumulative slices.
//!
//! Computes per-employee career length in months and per-month active
//! headcount, plus the cumulative slice bounds that mark each month's
//! contiguous segment of the long-form skeleton.

use chrono::{Datelike, NaiveDate};

use crate::roster::Employee;

/// Career length in months for a single employee, inclusive of the
/// partial retirement month.
pub fn career_months(start_date: NaiveDate, retdate: NaiveDate) -> i64 {
    let s_year = start_date.year() as i64;
    let s_month = start_date.month() as i64;
    let r_year = retdate.year() as i64;
    let r_month = retdate.month() as i64;
    (r_year - s_year) * 12 - (s_month - r_month)
}

/// Career months for every employee, in roster order.
pub fn career_months_all(start_date: NaiveDate, employees: &[Employee]) -> Vec<i64> {
    employees
        .iter()
        .map(|e| career_months(start_date, e.retdate))
        .collect()
}

/// A built calendar: active headcount and cumulative slice bounds.
#[derive(Debug, Clone)]
pub struct Calendar {
    /// Career months per employee, roster order.
    pub career_months: Vec<i64>,

    /// `active[m]` = count of employees with `career_months(e) >= m`.
    pub active: Vec<usize>,

    /// `upper[m] = sum_{i<=m} active[i]`.
    pub upper: Vec<usize>,

    /// `lower[m] = upper[m-1]`, with `lower[0] = 0`.
    pub lower: Vec<usize>,

    /// Total long-form row count, `sum(active)`.
    pub total: usize,
}

impl Calendar {
    /// Build the calendar from a start date and the employee roster.
    pub fn build(start_date: NaiveDate, employees: &[Employee]) -> Self {
        let career_months = career_months_all(start_date, employees);
        let max_career = career_months.iter().copied().max().unwrap_or(-1);
        let num_months = (max_career + 1).max(0) as usize;

        let mut active = vec![0usize; num_months];
        for m in 0..num_months {
            active[m] = career_months
                .iter()
                .filter(|&&c| c >= m as i64)
                .count();
        }

        let mut upper = vec![0usize; num_months];
        let mut running = 0usize;
        for m in 0..num_months {
            running += active[m];
            upper[m] = running;
        }

        let mut lower = vec![0usize; num_months];
        for m in 1..num_months {
            lower[m] = upper[m - 1];
        }

        let total = running;

        Self {
            career_months,
            active,
            upper,
            lower,
            total,
        }
    }

    pub fn num_months(&self) -> usize {
        self.active.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::Employee;

    fn emp(order: u32, retdate: NaiveDate) -> Employee {
        Employee {
            empkey: order as i64,
            eg: 1,
            sg: false,
            fur0: false,
            dob: NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(),
            longevity_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            retdate,
            order,
        }
    }

    #[test]
    fn career_months_basic() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let ret = NaiveDate::from_ymd_opt(2020, 4, 1).unwrap();
        assert_eq!(career_months(start, ret), 3);
    }

    #[test]
    fn active_is_non_increasing() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let emps = vec![
            emp(1, NaiveDate::from_ymd_opt(2020, 3, 1).unwrap()),
            emp(2, NaiveDate::from_ymd_opt(2020, 6, 1).unwrap()),
        ];
        let cal = Calendar::build(start, &emps);
        for w in cal.active.windows(2) {
            assert!(w[1] <= w[0]);
        }
        assert_eq!(cal.lower[0], 0);
        assert_eq!(*cal.upper.last().unwrap(), cal.total);
    }
}
