//! Long-form (employee, month) skeleton expansion.
//!
//! Expands (employee, month) pairs into the flat sequence ordered
//! primarily by month, secondarily by proposed seniority order, fixing
//! the `idx` column used by the rest of the engine.

use crate::calendar::Calendar;
use crate::roster::{EmpKey, Employee};

/// The flat long-form skeleton: one entry per (employee, month) row, in
/// month-major, order-minor sequence.
#[derive(Debug, Clone)]
pub struct Skeleton {
    /// Month number for each long-form row.
    pub mnum: Vec<u32>,

    /// Short-form employee index (0..N-1) for each long-form row.
    pub idx: Vec<usize>,

    /// Employee key for each long-form row, carried through for output.
    pub empkey: Vec<EmpKey>,
}

impl Skeleton {
    /// Build the skeleton. `employees` must already be in proposed-list
    /// order (short-form index == position).
    pub fn build(calendar: &Calendar, employees: &[Employee]) -> Self {
        let total = calendar.total;
        let mut mnum = Vec::with_capacity(total);
        let mut idx = Vec::with_capacity(total);
        let mut empkey = Vec::with_capacity(total);

        for m in 0..calendar.num_months() {
            for (i, cm) in calendar.career_months.iter().enumerate() {
                if *cm >= m as i64 {
                    mnum.push(m as u32);
                    idx.push(i);
                    empkey.push(employees[i].empkey);
                }
            }
        }

        Self { mnum, idx, empkey }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

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
    fn skeleton_slices_match_calendar_bounds() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let emps = vec![
            emp(1, NaiveDate::from_ymd_opt(2020, 2, 1).unwrap()),
            emp(2, NaiveDate::from_ymd_opt(2020, 4, 1).unwrap()),
        ];
        let cal = Calendar::build(start, &emps);
        let skel = Skeleton::build(&cal, &emps);
        assert_eq!(skel.mnum.len(), cal.total);
        for m in 0..cal.num_months() {
            let lo = cal.lower[m];
            let hi = cal.upper[m];
            assert!(skel.mnum[lo..hi].iter().all(|&mm| mm == m as u32));
        }
    }
}
