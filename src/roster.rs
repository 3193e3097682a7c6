//! Employee short-form records and the proposed integrated ordering.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Opaque, stable employee identifier.
pub type EmpKey = i64;

/// One employee as carried in the short-form roster, indexed 0..N-1 in
/// proposed-list order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub empkey: EmpKey,

    /// Employee group, a small integer >= 1.
    pub eg: u32,

    /// Pre-existing-rights subgroup flag.
    pub sg: bool,

    /// Initial furlough flag.
    pub fur0: bool,

    pub dob: NaiveDate,
    pub longevity_date: NaiveDate,

    /// Retirement date, possibly adjusted upward by a retirement-age
    /// increase schedule before the calendar is built.
    pub retdate: NaiveDate,

    /// 1-based rank in the proposed integrated list, unique across all
    /// employees.
    pub order: u32,
}

/// A schedule of retirement-age increases: at `effective_date`, retirement
/// is pushed out by `additional_months` for anyone whose (possibly
/// already-adjusted) retirement date falls on or after it. Increases
/// accumulate across the schedule.
#[derive(Debug, Clone)]
pub struct RetirementAgeIncrease {
    pub effective_date: NaiveDate,
    pub additional_months: u32,
}

/// Apply a retirement-age-increase schedule to a roster's `retdate`
/// column, in place. The schedule should be sorted ascending by
/// `effective_date`; entries are applied cumulatively, directly against
/// `retdate` rather than a derived age column.
pub fn apply_retirement_age_increases(
    employees: &mut [Employee],
    schedule: &[RetirementAgeIncrease],
) {
    if schedule.is_empty() {
        return;
    }
    let mut sorted = schedule.to_vec();
    sorted.sort_by_key(|s| s.effective_date);

    for emp in employees.iter_mut() {
        let mut added_months: u32 = 0;
        for increase in &sorted {
            if emp.retdate >= increase.effective_date {
                added_months += increase.additional_months;
            }
        }
        if added_months > 0 {
            emp.retdate = add_months(emp.retdate, added_months);
        }
    }
}

fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    let total = date.year() as i64 * 12 + (date.month0() as i64) + months as i64;
    let year = (total.div_euclid(12)) as i32;
    let month = (total.rem_euclid(12)) as u32 + 1;
    let day = date.day();
    // Clamp to the last valid day of the target month rather than panic.
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| last_day_of_month(year, month))
}

fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (ny, nm) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(ny, nm, 1)
        .unwrap()
        .pred_opt()
        .unwrap()
}

use chrono::Datelike;

/// Validate the proposed integrated ordering: `order` must be unique and
/// present for every employee.
pub fn validate_ordering(employees: &[Employee]) -> Result<(), crate::error::EngineError> {
    use std::collections::HashSet;
    let mut seen = HashSet::with_capacity(employees.len());
    for emp in employees {
        if !seen.insert(emp.order) {
            return Err(crate::error::EngineError::InvalidOrdering {
                reason: format!("duplicate order value {}", emp.order),
            });
        }
    }
    Ok(())
}

/// Employee indices 0..N-1, sorted ascending by proposed `order`.
pub fn order_sorted_indices(employees: &[Employee]) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..employees.len()).collect();
    idx.sort_by_key(|&i| employees[i].order);
    idx
}

/// Raw CSV row matching the roster input file columns.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "empkey")]
    empkey: EmpKey,
    #[serde(rename = "eg")]
    eg: u32,
    #[serde(rename = "sg")]
    sg: u8,
    #[serde(rename = "fur0")]
    fur0: u8,
    #[serde(rename = "dob")]
    dob: String,
    #[serde(rename = "ldate")]
    longevity_date: String,
    #[serde(rename = "retdate")]
    retdate: String,
    #[serde(rename = "order")]
    order: u32,
}

impl CsvRow {
    fn to_employee(&self) -> Result<Employee, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Employee {
            empkey: self.empkey,
            eg: self.eg,
            sg: self.sg != 0,
            fur0: self.fur0 != 0,
            dob: NaiveDate::parse_from_str(&self.dob, "%Y-%m-%d")?,
            longevity_date: NaiveDate::parse_from_str(&self.longevity_date, "%Y-%m-%d")?,
            retdate: NaiveDate::parse_from_str(&self.retdate, "%Y-%m-%d")?,
            order: self.order,
        })
    }
}

/// Load a roster from a CSV file with `empkey,eg,sg,fur0,dob,ldate,retdate,order`
/// columns.
pub fn load_roster_csv(path: &Path) -> Result<Vec<Employee>, Box<dyn std::error::Error + Send + Sync>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut employees = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        employees.push(row.to_employee()?);
    }
    Ok(employees)
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn retirement_increase_shifts_retdate_forward() {
        let mut emps = vec![emp(1, NaiveDate::from_ymd_opt(2025, 6, 15).unwrap())];
        let schedule = vec![RetirementAgeIncrease {
            effective_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            additional_months: 6,
        }];
        apply_retirement_age_increases(&mut emps, &schedule);
        assert_eq!(emps[0].retdate, NaiveDate::from_ymd_opt(2025, 12, 15).unwrap());
    }

    #[test]
    fn retirement_increase_skips_employees_before_effective_date() {
        let mut emps = vec![emp(1, NaiveDate::from_ymd_opt(2019, 6, 15).unwrap())];
        let schedule = vec![RetirementAgeIncrease {
            effective_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            additional_months: 6,
        }];
        apply_retirement_age_increases(&mut emps, &schedule);
        assert_eq!(emps[0].retdate, NaiveDate::from_ymd_opt(2019, 6, 15).unwrap());
    }

    #[test]
    fn duplicate_order_rejected() {
        let emps = vec![
            emp(1, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()),
            emp(1, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()),
        ];
        assert!(validate_ordering(&emps).is_err());
    }
}
