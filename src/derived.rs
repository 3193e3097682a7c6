//! Derived rank and percentile columns.
//!
//! `snum`/`spcnt` rank only active (non-furloughed) employees against
//! the month's total job count; `lnum`/`lspcnt` rank every employee,
//! furloughed or not, against either the active headcount or the
//! greater of headcount and job count.

use crate::config::EngineConfig;
use crate::engine::LongFormRow;
use crate::jobs::table::JobCountTable;

/// One employee-month's derived rank columns, aligned 1:1 with the
/// `LongFormRow` it was computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedRow {
    /// Active-only seniority number; `None` for furloughed rows.
    pub snum: Option<u32>,
    /// `snum / monthly job total`; `None` for furloughed rows.
    pub spcnt: Option<f64>,
    /// List position, 1-based, including furloughees.
    pub lnum: u32,
    /// `lnum / list_denom`.
    pub lspcnt: f64,
}

/// Compute derived columns for every row in `rows`, which must be
/// grouped contiguously by month and ordered by seniority within each
/// month group (the shape the engine's output is already in).
pub fn derive(rows: &[LongFormRow], job_table: &JobCountTable, config: &EngineConfig) -> Vec<DerivedRow> {
    let mut out = Vec::with_capacity(rows.len());
    let mut start = 0;
    while start < rows.len() {
        let month = rows[start].mnum;
        let mut end = start;
        while end < rows.len() && rows[end].mnum == month {
            end += 1;
        }
        let group = &rows[start..end];
        let this_month_count = group.len() as u32;
        let total_jobs = job_table.total(month as usize);

        let list_denom = if config.lspcnt_remaining_only {
            this_month_count as f64
        } else {
            (total_jobs.max(this_month_count as i64)) as f64
        };

        let mut snum_counter = 1u32;
        for (i, row) in group.iter().enumerate() {
            let lnum = i as u32 + 1;
            let (snum, spcnt) = if row.fur {
                (None, None)
            } else {
                let s = snum_counter;
                snum_counter += 1;
                let pct = if total_jobs > 0 { Some(s as f64 / total_jobs as f64) } else { None };
                (Some(s), pct)
            };
            let lspcnt = if list_denom > 0.0 { lnum as f64 / list_denom } else { 0.0 };

            out.push(DerivedRow {
                snum,
                spcnt,
                lnum,
                lspcnt,
            });
        }

        start = end;
    }
    out
}
