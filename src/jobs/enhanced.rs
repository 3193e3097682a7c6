//! Enhanced (full-time / part-time) job splitting -- a pre-engine
//! transform, not a concern of the assignment engine itself.

use super::table::JobChangeSchedule;

/// Split each basic job level `k` into two enhanced levels
/// `2k-1` (full-time) and `2k` (part-time), dividing counts by `ratio`
/// (the full-time share, in `[0.0, 1.0]`).
pub fn split_job_counts(basic_counts: &[i64], ratio: f64) -> Vec<i64> {
    let mut enhanced = Vec::with_capacity(basic_counts.len() * 2);
    for &count in basic_counts {
        let full_time = (count as f64 * ratio).round() as i64;
        let part_time = count - full_time;
        enhanced.push(full_time);
        enhanced.push(part_time);
    }
    enhanced
}

/// Remap a basic job-change schedule to the enhanced level numbering
/// (`k -> 2k-1` full-time, `2k` part-time), splitting `total_delta` by
/// the same ratio used for the initial counts.
pub fn split_schedule(schedule: &JobChangeSchedule, ratio: f64) -> [JobChangeSchedule; 2] {
    let full_time_delta = (schedule.total_delta as f64 * ratio).round() as i64;
    let part_time_delta = schedule.total_delta - full_time_delta;
    [
        JobChangeSchedule {
            level: schedule.level * 2 - 1,
            start_month: schedule.start_month,
            end_month: schedule.end_month,
            total_delta: full_time_delta,
        },
        JobChangeSchedule {
            level: schedule.level * 2,
            start_month: schedule.start_month,
            end_month: schedule.end_month,
            total_delta: part_time_delta,
        },
    ]
}
