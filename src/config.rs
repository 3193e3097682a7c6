//! Engine-wide configuration
//!
//! A single immutable value passed into the engine constructor, replacing
//! the source's process-wide config module. All schedules remain data on
//! `EngineInput`, never globals here.

/// Method used to select which furloughees are recalled in a given month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecallMethod {
    /// Most senior (lowest `order`) furloughees recalled first.
    SeniorityOrder,
    /// Every `n`th furloughee, in seniority order.
    Stride(u32),
    /// Shuffled furloughee list, driven by an explicit seed.
    Random(u64),
}

impl Default for RecallMethod {
    fn default() -> Self {
        RecallMethod::SeniorityOrder
    }
}

/// Engine-wide run configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Number of real job levels (`K`). `FUR_LEVEL = num_of_job_levels + 1`.
    pub num_of_job_levels: usize,

    /// If true, employees keep their pre-integration (`orig_job`) job
    /// through `start_month - 1` instead of the engine assigning from
    /// month 0.
    pub delayed_implementation: bool,

    /// Implementation month index (>= 0). Months before this one pass
    /// `orig_job` straight through when `delayed_implementation` is set.
    pub start_month: u32,

    /// `lspcnt` denominator policy: true uses `active[m]` only, false uses
    /// `max(active[m], T[m])`.
    pub lspcnt_remaining_only: bool,

    /// Default recall selection method when a recall schedule does not
    /// specify one.
    pub default_recall_method: RecallMethod,
}

impl EngineConfig {
    pub fn new(num_of_job_levels: usize) -> Self {
        Self {
            num_of_job_levels,
            delayed_implementation: false,
            start_month: 0,
            lspcnt_remaining_only: false,
            default_recall_method: RecallMethod::default(),
        }
    }

    /// `FUR_LEVEL`, one past the highest real job level.
    pub fn fur_level(&self) -> usize {
        self.num_of_job_levels + 1
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(1)
    }
}
