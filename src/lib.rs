//! Deterministic monthly seniority-list integration and job-assignment
//! projection engine
//!
//! This library provides:
//! - Calendar and long-form skeleton construction from an employee roster
//! - Job-count table projection under linear-ramp job-change schedules
//! - Stovepipe initial job assignment with pre-existing-rights quotas
//! - A monthly no-bump/no-flush assignment engine with pre-ex, ratio,
//!   and capped-ratio quota conditions
//! - Furlough-for-reduction and recall-from-furlough selection
//! - Derived seniority-rank and list-percentile columns
//! - A scenario runner for running many integration proposals in parallel

pub mod calendar;
pub mod config;
pub mod derived;
pub mod engine;
pub mod error;
pub mod jobs;
pub mod roster;
pub mod scenario;
pub mod skeleton;

pub use calendar::Calendar;
pub use config::{EngineConfig, RecallMethod};
pub use derived::{derive, DerivedRow};
pub use engine::{run as run_engine, LongFormRow, RecallEvent};
pub use error::{EngineError, EngineResult};
pub use jobs::{assign_initial_jobs, build_job_count_table, job_change_months, JobChangeSchedule, JobCountTable, PreExRight};
pub use roster::{load_roster_csv, EmpKey, Employee};
pub use scenario::{IntegrationProposal, ScenarioRunner};
pub use skeleton::Skeleton;
