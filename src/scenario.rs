//! Scenario runner for batches of integration proposals
//!
//! Pre-loads the roster and engine config once, then runs many
//! candidate integration proposals (different job-count schedules,
//! quota conditions, or recall plans) without re-parsing input data.
//! Proposals are independent of one another, so a batch run fans them
//! out with rayon.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use rayon::prelude::*;

use crate::calendar::Calendar;
use crate::config::EngineConfig;
use crate::engine::quota::QuotaCondition;
use crate::engine::{self, LongFormRow, RecallEvent};
use crate::error::EngineResult;
use crate::jobs::assign_initial_jobs;
use crate::jobs::initial::PreExRight;
use crate::jobs::table::{build_job_count_table, job_change_months, JobChangeSchedule};
use crate::roster::{self, Employee};
use crate::skeleton::Skeleton;

/// One candidate way of running the integration: a legacy-carrier
/// stovepipe starting point plus the integrated job-count trajectory,
/// quota conditions, and recall plan to project forward.
#[derive(Debug, Clone)]
pub struct IntegrationProposal {
    pub name: String,

    /// Per-group job counts used only to stovepipe-fill each group's
    /// starting jobs before integration.
    pub initial_job_counts_by_group: HashMap<u32, Vec<i64>>,
    pub initial_prex_rights: Vec<PreExRight>,

    /// Integrated job counts at month 0 and the schedules that move them.
    pub integrated_job_counts: Vec<i64>,
    pub job_schedules: Vec<JobChangeSchedule>,

    pub conditions: Vec<QuotaCondition>,
    pub recalls: Vec<RecallEvent>,
}

/// Pre-loaded scenario runner for a fixed roster and engine configuration.
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    employees: Vec<Employee>,
    config: EngineConfig,
    start_date: NaiveDate,
}

impl ScenarioRunner {
    pub fn new(employees: Vec<Employee>, config: EngineConfig, start_date: NaiveDate) -> Self {
        Self {
            employees,
            config,
            start_date,
        }
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Run a single integration proposal end to end: ordering validation,
    /// calendar, skeleton, initial stovepipe assignment, job-count table,
    /// and the monthly engine.
    pub fn run(&self, proposal: &IntegrationProposal) -> EngineResult<Vec<LongFormRow>> {
        roster::validate_ordering(&self.employees)?;
        let order = roster::order_sorted_indices(&self.employees);
        let employees: Vec<Employee> = order.iter().map(|&i| self.employees[i].clone()).collect();

        let groups: HashSet<u32> = employees.iter().map(|e| e.eg).collect();
        for condition in &proposal.conditions {
            condition.validate(self.config.num_of_job_levels, &groups)?;
        }

        let calendar = Calendar::build(self.start_date, &employees);
        let skeleton = Skeleton::build(&calendar, &employees);

        let initial_jobs = assign_initial_jobs(
            &employees,
            self.config.num_of_job_levels,
            &proposal.initial_job_counts_by_group,
            &proposal.initial_prex_rights,
        );

        let job_table = build_job_count_table(
            calendar.num_months(),
            self.config.num_of_job_levels,
            &proposal.integrated_job_counts,
            &proposal.job_schedules,
        )?;
        let jcm = job_change_months(&proposal.job_schedules);

        engine::run(
            &employees,
            &skeleton,
            &self.config,
            &job_table,
            &jcm,
            &initial_jobs,
            proposal.conditions.clone(),
            &proposal.recalls,
        )
    }

    /// Run every proposal in `proposals` independently and in parallel.
    pub fn run_batch(&self, proposals: &[IntegrationProposal]) -> Vec<EngineResult<Vec<LongFormRow>>> {
        proposals.par_iter().map(|p| self.run(p)).collect()
    }
}
