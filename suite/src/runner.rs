//! Runs scenarios in order and collects a report.
//!
//! Scenarios run sequentially against one `Context`. A failing scenario is
//! recorded and the run continues with the next one.

use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::Tag;
use crate::context::Context;
use crate::scenarios::Scenario;

/// Outcome of a single scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub tags: Vec<Tag>,
    pub success: bool,
    pub duration_ms: u64,
    pub error: Option<String>,
}

/// Outcome of a whole run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SuiteReport {
    pub base_url: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub results: Vec<ScenarioReport>,
}

impl SuiteReport {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScenarioReport> {
        self.results.iter().filter(|r| !r.success)
    }
}

pub fn run(ctx: &mut Context, scenarios: &[Scenario]) -> SuiteReport {
    let started = Instant::now();
    let mut report = SuiteReport {
        base_url: ctx.client.base_url().to_string(),
        total: scenarios.len(),
        ..Default::default()
    };

    for scenario in scenarios {
        info!(scenario = scenario.name, "starting");
        let scenario_started = Instant::now();
        let outcome = (scenario.run)(ctx);
        let duration_ms = scenario_started.elapsed().as_millis() as u64;

        let error = match outcome {
            Ok(()) => {
                info!(scenario = scenario.name, duration_ms, "passed");
                report.passed += 1;
                None
            }
            Err(e) => {
                warn!(scenario = scenario.name, duration_ms, error = %e, "failed");
                report.failed += 1;
                Some(e.to_string())
            }
        };

        report.results.push(ScenarioReport {
            name: scenario.name.to_string(),
            tags: scenario.tags.to_vec(),
            success: error.is_none(),
            duration_ms,
            error,
        });
    }

    report.duration_ms = started.elapsed().as_millis() as u64;
    info!(
        total = report.total,
        passed = report.passed,
        failed = report.failed,
        "suite finished"
    );
    report
}
