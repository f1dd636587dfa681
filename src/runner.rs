//! Drives the scenario plan against one backend.

use anyhow::Result;
use chrono::Utc;
use std::time::Instant;
use tracing::{info, warn};

use crate::client::ApiClient;
use crate::config::RunConfig;
use crate::context::TestData;
use crate::report::console::{render_banner, render_section};
use crate::report::{RunSummary, ScenarioResult};
use crate::scenarios::{self, Scenario, ScenarioContext};
use crate::BANNER;

/// Owns the session and the data bag for one run.
pub struct Runner {
    config: RunConfig,
    client: ApiClient,
    data: TestData,
}

impl Runner {
    pub fn new(config: RunConfig) -> Result<Self> {
        let client = ApiClient::new(&config)?;
        Ok(Self {
            config,
            client,
            data: TestData::new(),
        })
    }

    /// Data left behind by the scenarios that ran.
    pub fn data(&self) -> &TestData {
        &self.data
    }

    /// Run the full plan.
    pub fn run(&mut self) -> RunSummary {
        self.run_plan(&scenarios::plan())
    }

    /// Run `plan` in order. Every scenario runs even after earlier failures;
    /// dependents fail on their own when the data they need is missing.
    pub fn run_plan(&mut self, plan: &[Scenario]) -> RunSummary {
        let echo = !self.config.quiet;
        if echo {
            println!("{}", render_banner(BANNER, &self.config.base_url));
        }

        let started_at = Utc::now();
        let mut results = Vec::with_capacity(plan.len());

        for scenario in plan {
            if echo {
                println!("{}", render_section(scenario.title));
            }
            info!(scenario = scenario.name, "scenario started");

            let started = Instant::now();
            let mut ctx = ScenarioContext::new(&self.client, &self.config, &mut self.data, echo);
            let outcome = (scenario.run)(&mut ctx);
            let checks = ctx.into_checks();
            let duration = started.elapsed();

            let result = if scenario.lenient {
                ScenarioResult::lenient(scenario.name, checks, duration)
            } else {
                ScenarioResult::new(
                    scenario.name,
                    checks,
                    outcome.err().map(|e| e.to_string()),
                    duration,
                )
            };

            if result.passed {
                info!(scenario = scenario.name, ?duration, "scenario passed");
            } else {
                warn!(
                    scenario = scenario.name,
                    critical = result.critical,
                    aborted = result.aborted.as_deref().unwrap_or(""),
                    "scenario failed"
                );
            }
            results.push(result);
        }

        RunSummary::new(&self.config.base_url, started_at, Utc::now(), results)
    }
}
