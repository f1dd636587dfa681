use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::client::{ApiClient, ApiError, ApiResponse, Call};
use crate::config::RunConfig;
use crate::context::{MissingData, TestData};
use crate::models::Role;
use crate::report::console::render_check;
use crate::report::CheckResult;

/// Why a scenario stopped before its last step.
///
/// Every variant is recorded as a failed check before it is returned, so the
/// runner only needs the message for the `aborted` field.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    MissingPrerequisite(#[from] MissingData),

    #[error("{0} failed")]
    CheckFailed(String),
}

pub type ScenarioOutcome = Result<(), ScenarioError>;

/// Everything one scenario can touch: the shared session, the run config, the
/// data bag, and the checks recorded so far.
pub struct ScenarioContext<'a> {
    client: &'a ApiClient,
    config: &'a RunConfig,
    pub data: &'a mut TestData,
    checks: Vec<CheckResult>,
    echo: bool,
}

impl<'a> ScenarioContext<'a> {
    pub fn new(
        client: &'a ApiClient,
        config: &'a RunConfig,
        data: &'a mut TestData,
        echo: bool,
    ) -> Self {
        Self {
            client,
            config,
            data,
            checks: Vec::new(),
            echo,
        }
    }

    pub fn client(&self) -> &'a ApiClient {
        self.client
    }

    pub fn config(&self) -> &'a RunConfig {
        self.config
    }

    pub fn checks(&self) -> &[CheckResult] {
        &self.checks
    }

    pub fn into_checks(self) -> Vec<CheckResult> {
        self.checks
    }

    pub fn record(&mut self, check: CheckResult) {
        if self.echo {
            println!("{}\n", render_check(&check));
        }
        debug!(check = %check.name, passed = check.passed, "check recorded");
        self.checks.push(check);
    }

    pub fn pass(&mut self, step: &str, detail: impl Into<String>) {
        self.record(CheckResult::pass(step, detail));
    }

    pub fn fail(&mut self, step: &str, detail: impl Into<String>) {
        self.record(CheckResult::fail(step, detail));
    }

    /// Soft check: records the outcome and lets the scenario continue.
    pub fn expect(&mut self, step: &str, ok: bool, detail: impl Into<String>) -> bool {
        if ok {
            self.pass(step, detail);
        } else {
            self.fail(step, detail);
        }
        ok
    }

    /// Hard check: a failure is recorded and aborts the scenario.
    pub fn require(&mut self, step: &str, ok: bool, detail: impl Into<String>) -> ScenarioOutcome {
        if ok {
            self.pass(step, detail);
            Ok(())
        } else {
            self.fail(step, detail);
            Err(ScenarioError::CheckFailed(step.to_string()))
        }
    }

    /// Send a request. On any error (transport, wrong status, bad body encoding)
    /// a failed check named `step` is recorded with `failure` and the error.
    /// Success records nothing; the caller reports what it verified.
    pub fn send(
        &mut self,
        step: &str,
        call: Call<'_>,
        failure: &str,
    ) -> Result<ApiResponse, ScenarioError> {
        match call.send() {
            Ok(response) => Ok(response),
            Err(err) => {
                self.fail(step, format!("{failure} ({err})"));
                Err(err.into())
            }
        }
    }

    /// Decode a response body, recording a failed `step` if its shape is wrong.
    pub fn decode<T: DeserializeOwned>(
        &mut self,
        step: &str,
        response: &ApiResponse,
    ) -> Result<T, ScenarioError> {
        match response.json::<T>() {
            Ok(value) => Ok(value),
            Err(err) => {
                self.fail(step, err.to_string());
                Err(err.into())
            }
        }
    }

    /// Pull an owned value out of the data bag, recording a failed `step`
    /// when an earlier scenario did not produce it.
    pub fn take<T>(
        &mut self,
        step: &str,
        lookup: impl FnOnce(&TestData) -> Result<T, MissingData>,
    ) -> Result<T, ScenarioError> {
        match lookup(&*self.data) {
            Ok(value) => Ok(value),
            Err(missing) => {
                self.fail(step, missing.to_string());
                Err(missing.into())
            }
        }
    }

    /// Switch the session to `role` by logging in with its stored credentials.
    pub fn login_as(&mut self, role: Role, step: &str) -> ScenarioOutcome {
        let credentials = self.take(step, |d| d.account(role).cloned())?;
        let client = self.client;
        self.send(
            step,
            client.post("/auth/login").json(&credentials.login()),
            &format!("Could not login as {}", role.key()),
        )?;
        Ok(())
    }
}
