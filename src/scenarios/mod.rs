//! The ordered acceptance plan.
//!
//! Each scenario covers one feature area and reads what earlier scenarios
//! left in the shared [`TestData`](crate::context::TestData). Order matters:
//! accounts before logins, the test before the room, the room before students.

mod admin;
mod auth;
mod authoring;
mod authorization;
mod cleanup;
mod closing;
pub mod context;
mod results;
mod rooms;
mod student;

pub use context::{ScenarioContext, ScenarioError, ScenarioOutcome};

pub type ScenarioFn = fn(&mut ScenarioContext<'_>) -> ScenarioOutcome;

/// A named step of the plan.
#[derive(Clone, Copy)]
pub struct Scenario {
    pub name: &'static str,
    /// Section heading printed before the scenario's checks.
    pub title: &'static str,
    pub run: ScenarioFn,
    /// Reported as passed whatever its checks say.
    pub lenient: bool,
}

impl Scenario {
    const fn new(name: &'static str, title: &'static str, run: ScenarioFn) -> Self {
        Self {
            name,
            title,
            run,
            lenient: false,
        }
    }

    const fn lenient(mut self) -> Self {
        self.lenient = true;
        self
    }

    pub fn is_critical(&self) -> bool {
        crate::report::is_critical(self.name)
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("lenient", &self.lenient)
            .finish()
    }
}

/// The full plan in execution order.
pub fn plan() -> Vec<Scenario> {
    vec![
        Scenario::new("Auth Signup", "Testing User Signup", auth::signup),
        Scenario::new("Auth Login", "Testing User Login", auth::login),
        Scenario::new("Auth Me", "Testing Get Current User", auth::current_user),
        Scenario::new("Admin Flow", "Testing Admin Flow", admin::admin_flow),
        Scenario::new(
            "Teacher Test Management",
            "Testing Teacher Test Management",
            authoring::teacher_test_management,
        ),
        Scenario::new("Room Management", "Testing Room Management", rooms::room_management),
        Scenario::new("Student Room Login", "Testing Student Room Login", auth::room_login),
        Scenario::new(
            "Student Room Flow",
            "Testing Student Room Flow",
            student::student_room_flow,
        ),
        Scenario::new(
            "Room Closing & Auto-Checking",
            "Testing Room Closing & Auto-Checking",
            closing::room_closing,
        ),
        Scenario::new("Results Viewing", "Testing Results Viewing", results::results_viewing),
        Scenario::new(
            "Authorization Controls",
            "Testing Authorization Controls",
            authorization::authorization_controls,
        ),
        Scenario::new("Auth Logout", "Testing Logout", auth::logout),
        Scenario::new("Cleanup", "Cleaning Up", cleanup::cleanup).lenient(),
    ]
}
