use reqwest::StatusCode;

use super::context::{ScenarioContext, ScenarioOutcome};
use crate::models::{Role, TestDraft};

/// A student session must be refused on teacher and admin endpoints.
pub fn authorization_controls(ctx: &mut ScenarioContext<'_>) -> ScenarioOutcome {
    let client = ctx.client();
    ctx.login_as(Role::Student, "Authorization Controls - Login")?;

    ctx.send(
        "Student Cannot Create Test",
        client
            .post("/tests")
            .json(&TestDraft::unauthorized_draft())
            .expect(StatusCode::UNAUTHORIZED),
        "Student was allowed to create a test",
    )?;
    ctx.pass(
        "Student Cannot Create Test",
        "Correctly blocked student from creating test",
    );

    ctx.send(
        "Student Cannot Access Admin",
        client.get("/teachers").expect(StatusCode::UNAUTHORIZED),
        "Student was allowed to list teachers",
    )?;
    ctx.pass(
        "Student Cannot Access Admin",
        "Correctly blocked student from admin endpoints",
    );

    ctx.send(
        "Student Cannot List Rooms",
        client.get("/rooms").expect(StatusCode::UNAUTHORIZED),
        "Student was allowed to list rooms",
    )?;
    ctx.pass(
        "Student Cannot List Rooms",
        "Correctly blocked student from teacher room list",
    );

    Ok(())
}
