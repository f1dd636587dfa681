use tracing::debug;

use super::context::{ScenarioContext, ScenarioOutcome};
use crate::models::Role;

/// Best-effort teardown: delete the created test. Runs leniently, so failures
/// here are printed but never fail the run.
pub fn cleanup(ctx: &mut ScenarioContext<'_>) -> ScenarioOutcome {
    let client = ctx.client();
    let Some(test_id) = ctx.data.test.as_ref().map(|t| t.id.clone()) else {
        debug!("nothing to clean up");
        return Ok(());
    };

    ctx.login_as(Role::Teacher, "Cleanup - Login")?;
    ctx.send(
        "Cleanup Test",
        client.delete(format!("/tests/{test_id}")),
        "Failed to delete test",
    )?;
    ctx.pass("Cleanup Test", format!("Test {test_id} deleted"));

    Ok(())
}
