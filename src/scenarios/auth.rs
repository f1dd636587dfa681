//! Signup, login, current-user lookup, name-only room login and logout.

use reqwest::StatusCode;

use super::context::{ScenarioContext, ScenarioOutcome};
use crate::models::account::{random_suffix, MeResponse, RoomLoginRequest};
use crate::models::{Credentials, Role};

/// Create one account per role. Stops at the first failure: every later
/// scenario needs all three accounts.
pub fn signup(ctx: &mut ScenarioContext<'_>) -> ScenarioOutcome {
    let client = ctx.client();

    for role in Role::ALL {
        let credentials = Credentials::generate(role);
        let step = format!("{} Signup", role.label());

        ctx.send(
            &step,
            client.post("/auth/signup").json(&credentials),
            &format!("Failed to create {} account", role.key()),
        )?;

        let detail = format!("{} created: {}", role.label(), credentials.email);
        ctx.data.store_account(credentials);
        ctx.pass(&step, detail);
    }

    Ok(())
}

/// Log in as each role in turn. The session ends up authenticated as the student.
pub fn login(ctx: &mut ScenarioContext<'_>) -> ScenarioOutcome {
    for role in Role::ALL {
        let step = format!("{} Login", role.label());
        ctx.login_as(role, &step)?;
        ctx.pass(&step, format!("{} logged in successfully", role.label()));
    }
    Ok(())
}

/// The active session must resolve to a user with a name.
pub fn current_user(ctx: &mut ScenarioContext<'_>) -> ScenarioOutcome {
    const STEP: &str = "Get Current User";
    let client = ctx.client();

    let response = ctx.send(STEP, client.get("/auth/me"), "Failed to get current user")?;
    let me: MeResponse = ctx.decode(STEP, &response)?;

    match me.user.and_then(|u| u.name) {
        Some(name) => {
            ctx.pass(STEP, format!("User: {name}"));
            Ok(())
        }
        None => ctx.require(STEP, false, "No user data in response"),
    }
}

/// Name-only student login scoped to the room created earlier.
pub fn room_login(ctx: &mut ScenarioContext<'_>) -> ScenarioOutcome {
    const STEP: &str = "Student Room Login";
    let client = ctx.client();

    let room_id = ctx.take(STEP, |d| d.room().map(|r| r.id.clone()))?;
    let name = format!("Room Student {}", random_suffix());

    ctx.send(
        STEP,
        client.post("/auth/login").json(&RoomLoginRequest {
            name: name.clone(),
            room_id,
        }),
        "Failed to log in by name",
    )?;
    ctx.pass(STEP, format!("Logged in as {name}"));

    let response = ctx.send(
        "Room Login Identity",
        client.get("/auth/me"),
        "Failed to get current user",
    )?;
    let me: MeResponse = ctx.decode("Room Login Identity", &response)?;
    let user = me.user.unwrap_or_default();

    let same_name = user.name.as_deref() == Some(name.as_str());
    let is_student = user.has_role(Role::Student);
    ctx.expect(
        "Room Login Identity",
        same_name && is_student,
        format!("Name matches: {same_name}, student role: {is_student}"),
    );

    Ok(())
}

/// Log out and confirm the session no longer resolves to a user.
pub fn logout(ctx: &mut ScenarioContext<'_>) -> ScenarioOutcome {
    let client = ctx.client();

    ctx.send("Logout", client.post("/auth/logout"), "Logout failed")?;
    ctx.pass("Logout", "Logged out successfully");

    ctx.send(
        "Session Cleared",
        client.get("/auth/me").expect(StatusCode::UNAUTHORIZED),
        "Session still authenticated after logout",
    )?;
    ctx.pass("Session Cleared", "Current user lookup rejected after logout");

    Ok(())
}
