use super::context::{ScenarioContext, ScenarioOutcome};
use crate::models::grading::{OwnResult, RoomResults};
use crate::models::Role;

/// Teacher sees every result, the student sees only their own, and both agree.
pub fn results_viewing(ctx: &mut ScenarioContext<'_>) -> ScenarioOutcome {
    let client = ctx.client();
    let room_id = ctx.take("Results Viewing", |d| d.room().map(|r| r.id.clone()))?;
    let endpoint = format!("/rooms/{room_id}/results");

    ctx.login_as(Role::Teacher, "Results Viewing - Teacher Login")?;
    let response = ctx.send(
        "Teacher View Results",
        client.get(endpoint.as_str()),
        "Failed to get results",
    )?;
    let room_results: RoomResults = ctx.decode("Teacher View Results", &response)?;
    let results = room_results.results;
    ctx.pass(
        "Teacher View Results",
        format!("Found {} results", results.len()),
    );

    if let Some(first) = results.first() {
        let problems: Vec<String> = results
            .iter()
            .filter_map(|r| r.check_consistency().err())
            .collect();
        let detail = if problems.is_empty() {
            format!("Score: {}", first.summary())
        } else {
            problems.join("; ")
        };
        ctx.expect("Auto-Checking Verification", problems.is_empty(), detail);
    }
    ctx.data.teacher_results = results;

    ctx.login_as(Role::Student, "Results Viewing - Student Login")?;
    let response = ctx.send(
        "Student View Own Result",
        client.get(endpoint.as_str()),
        "Failed to get student result",
    )?;
    let own: OwnResult = ctx.decode("Student View Own Result", &response)?;
    let Some(result) = own.result.filter(|r| r.is_graded()) else {
        return ctx.require("Student View Own Result", false, "No graded result in response");
    };
    ctx.pass(
        "Student View Own Result",
        format!("Score: {}", result.summary()),
    );

    let teacher_entry = result.student_id.as_ref().and_then(|id| {
        ctx.data
            .teacher_results
            .iter()
            .find(|r| r.student_id.as_ref() == Some(id))
            .cloned()
    });
    if let Some(entry) = teacher_entry {
        ctx.expect(
            "Result Views Agree",
            entry.matches(&result),
            format!("Teacher: {}, Student: {}", entry.summary(), result.summary()),
        );
    }

    Ok(())
}
