//! The student's path through an open room: join, rejoin, fetch, submit, resubmit.

use std::collections::BTreeSet;
use std::thread;

use super::context::{ScenarioContext, ScenarioOutcome};
use crate::models::room::{build_answers, JoinResponse, QuestionsResponse};
use crate::models::{QuestionType, Role};

const EXPECTED_TYPES: [QuestionType; 3] = [
    QuestionType::MultipleChoice,
    QuestionType::Matching,
    QuestionType::Open,
];

/// Variant assignment must be sticky: a second join returns the same variant
/// and reports that the student had already joined.
pub fn student_room_flow(ctx: &mut ScenarioContext<'_>) -> ScenarioOutcome {
    let client = ctx.client();
    let room_id = ctx.take("Student Room Flow", |d| d.room().map(|r| r.id.clone()))?;
    ctx.login_as(Role::Student, "Student Room Flow - Login")?;

    let join = format!("/rooms/{room_id}/join");

    let response = ctx.send("Student Join Room", client.post(join.as_str()), "Failed to join room")?;
    let joined: JoinResponse = ctx.decode("Student Join Room", &response)?;
    let student = joined.room_student.filter(|s| s.assigned_variant_id.is_some());
    let Some(student) = student else {
        return ctx.require("Student Join Room", false, "No assigned variant in join response");
    };
    let variant = student.assigned_variant_id.clone().unwrap_or_default();
    ctx.pass("Student Join Room", format!("Assigned variant: {variant}"));
    ctx.data.room_student = Some(student);

    let response = ctx.send(
        "Student Rejoin Room",
        client.post(join.as_str()),
        "Failed to rejoin room",
    )?;
    let rejoined: JoinResponse = ctx.decode("Student Rejoin Room", &response)?;
    let rejoined_variant = rejoined
        .room_student
        .and_then(|s| s.assigned_variant_id)
        .unwrap_or_default();
    ctx.expect(
        "Student Rejoin Room",
        rejoined_variant == variant && rejoined.already_joined,
        format!(
            "Same variant: {}, Already joined: {}",
            rejoined_variant == variant,
            rejoined.already_joined
        ),
    );

    let response = ctx.send(
        "Student Get Questions",
        client.get(format!("/rooms/{room_id}/questions")),
        "Failed to get questions",
    )?;
    let served: QuestionsResponse = ctx.decode("Student Get Questions", &response)?;
    ctx.pass(
        "Student Get Questions",
        format!("Retrieved {} questions", served.questions.len()),
    );

    let types: BTreeSet<String> = served.questions.iter().map(|q| q.kind.to_string()).collect();
    let has_all = EXPECTED_TYPES
        .iter()
        .all(|t| served.questions.iter().any(|q| q.kind == *t));
    ctx.expect(
        "Question Types Verification",
        has_all,
        format!("Found types: {}", types.into_iter().collect::<Vec<_>>().join(", ")),
    );

    let answers = build_answers(&served.questions);
    ctx.data.room_questions = Some(served.questions);

    let submit = format!("/rooms/{room_id}/submit");
    ctx.send(
        "Student Submit Answers",
        client.post(submit.as_str()).json(&answers),
        "Failed to submit answers",
    )?;
    ctx.pass(
        "Student Submit Answers",
        format!("Submitted {} answers", answers.answers.len()),
    );

    thread::sleep(ctx.config().resubmit_delay());

    ctx.send(
        "Student Resubmit Answers",
        client.post(submit.as_str()).json(&answers),
        "Failed to resubmit answers",
    )?;
    ctx.pass("Student Resubmit Answers", "Answers updated successfully");

    Ok(())
}
