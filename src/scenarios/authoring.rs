use super::context::{ScenarioContext, ScenarioOutcome};
use crate::context::CreatedTest;
use crate::models::quiz::{CreatedTest as CreatedTestResponse, TestDetailResponse, TestList};
use crate::models::{Role, TestDraft};

/// Create the canonical two-variant test, list tests, and read it back.
///
/// The read-back must have as many variants and questions as were submitted.
pub fn teacher_test_management(ctx: &mut ScenarioContext<'_>) -> ScenarioOutcome {
    let client = ctx.client();
    ctx.login_as(Role::Teacher, "Teacher Test Management - Login")?;

    let draft = TestDraft::canonical();
    let response = ctx.send(
        "Teacher Create Test",
        client.post("/tests").json(&draft),
        "Failed to create test",
    )?;
    let created: CreatedTestResponse = ctx.decode("Teacher Create Test", &response)?;
    ctx.pass(
        "Teacher Create Test",
        format!("Test created with ID: {}", created.test_id),
    );
    ctx.data.test = Some(CreatedTest {
        id: created.test_id,
        draft,
    });

    let response = ctx.send("Teacher List Tests", client.get("/tests"), "Failed to list tests")?;
    let list: TestList = ctx.decode("Teacher List Tests", &response)?;
    ctx.pass("Teacher List Tests", format!("Found {} tests", list.tests.len()));

    let (test_id, expected_variants, expected_questions) =
        ctx.take("Teacher Get Test Details", |d| {
            d.test().map(|t| {
                (
                    t.id.clone(),
                    t.draft.variant_count(),
                    t.draft.question_count(),
                )
            })
        })?;

    let response = ctx.send(
        "Teacher Get Test Details",
        client.get(format!("/tests/{test_id}")),
        "Failed to get test details",
    )?;
    let detail: TestDetailResponse = ctx.decode("Teacher Get Test Details", &response)?;
    let test = detail.test.unwrap_or_default();

    let variants = test.variants.len();
    ctx.expect(
        "Teacher Get Test Details",
        variants == expected_variants,
        format!("Test has {variants} variants (submitted {expected_variants})"),
    );

    let questions = test.question_count();
    ctx.expect(
        "Test Questions Structure",
        questions == expected_questions,
        format!("Total questions: {questions} (submitted {expected_questions})"),
    );

    Ok(())
}
