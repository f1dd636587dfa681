use serde::Deserialize;
use serde_json::Value;

use super::context::{ScenarioContext, ScenarioOutcome};
use crate::context::CreatedTeacher;
use crate::models::account::CreatedTeacher as CreatedTeacherResponse;
use crate::models::{NewTeacher, Role};

#[derive(Debug, Deserialize)]
struct TeacherList {
    #[serde(default)]
    teachers: Vec<Value>,
}

/// Create a teacher through the admin endpoint, list teachers, delete the one created.
pub fn admin_flow(ctx: &mut ScenarioContext<'_>) -> ScenarioOutcome {
    let client = ctx.client();
    ctx.login_as(Role::Admin, "Admin Flow - Login")?;

    let response = ctx.send(
        "Admin Create Teacher",
        client.post("/teachers").json(&NewTeacher::generate()),
        "Failed to create teacher",
    )?;
    let created: CreatedTeacherResponse = ctx.decode("Admin Create Teacher", &response)?;
    ctx.pass(
        "Admin Create Teacher",
        format!("Teacher created with ID: {}", created.teacher_id),
    );
    ctx.data.admin_created_teacher = Some(CreatedTeacher {
        id: created.teacher_id,
    });

    let response = ctx.send(
        "Admin List Teachers",
        client.get("/teachers"),
        "Failed to list teachers",
    )?;
    let list: TeacherList = ctx.decode("Admin List Teachers", &response)?;
    ctx.pass(
        "Admin List Teachers",
        format!("Found {} teachers", list.teachers.len()),
    );

    let teacher_id = ctx.take("Admin Delete Teacher", |d| {
        d.admin_created_teacher().map(|t| t.id.clone())
    })?;
    ctx.send(
        "Admin Delete Teacher",
        client.delete(format!("/teachers/{teacher_id}")),
        "Failed to delete teacher",
    )?;
    ctx.pass(
        "Admin Delete Teacher",
        format!("Teacher {teacher_id} deleted"),
    );

    Ok(())
}
