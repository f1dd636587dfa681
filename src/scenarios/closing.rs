use reqwest::StatusCode;

use super::context::{ScenarioContext, ScenarioOutcome};
use crate::models::room::RoomDetailResponse;
use crate::models::{Role, RoomStatus, SubmitRequest};

/// Close the room and confirm `CLOSED` is terminal: the status flips, late
/// submissions get 400 and a second close gets 400.
pub fn room_closing(ctx: &mut ScenarioContext<'_>) -> ScenarioOutcome {
    let client = ctx.client();
    let room_id = ctx.take("Room Closing", |d| d.room().map(|r| r.id.clone()))?;
    let close = format!("/rooms/{room_id}/close");

    ctx.login_as(Role::Teacher, "Room Closing - Login")?;
    ctx.send(
        "Teacher Close Room",
        client.post(close.as_str()),
        "Failed to close room",
    )?;
    ctx.pass("Teacher Close Room", "Room closed successfully");

    let response = ctx.send(
        "Room Status Verification",
        client.get(format!("/rooms/{room_id}")),
        "Failed to get room details",
    )?;
    let detail: RoomDetailResponse = ctx.decode("Room Status Verification", &response)?;
    let room = detail.room;
    let status = room.as_ref().and_then(|r| r.parsed_status());
    let raw = room.and_then(|r| r.status).unwrap_or_else(|| "None".to_string());
    ctx.require(
        "Room Status Verification",
        status.is_some_and(RoomStatus::is_terminal),
        format!("Room status: {raw}"),
    )?;

    ctx.login_as(Role::Student, "Room Closing - Student Login")?;
    ctx.send(
        "Submit After Close",
        client
            .post(format!("/rooms/{room_id}/submit"))
            .json(&SubmitRequest::empty())
            .expect(StatusCode::BAD_REQUEST),
        "Closed room accepted a submission",
    )?;
    ctx.pass("Submit After Close", "Correctly rejected submission to closed room");

    ctx.login_as(Role::Teacher, "Room Closing - Teacher Login")?;
    ctx.send(
        "Close Is Terminal",
        client.post(close.as_str()).expect(StatusCode::BAD_REQUEST),
        "Closed room was closed again",
    )?;
    ctx.pass("Close Is Terminal", "Second close rejected");

    Ok(())
}
