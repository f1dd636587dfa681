use super::context::{ScenarioContext, ScenarioOutcome};
use crate::context::CreatedRoom;
use crate::models::room::{
    CreateRoomRequest, CreatedRoom as CreatedRoomResponse, RoomDetailResponse, RoomList,
};
use crate::models::Role;

const ROOM_NAME: &str = "Test Room for Sample Test";

/// Open a room for the created test, list rooms, and read the room back.
pub fn room_management(ctx: &mut ScenarioContext<'_>) -> ScenarioOutcome {
    let client = ctx.client();
    ctx.login_as(Role::Teacher, "Room Management - Login")?;

    let test_id = ctx.take("Create Room", |d| d.test().map(|t| t.id.clone()))?;
    let request = CreateRoomRequest {
        test_id,
        name: ROOM_NAME.to_string(),
    };
    let response = ctx.send(
        "Create Room",
        client.post("/rooms").json(&request),
        "Failed to create room",
    )?;
    let created: CreatedRoomResponse = ctx.decode("Create Room", &response)?;
    ctx.pass("Create Room", format!("Room created with ID: {}", created.room_id));
    ctx.data.room = Some(CreatedRoom {
        id: created.room_id.clone(),
    });

    let response = ctx.send("List Rooms", client.get("/rooms"), "Failed to list rooms")?;
    let list: RoomList = ctx.decode("List Rooms", &response)?;
    ctx.pass("List Rooms", format!("Found {} rooms", list.rooms.len()));

    let response = ctx.send(
        "Get Room Details",
        client.get(format!("/rooms/{}", created.room_id)),
        "Failed to get room details",
    )?;
    let detail: RoomDetailResponse = ctx.decode("Get Room Details", &response)?;

    match detail.room.and_then(|r| r.status) {
        Some(status) => {
            ctx.pass("Get Room Details", format!("Room status: {status}"));
            Ok(())
        }
        None => ctx.require("Get Room Details", false, "Room detail has no status"),
    }
}
