//! Data carried between scenarios.
//!
//! Scenarios run in a fixed order and later ones consume what earlier ones
//! created (accounts, the test, the room). Every accessor returns
//! `MissingData` instead of panicking so a dependent scenario can fail cleanly.

use std::collections::HashMap;
use thiserror::Error;

use crate::models::grading::GradeResult;
use crate::models::quiz::TestDraft;
use crate::models::room::{RoomQuestion, RoomStudent};
use crate::models::{Credentials, Role};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("No {0} available from an earlier step")]
pub struct MissingData(pub &'static str);

#[derive(Debug, Clone)]
pub struct CreatedTeacher {
    pub id: String,
}

#[derive(Debug, Clone)]
pub struct CreatedTest {
    pub id: String,
    pub draft: TestDraft,
}

#[derive(Debug, Clone)]
pub struct CreatedRoom {
    pub id: String,
}

#[derive(Debug, Default)]
pub struct TestData {
    accounts: HashMap<Role, Credentials>,
    pub admin_created_teacher: Option<CreatedTeacher>,
    pub test: Option<CreatedTest>,
    pub room: Option<CreatedRoom>,
    pub room_student: Option<RoomStudent>,
    pub room_questions: Option<Vec<RoomQuestion>>,
    /// Teacher's view of the results, kept to cross-check the student's own result.
    pub teacher_results: Vec<GradeResult>,
}

impl TestData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store_account(&mut self, credentials: Credentials) {
        self.accounts.insert(credentials.role, credentials);
    }

    pub fn account(&self, role: Role) -> Result<&Credentials, MissingData> {
        self.accounts.get(&role).ok_or(MissingData(role.key()))
    }

    pub fn test(&self) -> Result<&CreatedTest, MissingData> {
        self.test.as_ref().ok_or(MissingData("test"))
    }

    pub fn room(&self) -> Result<&CreatedRoom, MissingData> {
        self.room.as_ref().ok_or(MissingData("room"))
    }

    pub fn admin_created_teacher(&self) -> Result<&CreatedTeacher, MissingData> {
        self.admin_created_teacher
            .as_ref()
            .ok_or(MissingData("admin_created_teacher"))
    }

    pub fn room_questions(&self) -> Result<&[RoomQuestion], MissingData> {
        self.room_questions
            .as_deref()
            .ok_or(MissingData("room_questions"))
    }
}
