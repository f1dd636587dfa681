pub mod account;
pub mod grading;
pub mod id;
pub mod quiz;
pub mod room;

pub use account::{Credentials, NewTeacher, Role};
pub use grading::GradeResult;
pub use quiz::{QuestionType, TestDraft};
pub use room::{RoomQuestion, RoomStatus, SubmitRequest};
