//! Room payloads: creation, join, the per-student question set and answer submission.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use super::quiz::QuestionType;

/// Answer text sent for open-ended questions.
pub const SAMPLE_OPEN_ANSWER: &str = "This is a sample answer for the open question.";

/// Externally observed room lifecycle: `Open` → `Closed`, and `Closed` is terminal.
/// Submissions are accepted only while `Open`. The wire form is upper case and
/// parsing is exact: `"closed"` is not a closed room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    Open,
    Closed,
}

impl RoomStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, RoomStatus::Closed)
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoomStatus::Open => write!(f, "OPEN"),
            RoomStatus::Closed => write!(f, "CLOSED"),
        }
    }
}

impl FromStr for RoomStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(RoomStatus::Open),
            "CLOSED" => Ok(RoomStatus::Closed),
            other => Err(format!("Unknown room status: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub test_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedRoom {
    #[serde(rename = "roomId", deserialize_with = "super::id::deserialize")]
    pub room_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoomList {
    #[serde(default)]
    pub rooms: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoomDetailResponse {
    pub room: Option<RoomDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoomDetail {
    /// Raw status string; kept unparsed so unexpected values can be reported.
    pub status: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl RoomDetail {
    pub fn parsed_status(&self) -> Option<RoomStatus> {
        self.status.as_deref().and_then(|s| s.parse().ok())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinResponse {
    pub room_student: Option<RoomStudent>,
    #[serde(default)]
    pub already_joined: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomStudent {
    #[serde(default, rename = "_id", deserialize_with = "super::id::deserialize_opt")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "super::id::deserialize_opt")]
    pub assigned_variant_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionsResponse {
    #[serde(default)]
    pub questions: Vec<RoomQuestion>,
}

/// A question as served to a student: no correctness flags, matching sides split.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomQuestion {
    #[serde(rename = "_id", deserialize_with = "super::id::deserialize")]
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    #[serde(default)]
    pub options: Vec<ChoiceOption>,
    #[serde(default)]
    pub lefts: Vec<MatchSide>,
    #[serde(default)]
    pub rights: Vec<MatchSide>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceOption {
    #[serde(rename = "_id", deserialize_with = "super::id::deserialize")]
    pub id: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchSide {
    #[serde(deserialize_with = "super::id::deserialize")]
    pub id: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitRequest {
    pub answers: Vec<Answer>,
}

impl SubmitRequest {
    pub fn empty() -> Self {
        Self {
            answers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: String,
    pub answer: AnswerValue,
}

/// Type-appropriate answer payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Selected option id.
    Choice(String),
    /// Left/right id pairs.
    Pairs(Vec<MatchPair>),
    /// Free text.
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPair {
    pub left_id: String,
    pub right_id: String,
}

impl RoomQuestion {
    /// Answer this question the way the acceptance run does:
    /// first option, lefts paired with rights by position, or sample text.
    ///
    /// Returns `None` when there is nothing to answer with (no options, an empty
    /// matching side, or an unknown question type).
    pub fn sample_answer(&self) -> Option<Answer> {
        let answer = match self.kind {
            QuestionType::MultipleChoice => AnswerValue::Choice(self.options.first()?.id.clone()),
            QuestionType::Matching => {
                if self.lefts.is_empty() || self.rights.is_empty() {
                    return None;
                }
                AnswerValue::Pairs(
                    self.lefts
                        .iter()
                        .zip(self.rights.iter())
                        .map(|(left, right)| MatchPair {
                            left_id: left.id.clone(),
                            right_id: right.id.clone(),
                        })
                        .collect(),
                )
            }
            QuestionType::Open => AnswerValue::Text(SAMPLE_OPEN_ANSWER.to_string()),
            QuestionType::Unknown => return None,
        };

        Some(Answer {
            question_id: self.id.clone(),
            answer,
        })
    }
}

/// One answer per answerable question, in question order.
pub fn build_answers(questions: &[RoomQuestion]) -> SubmitRequest {
    SubmitRequest {
        answers: questions.iter().filter_map(RoomQuestion::sample_answer).collect(),
    }
}
