//! Test authoring payloads: the test a teacher creates and what the API
//! returns when it is read back.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    MultipleChoice,
    Matching,
    Open,
    /// Any type this runner does not know how to answer.
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionType::MultipleChoice => write!(f, "MULTIPLE_CHOICE"),
            QuestionType::Matching => write!(f, "MATCHING"),
            QuestionType::Open => write!(f, "OPEN"),
            QuestionType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TestDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub variants: Vec<VariantDraft>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VariantDraft {
    pub name: String,
    pub questions: Vec<QuestionDraft>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionDraft {
    MultipleChoice {
        text: String,
        points: u32,
        options: Vec<OptionDraft>,
    },
    Matching {
        text: String,
        points: u32,
        pairs: Vec<PairDraft>,
    },
    Open {
        text: String,
        points: u32,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionDraft {
    pub text: String,
    #[serde(rename = "isCorrect")]
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PairDraft {
    pub left: String,
    pub right: String,
}

impl QuestionDraft {
    pub fn kind(&self) -> QuestionType {
        match self {
            QuestionDraft::MultipleChoice { .. } => QuestionType::MultipleChoice,
            QuestionDraft::Matching { .. } => QuestionType::Matching,
            QuestionDraft::Open { .. } => QuestionType::Open,
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            QuestionDraft::MultipleChoice { points, .. }
            | QuestionDraft::Matching { points, .. }
            | QuestionDraft::Open { points, .. } => *points,
        }
    }
}

fn choice(text: &str, options: [(&str, bool); 3]) -> QuestionDraft {
    QuestionDraft::MultipleChoice {
        text: text.to_string(),
        points: 2,
        options: options
            .iter()
            .map(|(text, is_correct)| OptionDraft {
                text: (*text).to_string(),
                is_correct: *is_correct,
            })
            .collect(),
    }
}

fn matching(pairs: [(&str, &str); 3]) -> QuestionDraft {
    QuestionDraft::Matching {
        text: "Match the following:".to_string(),
        points: 3,
        pairs: pairs
            .iter()
            .map(|(left, right)| PairDraft {
                left: (*left).to_string(),
                right: (*right).to_string(),
            })
            .collect(),
    }
}

fn open(text: &str) -> QuestionDraft {
    QuestionDraft::Open {
        text: text.to_string(),
        points: 5,
    }
}

impl TestDraft {
    /// Two variants, each with one multiple-choice, one matching and one open question.
    pub fn canonical() -> Self {
        Self {
            title: "Sample Test with Multiple Variants".to_string(),
            description: Some(
                "Test with MULTIPLE_CHOICE, MATCHING, and OPEN questions".to_string(),
            ),
            variants: vec![
                VariantDraft {
                    name: "Variant A".to_string(),
                    questions: vec![
                        choice("What is 2 + 2?", [("3", false), ("4", true), ("5", false)]),
                        matching([
                            ("Apple", "Fruit"),
                            ("Car", "Vehicle"),
                            ("Dog", "Animal"),
                        ]),
                        open("Explain the concept of gravity."),
                    ],
                },
                VariantDraft {
                    name: "Variant B".to_string(),
                    questions: vec![
                        choice("What is 3 + 3?", [("5", false), ("6", true), ("7", false)]),
                        matching([
                            ("Book", "Reading"),
                            ("Pen", "Writing"),
                            ("Phone", "Communication"),
                        ]),
                        open("Describe the water cycle."),
                    ],
                },
            ],
        }
    }

    /// Minimal body sent to check that non-teachers cannot create tests.
    pub fn unauthorized_draft() -> Self {
        Self {
            title: "Unauthorized Test".to_string(),
            description: None,
            variants: Vec::new(),
        }
    }

    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    pub fn question_count(&self) -> usize {
        self.variants.iter().map(|v| v.questions.len()).sum()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedTest {
    #[serde(rename = "testId", deserialize_with = "super::id::deserialize")]
    pub test_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TestList {
    #[serde(default)]
    pub tests: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TestDetailResponse {
    pub test: Option<TestDetail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestDetail {
    #[serde(default)]
    pub variants: Vec<VariantDetail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VariantDetail {
    #[serde(default)]
    pub questions: Vec<Value>,
}

impl TestDetail {
    pub fn question_count(&self) -> usize {
        self.variants.iter().map(|v| v.questions.len()).sum()
    }
}
