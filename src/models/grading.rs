//! Auto-grading results as exposed by `GET /rooms/{id}/results`.

use serde::Deserialize;

/// Allowed gap between the reported percentage and `100 * score / totalPoints`.
/// The backend rounds percentages to two decimals.
pub const PERCENTAGE_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeResult {
    #[serde(default, rename = "_id", deserialize_with = "super::id::deserialize_opt")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "super::id::deserialize_opt")]
    pub student_id: Option<String>,
    pub score: Option<f64>,
    pub total_points: Option<f64>,
    pub percentage: Option<f64>,
}

/// Teacher view: every student's result for the room.
#[derive(Debug, Clone, Deserialize)]
pub struct RoomResults {
    #[serde(default)]
    pub results: Vec<GradeResult>,
}

/// Student view: only the caller's own result.
#[derive(Debug, Clone, Deserialize)]
pub struct OwnResult {
    pub result: Option<GradeResult>,
}

impl GradeResult {
    /// True once the server has produced a numeric score and total.
    pub fn is_graded(&self) -> bool {
        self.score.is_some() && self.total_points.is_some()
    }

    /// Check the arithmetic of an automatically graded result.
    ///
    /// `0 <= score <= totalPoints`, and when a percentage is reported for a
    /// non-zero total it must equal `100 * score / totalPoints` within tolerance.
    pub fn check_consistency(&self) -> Result<(), String> {
        let (score, total) = match (self.score, self.total_points) {
            (Some(score), Some(total)) => (score, total),
            _ => return Err("score or totalPoints missing".to_string()),
        };

        if score < 0.0 || score > total {
            return Err(format!("score {score} outside 0..={total}"));
        }

        if let Some(percentage) = self.percentage {
            if total > 0.0 {
                let expected = 100.0 * score / total;
                if (percentage - expected).abs() > PERCENTAGE_TOLERANCE {
                    return Err(format!(
                        "percentage {percentage} does not match {expected:.2} for {score}/{total}"
                    ));
                }
            }
        }

        Ok(())
    }

    /// Same score and total as `other`.
    pub fn matches(&self, other: &GradeResult) -> bool {
        self.score == other.score && self.total_points == other.total_points
    }

    /// `Score: 3/10 (30%)` style summary.
    pub fn summary(&self) -> String {
        let score = fmt_opt(self.score);
        let total = fmt_opt(self.total_points);
        match self.percentage {
            Some(p) => format!("{score}/{total} ({}%)", fmt_num(p)),
            None => format!("{score}/{total}"),
        }
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map(fmt_num).unwrap_or_else(|| "None".to_string())
}

/// Print whole numbers without a trailing `.0`.
fn fmt_num(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
