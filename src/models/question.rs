use serde::{Deserialize, Serialize};

use crate::utils::AppError;

/// Difficulty selector for the question tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tier {
    #[default]
    Junior,
    Senior,
}

impl Tier {
    /// Anything other than `"senior"` (including nothing at all) is junior.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("senior") => Tier::Senior,
            _ => Tier::Junior,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Junior => "junior",
            Tier::Senior => "senior",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct Question {
    pub question: String,
    pub option1: String,
    pub option2: String,
    pub option3: String,
    pub option4: String,
    /// 1-based index of the correct option.
    pub correct_answer: u8,
}

/// One row of a question table, keyed by the table's own column names.
#[derive(Debug, Deserialize)]
pub struct QuestionRow {
    #[serde(rename = "題目")]
    pub question: String,
    #[serde(rename = "選項1.")]
    pub option1: String,
    #[serde(rename = "選項2.")]
    pub option2: String,
    #[serde(rename = "選項3.")]
    pub option3: String,
    #[serde(rename = "選項4.")]
    pub option4: String,
    #[serde(rename = "標準答案")]
    pub correct_answer: String,
}

impl TryFrom<QuestionRow> for Question {
    type Error = AppError;

    fn try_from(row: QuestionRow) -> Result<Self, Self::Error> {
        let correct_answer = parse_answer(&row.correct_answer).ok_or_else(|| {
            AppError::DataCorrupt(format!(
                "invalid answer '{}' for question '{}'",
                row.correct_answer, row.question
            ))
        })?;

        Ok(Question {
            question: row.question,
            option1: row.option1,
            option2: row.option2,
            option3: row.option3,
            option4: row.option4,
            correct_answer,
        })
    }
}

// Spreadsheet exports sometimes write the answer as "3.0".
fn parse_answer(raw: &str) -> Option<u8> {
    let raw = raw.trim();
    let value = match raw.parse::<u8>() {
        Ok(v) => v,
        Err(_) => {
            let f = raw.parse::<f64>().ok()?;
            if f.fract() != 0.0 || !(0.0..=255.0).contains(&f) {
                return None;
            }
            f as u8
        }
    };
    (1..=4).contains(&value).then_some(value)
}
