//! Boundary validation for authored questions.
//!
//! Spreadsheet rows arrive loosely typed; they are turned into a strict
//! [`QuestionDraft`] before anything touches the database, and a batch is
//! only persisted when every row is valid.

use anyhow::Context;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use crate::core::time::primitive_now_utc;
use crate::db::types::CodeLanguage;
use crate::repositories;
use crate::services::grading::option_index;

/// Spreadsheet rows start after a header line.
const FIRST_ROW_NUMBER: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum QuestionDraft {
    Mcq { question_text: String, options: [String; 4], correct_option: char },
    Code { question_text: String, language: CodeLanguage, solution: String, expected_output: String },
}

impl QuestionDraft {
    pub(crate) fn question_text(&self) -> &str {
        match self {
            Self::Mcq { question_text, .. } | Self::Code { question_text, .. } => question_text,
        }
    }
}

/// One row as uploaded. Accepts the spreadsheet column headers
/// (`QuestionText`, `OptionA`, ...) as well as snake_case keys, and scalar
/// cells of any JSON type.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawQuestionRow {
    #[serde(default, alias = "QuestionText", deserialize_with = "lenient_string")]
    pub(crate) question_text: Option<String>,
    #[serde(default, rename = "type", alias = "Type", deserialize_with = "lenient_string")]
    pub(crate) question_type: Option<String>,
    #[serde(default, alias = "OptionA", deserialize_with = "lenient_string")]
    pub(crate) option_a: Option<String>,
    #[serde(default, alias = "OptionB", deserialize_with = "lenient_string")]
    pub(crate) option_b: Option<String>,
    #[serde(default, alias = "OptionC", deserialize_with = "lenient_string")]
    pub(crate) option_c: Option<String>,
    #[serde(default, alias = "OptionD", deserialize_with = "lenient_string")]
    pub(crate) option_d: Option<String>,
    #[serde(default, alias = "CorrectOption", deserialize_with = "lenient_string")]
    pub(crate) correct_option: Option<String>,
    #[serde(default, alias = "Language", deserialize_with = "lenient_string")]
    pub(crate) language: Option<String>,
    #[serde(default, alias = "Solution", deserialize_with = "lenient_string")]
    pub(crate) solution: Option<String>,
    #[serde(default, alias = "ExpectedOutput", deserialize_with = "lenient_string")]
    pub(crate) expected_output: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(text)) => Some(text),
        Some(other) => Some(other.to_string()),
    })
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.trim().is_empty())
}

impl RawQuestionRow {
    pub(crate) fn into_draft(self) -> Result<QuestionDraft, Vec<String>> {
        let mut problems = Vec::new();

        let question_text = present(&self.question_text).map(str::to_string);
        if question_text.is_none() {
            problems.push("QuestionText is required".to_string());
        }

        let kind = present(&self.question_type).map(|value| value.trim().to_ascii_lowercase());
        let draft = match kind.as_deref() {
            None => {
                problems.push("Type is required".to_string());
                None
            }
            Some("mcq") => self.mcq_draft(question_text.clone(), &mut problems),
            Some("code") => self.code_draft(question_text.clone(), &mut problems),
            Some(other) => {
                problems.push(format!("Invalid question type '{other}'"));
                None
            }
        };

        match draft {
            Some(draft) if problems.is_empty() => Ok(draft),
            _ => Err(problems),
        }
    }

    fn mcq_draft(
        &self,
        question_text: Option<String>,
        problems: &mut Vec<String>,
    ) -> Option<QuestionDraft> {
        let columns = [
            ("OptionA", &self.option_a),
            ("OptionB", &self.option_b),
            ("OptionC", &self.option_c),
            ("OptionD", &self.option_d),
        ];
        for (name, value) in columns {
            if present(value).is_none() {
                problems.push(format!("{name} is required for mcq questions"));
            }
        }

        let correct = present(&self.correct_option).map(|value| value.trim().to_ascii_uppercase());
        let correct_option = match correct {
            None => {
                problems.push("CorrectOption is required for mcq questions".to_string());
                None
            }
            Some(letter) => match option_index(&letter) {
                Some(_) => letter.chars().next(),
                None => {
                    problems.push(format!("CorrectOption must be one of A, B, C, D (got '{letter}')"));
                    None
                }
            },
        };

        let options = [
            present(&self.option_a)?.to_string(),
            present(&self.option_b)?.to_string(),
            present(&self.option_c)?.to_string(),
            present(&self.option_d)?.to_string(),
        ];

        Some(QuestionDraft::Mcq { question_text: question_text?, options, correct_option: correct_option? })
    }

    fn code_draft(
        &self,
        question_text: Option<String>,
        problems: &mut Vec<String>,
    ) -> Option<QuestionDraft> {
        let language = match present(&self.language) {
            None => {
                problems.push("Language is required for code questions".to_string());
                None
            }
            Some(raw) => {
                let parsed = CodeLanguage::parse(raw);
                if parsed.is_none() {
                    problems.push(format!("Unsupported language '{}'", raw.trim()));
                }
                parsed
            }
        };

        let solution = present(&self.solution).map(str::to_string);
        if solution.is_none() {
            problems.push("Solution is required for code questions".to_string());
        }
        let expected_output = present(&self.expected_output).map(str::to_string);
        if expected_output.is_none() {
            problems.push("ExpectedOutput is required for code questions".to_string());
        }

        Some(QuestionDraft::Code {
            question_text: question_text?,
            language: language?,
            solution: solution?,
            expected_output: expected_output?,
        })
    }
}

/// Validates every row and reports all failures, one line per bad row.
pub(crate) fn validate_rows(rows: Vec<RawQuestionRow>) -> Result<Vec<QuestionDraft>, Vec<String>> {
    let mut drafts = Vec::with_capacity(rows.len());
    let mut errors = Vec::new();

    for (index, row) in rows.into_iter().enumerate() {
        let row_number = index + FIRST_ROW_NUMBER;
        match row.into_draft() {
            Ok(draft) => drafts.push(draft),
            Err(problems) => errors.push(format!("Row {row_number}: {}", problems.join("; "))),
        }
    }

    if errors.is_empty() {
        Ok(drafts)
    } else {
        Err(errors)
    }
}

/// Inserts all drafts in one transaction.
pub(crate) async fn import_questions(
    pool: &sqlx::PgPool,
    college_id: &str,
    created_by: &str,
    drafts: &[QuestionDraft],
) -> anyhow::Result<usize> {
    let now = primitive_now_utc();
    let mut tx = pool.begin().await.context("failed to begin import transaction")?;

    for draft in drafts {
        repositories::questions::create(
            &mut *tx,
            repositories::questions::CreateQuestion {
                id: &Uuid::new_v4().to_string(),
                draft,
                college_id,
                created_by,
                created_at: now,
            },
        )
        .await
        .with_context(|| format!("failed to insert question '{}'", draft.question_text()))?;
    }

    tx.commit().await.context("failed to commit import transaction")?;
    Ok(drafts.len())
}
