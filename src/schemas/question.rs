use serde::{Deserialize, Serialize};

use crate::core::time::format_primitive;
use crate::db::models::Question;
use crate::db::types::{CodeLanguage, QuestionType};
use crate::services::judge::Verification;
use crate::services::question_import::{QuestionDraft, RawQuestionRow};

/// Body of the single-question create and update calls.
#[derive(Debug, Deserialize)]
pub(crate) struct QuestionPayload {
    #[serde(default)]
    pub(crate) question_text: Option<String>,
    #[serde(default, rename = "type", alias = "question_type")]
    pub(crate) question_type: Option<String>,
    #[serde(default)]
    pub(crate) options: Option<Vec<String>>,
    #[serde(default)]
    pub(crate) correct_option: Option<String>,
    #[serde(default)]
    pub(crate) language: Option<String>,
    #[serde(default)]
    pub(crate) solution: Option<String>,
    #[serde(default)]
    pub(crate) expected_output: Option<String>,
}

impl QuestionPayload {
    /// Applies the same rules as a bulk import row.
    pub(crate) fn into_draft(self) -> Result<QuestionDraft, Vec<String>> {
        let mut options = self.options.unwrap_or_default().into_iter();
        let row = RawQuestionRow {
            question_text: self.question_text,
            question_type: self.question_type,
            option_a: options.next(),
            option_b: options.next(),
            option_c: options.next(),
            option_d: options.next(),
            correct_option: self.correct_option,
            language: self.language,
            solution: self.solution,
            expected_output: self.expected_output,
        };

        let extra = options.count();
        let mut result = row.into_draft();
        if extra > 0 {
            let problem = "mcq questions take exactly four options".to_string();
            match &mut result {
                Ok(_) => result = Err(vec![problem]),
                Err(problems) => problems.push(problem),
            }
        }
        result
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BulkImportRequest {
    pub(crate) questions: Vec<RawQuestionRow>,
}

#[derive(Debug, Serialize)]
pub(crate) struct QuestionResponse {
    pub(crate) id: String,
    pub(crate) question_text: String,
    #[serde(rename = "type")]
    pub(crate) question_type: QuestionType,
    pub(crate) language: Option<CodeLanguage>,
    pub(crate) options: Vec<String>,
    pub(crate) correct_option: Option<String>,
    pub(crate) solution: Option<String>,
    pub(crate) expected_output: Option<String>,
    pub(crate) created_at: String,
}

impl QuestionResponse {
    pub(crate) fn from_db(question: Question) -> Self {
        Self {
            id: question.id,
            question_text: question.question_text,
            question_type: question.question_type,
            language: question.language,
            options: question.options.map(|options| options.0).unwrap_or_default(),
            correct_option: question.correct_option,
            solution: question.solution,
            expected_output: question.expected_output,
            created_at: format_primitive(question.created_at),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct VerifyRequest {
    pub(crate) language: String,
    pub(crate) code: String,
    pub(crate) expected_output: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VerifyResponse {
    pub(crate) passed: bool,
    pub(crate) output: String,
    #[serde(rename = "expected_output")]
    pub(crate) expected_output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) cpu_time: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) memory: Option<serde_json::Value>,
}

impl VerifyResponse {
    pub(crate) fn new(verification: Verification, expected_output: String) -> Self {
        let execution = verification.execution;
        Self {
            passed: verification.passed,
            output: execution.output,
            expected_output,
            error: execution.error,
            cpu_time: execution.cpu_time,
            memory: execution.memory,
        }
    }
}
