use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use time::PrimitiveDateTime;

use crate::db::types::{CodeLanguage, QuestionType, SessionStatus, UserRole, UserStatus};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct College {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) created_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct User {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) password_hash: String,
    pub(crate) role: UserRole,
    pub(crate) status: UserStatus,
    pub(crate) college_id: Option<String>,
    pub(crate) created_by: Option<String>,
    pub(crate) created_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Question {
    pub(crate) id: String,
    pub(crate) question_text: String,
    pub(crate) question_type: QuestionType,
    pub(crate) language: Option<CodeLanguage>,
    pub(crate) options: Option<Json<Vec<String>>>,
    pub(crate) correct_option: Option<String>,
    pub(crate) solution: Option<String>,
    pub(crate) expected_output: Option<String>,
    pub(crate) college_id: String,
    pub(crate) created_by: Option<String>,
    pub(crate) created_at: PrimitiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Test {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) duration_minutes: i32,
    pub(crate) scheduled_at: PrimitiveDateTime,
    pub(crate) college_id: String,
    pub(crate) created_by: Option<String>,
    pub(crate) created_at: PrimitiveDateTime,
}

/// One student's attempt at one test.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct StudentTest {
    pub(crate) id: String,
    pub(crate) student_id: String,
    pub(crate) test_id: String,
    pub(crate) status: SessionStatus,
    pub(crate) started_at: Option<PrimitiveDateTime>,
    pub(crate) submitted_at: Option<PrimitiveDateTime>,
    pub(crate) score: Option<i32>,
    pub(crate) created_at: PrimitiveDateTime,
}
