use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use time::PrimitiveDateTime;

use crate::db::models::Question;
use crate::db::types::{CodeLanguage, QuestionType};
use crate::services::question_import::QuestionDraft;

const COLUMNS: &str = "\
    id, question_text, question_type, language, options, correct_option, \
    solution, expected_output, college_id, created_by, created_at";

/// Column values for a draft, in insert order after `question_text`.
struct DraftColumns<'a> {
    question_type: QuestionType,
    language: Option<CodeLanguage>,
    options: Option<Json<Vec<String>>>,
    correct_option: Option<String>,
    solution: Option<&'a str>,
    expected_output: Option<&'a str>,
}

fn draft_columns(draft: &QuestionDraft) -> DraftColumns<'_> {
    match draft {
        QuestionDraft::Mcq { options, correct_option, .. } => DraftColumns {
            question_type: QuestionType::Mcq,
            language: None,
            options: Some(Json(options.to_vec())),
            correct_option: Some(correct_option.to_string()),
            solution: None,
            expected_output: None,
        },
        QuestionDraft::Code { language, solution, expected_output, .. } => DraftColumns {
            question_type: QuestionType::Code,
            language: Some(*language),
            options: None,
            correct_option: None,
            solution: Some(solution),
            expected_output: Some(expected_output),
        },
    }
}

pub(crate) struct CreateQuestion<'a> {
    pub(crate) id: &'a str,
    pub(crate) draft: &'a QuestionDraft,
    pub(crate) college_id: &'a str,
    pub(crate) created_by: &'a str,
    pub(crate) created_at: PrimitiveDateTime,
}

pub(crate) async fn create(
    executor: impl sqlx::PgExecutor<'_>,
    params: CreateQuestion<'_>,
) -> Result<Question, sqlx::Error> {
    let columns = draft_columns(params.draft);
    sqlx::query_as::<_, Question>(&format!(
        "INSERT INTO questions (
            id, question_text, question_type, language, options, correct_option,
            solution, expected_output, college_id, created_by, created_at
        ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11)
        RETURNING {COLUMNS}"
    ))
    .bind(params.id)
    .bind(params.draft.question_text())
    .bind(columns.question_type)
    .bind(columns.language)
    .bind(columns.options)
    .bind(columns.correct_option)
    .bind(columns.solution)
    .bind(columns.expected_output)
    .bind(params.college_id)
    .bind(params.created_by)
    .bind(params.created_at)
    .fetch_one(executor)
    .await
}

pub(crate) async fn list_for_college(
    pool: &PgPool,
    college_id: &str,
) -> Result<Vec<Question>, sqlx::Error> {
    sqlx::query_as::<_, Question>(&format!(
        "SELECT {COLUMNS} FROM questions WHERE college_id = $1 ORDER BY created_at DESC, id DESC"
    ))
    .bind(college_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn update_in_college(
    pool: &PgPool,
    college_id: &str,
    id: &str,
    draft: &QuestionDraft,
) -> Result<Option<Question>, sqlx::Error> {
    let columns = draft_columns(draft);
    sqlx::query_as::<_, Question>(&format!(
        "UPDATE questions SET
            question_text = $1, question_type = $2, language = $3, options = $4,
            correct_option = $5, solution = $6, expected_output = $7
         WHERE id = $8 AND college_id = $9
         RETURNING {COLUMNS}"
    ))
    .bind(draft.question_text())
    .bind(columns.question_type)
    .bind(columns.language)
    .bind(columns.options)
    .bind(columns.correct_option)
    .bind(columns.solution)
    .bind(columns.expected_output)
    .bind(id)
    .bind(college_id)
    .fetch_optional(pool)
    .await
}

pub(crate) async fn delete_in_college(
    pool: &PgPool,
    college_id: &str,
    id: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM questions WHERE id = $1 AND college_id = $2")
        .bind(id)
        .bind(college_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub(crate) async fn count_owned(
    executor: impl sqlx::PgExecutor<'_>,
    college_id: &str,
    ids: &[String],
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM questions WHERE college_id = $1 AND id = ANY($2)",
    )
    .bind(college_id)
    .bind(ids)
    .fetch_one(executor)
    .await
}

/// Questions linked to a test including their answer keys. Server-side only.
pub(crate) async fn list_for_test(
    executor: impl sqlx::PgExecutor<'_>,
    test_id: &str,
) -> Result<Vec<Question>, sqlx::Error> {
    sqlx::query_as::<_, Question>(&format!(
        "SELECT {} FROM questions q
         JOIN test_questions tq ON tq.question_id = q.id
         WHERE tq.test_id = $1
         ORDER BY q.created_at, q.id",
        prefixed_columns("q")
    ))
    .bind(test_id)
    .fetch_all(executor)
    .await
}

/// Student-facing projection: answer keys are never selected.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct PublicQuestion {
    pub(crate) id: String,
    pub(crate) question_text: String,
    pub(crate) question_type: QuestionType,
    pub(crate) language: Option<CodeLanguage>,
    pub(crate) options: Option<Json<Vec<String>>>,
    pub(crate) expected_output: Option<String>,
}

pub(crate) async fn list_public_for_test(
    executor: impl sqlx::PgExecutor<'_>,
    test_id: &str,
) -> Result<Vec<PublicQuestion>, sqlx::Error> {
    sqlx::query_as::<_, PublicQuestion>(
        "SELECT q.id, q.question_text, q.question_type, q.language, q.options, q.expected_output
         FROM questions q
         JOIN test_questions tq ON tq.question_id = q.id
         WHERE tq.test_id = $1
         ORDER BY q.created_at, q.id",
    )
    .bind(test_id)
    .fetch_all(executor)
    .await
}

fn prefixed_columns(alias: &str) -> String {
    COLUMNS.split(',').map(|column| format!("{alias}.{}", column.trim())).collect::<Vec<_>>().join(", ")
}
