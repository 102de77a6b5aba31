use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use time::PrimitiveDateTime;
use uuid::Uuid;

use crate::db::types::{CodeLanguage, QuestionType};
use crate::services::grading::GradedAnswer;

pub(crate) async fn insert_graded(
    executor: impl sqlx::PgExecutor<'_>,
    student_test_id: &str,
    college_id: &str,
    answers: &[GradedAnswer],
    created_at: PrimitiveDateTime,
) -> Result<u64, sqlx::Error> {
    if answers.is_empty() {
        return Ok(0);
    }

    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(
        "INSERT INTO student_answers \
         (id, student_test_id, question_id, answer_text, is_correct, college_id, created_at) ",
    );
    builder.push_values(answers, |mut row, answer| {
        row.push_bind(Uuid::new_v4().to_string())
            .push_bind(student_test_id)
            .push_bind(answer.question_id.as_str())
            .push_bind(answer.answer_text.as_str())
            .push_bind(answer.is_correct)
            .push_bind(college_id)
            .push_bind(created_at);
    });

    let result = builder.build().execute(executor).await?;
    Ok(result.rows_affected())
}

/// One graded answer joined with its question, answer keys included.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct AnswerDetail {
    pub(crate) question_id: String,
    pub(crate) question_text: String,
    pub(crate) question_type: QuestionType,
    pub(crate) language: Option<CodeLanguage>,
    pub(crate) options: Option<Json<Vec<String>>>,
    pub(crate) correct_option: Option<String>,
    pub(crate) solution: Option<String>,
    pub(crate) answer_text: String,
    pub(crate) is_correct: bool,
}

pub(crate) async fn list_detail_for_session(
    pool: &PgPool,
    student_test_id: &str,
    college_id: &str,
) -> Result<Vec<AnswerDetail>, sqlx::Error> {
    sqlx::query_as::<_, AnswerDetail>(
        "SELECT q.id AS question_id, q.question_text, q.question_type, q.language, q.options,
                q.correct_option, q.solution, sa.answer_text, sa.is_correct
         FROM student_answers sa
         JOIN questions q ON q.id = sa.question_id
         WHERE sa.student_test_id = $1 AND sa.college_id = $2
         ORDER BY q.created_at, q.id",
    )
    .bind(student_test_id)
    .bind(college_id)
    .fetch_all(pool)
    .await
}
