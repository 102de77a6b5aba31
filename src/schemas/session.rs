use serde::{Deserialize, Serialize};

use crate::core::time::format_primitive;
use crate::db::types::{CodeLanguage, QuestionType};
use crate::repositories::questions::PublicQuestion;
use crate::repositories::student_tests::{PastScore, UpcomingTest};
use crate::services::grading::SubmittedAnswer;

#[derive(Debug, Serialize)]
pub(crate) struct ScheduledTestResponse {
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) duration_minutes: i32,
    pub(crate) scheduled_at: String,
}

impl ScheduledTestResponse {
    pub(crate) fn from_db(test: UpcomingTest) -> Self {
        Self {
            id: test.id,
            title: test.title,
            duration_minutes: test.duration_minutes,
            scheduled_at: format_primitive(test.scheduled_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct PastScoreResponse {
    pub(crate) title: String,
    pub(crate) score: Option<i32>,
    pub(crate) submitted_at: Option<String>,
}

impl PastScoreResponse {
    pub(crate) fn from_db(score: PastScore) -> Self {
        Self {
            title: score.title,
            score: score.score,
            submitted_at: score.submitted_at.map(format_primitive),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DashboardResponse {
    pub(crate) greeting: String,
    pub(crate) scheduled_tests: Vec<ScheduledTestResponse>,
    pub(crate) past_scores: Vec<PastScoreResponse>,
}

/// Question as shown to a student. Answer keys are not part of this shape.
#[derive(Debug, Serialize)]
pub(crate) struct SessionQuestion {
    pub(crate) id: String,
    pub(crate) question_text: String,
    #[serde(rename = "type")]
    pub(crate) question_type: QuestionType,
    pub(crate) language: Option<CodeLanguage>,
    pub(crate) options: Vec<String>,
    pub(crate) expected_output: Option<String>,
}

impl SessionQuestion {
    pub(crate) fn from_db(question: PublicQuestion) -> Self {
        Self {
            id: question.id,
            question_text: question.question_text,
            question_type: question.question_type,
            language: question.language,
            options: question.options.map(|options| options.0).unwrap_or_default(),
            expected_output: question.expected_output,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BeginSessionResponse {
    pub(crate) questions: Vec<SessionQuestion>,
    pub(crate) student_test_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnswerSubmission {
    #[serde(alias = "questionId")]
    pub(crate) question_id: String,
    #[serde(default, alias = "answerText")]
    pub(crate) answer_text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmitRequest {
    #[serde(alias = "student_test_id")]
    pub(crate) student_test_id: String,
    #[serde(default)]
    pub(crate) answers: Vec<AnswerSubmission>,
}

impl SubmitRequest {
    pub(crate) fn submitted_answers(&self) -> Vec<SubmittedAnswer> {
        self.answers
            .iter()
            .map(|answer| SubmittedAnswer {
                question_id: answer.question_id.clone(),
                answer_text: answer.answer_text.clone().unwrap_or_default(),
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SubmitResponse {
    pub(crate) message: String,
    pub(crate) score: i32,
}
