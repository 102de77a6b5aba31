//! Deterministic scoring of a submitted session.
//!
//! One point per correct answer. Answers naming a question that is not part
//! of the session's test are ignored, as are repeated answers to a question
//! already graded.

use std::collections::{HashMap, HashSet};

use crate::db::models::Question;
use crate::db::types::QuestionType;

#[derive(Debug, Clone)]
pub(crate) struct SubmittedAnswer {
    pub(crate) question_id: String,
    pub(crate) answer_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct GradedAnswer {
    pub(crate) question_id: String,
    pub(crate) answer_text: String,
    pub(crate) is_correct: bool,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct GradeOutcome {
    pub(crate) score: i32,
    pub(crate) answers: Vec<GradedAnswer>,
}

pub(crate) fn grade_submission(questions: &[Question], submitted: &[SubmittedAnswer]) -> GradeOutcome {
    let by_id: HashMap<&str, &Question> =
        questions.iter().map(|question| (question.id.as_str(), question)).collect();
    let mut seen = HashSet::new();
    let mut outcome = GradeOutcome::default();

    for answer in submitted {
        let Some(question) = by_id.get(answer.question_id.as_str()) else {
            continue;
        };
        if !seen.insert(question.id.as_str()) {
            continue;
        }

        let is_correct = is_correct(question, &answer.answer_text);
        if is_correct {
            outcome.score += 1;
        }
        outcome.answers.push(GradedAnswer {
            question_id: question.id.clone(),
            answer_text: answer.answer_text.clone(),
            is_correct,
        });
    }

    outcome
}

pub(crate) fn is_correct(question: &Question, answer_text: &str) -> bool {
    match question.question_type {
        QuestionType::Mcq => {
            let options = question.options.as_ref().map(|options| options.0.as_slice());
            mcq_is_correct(options.unwrap_or_default(), question.correct_option.as_deref(), answer_text)
        }
        QuestionType::Code => question
            .solution
            .as_deref()
            .is_some_and(|solution| code_is_correct(solution, answer_text)),
    }
}

/// Accepts either the letter of the correct option or its literal text.
fn mcq_is_correct(options: &[String], correct_option: Option<&str>, answer_text: &str) -> bool {
    let Some(letter) = correct_option.map(|value| value.trim().to_ascii_uppercase()) else {
        return false;
    };
    if letter.is_empty() {
        return false;
    }
    if answer_text == letter {
        return true;
    }

    option_index(&letter)
        .and_then(|index| options.get(index))
        .is_some_and(|text| text == answer_text)
}

fn code_is_correct(solution: &str, answer_text: &str) -> bool {
    solution.trim() == answer_text.trim()
}

/// `A` maps to 0 through `D` to 3.
pub(crate) fn option_index(letter: &str) -> Option<usize> {
    match letter.as_bytes() {
        [byte @ b'A'..=b'D'] => Some(usize::from(byte - b'A')),
        _ => None,
    }
}
