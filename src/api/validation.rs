use validator::Validate;

use crate::api::errors::ApiError;

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Runs derive-based validation and reports one `field: message` line per
/// failed rule.
pub(crate) fn validate_payload(payload: &impl Validate) -> Result<(), ApiError> {
    let Err(errors) = payload.validate() else {
        return Ok(());
    };

    let mut messages = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, failures)| {
            let field = field.to_string();
            failures.iter().map(move |failure| match &failure.message {
                Some(message) => format!("{field}: {message}"),
                None => format!("{field}: {}", failure.code),
            })
        })
        .collect::<Vec<_>>();
    messages.sort();

    Err(ApiError::ValidationFailed { detail: "Validation failed".to_string(), errors: messages })
}

/// Maps a list of per-row or per-field problems onto a 400 response.
pub(crate) fn rejected(detail: &str, errors: Vec<String>) -> ApiError {
    ApiError::ValidationFailed { detail: detail.to_string(), errors }
}
