use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use uuid::Uuid;

use crate::api::errors::{is_unique_violation, ApiError};
use crate::api::validation::{normalize_email, validate_payload};
use crate::core::security::{self, TokenIdentity};
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::db::models::User;
use crate::db::types::{UserRole, UserStatus};
use crate::repositories;
use crate::schemas::auth::{LoginRequest, LoginResponse, RegisterRequest};
use crate::schemas::MessageResponse;

const INVALID_COLLEGE_CREDENTIALS: &str = "Invalid credentials for the selected college.";
const INVALID_CREDENTIALS: &str = "Invalid credentials.";
const DUPLICATE_USER: &str = "A user with this email already exists at this college.";

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/register", post(register)).route("/login", post(login))
}

async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    validate_payload(&payload)?;
    let email = normalize_email(&payload.email);

    let college = repositories::colleges::find_by_id(state.db(), &payload.college_id)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load college"))?;
    if college.is_none() {
        return Err(ApiError::BadRequest("Selected college does not exist.".to_string()));
    }

    let taken = repositories::users::email_taken_in_college(state.db(), &payload.college_id, &email)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to check existing user"))?;
    if taken {
        return Err(ApiError::Conflict(DUPLICATE_USER.to_string()));
    }

    let password_hash = security::hash_password(&payload.password)
        .map_err(|e| ApiError::internal(e, "Failed to hash password"))?;

    let user = repositories::users::create(
        state.db(),
        repositories::users::CreateUser {
            id: &Uuid::new_v4().to_string(),
            name: payload.name.trim(),
            email: &email,
            password_hash,
            role: UserRole::Student,
            status: UserStatus::Pending,
            college_id: Some(&payload.college_id),
            created_by: None,
            created_at: primitive_now_utc(),
        },
    )
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::Conflict(DUPLICATE_USER.to_string())
        } else {
            ApiError::internal(e, "Failed to create user")
        }
    })?;

    tracing::info!(user_id = %user.id, college_id = %payload.college_id, "Student registered");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(
            "Registration successful! Your account is now pending approval.",
        )),
    ))
}

async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    validate_payload(&payload)?;
    let email = normalize_email(&payload.email);

    let rate_key = format!("rl:login:{email}");
    let throttle = state.settings().security();
    let allowed = state
        .redis()
        .allow_attempt(&rate_key, throttle.login_max_attempts, throttle.login_window_seconds)
        .await
        .unwrap_or(true);
    if !allowed {
        return Err(ApiError::TooManyRequests("Too many login attempts, try again later"));
    }

    let (account, failure) = resolve_account(&state, &email, payload.college_id.as_deref()).await?;

    // Misses still pay for one argon2 verification so timing does not reveal
    // which accounts exist.
    let stored_hash = match &account {
        Some(user) => Some(user.password_hash.as_str()),
        None => security::dummy_password_hash(),
    };
    let verified = stored_hash
        .map(|hash| security::verify_password(&payload.password, hash).unwrap_or(false))
        .unwrap_or(false);
    let Some(user) = account.filter(|_| verified) else {
        return Err(ApiError::Unauthorized(failure));
    };

    if user.role == UserRole::Student && user.status != UserStatus::Approved {
        return Err(ApiError::Forbidden("Your account is still pending approval."));
    }

    let _ = state.redis().clear(&rate_key).await;

    let token = security::create_access_token(
        TokenIdentity { id: &user.id, name: &user.name, role: user.role },
        state.settings(),
        None,
    )
    .map_err(|e| ApiError::internal(e, "Failed to create access token"))?;

    tracing::info!(user_id = %user.id, role = ?user.role, "User logged in");

    Ok(Json(LoginResponse { id: user.id, name: user.name, email: user.email, role: user.role, token }))
}

/// Masters are found by e-mail alone; everyone else needs the college they
/// belong to. Returns the account, if any, and the message to use when the
/// login fails.
async fn resolve_account(
    state: &AppState,
    email: &str,
    college_id: Option<&str>,
) -> Result<(Option<User>, &'static str), ApiError> {
    let master = repositories::users::find_master_by_email(state.db(), email)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load user"))?;
    if let Some(master) = master {
        return Ok((Some(master), INVALID_CREDENTIALS));
    }

    let Some(college_id) = college_id.map(str::trim).filter(|id| !id.is_empty()) else {
        return Ok((None, INVALID_COLLEGE_CREDENTIALS));
    };

    let user = repositories::users::find_in_college_by_email(state.db(), college_id, email)
        .await
        .map_err(|e| ApiError::internal(e, "Failed to load user"))?;

    Ok((user, INVALID_COLLEGE_CREDENTIALS))
}
