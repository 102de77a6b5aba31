use async_trait::async_trait;
use axum::extract::{FromRequestParts, State};
use axum::http::{header, request::Parts};

use crate::api::errors::ApiError;
use crate::core::{security, state::AppState};
use crate::db::models::User;
use crate::db::types::{UserRole, UserStatus};
use crate::repositories;

/// Any authenticated account, re-read from storage on every request.
pub(crate) struct CurrentUser(pub(crate) User);

pub(crate) struct CurrentMaster(pub(crate) User);

/// An admin together with the college every admin call is scoped to.
pub(crate) struct CurrentAdmin {
    pub(crate) user: User,
    pub(crate) college_id: String,
}

/// An approved student together with their college.
pub(crate) struct CurrentStudent {
    pub(crate) user: User,
    pub(crate) college_id: String,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let State(app_state) = State::<AppState>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to access application state"))?;

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Unauthorized("Not authorized, no token"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthorized("Not authorized, no token"))?;

        let claims = security::verify_token(token, app_state.settings())
            .map_err(|_| ApiError::Unauthorized("Not authorized, token failed"))?;

        let user = repositories::users::find_by_id(app_state.db(), &claims.sub)
            .await
            .map_err(|e| ApiError::internal(e, "Failed to load user"))?;

        let Some(user) = user else {
            return Err(ApiError::Unauthorized("Not authorized, user not found"));
        };

        Ok(CurrentUser(user))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentMaster {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;

        if user.role == UserRole::Master {
            Ok(CurrentMaster(user))
        } else {
            Err(ApiError::Forbidden("Master access required"))
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;

        if user.role != UserRole::Admin {
            return Err(ApiError::Forbidden("Admin access required"));
        }

        let Some(college_id) = user.college_id.clone() else {
            return Err(ApiError::BadRequest(
                "You must be assigned to a college to perform this action.".to_string(),
            ));
        };

        Ok(CurrentAdmin { user, college_id })
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentStudent {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;

        if user.role != UserRole::Student {
            return Err(ApiError::Forbidden("Student access required"));
        }
        if user.status != UserStatus::Approved {
            return Err(ApiError::Forbidden("Your account is still pending approval."));
        }

        let Some(college_id) = user.college_id.clone() else {
            return Err(ApiError::Forbidden("Student access required"));
        };

        Ok(CurrentStudent { user, college_id })
    }
}
