use uuid::Uuid;

use crate::core::security;
use crate::core::state::AppState;
use crate::core::time::primitive_now_utc;
use crate::db::types::{UserRole, UserStatus};
use crate::repositories;

/// Creates the master account from settings, or refreshes its name and
/// password when the stored ones have drifted.
pub(crate) async fn ensure_master(state: &AppState) -> anyhow::Result<()> {
    let master = state.settings().master();
    if master.password.is_empty() {
        tracing::warn!("MASTER_PASSWORD not configured; skipping master account bootstrap");
        return Ok(());
    }

    let email = master.email.trim().to_lowercase();

    if let Some(user) = repositories::users::find_master_by_email(state.db(), &email).await? {
        let password_matches =
            security::verify_password(&master.password, &user.password_hash).unwrap_or(false);
        if password_matches && user.name == master.name {
            tracing::info!(email = %email, "Master account already up to date");
            return Ok(());
        }

        let password_hash =
            if password_matches { None } else { Some(security::hash_password(&master.password)?) };
        repositories::users::update_master_credentials(state.db(), &user.id, &master.name, password_hash)
            .await?;
        tracing::info!(email = %email, "Updated master account");
        return Ok(());
    }

    let id = Uuid::new_v4().to_string();
    repositories::users::create(
        state.db(),
        repositories::users::CreateUser {
            id: &id,
            name: &master.name,
            email: &email,
            password_hash: security::hash_password(&master.password)?,
            role: UserRole::Master,
            status: UserStatus::Approved,
            college_id: None,
            created_by: None,
            created_at: primitive_now_utc(),
        },
    )
    .await?;

    tracing::info!(email = %email, "Created master account");
    Ok(())
}
