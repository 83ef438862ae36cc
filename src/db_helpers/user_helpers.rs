use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::{
    authentication::{hash_password_argon2, verify_password_argon2},
    data_formats::RegisterRequest,
    errors::RequestError,
    models::User,
    LOG_TARGET,
};

use super::{get_user_by_username, USER_COLUMNS};

/// Hashes the password and stores a new user.
///
/// A taken username surfaces as a unique violation, see
/// [`RequestError::is_unique_violation`].
pub async fn insert_user(
    pool: &SqlitePool,
    RegisterRequest { username, password }: RegisterRequest,
) -> Result<User, RequestError> {
    let password = hash_password_argon2(password)
        .await
        .map_err(|_| RequestError::ServerError)?;

    let mut tx = pool.begin().await?;
    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (username, password) VALUES ($1, $2) RETURNING {USER_COLUMNS}"
    ))
    .bind(&username)
    .bind(&password)
    .fetch_one(&mut tx)
    .await?;
    tx.commit().await?;
    info!(target: LOG_TARGET, id = user.id, username = %user.username, "Registered user");
    Ok(user)
}

/// Returns the user only if the password matches.
pub async fn authenticate_user(
    pool: &SqlitePool,
    username: &str,
    password: String,
) -> Result<Option<User>, RequestError> {
    let user = match get_user_by_username(pool, username).await? {
        Some(user) => user,
        None => {
            debug!(target: LOG_TARGET, %username, "Login for unknown user");
            return Ok(None);
        }
    };
    let is_password_correct = verify_password_argon2(password, &user.password)
        .await
        .map_err(|_| RequestError::ServerError)?;
    if !is_password_correct {
        debug!(target: LOG_TARGET, %username, "Login with wrong password");
        return Ok(None);
    }
    Ok(Some(user))
}
