use std::sync::Arc;

use anyhow::{Context, Result};
use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Extension;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::debug;

use crate::db_helpers::get_user_by_id;
use crate::errors::RequestError;
use crate::{AppState, LOG_TARGET};

const JWT_EXPIRY_DURATION: time::Duration = time::Duration::days(90);

pub const TOKEN_COOKIE: &str = "token";
pub const LAST_LOGIN_COOKIE: &str = "last_login";
pub const FLASH_COOKIE: &str = "flash";

pub const LOGIN_PATH: &str = "/login/";

#[derive(Debug, Serialize, Deserialize)]
struct AuthClaim {
    id: i64,
    exp: i64,
}

/// The logged-in user making the current request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
}

/// Request context for pages that work with or without a login.
pub struct MaybeUser(pub Option<AuthUser>);

#[axum::async_trait]
impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync + 'static,
{
    type Rejection = RequestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(app) = Extension::<Arc<AppState>>::from_request_parts(parts, state)
            .await
            .map_err(|_| RequestError::ServerError)?;

        let jar = CookieJar::from_headers(&parts.headers);
        let token = match jar.get(TOKEN_COOKIE) {
            Some(cookie) => cookie.value().to_owned(),
            None => return Ok(MaybeUser(None)),
        };

        // A stale or forged cookie just means the visitor is anonymous.
        let id = match verify_jwt_token(&token, &app.config.jwt_secret) {
            Ok(id) => id,
            Err(_) => return Ok(MaybeUser(None)),
        };

        let user = get_user_by_id(&app.pool, id).await?.map(|user| AuthUser {
            id: user.id,
            username: user.username,
        });
        if user.is_none() {
            debug!(target: LOG_TARGET, id, "Token refers to a missing user");
        }
        Ok(MaybeUser(user))
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync + 'static,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let MaybeUser(user) = MaybeUser::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;
        user.ok_or_else(|| Redirect::to(LOGIN_PATH).into_response())
    }
}

pub fn get_jwt_token(id: i64, jwt_secret: &str) -> Result<String> {
    let expiry_date = OffsetDateTime::now_utc() + JWT_EXPIRY_DURATION;
    let claim = AuthClaim {
        id,
        exp: expiry_date.unix_timestamp(),
    };

    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claim,
        &jsonwebtoken::EncodingKey::from_secret(jwt_secret.as_ref()),
    )
    .context("Failed to generate jwt token")
}

pub fn verify_jwt_token(token: &str, jwt_secret: &str) -> Result<i64, RequestError> {
    let token_data = jsonwebtoken::decode::<AuthClaim>(
        token,
        &jsonwebtoken::DecodingKey::from_secret(jwt_secret.as_ref()),
        &jsonwebtoken::Validation::default(),
    )
    .map_err(|e| {
        debug!(target: LOG_TARGET, err = %e, "Error verifying token");
        RequestError::NotAuthorized("Invalid Token")
    })?;
    let claim = token_data.claims;
    if claim.exp < OffsetDateTime::now_utc().unix_timestamp() {
        return Err(RequestError::NotAuthorized("Token expired"));
    }
    Ok(claim.id)
}

pub async fn verify_password_argon2(password: String, hash: &str) -> Result<bool> {
    let hash = hash.to_owned();
    tokio::task::spawn_blocking(move || {
        let hash = PasswordHash::new(hash.as_str())
            .map_err(|_| anyhow::anyhow!("Stored password hash is malformed"))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .is_ok())
    })
    .await
    .context("Failed to verify password")?
}

pub async fn hash_password_argon2(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(rand::thread_rng());
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|_| anyhow::anyhow!("Failed to hash password"))?;
        Ok(hash.to_string())
    })
    .await
    .context("Failed to hash password")?
}

fn site_cookie(name: &'static str, value: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, value);
    cookie.set_path("/");
    cookie.set_same_site(SameSite::Lax);
    cookie
}

/// Removal cookies need the same path the original was set with.
fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::named(name);
    cookie.set_path("/");
    cookie
}

/// Adds the session token and the last login time to the jar.
pub fn start_session(jar: CookieJar, token: String) -> CookieJar {
    let mut token_cookie = site_cookie(TOKEN_COOKIE, token);
    token_cookie.set_http_only(true);
    token_cookie.set_max_age(JWT_EXPIRY_DURATION);

    let last_login = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string();
    jar.add(token_cookie)
        .add(site_cookie(LAST_LOGIN_COOKIE, last_login))
}

pub fn end_session(jar: CookieJar) -> CookieJar {
    jar.remove(removal_cookie(TOKEN_COOKIE))
        .remove(removal_cookie(LAST_LOGIN_COOKIE))
}

/// One-shot messages carried across a redirect in the flash cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashMessage {
    AccountCreated,
}

impl FlashMessage {
    fn key(&self) -> &'static str {
        match self {
            FlashMessage::AccountCreated => "account-created",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key {
            "account-created" => Some(FlashMessage::AccountCreated),
            _ => None,
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            FlashMessage::AccountCreated => "Your account has been successfully created!",
        }
    }
}

/// Stores a message to be shown once on the next rendered page.
pub fn set_flash(jar: CookieJar, message: FlashMessage) -> CookieJar {
    jar.add(site_cookie(FLASH_COOKIE, message.key().to_owned()))
}

/// Returns the pending flash message, if any, and clears it.
pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<FlashMessage>) {
    match jar.get(FLASH_COOKIE).map(|cookie| cookie.value().to_owned()) {
        Some(key) => (
            jar.remove(removal_cookie(FLASH_COOKIE)),
            FlashMessage::from_key(&key),
        ),
        None => (jar, None),
    }
}
