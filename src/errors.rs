use axum::{http::StatusCode, response::IntoResponse};
use tracing::error;

use crate::{views, LOG_TARGET};

#[derive(Debug)]
pub enum RequestError {
    NotFound,
    NotAuthorized(&'static str),
    Forbidden,
    RunTimeError(&'static str),
    ServerError,
    DatabaseError(sqlx::Error),
}

impl From<sqlx::Error> for RequestError {
    fn from(value: sqlx::Error) -> Self {
        Self::DatabaseError(value)
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> axum::response::Response {
        if let RequestError::DatabaseError(e) = &self {
            error!(target: LOG_TARGET, err = %e, "Database error");
        }
        let (status_code, message) = self.status_and_message();
        (status_code, views::error_page(status_code, message)).into_response()
    }
}

impl RequestError {
    pub fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            RequestError::NotFound => (StatusCode::NOT_FOUND, "Not Found"),
            RequestError::NotAuthorized(message) => (StatusCode::UNAUTHORIZED, *message),
            RequestError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden"),
            RequestError::RunTimeError(message) => (StatusCode::UNPROCESSABLE_ENTITY, *message),
            RequestError::ServerError | RequestError::DatabaseError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        }
    }

    /// True when the database rejected a write because of a `UNIQUE` index.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            RequestError::DatabaseError(sqlx::Error::Database(e)) => {
                e.message().contains("UNIQUE constraint failed")
            }
            _ => false,
        }
    }
}
