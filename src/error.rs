//! Error types for request handling and startup.
//!
//! [`Error`] covers everything a handler can fail with and knows how to turn
//! itself into an HTTP response. [`ConfigError`] is only produced while the
//! process starts and is fatal.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use sea_orm::DbErr;

use crate::views;

/// Message shown for both unknown e-mail and wrong password.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Message shown when registering an e-mail that is already taken.
pub const DUPLICATE_EMAIL: &str = "An account with this email already exists";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Bad or missing input, e.g. a non-numeric note id.
    #[error("{0}")]
    Validation(String),

    /// No session, or a session cookie that failed verification.
    #[error("not authenticated")]
    Unauthenticated,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("an account with this email already exists")]
    DuplicateEmail,

    /// Authenticated, but not the owner of the note.
    #[error("you do not have permission to modify this note")]
    Forbidden,

    #[error("note not found")]
    NotFound,

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("session error: {0}")]
    Session(String),

    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

pub type Result<T> = std::result::Result<T, Error>;

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Unauthenticated => Redirect::to("/login").into_response(),
            Error::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                views::login_page(Some(INVALID_CREDENTIALS)),
            )
                .into_response(),
            Error::DuplicateEmail => (
                StatusCode::CONFLICT,
                views::register_page(Some(DUPLICATE_EMAIL)),
            )
                .into_response(),
            Error::Validation(message) => error_response(StatusCode::BAD_REQUEST, &message),
            Error::Forbidden => error_response(
                StatusCode::FORBIDDEN,
                "You do not have permission to modify this note",
            ),
            Error::NotFound => error_response(StatusCode::NOT_FOUND, "Note not found"),
            err @ (Error::Hashing(_) | Error::Session(_) | Error::Database(_)) => {
                tracing::error!(error = %err, "request failed");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, views::error_page(status, message)).into_response()
}

/// Fatal startup configuration problems.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{name} has an invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthenticated_redirects_to_login() {
        let response = Error::Unauthenticated.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/login");
    }

    #[test]
    fn status_codes() {
        let cases = [
            (Error::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (Error::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (Error::DuplicateEmail, StatusCode::CONFLICT),
            (Error::Forbidden, StatusCode::FORBIDDEN),
            (Error::NotFound, StatusCode::NOT_FOUND),
            (Error::Hashing("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (
                Error::Database(DbErr::Custom("down".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
