//! HTTP handlers and the extractors they share.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_cookies::Cookies;

use crate::error::Error;
use crate::AppState;

pub mod auth;
pub mod notes;

/// The authenticated user's id, taken from the session cookie.
///
/// Handlers that take this extractor never run for anonymous requests: the
/// rejection is [`Error::Unauthenticated`], which redirects to `/login`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub i32);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let cookies = Cookies::from_request_parts(parts, state)
            .await
            .map_err(|_| Error::Session("cookie layer is not installed".into()))?;

        state
            .sessions
            .read(&cookies)
            .map(CurrentUser)
            .ok_or(Error::Unauthenticated)
    }
}

/// Parses the `{id}` path segment of note routes.
pub(crate) fn parse_note_id(raw: &str) -> Result<i32, Error> {
    raw.parse()
        .map_err(|_| Error::Validation(format!("Invalid note ID: {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_id_must_be_numeric() {
        assert_eq!(parse_note_id("42").unwrap(), 42);
        assert!(matches!(parse_note_id("abc"), Err(Error::Validation(_))));
        assert!(matches!(parse_note_id(""), Err(Error::Validation(_))));
    }
}
