#![allow(dead_code)]

use std::path::Path;

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use notes_web::{
    config::SessionConfig,
    migration::{Migrator, MigratorTrait},
    router, AppState, CredentialStore,
};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tower::ServiceExt;

pub const COOKIE_NAME: &str = "notes_session";

/// Lowest cost bcrypt accepts.
pub const TEST_BCRYPT_COST: u32 = 4;

pub fn session_config() -> SessionConfig {
    SessionConfig {
        secret: "integration-test-secret".into(),
        cookie_name: COOKIE_NAME.into(),
        max_age: time::Duration::hours(1),
        secure: false,
    }
}

/// A fresh, migrated in-memory SQLite database.
pub async fn database() -> DatabaseConnection {
    // A single connection, or each pooled connection would see its own empty database.
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);

    let conn = Database::connect(opt).await.expect("connect to sqlite");
    Migrator::up(&conn, None).await.expect("run migrations");
    conn
}

pub async fn store() -> CredentialStore {
    CredentialStore::new(database().await)
}

pub async fn state() -> AppState {
    AppState::new(database().await, &session_config(), TEST_BCRYPT_COST)
}

pub fn app(state: AppState) -> Router {
    router(state, Path::new("static"))
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.expect("infallible router")
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, fields: &[(&str, &str)], cookie: Option<&str>) -> Request<Body> {
    let body = serde_urlencoded::to_string(fields).unwrap();

    let mut builder = Request::post(uri).header(
        header::CONTENT_TYPE,
        "application/x-www-form-urlencoded",
    );
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body)).unwrap()
}

pub fn location<B>(response: &Response<B>) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

/// The raw `Set-Cookie` header for the session cookie, if the response set one.
pub fn set_cookie_header<B>(response: &Response<B>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with(&format!("{COOKIE_NAME}=")))
        .map(str::to_owned)
}

/// The `name=value` pair a browser would send back for the session cookie.
pub fn session_cookie<B>(response: &Response<B>) -> Option<String> {
    set_cookie_header(response)
        .and_then(|header| header.split(';').next().map(|pair| pair.trim().to_owned()))
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Registers and logs in through HTTP, returning the session cookie pair.
pub async fn register_and_login(app: &Router, email: &str, password: &str) -> String {
    let response = send(
        app,
        post_form("/register", &[("email", email), ("password", password)], None),
    )
    .await;
    assert_eq!(response.status(), 303, "register {email}");

    let response = send(
        app,
        post_form("/login", &[("email", email), ("password", password)], None),
    )
    .await;
    assert_eq!(response.status(), 303, "login {email}");
    session_cookie(&response).expect("login sets the session cookie")
}
