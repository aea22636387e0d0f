mod common;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use notes_web::{config::SessionConfig, SessionManager};
use tower_cookies::{CookieManagerLayer, Cookies};

use common::{body_text, post_form, send, session_config, session_cookie, set_cookie_header};

fn app(sessions: SessionManager) -> Router {
    Router::new()
        .route(
            "/establish/{id}",
            post(
                |State(sessions): State<SessionManager>, cookies: Cookies, Path(id): Path<i32>| async move {
                    sessions.establish(&cookies, id).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
                },
            ),
        )
        .route(
            "/whoami",
            get(|State(sessions): State<SessionManager>, cookies: Cookies| async move {
                match sessions.read(&cookies) {
                    Some(id) => id.to_string(),
                    None => "anonymous".to_owned(),
                }
            }),
        )
        .route(
            "/destroy",
            post(|State(sessions): State<SessionManager>, cookies: Cookies| async move {
                sessions.destroy(&cookies);
            }),
        )
        .layer(CookieManagerLayer::new())
        .with_state(sessions)
}

async fn whoami(app: &Router, cookie: Option<&str>) -> String {
    body_text(send(app, common::get("/whoami", cookie)).await).await
}

async fn establish(app: &Router, id: i32) -> String {
    let response = send(app, post_form(&format!("/establish/{id}"), &[], None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    session_cookie(&response).expect("session cookie")
}

#[tokio::test]
async fn read_returns_the_established_identity() {
    let app = app(SessionManager::new(&session_config()));

    let cookie = establish(&app, 42).await;

    assert_eq!(whoami(&app, Some(&cookie)).await, "42");
}

#[tokio::test]
async fn cookie_attributes() {
    let app = app(SessionManager::new(&session_config()));

    let response = send(&app, post_form("/establish/1", &[], None)).await;
    let header = set_cookie_header(&response).unwrap();

    assert!(header.contains("HttpOnly"), "{header}");
    assert!(header.contains("SameSite=Lax"), "{header}");
    assert!(header.contains("Path=/"), "{header}");
    assert!(header.contains("Max-Age=3600"), "{header}");
    assert!(!header.contains("Secure"), "{header}");
}

#[tokio::test]
async fn destroy_expires_the_cookie() {
    let app = app(SessionManager::new(&session_config()));
    let cookie = establish(&app, 42).await;

    let response = send(&app, post_form("/destroy", &[], Some(&cookie))).await;
    let header = set_cookie_header(&response).expect("removal cookie");
    assert!(header.contains("Max-Age=0"), "{header}");
    assert!(header.contains("1970"), "{header}");

    let cleared = session_cookie(&response).unwrap();
    assert_eq!(whoami(&app, Some(&cleared)).await, "anonymous");
}

#[tokio::test]
async fn missing_cookie_is_anonymous() {
    let app = app(SessionManager::new(&session_config()));

    assert_eq!(whoami(&app, None).await, "anonymous");
}

#[tokio::test]
async fn cookie_from_another_secret_is_rejected() {
    let ours = app(SessionManager::new(&session_config()));
    let theirs = app(SessionManager::new(&SessionConfig {
        secret: "some other secret".into(),
        ..session_config()
    }));

    let foreign = establish(&theirs, 42).await;

    assert_eq!(whoami(&ours, Some(&foreign)).await, "anonymous");
}

#[tokio::test]
async fn unsigned_value_is_rejected() {
    let app = app(SessionManager::new(&session_config()));

    let forged = format!("{}=kgEq", common::COOKIE_NAME);

    assert_eq!(whoami(&app, Some(&forged)).await, "anonymous");
}
