//! # notes-web
//!
//! A server-rendered note-taking application. Users register with an e-mail
//! and password, log in, and create, edit and delete their own notes.
//!
//! ## Layout
//!
//! | Module       | Responsibility                                                  |
//! |--------------|-----------------------------------------------------------------|
//! | [`store`]    | Parameterized Sea-ORM queries over `users` and `notes`          |
//! | [`session`]  | Signed client-side session cookies                              |
//! | [`auth`]     | Registration (bcrypt + persist) and login (verify + session)    |
//! | [`notes`]    | Owner-scoped note CRUD with fetch-then-compare ownership checks |
//! | [`handlers`] | axum handlers and the [`handlers::CurrentUser`] extractor       |
//! | [`views`]    | HTML pages                                                      |
//!
//! ## Quick Start
//!
//! ```no_run
//! use notes_web::{config::Config, migration::{Migrator, MigratorTrait}, router, AppState};
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! let conn = Database::connect(config.database_url.as_str()).await?;
//! Migrator::up(&conn, None).await?;
//!
//! let state = AppState::new(conn, &config.session, config.bcrypt_cost);
//! let app = router(state, &config.static_dir);
//!
//! let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use axum::{
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_cookies::CookieManagerLayer;
use tower_http::{services::ServeDir, trace::TraceLayer};

pub mod auth;
pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod migration;
pub mod notes;
pub mod password;
pub mod session;
pub mod store;
pub mod views;

pub use auth::AuthService;
pub use error::{Error, Result};
pub use notes::NoteService;
pub use session::SessionManager;
pub use store::CredentialStore;

use config::SessionConfig;
use handlers::{auth as auth_handlers, notes as note_handlers};

/// Shared, read-only state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub notes: NoteService,
    pub sessions: SessionManager,
}

impl AppState {
    pub fn new(conn: DatabaseConnection, session: &SessionConfig, bcrypt_cost: u32) -> Self {
        let store = CredentialStore::new(conn);
        let sessions = SessionManager::new(session);
        Self {
            auth: AuthService::new(store.clone(), sessions.clone(), bcrypt_cost),
            notes: NoteService::new(store),
            sessions,
        }
    }
}

/// Builds the full route table.
pub fn router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(auth_handlers::index))
        .route(
            "/login",
            get(auth_handlers::login_form).post(auth_handlers::login),
        )
        .route(
            "/register",
            get(auth_handlers::register_form).post(auth_handlers::register),
        )
        .route("/logout", post(auth_handlers::logout))
        .route("/notes", get(note_handlers::list))
        .route(
            "/notes/create",
            get(note_handlers::create_form).post(note_handlers::create),
        )
        .route(
            "/notes/edit/{id}",
            get(note_handlers::edit_form).post(note_handlers::edit),
        )
        .route("/notes/delete/{id}", post(note_handlers::delete))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
