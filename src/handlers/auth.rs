use axum::{
    extract::State,
    response::{Html, Redirect},
    Form,
};
use serde::Deserialize;
use tower_cookies::Cookies;

use crate::error::Result;
use crate::views;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// `GET /`: send the visitor wherever their session allows.
pub async fn index(State(state): State<AppState>, cookies: Cookies) -> Redirect {
    match state.sessions.read(&cookies) {
        Some(_) => Redirect::to("/notes"),
        None => Redirect::to("/login"),
    }
}

pub async fn login_form() -> Html<String> {
    views::login_page(None)
}

pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<CredentialsForm>,
) -> Result<Redirect> {
    state.auth.login(&cookies, &form.email, &form.password).await?;
    Ok(Redirect::to("/notes"))
}

pub async fn register_form() -> Html<String> {
    views::register_page(None)
}

pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<CredentialsForm>,
) -> Result<Redirect> {
    state.auth.register(&form.email, &form.password).await?;
    Ok(Redirect::to("/login"))
}

pub async fn logout(State(state): State<AppState>, cookies: Cookies) -> Redirect {
    state.sessions.destroy(&cookies);
    Redirect::to("/")
}
