use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form,
};
use serde::Deserialize;

use super::{parse_note_id, CurrentUser};
use crate::error::Result;
use crate::views;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct NoteForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Html<String>> {
    let notes = state.notes.list_by_owner(user_id).await?;
    Ok(views::notes_page(&notes))
}

pub async fn create_form(_: CurrentUser) -> Html<String> {
    views::create_page()
}

pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Form(form): Form<NoteForm>,
) -> Result<Redirect> {
    state
        .notes
        .create(user_id, &form.title, &form.content)
        .await?;
    Ok(Redirect::to("/notes"))
}

pub async fn edit_form(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<String>,
) -> Result<Html<String>> {
    let note = state.notes.get_owned(parse_note_id(&id)?, user_id).await?;
    Ok(views::edit_page(&note))
}

pub async fn edit(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<String>,
    Form(form): Form<NoteForm>,
) -> Result<Redirect> {
    let note = state.notes.get_by_id(parse_note_id(&id)?).await?;
    state
        .notes
        .update(&note, user_id, &form.title, &form.content)
        .await?;
    Ok(Redirect::to("/notes"))
}

pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<String>,
) -> Result<Redirect> {
    let note = state.notes.get_by_id(parse_note_id(&id)?).await?;
    state.notes.delete(&note, user_id).await?;
    Ok(Redirect::to("/notes"))
}
