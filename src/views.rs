//! Server-rendered HTML pages.
//!
//! Each function takes the data a handler has and returns a complete page.
//! Every user-supplied string goes through [`escape`].

use axum::{http::StatusCode, response::Html};

use crate::entity::note;

pub fn login_page(error: Option<&str>) -> Html<String> {
    layout(
        "Log in",
        &format!(
            r#"<h1>Log in</h1>
{error}
<form action="/login" method="post">
  <label>Email <input type="email" name="email" required></label>
  <label>Password <input type="password" name="password" required></label>
  <button type="submit">Log in</button>
</form>
<p>No account yet? <a href="/register">Register</a></p>"#,
            error = error_banner(error),
        ),
    )
}

pub fn register_page(error: Option<&str>) -> Html<String> {
    layout(
        "Register",
        &format!(
            r#"<h1>Register</h1>
{error}
<form action="/register" method="post">
  <label>Email <input type="email" name="email" required></label>
  <label>Password <input type="password" name="password" required></label>
  <button type="submit">Create account</button>
</form>
<p>Already registered? <a href="/login">Log in</a></p>"#,
            error = error_banner(error),
        ),
    )
}

pub fn notes_page(notes: &[note::Model]) -> Html<String> {
    let items = if notes.is_empty() {
        "<p class=\"empty\">No notes yet.</p>".to_owned()
    } else {
        let rows: String = notes
            .iter()
            .map(|note| {
                format!(
                    r#"  <li class="note">
    <h2>{title}</h2>
    <pre>{content}</pre>
    <p class="meta">Created {created} &middot; Updated {updated}</p>
    <a href="/notes/edit/{id}">Edit</a>
    <form action="/notes/delete/{id}" method="post" class="inline">
      <button type="submit">Delete</button>
    </form>
  </li>
"#,
                    id = note.id,
                    title = escape(&note.title),
                    content = escape(&note.content),
                    created = note.created_at.format("%Y-%m-%d %H:%M"),
                    updated = note.updated_at.format("%Y-%m-%d %H:%M"),
                )
            })
            .collect();
        format!("<ul class=\"notes\">\n{rows}</ul>")
    };

    layout(
        "My notes",
        &format!(
            r#"<h1>My notes</h1>
<nav>
  <a href="/notes/create">New note</a>
  <form action="/logout" method="post" class="inline"><button type="submit">Log out</button></form>
</nav>
{items}"#
        ),
    )
}

pub fn create_page() -> Html<String> {
    layout(
        "New note",
        r#"<h1>New note</h1>
<form action="/notes/create" method="post">
  <label>Title <input type="text" name="title" required></label>
  <label>Content <textarea name="content" rows="10"></textarea></label>
  <button type="submit">Save</button>
</form>
<p><a href="/notes">Back</a></p>"#,
    )
}

pub fn edit_page(note: &note::Model) -> Html<String> {
    layout(
        "Edit note",
        &format!(
            r#"<h1>Edit note</h1>
<form action="/notes/edit/{id}" method="post">
  <label>Title <input type="text" name="title" value="{title}" required></label>
  <label>Content <textarea name="content" rows="10">{content}</textarea></label>
  <button type="submit">Save</button>
</form>
<p><a href="/notes">Back</a></p>"#,
            id = note.id,
            title = escape(&note.title),
            content = escape(&note.content),
        ),
    )
}

pub fn error_page(status: StatusCode, message: &str) -> Html<String> {
    let heading = status.canonical_reason().unwrap_or("Error");
    layout(
        heading,
        &format!(
            r#"<h1>{code} {heading}</h1>
<p>{message}</p>
<p><a href="/">Home</a></p>"#,
            code = status.as_u16(),
            message = escape(message),
        ),
    )
}

fn error_banner(error: Option<&str>) -> String {
    error
        .map(|message| format!(r#"<p class="error">{}</p>"#, escape(message)))
        .unwrap_or_default()
}

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title} - Notes</title>
  <link rel="stylesheet" href="/static/style.css">
</head>
<body>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
    ))
}

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}
