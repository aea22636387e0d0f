use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};

use crate::entity::{note, user};
use crate::error::{Error, Result};

/// Timestamp type stored in `notes.created_at` and `notes.updated_at`.
pub type Timestamp = sea_orm::prelude::DateTimeWithTimeZone;

/// Relational persistence for users and notes.
///
/// Every method is a single parameterized statement against the pooled
/// connection. No business rules live here: ownership checks belong to
/// [`crate::notes::NoteService`], hashing to [`crate::auth::AuthService`].
///
/// # Error Mapping
///
/// - Unique violation on `users.email` → [`Error::DuplicateEmail`]
/// - Any other Sea-ORM error → [`Error::Database`]
#[derive(Debug, Clone)]
pub struct CredentialStore {
    conn: DatabaseConnection,
}

impl CredentialStore {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Inserts a user row. `password_hash` must already be hashed.
    pub async fn create_user(&self, email: &str, password_hash: &str) -> Result<user::Model> {
        let model = user::ActiveModel {
            email: Set(email.to_owned()),
            password: Set(password_hash.to_owned()),
            ..Default::default()
        };

        model.insert(&self.conn).await.map_err(|e| {
            if is_unique_violation(&e) {
                Error::DuplicateEmail
            } else {
                Error::Database(e)
            }
        })
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<user::Model>> {
        Ok(user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.conn)
            .await?)
    }

    pub async fn insert_note(
        &self,
        owner_id: i32,
        title: &str,
        content: &str,
        now: Timestamp,
    ) -> Result<note::Model> {
        let model = note::ActiveModel {
            title: Set(title.to_owned()),
            content: Set(content.to_owned()),
            user_id: Set(owner_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(model.insert(&self.conn).await?)
    }

    /// All notes owned by `owner_id`, oldest first.
    pub async fn notes_by_owner(&self, owner_id: i32) -> Result<Vec<note::Model>> {
        Ok(note::Entity::find()
            .filter(note::Column::UserId.eq(owner_id))
            .order_by_asc(note::Column::Id)
            .all(&self.conn)
            .await?)
    }

    pub async fn note_by_id(&self, id: i32) -> Result<Option<note::Model>> {
        Ok(note::Entity::find_by_id(id).one(&self.conn).await?)
    }

    /// Replaces title and content and stamps `updated_at`. `created_at` and the
    /// owner are never written.
    pub async fn update_note(
        &self,
        id: i32,
        title: &str,
        content: &str,
        updated_at: Timestamp,
    ) -> Result<note::Model> {
        let model = note::ActiveModel {
            id: sea_orm::ActiveValue::Unchanged(id),
            title: Set(title.to_owned()),
            content: Set(content.to_owned()),
            updated_at: Set(updated_at),
            ..Default::default()
        };

        model.update(&self.conn).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => Error::NotFound,
            other => Error::Database(other),
        })
    }

    pub async fn delete_note(&self, id: i32) -> Result<()> {
        note::Entity::delete_by_id(id).exec(&self.conn).await?;
        Ok(())
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
