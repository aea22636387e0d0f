//! Note entity model.

use sea_orm::entity::prelude::*;

/// A text note owned by a single user.
///
/// # Database Schema
///
/// | Column     | Type                  | Description                            |
/// |------------|-----------------------|----------------------------------------|
/// | id         | INTEGER (Primary Key) | Server-generated note id               |
/// | title      | VARCHAR               | Note title                             |
/// | content    | TEXT                  | Note body                              |
/// | user_id    | INTEGER               | Owner, references `users.id`           |
/// | created_at | TIMESTAMPTZ           | Set once when the note is created      |
/// | updated_at | TIMESTAMPTZ           | Set at creation, refreshed on update   |
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "notes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    #[sea_orm(column_type = "Text")]
    pub content: String,

    /// Owning user. Every note has exactly one.
    pub user_id: i32,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
