//! User entity model.

use sea_orm::entity::prelude::*;

/// A registered account.
///
/// | Column   | Type                 | Description                       |
/// |----------|----------------------|-----------------------------------|
/// | id       | INTEGER (Primary Key)| Server-generated user id          |
/// | email    | VARCHAR UNIQUE       | Login key, stored normalised      |
/// | password | VARCHAR              | bcrypt hash, never the plaintext  |
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub email: String,

    /// bcrypt hash in modular crypt format (`$2b$...`).
    pub password: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::note::Entity")]
    Note,
}

impl Related<super::note::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Note.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
