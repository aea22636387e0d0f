//! Database entity models for notes-web.
//!
//! These Sea-ORM entities describe the two tables the application owns:
//! `users` (accounts and their password hashes) and `notes` (per-user text
//! notes). They are used by [`crate::store::CredentialStore`] and created by
//! [`crate::migration::Migrator`].

/// Registered accounts, keyed by a server-generated integer id.
pub mod user;

/// Notes, each owned by exactly one user.
pub mod note;
