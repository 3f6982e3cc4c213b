//! # API crate — LifeStack domain layer
//!
//! Everything between the HTTP surface and the document store lives here:
//! entity shapes, request validation, authentication, and one owner-scoped
//! service per resource. The `server` crate only parses requests and maps
//! errors to responses; this crate decides what is valid and who owns what.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Registration, login, bearer-token issue/verification, password hashing |
//! | [`models`] | The user record and its client-safe [`UserInfo`] projection |
//! | [`journal`] | Journal entries (text + mood), append-only |
//! | [`goals`] | Deadline-driven goals: create, list, partial patch, delete, derived display status |
//! | [`finance`] | Income/expense log, append-only |
//! | [`vault`] | Knowledge-vault bookmarks, append-only |
//! | [`error`] | The [`ApiError`] taxonomy the server maps to HTTP statuses |
//!
//! Every service holds an `Arc<dyn DocumentStore>` and stamps documents with
//! the authenticated user's id; reads and mutations are scoped to that owner
//! by the store itself, so a handler can never leak or touch another user's
//! data by construction.

pub mod auth;
pub mod error;
pub mod finance;
pub mod goals;
pub mod journal;
pub mod models;
pub mod vault;

pub use auth::AuthService;
pub use error::ApiError;
pub use models::UserInfo;
