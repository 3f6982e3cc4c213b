//! HTTP application for LifeStack.
//!
//! This crate is deliberately thin: settings, router construction, a
//! bearer-token extractor, and one small handler per route. Everything that
//! decides validity or ownership lives in the `api` crate.

pub mod application;
pub mod error;
pub mod extract;
pub mod routes;
pub mod settings;

pub use application::{app, serve, AppState};
pub use settings::Settings;
