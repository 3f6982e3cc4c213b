pub mod auth;
pub mod finance;
pub mod goals;
pub mod journal;
pub mod vault;
