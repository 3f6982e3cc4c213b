pub mod document;
pub mod error;

mod memory;
pub use memory::MemoryStore;
mod postgres;
pub use postgres::PostgresStore;

pub use document::{Document, DocumentStore};
pub use error::StoreError;
