//! Persistence layer for session games.

mod error;
mod memory;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

pub use error::DbError;
pub use memory::MemoryStore;
pub use models::{NewSavedGame, SavedGame};
pub use repository::SqliteStore;
