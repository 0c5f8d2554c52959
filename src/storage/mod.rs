//! Storage implementations

pub mod csv_import;
pub mod in_memory;
pub mod sqlite;

pub use in_memory::InMemorySessionStore;
pub use sqlite::SqlitePlayerService;
