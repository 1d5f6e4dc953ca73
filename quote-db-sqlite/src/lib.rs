//! SQLite storage backend for the quote engine.
//!
//! Price entries and submitted quotes live in two tables created by the
//! migrations under `migrations/`; `seeds/` holds the standard price table.

pub mod decimal;
pub mod factory;
pub mod repository;

pub use factory::SqliteRepositoryFactory;
pub use repository::SqliteRepository;
