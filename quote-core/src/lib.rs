pub mod calculations;
pub mod db;
pub mod models;

pub use db::repository::{QuoteRepository, RepositoryError};
pub use models::*;
