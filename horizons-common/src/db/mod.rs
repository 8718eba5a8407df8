//! Database schema, models and queries

pub mod init;
pub mod journal;
pub mod models;
pub mod progress;
pub mod users;

pub use init::*;
pub use models::*;
