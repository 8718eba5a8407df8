//! # Healing Horizons Common Library
//!
//! Shared code for the Healing Horizons service and its tests:
//! - Database schema, models and queries
//! - Configuration loading and root folder resolution
//! - Mood and provider-failure classifiers
//! - Dashboard statistics
//! - Password and session hashing

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod failure;
pub mod mood;
pub mod stats;
pub mod time;

pub use error::{Error, Result};
pub use failure::FailureKind;
pub use mood::Mood;
