//! # strata-database
//!
//! PostgreSQL connection management, migrations and the repositories
//! behind the auth, sample and health services.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
