//! # strata-entity
//!
//! Row models read from PostgreSQL and payload models exchanged over
//! Pub/Sub.

pub mod message;
pub mod sample;
pub mod user;
