//! Repository implementations and the traits services consume them through.

pub mod auth;
pub mod health;
pub mod sample;

pub use auth::{AuthRepository, AuthStore};
pub use health::{HealthProbe, HealthRepository};
pub use sample::{SampleRepository, SampleStore};
