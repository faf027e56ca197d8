//! User and refresh-token entities.

pub mod model;
pub mod refresh_token;

pub use model::User;
pub use refresh_token::{NewRefreshToken, RefreshToken};
