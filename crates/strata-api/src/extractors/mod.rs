//! Custom Axum extractors.

pub mod auth;
pub mod errors;
pub mod json;
pub mod path;

pub use auth::AuthUser;
pub use errors::ErrorSink;
pub use json::ApiJson;
pub use path::ApiPath;
