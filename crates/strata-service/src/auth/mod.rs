//! Login, refresh and programmatic token issuance.

pub mod model;
pub mod service;

pub use model::{
    LoginModel, ProgrammaticModel, ProgrammaticTokenResponse, RefreshModel, TokenResponse,
};
pub use service::AuthService;
