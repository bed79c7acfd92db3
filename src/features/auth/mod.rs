mod jwks;
mod validator;

pub mod dto;
pub mod handler;
pub mod model;
pub mod routes;
pub mod service;

pub use jwks::JwksClient;
pub use model::{AuthenticatedUser, Session};
pub use service::SessionService;
pub use validator::JwtValidator;
