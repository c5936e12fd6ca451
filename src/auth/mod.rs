pub mod handlers;
mod jwt;
pub mod models;
mod password;
mod service;

pub use handlers::login;

pub use jwt::{create_access_token, decode_token, extract_token};
pub use models::{NewUser, User};
pub use service::{AuthService, UserService};
