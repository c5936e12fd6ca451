mod auth;
mod payload;

pub use auth::AuthenticatedUser;
pub use payload::{optional_field, require_body};
