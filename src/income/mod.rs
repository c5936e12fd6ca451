pub mod handlers;

pub use handlers::{list_incomes, list_incomes_via_post};
