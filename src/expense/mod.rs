pub mod handlers;

pub use handlers::{create_expense, list_expenses};
