//! Expense entity, the fixed category set, and date handling.

pub mod category;
pub mod date;
#[allow(clippy::module_inception)]
pub mod expense;

pub use category::Category;
pub use date::{parse_expense_date, YearMonth, DATE_FORMAT};
pub use expense::Expense;
