pub mod json_backend;

use crate::{errors::StorageError, expense::Expense};

pub type Result<T> = std::result::Result<T, StorageError>;

/// Whole-collection persistence for expenses.
///
/// `save` must be all-or-nothing, and `load` after `save(xs)` must return a
/// sequence equal to `xs` element by element. `load` fails when nothing was
/// saved yet or the stored data cannot be read back.
pub trait StorageBackend: Send + Sync {
    fn save(&self, expenses: &[Expense]) -> Result<()>;
    fn load(&self) -> Result<Vec<Expense>>;
}

pub use json_backend::{JsonStorage, SNAPSHOT_SCHEMA_VERSION};
