#![doc(test(attr(deny(warnings))))]

//! Expense Core tracks personal expenses in an ordered in-memory store and
//! reports category and month aggregates, normalizing currencies through a
//! pluggable rate provider.

pub mod config;
pub mod currency;
pub mod errors;
pub mod expense;
pub mod storage;
pub mod store;
pub mod utils;

pub use currency::{CurrencyConverter, RateProvider};
pub use errors::{ExpenseError, IndexError, RateUnavailableError, StorageError, ValidationError};
pub use expense::{Category, Expense, YearMonth};
pub use storage::{JsonStorage, StorageBackend};
pub use store::{CategoryTotals, ExpenseStore};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Held by unit tests that read or write process environment variables.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Expense Core tracing initialized.");
    });
}
