#![allow(dead_code)]

use std::sync::Mutex;

use expense_core::{
    currency::{CurrencyConverter, RateTable},
    Expense, ExpenseStore, JsonStorage,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub const HUF_TO_JOD: f64 = 0.00203;

/// JSON storage backed by a unique temporary directory.
pub fn temp_storage() -> JsonStorage {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("expenses.json");
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    JsonStorage::new(path)
}

pub fn stub_rates() -> RateTable {
    RateTable::new().with_rate("HUF", "JOD", HUF_TO_JOD)
}

pub fn expense(name: &str, date: &str, category: &str, amount: f64, currency: &str) -> Expense {
    Expense::new(name, date, category, amount, currency).expect("valid expense")
}

/// Lunch (Food, Nov), Bus Ticket (Transportation, Nov), Cheese (Groceries, Oct).
pub fn seeded_store() -> ExpenseStore {
    let mut store = ExpenseStore::new(CurrencyConverter::new(stub_rates()));
    for item in sample_expenses() {
        store.add(item);
    }
    store
}

pub fn sample_expenses() -> Vec<Expense> {
    vec![
        expense("Lunch", "26/11/2023", "Food", 6200.0, "HUF"),
        expense("Bus Ticket", "24/11/2023", "Transportation", 3500.0, "HUF"),
        expense("Cheese", "11/10/2023", "Groceries", 4540.0, "HUF"),
    ]
}
