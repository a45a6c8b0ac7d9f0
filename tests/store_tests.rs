mod common;

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use common::{expense, seeded_store, HUF_TO_JOD};
use expense_core::{
    currency::{CurrencyConverter, RateTable},
    Category, ExpenseStore, RateUnavailableError, ValidationError, YearMonth,
};

#[test]
fn invalid_dates_and_categories_are_rejected() {
    for date in ["2023-11-26", "31/13/2023", "26.11.2023"] {
        let err = expense_core::Expense::new("x", date, "Food", 1.0, "HUF").unwrap_err();
        assert_eq!(err, ValidationError::InvalidDate(date.to_string()));
    }
    let err = expense_core::Expense::new("x", "26/11/2023", "Snacks", 1.0, "HUF").unwrap_err();
    assert!(matches!(err, ValidationError::InvalidCategory(_)));
    for category in ["FOOD", "food", "Food"] {
        assert!(expense_core::Expense::new("x", "26/11/2023", category, 1.0, "HUF").is_ok());
    }
}

#[test]
fn by_category_returns_single_food_expense() {
    let store = seeded_store();
    let food: Vec<_> = store.by_category("Food").collect();
    assert_eq!(food.len(), 1);
    assert_eq!(food[0].name(), "Lunch");
}

#[test]
fn totals_cover_every_category_in_fixed_order() {
    let store = seeded_store();
    let totals = store.totals_by_category("JOD").expect("totals");

    assert_eq!(totals.len(), 7);
    assert_eq!(totals.keys().copied().collect::<Vec<_>>(), Category::ALL.to_vec());
    assert!((totals[&Category::Food] - 6200.0 * HUF_TO_JOD).abs() < 1e-9);
    assert!((totals[&Category::Transportation] - 3500.0 * HUF_TO_JOD).abs() < 1e-9);
    assert!((totals[&Category::Groceries] - 4540.0 * HUF_TO_JOD).abs() < 1e-9);
    for empty in [
        Category::Rent,
        Category::Utilities,
        Category::Entertainment,
        Category::Other,
    ] {
        assert_eq!(totals[&empty], 0.0);
    }
}

#[test]
fn totals_mix_currencies_and_skip_other_spellings() {
    let rates = RateTable::new()
        .with_rate("HUF", "JOD", 0.002)
        .with_rate("JOD", "EUR", 1.3);
    let mut store = ExpenseStore::new(CurrencyConverter::new(rates));
    store.add(expense("Lunch", "26/11/2023", "Food", 1000.0, "HUF"));
    store.add(expense("Pasta", "28/11/2023", "Food", 13.0, "EUR"));
    store.add(expense("Dinner", "27/11/2023", "food", 5.0, "JOD"));
    // No XXX rate exists; the lookup would fail if this expense were counted.
    store.add(expense("Street Food", "29/11/2023", "FOOD", 1.0, "XXX"));

    assert_eq!(store.by_category("Food").count(), 2);
    let totals = store.totals_by_category("JOD").expect("non-canonical spellings are skipped");
    assert!((totals[&Category::Food] - (2.0 + 10.0)).abs() < 1e-9);
    assert_eq!(totals.values().filter(|total| **total != 0.0).count(), 1);
}

#[test]
fn totals_abort_on_first_failed_lookup() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let provider = move |from: &str, to: &str| -> Result<f64, RateUnavailableError> {
        counter.fetch_add(1, Ordering::SeqCst);
        if from == "EUR" {
            Err(RateUnavailableError::MissingRate {
                from: from.into(),
                to: to.into(),
            })
        } else {
            Ok(1.0)
        }
    };
    let mut store = ExpenseStore::new(CurrencyConverter::new(provider));
    store.add(expense("Lunch", "26/11/2023", "Food", 10.0, "JOD"));
    store.add(expense("Pasta", "27/11/2023", "Food", 10.0, "EUR"));
    store.add(expense("Rent", "01/12/2023", "Rent", 500.0, "JOD"));

    let err = store.totals_by_category("JOD").unwrap_err();
    assert!(matches!(err, RateUnavailableError::MissingRate { .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(store.len(), 3);
}

#[test]
fn grouped_by_month_orders_keys_and_keeps_insertion_order() {
    let store = seeded_store();
    let grouped = store.grouped_by_month();

    assert_eq!(grouped.len(), 2);
    let keys: Vec<String> = grouped.keys().map(YearMonth::to_string).collect();
    assert_eq!(keys, vec!["2023-10", "2023-11"]);

    let november = &grouped[&YearMonth::new(2023, 11).unwrap()];
    let names: Vec<&str> = november.iter().map(|e| e.name()).collect();
    assert_eq!(names, vec!["Lunch", "Bus Ticket"]);
    assert_eq!(grouped[&YearMonth::new(2023, 10).unwrap()].len(), 1);
}

#[test]
fn remove_reports_outcome() {
    let mut store = seeded_store();
    let absent = expense("Dinner", "07/04/2005", "Food", 9000.0, "HUF");
    assert!(!store.remove(&absent));
    assert_eq!(store.len(), 3);

    let present = expense("Lunch", "26/11/2023", "Food", 6200.0, "HUF");
    assert!(store.remove(&present));
    assert_eq!(store.len(), 2);
    assert!(!store.all().contains(&present));
}

#[test]
fn edit_with_absent_original_changes_nothing() {
    let mut store = seeded_store();
    let before = store.all().to_vec();
    let absent = expense("Lunch", "26/11/2023", "Food", 1.0, "HUF");
    let replacement = expense("Brunch", "26/11/2023", "Food", 2.0, "HUF");

    assert!(!store.edit(&absent, replacement));
    assert_eq!(store.all(), before.as_slice());
}

#[test]
fn edit_replaces_matching_value() {
    let mut store = seeded_store();
    let original = expense("Lunch", "26/11/2023", "Food", 6200.0, "HUF");
    let updated = expense("Lunch", "26/11/2023", "Food", 4500.0, "HUF");
    assert!(store.edit(&original, updated.clone()));
    assert_eq!(store.all()[0], updated);
    assert!(!store.all().contains(&original));
}

#[test]
fn remove_at_out_of_range_is_index_error() {
    let mut store = seeded_store();
    let err = store.remove_at(10).unwrap_err();
    assert_eq!(err.index, 10);
    assert_eq!(err.len, 3);
    assert_eq!(err.to_string(), "index 10 is out of range for 3 expenses");
}
