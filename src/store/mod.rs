//! The authoritative, ordered expense collection.

use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    currency::{CurrencyChange, CurrencyConverter},
    errors::{ExpenseError, IndexError, RateUnavailableError, StorageError},
    expense::{Category, Expense, YearMonth},
    storage::StorageBackend,
};

/// Per-category totals in the fixed category order. Every category is present.
pub type CategoryTotals = BTreeMap<Category, f64>;

/// Owns expenses in insertion order and the converter used for normalized
/// totals. Lookups for removal and editing use value equality, so duplicate
/// expenses are indistinguishable and the first match wins.
pub struct ExpenseStore {
    expenses: Vec<Expense>,
    converter: CurrencyConverter,
}

impl ExpenseStore {
    pub fn new(converter: CurrencyConverter) -> Self {
        Self {
            expenses: Vec::new(),
            converter,
        }
    }

    pub fn converter(&self) -> &CurrencyConverter {
        &self.converter
    }

    pub fn add(&mut self, expense: Expense) {
        debug!(name = expense.name(), date = expense.date(), "expense added");
        self.expenses.push(expense);
    }

    /// Removes the first expense equal to `expense`; `false` when none matches.
    pub fn remove(&mut self, expense: &Expense) -> bool {
        match self.position_of(expense) {
            Some(index) => {
                self.expenses.remove(index);
                debug!(index, "expense removed");
                true
            }
            None => false,
        }
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Expense, IndexError> {
        if index >= self.expenses.len() {
            return Err(IndexError {
                index,
                len: self.expenses.len(),
            });
        }
        debug!(index, "expense removed");
        Ok(self.expenses.remove(index))
    }

    /// Replaces the first expense equal to `old` with `new` at the same
    /// position. Leaves the store untouched and returns `false` on no match.
    pub fn edit(&mut self, old: &Expense, new: Expense) -> bool {
        match self.position_of(old) {
            Some(index) => {
                debug!(index, name = new.name(), "expense replaced");
                self.expenses[index] = new;
                true
            }
            None => false,
        }
    }

    pub fn all(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn get(&self, index: usize) -> Option<&Expense> {
        self.expenses.get(index)
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn clear(&mut self) {
        self.expenses.clear();
    }

    /// Expenses whose stored category string equals `category` exactly.
    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Expense> + 'a {
        self.expenses
            .iter()
            .filter(move |expense| expense.category() == category)
    }

    /// Buckets expenses by calendar month, months ascending, insertion order
    /// kept within each bucket.
    pub fn grouped_by_month(&self) -> BTreeMap<YearMonth, Vec<&Expense>> {
        let mut grouped: BTreeMap<YearMonth, Vec<&Expense>> = BTreeMap::new();
        for expense in &self.expenses {
            grouped.entry(expense.year_month()).or_default().push(expense);
        }
        grouped
    }

    /// Sums each category's expenses after converting them to `target`.
    ///
    /// A category collects exactly what [`by_category`](Self::by_category)
    /// returns for its label, so `"food"` counts towards no category and is
    /// never converted. One rate lookup per counted expense; the first failed
    /// lookup aborts the whole computation.
    pub fn totals_by_category(&self, target: &str) -> Result<CategoryTotals, RateUnavailableError> {
        let mut totals = CategoryTotals::new();
        for category in Category::ALL {
            let mut sum = 0.0;
            for expense in self.by_category(category.label()) {
                sum += self.converter.converted_amount(expense, target)?;
            }
            totals.insert(category, sum);
        }
        Ok(totals)
    }

    /// Converts the stored expense at `index` in place. See
    /// [`CurrencyConverter::convert_in_place`] for when nothing changes.
    pub fn convert_at(
        &mut self,
        index: usize,
        target: &str,
    ) -> Result<Option<CurrencyChange>, ExpenseError> {
        let len = self.expenses.len();
        let expense = self
            .expenses
            .get_mut(index)
            .ok_or(IndexError { index, len })?;
        Ok(self.converter.convert_in_place(expense, target)?)
    }

    pub fn save(&self, backend: &dyn StorageBackend) -> Result<(), StorageError> {
        backend.save(&self.expenses)
    }

    /// Replaces the contents with the backend's snapshot. On failure the
    /// store is left as it was.
    pub fn load(&mut self, backend: &dyn StorageBackend) -> Result<usize, StorageError> {
        let loaded = backend.load()?;
        self.expenses = loaded;
        Ok(self.expenses.len())
    }

    fn position_of(&self, expense: &Expense) -> Option<usize> {
        self.expenses.iter().position(|candidate| candidate == expense)
    }
}
