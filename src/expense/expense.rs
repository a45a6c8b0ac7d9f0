use std::hash::{Hash, Hasher};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{
    category::Category,
    date::{parse_expense_date, YearMonth},
};
use crate::errors::ValidationError;

/// One recorded transaction.
///
/// `date` and `category` keep the caller's spelling; the parsed forms are cached
/// alongside and never serialized. Equality and hashing only look at the five
/// stored fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ExpenseRecord")]
pub struct Expense {
    name: String,
    date: String,
    category: String,
    amount: f64,
    currency: String,
    #[serde(skip_serializing)]
    day: NaiveDate,
    #[serde(skip_serializing)]
    kind: Category,
}

impl Expense {
    /// Validates the date, then the category, then the amount.
    pub fn new(
        name: impl Into<String>,
        date: impl Into<String>,
        category: impl Into<String>,
        amount: f64,
        currency: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let date = date.into();
        let day = parse_expense_date(&date)?;
        let category = category.into();
        let kind = category.parse::<Category>()?;
        check_amount(amount)?;
        Ok(Self {
            name: name.into(),
            date,
            category,
            amount,
            currency: currency.into(),
            day,
            kind,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn kind(&self) -> Category {
        self.kind
    }

    pub fn parsed_date(&self) -> NaiveDate {
        self.day
    }

    pub fn year_month(&self) -> YearMonth {
        YearMonth::from_date(self.day)
    }

    /// Replaces the date if it passes the same check as construction.
    pub fn set_date(&mut self, date: impl Into<String>) -> Result<(), ValidationError> {
        let date = date.into();
        self.day = parse_expense_date(&date)?;
        self.date = date;
        Ok(())
    }

    /// Replaces the category if it passes the same check as construction.
    pub fn set_category(&mut self, category: impl Into<String>) -> Result<(), ValidationError> {
        let category = category.into();
        self.kind = category.parse()?;
        self.category = category;
        Ok(())
    }

    pub(crate) fn apply_conversion(&mut self, amount: f64, currency: impl Into<String>) {
        self.amount = amount;
        self.currency = currency.into();
    }
}

fn check_amount(amount: f64) -> Result<(), ValidationError> {
    if amount.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::InvalidAmount(amount.to_string()))
    }
}

impl PartialEq for Expense {
    fn eq(&self, other: &Self) -> bool {
        self.amount.to_bits() == other.amount.to_bits()
            && self.date == other.date
            && self.category == other.category
            && self.name == other.name
            && self.currency == other.currency
    }
}

impl Eq for Expense {}

impl Hash for Expense {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.date.hash(state);
        self.category.hash(state);
        self.name.hash(state);
        self.amount.to_bits().hash(state);
        self.currency.hash(state);
    }
}

/// Wire shape of an expense; deserialization re-runs construction checks.
#[derive(Deserialize)]
struct ExpenseRecord {
    name: String,
    date: String,
    category: String,
    amount: f64,
    currency: String,
}

impl TryFrom<ExpenseRecord> for Expense {
    type Error = ValidationError;

    fn try_from(record: ExpenseRecord) -> Result<Self, Self::Error> {
        Expense::new(
            record.name,
            record.date,
            record.category,
            record.amount,
            record.currency,
        )
    }
}
