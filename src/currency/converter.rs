use std::fmt;

use tracing::{info, warn};

use super::RateProvider;
use crate::{errors::RateUnavailableError, expense::Expense};

/// Record of an in-place currency change.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyChange {
    pub from_amount: f64,
    pub from_currency: String,
    pub to_amount: f64,
    pub to_currency: String,
}

impl fmt::Display for CurrencyChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "The expense has changed from {} {} to {} {}",
            self.from_amount, self.from_currency, self.to_amount, self.to_currency
        )
    }
}

/// Converts expense amounts through an injected [`RateProvider`].
pub struct CurrencyConverter {
    provider: Box<dyn RateProvider>,
}

impl CurrencyConverter {
    pub fn new(provider: impl RateProvider + 'static) -> Self {
        Self::from_boxed(Box::new(provider))
    }

    pub fn from_boxed(provider: Box<dyn RateProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &dyn RateProvider {
        self.provider.as_ref()
    }

    /// Amount of `expense` expressed in `target`. Leaves the expense untouched.
    pub fn converted_amount(
        &self,
        expense: &Expense,
        target: &str,
    ) -> Result<f64, RateUnavailableError> {
        let rate = self
            .provider
            .rate(expense.currency(), target)
            .inspect_err(|err| {
                warn!(
                    from = expense.currency(),
                    to = target,
                    error = %err,
                    "conversion rate unavailable"
                )
            })?;
        Ok(expense.amount() * rate)
    }

    /// Rewrites the expense's amount and currency when the converted amount is
    /// strictly positive. Zero or negative results leave it as is and report
    /// nothing.
    pub fn convert_in_place(
        &self,
        expense: &mut Expense,
        target: &str,
    ) -> Result<Option<CurrencyChange>, RateUnavailableError> {
        let converted = self.converted_amount(expense, target)?;
        // Overflow to infinity would break the finite-amount invariant.
        if !(converted > 0.0 && converted.is_finite()) {
            return Ok(None);
        }
        let change = CurrencyChange {
            from_amount: expense.amount(),
            from_currency: expense.currency().to_string(),
            to_amount: converted,
            to_currency: target.to_string(),
        };
        info!(
            name = expense.name(),
            from_amount = change.from_amount,
            from_currency = %change.from_currency,
            to_amount = change.to_amount,
            to_currency = %change.to_currency,
            "expense currency converted"
        );
        expense.apply_conversion(converted, target);
        Ok(Some(change))
    }
}
