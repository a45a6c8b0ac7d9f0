use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// The closed set of expense classifications, declared in reporting order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Food,
    Rent,
    Groceries,
    Utilities,
    Transportation,
    Entertainment,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Rent,
        Category::Groceries,
        Category::Utilities,
        Category::Transportation,
        Category::Entertainment,
        Category::Other,
    ];

    /// Lowercase name used for membership checks.
    pub fn canonical_name(self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Rent => "rent",
            Category::Groceries => "groceries",
            Category::Utilities => "utilities",
            Category::Transportation => "transportation",
            Category::Entertainment => "entertainment",
            Category::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Rent => "Rent",
            Category::Groceries => "Groceries",
            Category::Utilities => "Utilities",
            Category::Transportation => "Transportation",
            Category::Entertainment => "Entertainment",
            Category::Other => "Other",
        }
    }

    /// Case-insensitive lookup against the canonical names.
    pub fn from_name(name: &str) -> Option<Self> {
        let lowered = name.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.canonical_name() == lowered)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ValidationError::InvalidCategory(s.to_string()))
    }
}
