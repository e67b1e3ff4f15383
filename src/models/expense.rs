//! Expense model
//!
//! An expense is a single recorded cost within a period. New expenses are
//! built from an [`ExpenseForm`], which holds the raw field values as the
//! user typed them and validates them into a [`ValidExpense`].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;

/// A single recorded cost entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier within the period
    pub id: ExpenseId,

    /// Short display title
    pub title: String,

    /// Amount spent, always positive
    pub price: f64,

    /// Free-form description
    pub description: String,
}

impl Expense {
    /// Create a new expense with a fresh id from validated fields
    pub fn new(fields: ValidExpense) -> Self {
        Self {
            id: ExpenseId::new(),
            title: fields.title,
            price: fields.price,
            description: fields.description,
        }
    }
}

/// Sum of prices over a list of expenses
pub fn total_of(expenses: &[Expense]) -> f64 {
    expenses.iter().map(|e| e.price).sum()
}

/// Fields of the add-expense form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Price,
    Description,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Title => write!(f, "title"),
            Field::Price => write!(f, "price"),
            Field::Description => write!(f, "description"),
        }
    }
}

/// Raw field values of an expense as entered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseForm {
    pub title: String,
    pub price: String,
    pub description: String,
}

impl ExpenseForm {
    pub fn new(
        title: impl Into<String>,
        price: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            price: price.into(),
            description: description.into(),
        }
    }

    /// Validate the form
    ///
    /// Every missing field is reported at once. The price is only parsed
    /// once nothing is missing. Title and description are kept as entered.
    pub fn validate(&self) -> Result<ValidExpense, ExpenseValidationError> {
        let missing: Vec<Field> = [
            (Field::Title, &self.title),
            (Field::Price, &self.price),
            (Field::Description, &self.description),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if !missing.is_empty() {
            return Err(ExpenseValidationError::MissingFields(missing));
        }

        let price_text = self.price.trim();
        let price = price_text
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p > 0.0)
            .ok_or_else(|| ExpenseValidationError::NonPositivePrice(price_text.to_string()))?;

        Ok(ValidExpense {
            title: self.title.clone(),
            price,
            description: self.description.clone(),
        })
    }
}

/// Expense fields that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidExpense {
    title: String,
    price: f64,
    description: String,
}

impl ValidExpense {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Reasons an expense form is rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    /// One or more required fields were left empty
    MissingFields(Vec<Field>),
    /// Price is not a number, or not above zero
    NonPositivePrice(String),
}

impl ExpenseValidationError {
    /// Fields reported as missing (empty for a price failure)
    pub fn missing_fields(&self) -> &[Field] {
        match self {
            Self::MissingFields(fields) => fields,
            Self::NonPositivePrice(_) => &[],
        }
    }
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields(fields) => {
                let names: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
                write!(f, "Please fill in the following fields: {}", names.join(", "))
            }
            Self::NonPositivePrice(value) => {
                write!(f, "Please enter a positive price (got '{}')", value)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
