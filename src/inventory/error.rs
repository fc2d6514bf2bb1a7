use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::domain::ProductId;

/// Form field a validation message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Price,
    Stock,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Name => "name",
            Field::Price => "price",
            Field::Stock => "stock",
        };
        f.write_str(name)
    }
}

/// A single rule violation, shown next to the offending input.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name is required")]
    NameRequired,
    #[error("name already registered")]
    NameTaken,
    #[error("price may not be zero")]
    PriceNotPositive,
    #[error("price is too large")]
    PriceTooLarge,
    #[error("stock may not be negative or below 10")]
    StockBelowMinimum,
    #[error("stock may not exceed 4294967295")]
    StockTooLarge,
}

impl ValidationError {
    pub fn field(&self) -> Field {
        match self {
            ValidationError::NameRequired | ValidationError::NameTaken => Field::Name,
            ValidationError::PriceNotPositive | ValidationError::PriceTooLarge => Field::Price,
            ValidationError::StockBelowMinimum | ValidationError::StockTooLarge => Field::Stock,
        }
    }
}

/// Every violation found in one submission, keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, ValidationError>);

impl FieldErrors {
    pub fn insert(&mut self, error: ValidationError) {
        self.0.insert(error.field(), error);
    }

    pub fn get(&self, field: Field) -> Option<ValidationError> {
        self.0.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, ValidationError)> + '_ {
        self.0.iter().map(|(field, error)| (*field, *error))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, error) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {error}")?;
            first = false;
        }
        Ok(())
    }
}

/// Errors returned by inventory operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    #[error("product not found: {0}")]
    NotFound(ProductId),
    #[error("no product form is open")]
    FormClosed,
    #[error("inventory service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl From<FieldErrors> for InventoryError {
    fn from(errors: FieldErrors) -> Self {
        InventoryError::Validation(errors)
    }
}
