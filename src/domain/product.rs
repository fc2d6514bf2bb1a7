use std::fmt;

use rust_decimal::Decimal;

/// Identifier minted by the inventory when a product is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents a product in the inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
}

impl Product {
    pub fn new(id: u64, name: impl Into<String>, price: Decimal, stock: u32) -> Self {
        Self {
            id: ProductId(id),
            name: name.into(),
            price,
            stock,
        }
    }
}

/// Raw text as submitted from the add/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub stock: String,
}

impl ProductForm {
    pub fn new(name: impl Into<String>, price: impl Into<String>, stock: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            stock: stock.into(),
        }
    }

    /// Pre-fills the form from a stored product. The price is fixed to two
    /// places so the currency input reads it back as the same amount.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            price: format!("{:.2}", product.price),
            stock: product.stock.to_string(),
        }
    }
}

/// A form that passed validation: normalized and ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedProduct {
    pub name: String,
    pub price: Decimal,
    pub stock: u32,
}
