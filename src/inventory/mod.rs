//! Inventory core: the owned product collection, write validation, the
//! derived display view and the price input.

pub mod currency;
pub mod error;
mod store;
pub mod validation;
pub mod view;

pub use currency::{format_amount, format_price, CurrencyInput, Locale, MAX_AMOUNT};
pub use error::{Field, FieldErrors, InventoryError, ValidationError};
pub use store::Inventory;
pub use validation::{validate, MAX_STOCK, MIN_STOCK};
pub use view::{derive_view, SortMode, ViewCache};
