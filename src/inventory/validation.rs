//! Rules every add/edit submission must pass before the collection changes.

use std::num::IntErrorKind;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use super::currency::MAX_AMOUNT;
use super::error::{FieldErrors, ValidationError};
use crate::domain::{Product, ProductForm, ProductId, ValidatedProduct};

/// Lowest stock a product may be saved with.
pub const MIN_STOCK: i64 = 10;
/// Highest stock a product may be saved with.
pub const MAX_STOCK: i64 = u32::MAX as i64;

/// Checks a submitted form against the live collection.
///
/// `exclude` is the product being edited, which may keep its own name.
/// All three fields are checked independently and every violation is
/// reported, so the form can show them side by side.
pub fn validate(
    products: &[Product],
    form: &ProductForm,
    exclude: Option<ProductId>,
) -> Result<ValidatedProduct, FieldErrors> {
    let mut errors = FieldErrors::default();

    let name = form.name.trim();
    if name.is_empty() {
        errors.insert(ValidationError::NameRequired);
    } else if !is_name_unique(products, name, exclude) {
        errors.insert(ValidationError::NameTaken);
    }

    let price = parse_price(&form.price).and_then(|price| {
        if price <= Decimal::ZERO {
            Err(ValidationError::PriceNotPositive)
        } else if price > MAX_AMOUNT {
            Err(ValidationError::PriceTooLarge)
        } else {
            Ok(price)
        }
    });
    if let Err(e) = price {
        errors.insert(e);
    }

    let stock = parse_stock(&form.stock);
    if let Err(e) = stock {
        errors.insert(e);
    }

    match (price, stock) {
        (Ok(price), Ok(stock)) if errors.is_empty() => Ok(ValidatedProduct {
            name: name.to_string(),
            price,
            stock,
        }),
        _ => Err(errors),
    }
}

/// True when no live product other than `exclude` has the same name,
/// ignoring case.
pub fn is_name_unique(products: &[Product], name: &str, exclude: Option<ProductId>) -> bool {
    let wanted = name.to_lowercase();
    !products
        .iter()
        .any(|p| Some(p.id) != exclude && p.name.to_lowercase() == wanted)
}

/// Reads a price typed in free form.
///
/// Everything but digits, commas and periods is dropped, the first comma
/// becomes the decimal point, and the longest leading `digits[.digits]` run
/// is parsed. The result is rounded to cents. Only the sign of zero is
/// left for the caller to check.
pub fn parse_price(raw: &str) -> Result<Decimal, ValidationError> {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    let normalized = kept.replacen(',', ".", 1);

    let mut end = 0;
    let mut seen_point = false;
    let mut seen_digit = false;
    for (i, c) in normalized.char_indices() {
        if c.is_ascii_digit() {
            seen_digit = true;
            end = i + 1;
        } else if c == '.' && !seen_point {
            seen_point = true;
        } else {
            break;
        }
    }
    if !seen_digit {
        return Err(ValidationError::PriceNotPositive);
    }

    let prefix = &normalized[..end];
    let parsed = if prefix.starts_with('.') {
        Decimal::from_str(&format!("0{prefix}"))
    } else {
        Decimal::from_str(prefix)
    };
    // A well-formed digit run only fails to parse when it overflows.
    let value = parsed.map_err(|_| ValidationError::PriceTooLarge)?;
    Ok(value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// Reads a stock count between [`MIN_STOCK`] and [`MAX_STOCK`].
pub fn parse_stock(raw: &str) -> Result<u32, ValidationError> {
    let count: i64 = raw.trim().parse().map_err(|e: std::num::ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow => ValidationError::StockTooLarge,
        _ => ValidationError::StockBelowMinimum,
    })?;
    if count < MIN_STOCK {
        return Err(ValidationError::StockBelowMinimum);
    }
    u32::try_from(count).map_err(|_| ValidationError::StockTooLarge)
}
