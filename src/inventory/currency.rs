//! Price input that works in minor units and renders grouped amounts.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::trace;

/// Currency symbol shown in front of every amount.
pub const CURRENCY_PREFIX: &str = "Rp";

/// Number formatting convention for displayed amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    /// `1.234,50`
    #[default]
    Indonesian,
    /// `1,234.50`
    English,
}

impl Locale {
    fn separators(self) -> (char, char) {
        match self {
            Locale::Indonesian => ('.', ','),
            Locale::English => (',', '.'),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Indonesian => f.write_str("id-ID"),
            Locale::English => f.write_str("en-US"),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id-ID" | "id" => Ok(Locale::Indonesian),
            "en-US" | "en" => Ok(Locale::English),
            other => Err(format!("unsupported locale '{other}' (expected id-ID or en-US)")),
        }
    }
}

/// Renders `amount` with thousands grouping and exactly two fraction digits.
pub fn format_amount(amount: Decimal, locale: Locale) -> String {
    let (group, point) = locale.separators();
    let fixed = format!("{:.2}", amount.round_dp(2));
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(group);
        }
        grouped.push(digit);
    }
    format!("{sign}{grouped}{point}{fraction}")
}

/// `Rp` followed by the grouped amount, as shown on product cards.
pub fn format_price(amount: Decimal, locale: Locale) -> String {
    format!("{CURRENCY_PREFIX}{}", format_amount(amount, locale))
}

/// Largest amount the price field can hold: every digit of the 96-bit
/// mantissa read as hundredths.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(u32::MAX, u32::MAX, u32::MAX, false, 2);

/// Interprets the digits of `raw` as hundredths. `Ok(None)` when there are
/// no digits; an error when the count does not fit.
fn minor_units(raw: &str) -> Result<Option<Decimal>, rust_decimal::Error> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Ok(None);
    }
    let mut amount = Decimal::from_str_exact(&digits)?;
    amount.set_scale(2)?;
    Ok(Some(amount))
}

/// State of the price field.
///
/// Every keystroke is reduced to its digits and read as minor units, so
/// typing `5`, `0`, `0` walks through `0,05`, `0,50`, `5,00`. The value
/// handed to the form is always fixed to two places (`"5.00"`) or empty.
#[derive(Debug, Clone, Default)]
pub struct CurrencyInput {
    locale: Locale,
    display: String,
    value: String,
}

impl CurrencyInput {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            display: String::new(),
            value: String::new(),
        }
    }

    /// Applies the raw field content after a keystroke and returns the
    /// value for the form. Input too long to represent is ignored.
    pub fn keystroke(&mut self, raw: &str) -> &str {
        self.apply(raw);
        &self.value
    }

    /// Reformats after the form value changed from outside, e.g. when an
    /// edit dialog is pre-filled.
    pub fn sync(&mut self, upstream: &str) {
        self.apply(upstream);
    }

    pub fn clear(&mut self) {
        self.display.clear();
        self.value.clear();
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    fn apply(&mut self, raw: &str) {
        match minor_units(raw) {
            Ok(Some(amount)) => {
                self.display = format_amount(amount, self.locale);
                self.value = format!("{amount:.2}");
            }
            Ok(None) => self.clear(),
            Err(e) => trace!(error = %e, "Price input out of range, keeping previous value"),
        }
    }
}
