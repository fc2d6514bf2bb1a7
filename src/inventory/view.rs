//! Filtered and sorted projection of the collection for display.

use std::fmt;
use std::str::FromStr;

use crate::domain::Product;

/// Ordering applied after filtering. Sorting is stable, so ties keep
/// collection order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortMode {
    #[default]
    Default,
    PriceAscending,
    PriceDescending,
    StockAscending,
    StockDescending,
}

impl SortMode {
    pub const ALL: [SortMode; 5] = [
        SortMode::Default,
        SortMode::PriceAscending,
        SortMode::PriceDescending,
        SortMode::StockAscending,
        SortMode::StockDescending,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Default => "default",
            SortMode::PriceAscending => "price-asc",
            SortMode::PriceDescending => "price-desc",
            SortMode::StockAscending => "stock-asc",
            SortMode::StockDescending => "stock-desc",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| {
                format!("unknown sort mode '{s}' (expected default, price-asc, price-desc, stock-asc or stock-desc)")
            })
    }
}

/// Rows whose name contains `term` (ignoring case), ordered by `sort`.
/// The source slice is left untouched.
pub fn derive_view(products: &[Product], term: &str, sort: SortMode) -> Vec<Product> {
    let needle = term.to_lowercase();
    let mut rows: Vec<Product> = products
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    match sort {
        SortMode::Default => {}
        SortMode::PriceAscending => rows.sort_by(|a, b| a.price.cmp(&b.price)),
        SortMode::PriceDescending => rows.sort_by(|a, b| b.price.cmp(&a.price)),
        SortMode::StockAscending => rows.sort_by_key(|p| p.stock),
        SortMode::StockDescending => rows.sort_by(|a, b| b.stock.cmp(&a.stock)),
    }
    rows
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ViewKey {
    revision: u64,
    term: String,
    sort: SortMode,
}

/// Remembers the last computed view and reuses it while the collection
/// revision, search term and sort mode stay the same.
#[derive(Debug, Default)]
pub struct ViewCache {
    last: Option<(ViewKey, Vec<Product>)>,
}

impl ViewCache {
    pub fn view(&mut self, products: &[Product], revision: u64, term: &str, sort: SortMode) -> &[Product] {
        let key = ViewKey {
            revision,
            term: term.to_string(),
            sort,
        };
        let stale = self.last.as_ref().map_or(true, |(cached, _)| *cached != key);
        if stale {
            let rows = derive_view(products, term, sort);
            self.last = Some((key, rows));
        }
        match &self.last {
            Some((_, rows)) => rows,
            None => &[],
        }
    }

    pub fn is_cached(&self, revision: u64, term: &str, sort: SortMode) -> bool {
        self.last.as_ref().is_some_and(|(key, _)| {
            key.revision == revision && key.term == term && key.sort == sort
        })
    }
}
