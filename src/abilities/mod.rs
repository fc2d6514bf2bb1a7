//! Read-only browser over the public ability listing.

pub mod api;
mod browser;
pub mod error;

pub use api::{AbilityApi, HttpAbilityApi, DEFAULT_BASE_URL, PAGE_LIMIT};
pub use browser::{AbilityBrowser, DetailTicket};
pub use error::ApiError;
