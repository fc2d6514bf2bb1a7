//! Product inventory with validated writes, a debounced and sorted view,
//! and a read-only browser for creature abilities.

pub mod abilities;
pub mod actors;
pub mod app_system;
pub mod clients;
pub mod config;
pub mod dashboard;
pub mod debounce;
pub mod domain;
pub mod inventory;
pub mod messages;
pub mod shell;

#[cfg(test)]
mod mock_framework;
#[cfg(test)]
mod integration_tests;
