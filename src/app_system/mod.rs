//! System orchestration, startup, and shutdown logic.

mod logging;
mod store_system;

pub use logging::setup_tracing;
pub use store_system::StoreSystem;
