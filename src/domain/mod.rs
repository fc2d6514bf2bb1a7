pub mod ability;
pub mod product;

pub use ability::*;
pub use product::*;
