pub mod book;
pub mod defaults;
pub mod loader;
pub mod types;

pub use book::PricingBook;
pub use defaults::{default_bundles, default_modules};
pub use loader::ConfigLoader;
pub use types::*;
