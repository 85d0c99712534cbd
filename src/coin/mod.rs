//! Coin module - the definition trait, extension points, shipped coins and
//! the active-coin registry

mod definition;
mod extensions;
pub mod litecoin;
mod registry;

pub use definition::*;
pub use extensions::*;
pub use litecoin::{LitecoinChainExtension, LitecoinDefinition};
pub use registry::*;
