//! P2P surface - DNS seeds and peer capability predicates

mod seeds;
mod version;

pub use seeds::*;
pub use version::*;
