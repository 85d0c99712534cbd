//! Consensus module - Parameters, block hashing, difficulty, rewards and checkpoints

mod block;
mod checkpoints;
mod difficulty;
mod hasher;
mod params;
mod rewards;

pub use block::*;
pub use checkpoints::*;
pub use difficulty::*;
pub use hasher::*;
pub use params::*;
pub use rewards::*;
