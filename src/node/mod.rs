//! Node bootstrap - genesis assembly and self-test

mod genesis;

pub use genesis::*;
