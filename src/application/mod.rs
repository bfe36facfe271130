//! Application layer: composition of harness services with their adapters.

pub mod harness;

pub use harness::Harness;
