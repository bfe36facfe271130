//! Adapters that implement the domain ports outside of production wiring.

pub mod mock;
