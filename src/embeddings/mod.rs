//! Embedding support: the provider contract and vector plumbing.
//!
//! Actual embedding models live outside this crate; a collection only
//! needs a batch text→vector function. This module defines that contract
//! ([`Embedder`]) and the vector codec shared by the storage layer.

pub mod provider;
pub mod vector;

pub use provider::Embedder;
