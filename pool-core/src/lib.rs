//! Core shielded pool functionality: proof verification & the per-scope
//! commitment tree, defined agnostically of the storage it runs over

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]
#![no_std]

extern crate alloc;

pub mod anchors;
pub mod backends;
pub mod crypto;
pub mod transcript;
pub mod verifier;
