//! The shielded pool controller: per-scope commitment trees & anchor sets,
//! driven by deposits of commitments and proof-gated withdrawals

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod config;
pub mod errors;
pub mod inputs;
pub mod pool;
pub mod scope;
pub mod store;
