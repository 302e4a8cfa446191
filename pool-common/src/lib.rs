//! Common modules used throughout the shielded pool, including the verifier,
//! the pool controller & testing code

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]
#![no_std]

extern crate alloc;

pub mod backends;
pub mod constants;
pub mod curve;
pub mod custom_serde;
pub mod field;
pub mod serde_def_types;
pub mod types;
