//! Cryptographic primitives backing the commitment tree

pub mod merkle;
pub mod mimc;
