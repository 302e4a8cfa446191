//! Command line tooling for verifying withdrawal proofs and inspecting
//! commitment trees

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod cli;
pub mod commands;
pub mod errors;
pub mod utils;
