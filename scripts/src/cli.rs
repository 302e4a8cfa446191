//! Definitions of CLI arguments and commands

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{
    commands::{empty_roots, tree_root, verify},
    errors::ScriptError,
};

/// Tooling for the shielded pool's proofs & commitment trees
#[derive(Parser)]
#[command(name = "pool-cli")]
pub struct Cli {
    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

/// The available commands
#[derive(Subcommand)]
pub enum Command {
    /// Verify a withdrawal proof
    Verify(VerifyArgs),
    /// Insert leaves into a fresh tree, printing the root after each insertion
    TreeRoot(TreeRootArgs),
    /// Print the empty subtree root of every level
    EmptyRoots,
}

impl Command {
    /// Runs the command
    pub fn run(self) -> Result<(), ScriptError> {
        match self {
            Command::Verify(args) => verify(args),
            Command::TreeRoot(args) => tree_root(args),
            Command::EmptyRoots => empty_roots(),
        }
    }
}

/// Verify a proof against a snarkjs verification key
#[derive(Args)]
pub struct VerifyArgs {
    /// Path of the snarkjs `verification_key.json`
    #[arg(long, env = "POOL_VKEY")]
    pub vkey: PathBuf,

    /// The 880-byte proof, in hex
    #[arg(long)]
    pub proof: String,

    /// A public input, as up to 32 big-endian bytes in hex.
    /// Repeat the flag for each input, in order.
    #[arg(long = "public-input")]
    pub public_inputs: Vec<String>,
}

/// Compute the roots of a production-height tree
#[derive(Args)]
pub struct TreeRootArgs {
    /// A leaf, as up to 32 big-endian bytes in hex.
    /// Repeat the flag for each leaf, in insertion order.
    #[arg(long = "leaf", required = true)]
    pub leaves: Vec<String>,
}
