//! Implementations of the CLI commands

use pool_common::{
    constants::MERKLE_HEIGHT,
    custom_serde::BytesDeserializable,
    field::Scalar,
    types::{Proof, PublicInputs},
};
use pool_core::{
    backends::{ArkG1ArithmeticBackend, NativeHasher},
    crypto::{
        merkle::{empty_subtree_root, CommitmentTree, ProdMerkleParams},
        mimc::MimcSponge,
    },
    verifier::Verifier,
};
use shielded_pool::config::load_verification_key;
use tracing::{debug, info};

use crate::{
    cli::{TreeRootArgs, VerifyArgs},
    errors::ScriptError,
    utils::{parse_hex, parse_scalar, parse_word},
};

/// The verifier over the native backends
type NativeVerifier = Verifier<ArkG1ArithmeticBackend, NativeHasher>;

/// Verifies a proof, printing whether it is valid
pub fn verify(args: VerifyArgs) -> Result<(), ScriptError> {
    let vkey =
        load_verification_key(&args.vkey).map_err(|e| ScriptError::VkeyLoading(e.to_string()))?;
    debug!(n_public = vkey.n_public, power = vkey.power, "loaded verification key");

    let proof_bytes = parse_hex(&args.proof)?;
    let proof = Proof::deserialize_from_bytes(&proof_bytes)
        .map_err(|e| ScriptError::InvalidInput(format!("proof: {}", e)))?;

    let public_inputs = PublicInputs(
        args.public_inputs.iter().map(|s| parse_word(s)).collect::<Result<Vec<_>, _>>()?,
    );
    if public_inputs.len() as u64 != vkey.n_public {
        return Err(ScriptError::InvalidInput(format!(
            "expected {} public inputs, got {}",
            vkey.n_public,
            public_inputs.len()
        )));
    }

    let valid = NativeVerifier::verify(&vkey, &proof, &public_inputs)
        .map_err(|e| ScriptError::Verification(e.to_string()))?;

    info!(valid, "verified proof");
    println!("{}", if valid { "valid" } else { "invalid" });
    Ok(())
}

/// Inserts the leaves into a fresh production-height tree, printing the
/// root after each insertion
pub fn tree_root(args: TreeRootArgs) -> Result<(), ScriptError> {
    let leaves = args.leaves.iter().map(|s| parse_scalar(s)).collect::<Result<Vec<_>, _>>()?;

    for (index, root) in tree_roots(&leaves)?.into_iter().enumerate() {
        println!("{}: {}", index, hex::encode(root.to_be_bytes()));
    }

    Ok(())
}

/// The roots of a fresh production-height tree after each insertion
pub fn tree_roots(leaves: &[Scalar]) -> Result<Vec<Scalar>, ScriptError> {
    let sponge = MimcSponge::new::<NativeHasher>();
    let mut tree = CommitmentTree::<ProdMerkleParams>::new();

    leaves
        .iter()
        .map(|leaf| {
            tree.insert(*leaf, &sponge).map_err(|e| ScriptError::TreeInsertion(e.to_string()))
        })
        .collect()
}

/// Prints the empty subtree root of every level, from the leaves to the root
pub fn empty_roots() -> Result<(), ScriptError> {
    for (level, root) in empty_root_table().into_iter().enumerate() {
        println!("{}: {}", level, hex::encode(root.to_be_bytes()));
    }

    Ok(())
}

/// The empty subtree root of every level of a production-height tree,
/// including the root level
pub fn empty_root_table() -> Vec<Scalar> {
    (0..=MERKLE_HEIGHT).filter_map(empty_subtree_root).collect()
}
