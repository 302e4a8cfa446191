//! Deposit & withdrawal scenarios over an in-memory store

use eyre::{eyre, Result};
use pool_common::{
    custom_serde::BytesSerializable,
    field::Scalar,
    types::{PublicInputs, VerificationKey},
};
use pool_core::{
    backends::NativeHasher,
    crypto::{
        merkle::{CommitmentTree, ProdMerkleParams},
        mimc::MimcSponge,
    },
};
use rand::{thread_rng, Rng};
use shielded_pool::{
    errors::PoolError,
    inputs::WithdrawalRequest,
    pool::ShieldedPool,
    scope::{ScopeKey, TokenInfo},
    store::MemoryStore,
};
use test_helpers::{
    misc::{random_scalar, random_word},
    proof_system::{gen_withdrawal_instance, recipient_word, NativeVerifier},
};

/// The recipient the fixture proofs pay out to
const RECIPIENT: u64 = 0x5e5e_1234_abcd;

/// The tokens the test pools accept
fn tokens() -> Vec<TokenInfo> {
    vec![TokenInfo {
        symbol: "EOS".to_string(),
        precision: 4,
        quantity_min: 100_000,
        quantity_max: 10_000_000_000,
        quantity_step: 10,
    }]
}

/// A pool with one deposit, and a withdrawal of that deposit whose proof
/// verifies against the pool's key
struct Scenario {
    pool: ShieldedPool<MemoryStore>,
    vkey: VerificationKey,
    scope: ScopeKey,
    root: Scalar,
    nullifier: [u8; 32],
    request: WithdrawalRequest,
}

/// Builds the scenario. The fixture key is only known once the proof is, so
/// the root after the first deposit is computed ahead of the pool.
fn setup(rng: &mut impl Rng) -> Result<Scenario> {
    let commitment = random_scalar(rng);
    let nullifier = random_word(rng);

    let sponge = MimcSponge::new::<NativeHasher>();
    let root = CommitmentTree::<ProdMerkleParams>::new()
        .insert(commitment, &sponge)
        .map_err(|e| eyre!("{e}"))?;

    let instance = gen_withdrawal_instance(root, nullifier, RECIPIENT, rng)?;
    let mut pool: ShieldedPool<MemoryStore> =
        ShieldedPool::new(instance.vkey, tokens(), MemoryStore::default())?;

    let scope = pool.scope_for("EOS", 1_000_000)?;
    let deposit_root = pool.deposit_commitment(&scope, &commitment.to_be_bytes())?;
    assert_eq!(deposit_root, root);

    let request = WithdrawalRequest {
        proof: instance.proof.serialize_to_bytes(),
        public_inputs: instance.public_inputs.0.iter().map(|word| word.to_vec()).collect(),
        claimed_root: root.to_be_bytes(),
        recipient: RECIPIENT,
    };

    Ok(Scenario { pool, vkey: instance.vkey, scope, root, nullifier, request })
}

/// Asserts that the withdrawal fails with the given error and leaves the
/// store untouched
fn assert_rejected(
    pool: &mut ShieldedPool<MemoryStore>,
    scope: &ScopeKey,
    request: &WithdrawalRequest,
    expected: PoolError,
) {
    let store_before = pool.store().clone();
    assert_eq!(pool.withdraw(scope, request), Err(expected));
    assert_eq!(pool.store(), &store_before);
}

#[test]
fn test_withdraw_then_replay() -> Result<()> {
    let mut rng = thread_rng();
    let Scenario { mut pool, vkey, scope, root, nullifier, request } = setup(&mut rng)?;

    assert!(pool.is_known_root(&scope, &root.to_be_bytes())?);
    assert!(!pool.is_spent(&scope, &nullifier)?);

    pool.withdraw(&scope, &request)?;
    assert!(pool.is_spent(&scope, &nullifier)?);

    // The proof still verifies on its own, but its nullifier is spent
    let public_inputs =
        PublicInputs::from_slices(&request.public_inputs).map_err(|e| eyre!("{e}"))?;
    assert!(NativeVerifier::verify_bytes(&vkey, &request.proof, &public_inputs));
    assert_rejected(&mut pool, &scope, &request, PoolError::ReplayRejected);

    Ok(())
}

#[test]
fn test_duplicate_commitment_rejected() -> Result<()> {
    let mut rng = thread_rng();
    let Scenario { mut pool, scope, .. } = setup(&mut rng)?;

    let commitment = random_scalar(&mut rng).to_be_bytes();
    pool.deposit_commitment(&scope, &commitment)?;
    assert_eq!(pool.next_leaf_index(&scope)?, 2);

    let store_before = pool.store().clone();
    assert_eq!(pool.deposit_commitment(&scope, &commitment), Err(PoolError::ReplayRejected));
    assert_eq!(pool.store(), &store_before);
    assert_eq!(pool.next_leaf_index(&scope)?, 2);

    Ok(())
}

#[test]
fn test_malformed_commitment_rejected() -> Result<()> {
    let mut rng = thread_rng();
    let Scenario { mut pool, scope, .. } = setup(&mut rng)?;

    assert!(matches!(
        pool.deposit_commitment(&scope, &[1u8; 31]),
        Err(PoolError::MalformedInput(_))
    ));
    // Not a canonical field element
    assert!(matches!(
        pool.deposit_commitment(&scope, &[0xff; 32]),
        Err(PoolError::MalformedInput(_))
    ));
    assert_eq!(pool.next_leaf_index(&scope)?, 1);

    Ok(())
}

#[test]
fn test_unknown_root_rejected() -> Result<()> {
    let mut rng = thread_rng();
    let Scenario { mut pool, scope, request, .. } = setup(&mut rng)?;

    // A claimed root that was never a root of the scope's tree
    let mut unknown = request.clone();
    unknown.claimed_root = random_word(&mut rng);
    unknown.public_inputs[0] = unknown.claimed_root.to_vec();
    assert_rejected(&mut pool, &scope, &unknown, PoolError::UnknownAnchor);

    // A known root that is not the one the proof commits to
    let mut mismatched = request.clone();
    mismatched.public_inputs[0] = random_word(&mut rng).to_vec();
    assert_rejected(&mut pool, &scope, &mismatched, PoolError::UnknownAnchor);

    Ok(())
}

#[test]
fn test_empty_scope_has_no_anchor() -> Result<()> {
    let mut rng = thread_rng();
    let Scenario { mut pool, request, .. } = setup(&mut rng)?;

    // The same withdrawal, against a scope no deposit has been made in
    let other_scope = pool.scope_for("EOS", 100_000)?;
    assert_eq!(pool.next_leaf_index(&other_scope)?, 0);
    assert_rejected(&mut pool, &other_scope, &request, PoolError::UnknownAnchor);

    Ok(())
}

#[test]
fn test_wrong_recipient_rejected() -> Result<()> {
    let mut rng = thread_rng();
    let Scenario { mut pool, scope, nullifier, request, .. } = setup(&mut rng)?;

    let mut redirected = request.clone();
    redirected.recipient = RECIPIENT + 1;
    assert_rejected(&mut pool, &scope, &redirected, PoolError::WrongRecipient);

    // Public inputs rewritten to the new recipient no longer match the proof
    redirected.public_inputs[2] = recipient_word(RECIPIENT + 1).to_vec();
    assert_rejected(&mut pool, &scope, &redirected, PoolError::ProofRejected);

    assert!(!pool.is_spent(&scope, &nullifier)?);
    pool.withdraw(&scope, &request)?;

    Ok(())
}

#[test]
fn test_invalid_proof_rejected() -> Result<()> {
    let mut rng = thread_rng();
    let Scenario { mut pool, scope, nullifier, request, .. } = setup(&mut rng)?;

    let mut tampered = request.clone();
    let last = tampered.proof.len() - 1;
    tampered.proof[last] ^= 1;
    assert_rejected(&mut pool, &scope, &tampered, PoolError::ProofRejected);

    let mut truncated = request.clone();
    truncated.proof.pop();
    let store_before = pool.store().clone();
    assert!(matches!(pool.withdraw(&scope, &truncated), Err(PoolError::MalformedInput(_))));
    assert_eq!(pool.store(), &store_before);

    // Rejections leave the nullifier unspent
    assert!(!pool.is_spent(&scope, &nullifier)?);
    pool.withdraw(&scope, &request)?;

    Ok(())
}

#[test]
fn test_malformed_public_inputs_rejected() -> Result<()> {
    let mut rng = thread_rng();
    let Scenario { mut pool, scope, request, .. } = setup(&mut rng)?;

    let mut missing = request.clone();
    missing.public_inputs.pop();
    assert!(matches!(pool.withdraw(&scope, &missing), Err(PoolError::MalformedInput(_))));

    let mut short = request.clone();
    short.public_inputs[1].pop();
    assert!(matches!(pool.withdraw(&scope, &short), Err(PoolError::MalformedInput(_))));

    Ok(())
}

#[test]
fn test_unsupported_scopes_rejected() -> Result<()> {
    let mut rng = thread_rng();
    let Scenario { mut pool, scope, request, .. } = setup(&mut rng)?;

    assert_eq!(pool.scope_for("PEOS", 1_000_000), Err(PoolError::UnsupportedToken));
    assert_eq!(pool.scope_for("EOS", 1_500_000), Err(PoolError::InvalidQuantity));

    let foreign = ScopeKey { symbol: "PEOS".to_string(), ..scope.clone() };
    assert_eq!(
        pool.deposit_commitment(&foreign, &random_word(&mut rng)),
        Err(PoolError::UnsupportedToken)
    );

    let oversized = ScopeKey { denomination: 6, ..scope };
    assert_eq!(pool.withdraw(&oversized, &request), Err(PoolError::InvalidQuantity));

    Ok(())
}
