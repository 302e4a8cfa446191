//! The pool controller, driving deposits & withdrawals over per-scope state

use std::marker::PhantomData;

use pool_common::{
    backends::{G1ArithmeticBackend, HashBackend},
    constants::{NUM_BYTES_FELT, NUM_WITHDRAWAL_PUBLIC_INPUTS},
    custom_serde::BytesDeserializable,
    field::Scalar,
    types::{Proof, VerificationKey},
};
use pool_core::{
    backends::{ArkG1ArithmeticBackend, NativeHasher},
    crypto::mimc::MimcSponge,
    verifier::Verifier,
};
use tracing::{debug, info, warn};

use crate::{
    config::PoolConfig,
    errors::PoolError,
    inputs::{WithdrawalPublicInputs, WithdrawalRequest},
    scope::{validate_tokens, ScopeKey, TokenInfo},
    store::{ScopeState, ScopeStore},
};

/// A shielded pool over a scope store, defined generically over the curve
/// arithmetic & hashing backends its verifier runs on
pub struct ShieldedPool<S: ScopeStore, G = ArkG1ArithmeticBackend, H = NativeHasher>
where
    G: G1ArithmeticBackend,
    H: HashBackend,
{
    /// The withdrawal circuit's verification key
    vkey: VerificationKey,
    /// The tokens the pool accepts
    tokens: Vec<TokenInfo>,
    /// The sponge combining commitment tree nodes
    sponge: MimcSponge,
    /// The per-scope state
    store: S,
    #[doc(hidden)]
    _phantom: PhantomData<(G, H)>,
}

impl<S: ScopeStore, G: G1ArithmeticBackend, H: HashBackend> ShieldedPool<S, G, H> {
    /// Creates a pool over the given store
    pub fn new(vkey: VerificationKey, tokens: Vec<TokenInfo>, store: S) -> Result<Self, PoolError> {
        vkey.validate().map_err(|e| PoolError::Config(e.to_string()))?;
        if vkey.n_public != NUM_WITHDRAWAL_PUBLIC_INPUTS as u64 {
            return Err(PoolError::Config(format!(
                "withdrawal key expects {} public inputs",
                vkey.n_public
            )));
        }

        validate_tokens(&tokens)?;

        Ok(Self { vkey, tokens, sponge: MimcSponge::new::<H>(), store, _phantom: PhantomData })
    }

    /// Creates a pool from its configuration
    pub fn from_config(config: &PoolConfig, store: S) -> Result<Self, PoolError> {
        let vkey = config.load_verification_key()?;
        Self::new(vkey, config.tokens.clone(), store)
    }

    /// The underlying scope store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The scope holding deposits of `quantity` units of `symbol`
    pub fn scope_for(&self, symbol: &str, quantity: u64) -> Result<ScopeKey, PoolError> {
        ScopeKey::derive(&self.tokens, symbol, quantity)
    }

    /// Inserts a commitment into the scope's tree, returning the new root
    pub fn deposit_commitment(
        &mut self,
        scope: &ScopeKey,
        commitment: &[u8],
    ) -> Result<Scalar, PoolError> {
        self.check_scope(scope)?;

        let commitment: [u8; NUM_BYTES_FELT] = commitment
            .try_into()
            .map_err(|_| PoolError::MalformedInput("commitment is not 32 bytes".to_string()))?;
        let leaf = Scalar::from_be_bytes(&commitment).ok_or_else(|| {
            PoolError::MalformedInput("commitment is not a field element".to_string())
        })?;

        let mut state = ScopeState::load(&self.store, scope)?;
        if !state.anchors.commitments.insert_if_absent(commitment) {
            warn!(%scope, "rejected deposit of a known commitment");
            return Err(PoolError::ReplayRejected);
        }

        let leaf_index = state.tree.next_leaf_index();
        let root = state.tree.insert(leaf, &self.sponge)?;
        state.anchors.roots.insert_if_absent(root.to_be_bytes());
        state.store(&mut self.store, scope)?;

        info!(%scope, leaf_index, %root, "deposited commitment");
        Ok(root)
    }

    /// Withdraws a deposit from the scope, recording its nullifier.
    ///
    /// The root, recipient & nullifier are checked before the proof, so
    /// that cheap rejections never pay for verification.
    pub fn withdraw(&mut self, scope: &ScopeKey, request: &WithdrawalRequest) -> Result<(), PoolError> {
        self.check_scope(scope)?;

        let public_inputs = WithdrawalPublicInputs::parse(&request.public_inputs)?;
        let mut state = ScopeState::load(&self.store, scope)?;

        if request.claimed_root != public_inputs.root
            || !state.anchors.roots.contains(&request.claimed_root)
        {
            warn!(%scope, "rejected withdrawal against an unknown root");
            return Err(PoolError::UnknownAnchor);
        }

        if public_inputs.recipient_id() != Some(request.recipient) {
            warn!(%scope, recipient = request.recipient, "rejected withdrawal to the wrong recipient");
            return Err(PoolError::WrongRecipient);
        }

        if !state.anchors.nullifiers.insert_if_absent(public_inputs.nullifier) {
            warn!(%scope, "rejected withdrawal of a spent nullifier");
            return Err(PoolError::ReplayRejected);
        }

        let proof = Proof::deserialize_from_bytes(&request.proof)
            .map_err(|e| PoolError::MalformedInput(format!("proof: {}", e)))?;
        match Verifier::<G, H>::verify(&self.vkey, &proof, &public_inputs.to_public_inputs()) {
            Ok(true) => {},
            Ok(false) => {
                warn!(%scope, "rejected withdrawal with an invalid proof");
                return Err(PoolError::ProofRejected);
            },
            Err(e) => {
                warn!(%scope, error = %e, "proof verification failed");
                return Err(PoolError::ProofRejected);
            },
        }

        state.store(&mut self.store, scope)?;

        info!(%scope, recipient = request.recipient, "withdrew deposit");
        Ok(())
    }

    /// Whether the root is a historical root of the scope's tree
    pub fn is_known_root(&self, scope: &ScopeKey, root: &[u8; NUM_BYTES_FELT]) -> Result<bool, PoolError> {
        Ok(ScopeState::load(&self.store, scope)?.anchors.roots.contains(root))
    }

    /// Whether the nullifier has been spent in the scope
    pub fn is_spent(&self, scope: &ScopeKey, nullifier: &[u8; NUM_BYTES_FELT]) -> Result<bool, PoolError> {
        Ok(ScopeState::load(&self.store, scope)?.anchors.nullifiers.contains(nullifier))
    }

    /// The index at which the scope's next deposit will be inserted
    pub fn next_leaf_index(&self, scope: &ScopeKey) -> Result<u64, PoolError> {
        Ok(ScopeState::load(&self.store, scope)?.tree.next_leaf_index())
    }

    /// Checks that the scope belongs to a supported token & denomination
    fn check_scope(&self, scope: &ScopeKey) -> Result<(), PoolError> {
        let token = self
            .tokens
            .iter()
            .find(|token| token.symbol == scope.symbol && token.precision == scope.precision)
            .ok_or(PoolError::UnsupportedToken)?;

        if token.denomination(scope.denomination).is_none() {
            debug!(%scope, "scope outside of the token's denominations");
            return Err(PoolError::InvalidQuantity);
        }

        Ok(())
    }
}
