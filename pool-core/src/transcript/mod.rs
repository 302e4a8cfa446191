//! A simple transcript used for computing challenge values via the Fiat-Shamir transformation.
//!
//! Each challenge is the hash of everything absorbed since the previous
//! challenge, reduced into the scalar field.

pub mod errors;

use alloc::vec::Vec;
use core::marker::PhantomData;
use pool_common::{
    backends::HashBackend,
    constants::NUM_OPENING_CHALLENGES,
    custom_serde::BytesSerializable,
    field::Scalar,
    types::{Challenges, Proof, PublicInputs},
};

use self::errors::TranscriptError;

/// The Fiat-Shamir transcript used in the Plonk protocol.
///
/// Defined generically over the hashing implementation.
pub struct Transcript<H: HashBackend> {
    /// The data absorbed since the last challenge was squeezed
    transcript: Vec<u8>,
    #[doc(hidden)]
    _phantom: PhantomData<H>,
}

impl<H: HashBackend> Transcript<H> {
    /// Creates a new, empty transcript
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Transcript { transcript: Vec::new(), _phantom: PhantomData }
    }

    /// Appends a message to the transcript
    pub fn append_message(&mut self, message: &[u8]) {
        self.transcript.extend_from_slice(message);
    }

    /// Appends a serializable type to the transcript
    pub fn append_serializable<S: BytesSerializable>(&mut self, message: &S) {
        self.append_message(&message.serialize_to_bytes());
    }

    /// Hashes the data absorbed this round into a challenge, starting a new round
    pub fn squeeze_challenge(&mut self) -> Result<Scalar, TranscriptError> {
        if self.transcript.is_empty() {
            return Err(TranscriptError::EmptyRound);
        }

        let digest = H::hash(&self.transcript);
        self.transcript.clear();
        Ok(Scalar::from_be_bytes_mod_order(&digest))
    }

    /// Computes all the challenges used in the Plonk protocol,
    /// given a proof and a set of public inputs.
    ///
    /// The verification key is not absorbed.
    pub fn compute_plonk_challenges(
        &mut self,
        proof: &Proof,
        public_inputs: &PublicInputs,
    ) -> Result<Challenges, TranscriptError> {
        // Round 1: public inputs & wire commitments
        self.append_serializable(public_inputs);
        self.append_serializable(&proof.a);
        self.append_serializable(&proof.b);
        self.append_serializable(&proof.c);
        let beta = self.squeeze_challenge()?;

        self.append_serializable(&beta);
        let gamma = self.squeeze_challenge()?;

        // Round 2: grand product commitment
        self.append_serializable(&proof.z);
        let alpha = self.squeeze_challenge()?;

        // Round 3: split quotient commitments
        self.append_serializable(&proof.t1);
        self.append_serializable(&proof.t2);
        self.append_serializable(&proof.t3);
        let xi = self.squeeze_challenge()?;

        // Round 4: evaluations
        for eval in proof.evaluations() {
            self.append_serializable(&eval);
        }
        let v0 = self.squeeze_challenge()?;
        let mut v = [v0; NUM_OPENING_CHALLENGES];
        for i in 1..NUM_OPENING_CHALLENGES {
            v[i] = v[i - 1] * v0;
        }

        // Round 5: opening proofs
        self.append_serializable(&proof.w_xi);
        self.append_serializable(&proof.w_xi_omega);
        let u = self.squeeze_challenge()?;

        Ok(Challenges { beta, gamma, alpha, xi, v, u })
    }
}
