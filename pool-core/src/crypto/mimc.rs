//! A MiMC-Feistel sponge over the BN254 scalar field, used to combine
//! commitment tree nodes

use alloc::vec::Vec;
use pool_common::{
    backends::{HashBackend, SpongeBackend},
    field::Scalar,
};

/// The number of rounds of the Feistel permutation
pub const MIMC_ROUNDS: usize = 220;

/// The seed of the round constant hash chain
pub const MIMC_SEED: &[u8] = b"mimcsponge";

/// A MiMC sponge with a two-element state, absorbing one element per
/// permutation and a zero key
#[derive(Clone, Debug)]
pub struct MimcSponge {
    /// The per-round additive constants. The first & last are zero.
    round_constants: Vec<Scalar>,
}

impl MimcSponge {
    /// Derives the round constants by iterating `H` over the seed
    pub fn new<H: HashBackend>() -> Self {
        let mut round_constants = Vec::with_capacity(MIMC_ROUNDS);
        round_constants.push(Scalar::ZERO);

        let mut digest = H::hash(MIMC_SEED);
        for _ in 1..MIMC_ROUNDS - 1 {
            digest = H::hash(&digest);
            round_constants.push(Scalar::from_be_bytes_mod_order(&digest));
        }

        round_constants.push(Scalar::ZERO);
        Self { round_constants }
    }

    /// The Feistel permutation, with an `x^5` round function
    fn permute(&self, mut left: Scalar, mut right: Scalar) -> (Scalar, Scalar) {
        let last_round = self.round_constants.len() - 1;
        for (round, constant) in self.round_constants.iter().enumerate() {
            let t = left + *constant;
            let t5 = t.square().square() * t;
            if round < last_round {
                (left, right) = (right + t5, left);
            } else {
                right += t5;
            }
        }

        (left, right)
    }
}

impl SpongeBackend for MimcSponge {
    fn hash(&self, inputs: [Scalar; 3]) -> Scalar {
        let (mut left, mut right) = (Scalar::ZERO, Scalar::ZERO);
        for input in inputs {
            (left, right) = self.permute(left + input, right);
        }

        left
    }
}
