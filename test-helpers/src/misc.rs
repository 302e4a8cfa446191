//! Miscellaneous test helpers

use ark_bn254::Fr;
use ark_std::UniformRand;
use pool_common::{curve::field_to_scalar, field::Scalar};
use rand::Rng;

pub fn random_scalar(rng: &mut impl Rng) -> Scalar {
    field_to_scalar(&Fr::rand(rng))
}

pub fn random_scalars(n: usize, rng: &mut impl Rng) -> Vec<Scalar> {
    (0..n).map(|_| random_scalar(rng)).collect()
}

/// A random canonical field element, as the 32-byte word a deposit or
/// public input carries
pub fn random_word(rng: &mut impl Rng) -> [u8; 32] {
    random_scalar(rng).to_be_bytes()
}
