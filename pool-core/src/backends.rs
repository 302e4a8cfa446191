//! Native implementations of the curve arithmetic & hashing backends,
//! built on arkworks & alloy

use alloc::vec::Vec;
use alloy_primitives::keccak256;
use ark_bn254::Bn254;
use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup};
use ark_ff::One;
use pool_common::{
    backends::{G1ArithmeticBackend, G1ArithmeticError, HashBackend},
    constants::HASH_OUTPUT_SIZE,
    curve::scalar_to_field,
    field::Scalar,
    types::{G1Affine, G2Affine},
};

/// Curve arithmetic & pairings over arkworks' BN254 implementation
pub struct ArkG1ArithmeticBackend;

impl G1ArithmeticBackend for ArkG1ArithmeticBackend {
    fn ec_add(a: G1Affine, b: G1Affine) -> Result<G1Affine, G1ArithmeticError> {
        Ok((a + b).into_affine())
    }

    fn ec_scalar_mul(a: Scalar, b: G1Affine) -> Result<G1Affine, G1ArithmeticError> {
        let a = scalar_to_field(a).map_err(|_| G1ArithmeticError)?;
        let mut b_group = b.into_group();
        b_group *= a;
        Ok(b_group.into_affine())
    }

    fn ec_pairing_check(pairs: &[(G1Affine, G2Affine)]) -> Result<bool, G1ArithmeticError> {
        let (g1s, g2s): (Vec<G1Affine>, Vec<G2Affine>) = pairs.iter().copied().unzip();
        Ok(Bn254::multi_pairing(g1s, g2s).0 == <Bn254 as Pairing>::TargetField::one())
    }
}

/// Keccak-256 hashing
pub struct NativeHasher;

impl HashBackend for NativeHasher {
    fn hash(input: &[u8]) -> [u8; HASH_OUTPUT_SIZE] {
        keccak256(input).0
    }
}
