//! "Backends" representing functionality that is delegated to an external
//! library, either a native arkworks / Keccak implementation or a mock in tests.
//!
//! This abstraction exists primarly to keep the verifier & the commitment
//! tree independent of the concrete curve, hash & sponge implementations.

use crate::{
    constants::HASH_OUTPUT_SIZE,
    field::Scalar,
    types::{G1Affine, G2Affine},
};

/// A hashing backend used to derive Fiat-Shamir challenges
pub trait HashBackend {
    /// Compute the 256-bit hash of the input
    fn hash(input: &[u8]) -> [u8; HASH_OUTPUT_SIZE];
}

/// The three-input, one-output sponge combining nodes of a commitment tree
pub trait SpongeBackend {
    /// Absorbs the inputs in order and squeezes a single element
    fn hash(&self, inputs: [Scalar; 3]) -> Scalar;
}

/// An error that occurs when performing elliptic curve arithmetic
#[derive(Debug)]
pub struct G1ArithmeticError;

/// Encapsulates the implementations of elliptic curve arithmetic done on the G1 source group,
/// including a pairing identity check with elements of the G2 source group.
///
/// The type that implements this trait should be a unit struct calling out to
/// a pairing-curve library.
pub trait G1ArithmeticBackend {
    /// Add two points in G1
    fn ec_add(a: G1Affine, b: G1Affine) -> Result<G1Affine, G1ArithmeticError>;
    /// Multiply a G1 point by a scalar in its scalar field
    fn ec_scalar_mul(a: Scalar, b: G1Affine) -> Result<G1Affine, G1ArithmeticError>;
    /// Check that the product of the pairings of each `(G1, G2)` pair is the
    /// identity of the target group
    fn ec_pairing_check(pairs: &[(G1Affine, G2Affine)]) -> Result<bool, G1ArithmeticError>;

    /// A helper for computing multi-scalar multiplications over G1
    fn msm(scalars: &[Scalar], points: &[G1Affine]) -> Result<G1Affine, G1ArithmeticError> {
        if scalars.len() != points.len() {
            return Err(G1ArithmeticError);
        }

        scalars
            .iter()
            .zip(points.iter())
            .try_fold(G1Affine::identity(), |acc, (scalar, point)| {
                let scaled_point = Self::ec_scalar_mul(*scalar, *point)?;
                Self::ec_add(acc, scaled_point)
            })
    }
}
