//! Helpers for building & manipulating BN254 curve points from raw
//! 256-bit coordinates

use ark_ff::{BigInt, MontFp, PrimeField};
use ruint::aliases::U256;

use crate::{
    constants::BASE_MODULUS,
    custom_serde::SerdeError,
    field::{sub_mod, Scalar},
    types::{G1Affine, G1BaseField, G2Affine, G2BaseField, ScalarField},
};

/// The x-coordinate of the G1 generator
const G1_GENERATOR_X: G1BaseField = MontFp!("1");
/// The y-coordinate of the G1 generator
const G1_GENERATOR_Y: G1BaseField = MontFp!("2");

/// The G1 generator, `(1, 2)`
pub fn g1_generator() -> G1Affine {
    G1Affine::new_unchecked(G1_GENERATOR_X, G1_GENERATOR_Y)
}

/// The G2 generator used on the right-hand side of the final pairing
pub fn g2_generator() -> G2Affine {
    let x = G2BaseField::new(
        MontFp!("10857046999023057135944570762232829481370756359578518086990519993285655852781"),
        MontFp!("11559732032986387107991004021392285783925812861821192530917403151452391805634"),
    );
    let y = G2BaseField::new(
        MontFp!("8495653923123431417604973247489272438418190587263600148770280649306958101930"),
        MontFp!("4082367875863433681332203403145435568316851327593401208105741076214120093531"),
    );
    G2Affine::new_unchecked(x, y)
}

/// Converts a canonical base field integer into a field element
pub fn base_field_from_uint(value: U256) -> Result<G1BaseField, SerdeError> {
    G1BaseField::from_bigint(BigInt(value.into_limbs())).ok_or(SerdeError::InvalidPoint)
}

/// Converts a base field element into its canonical integer
pub fn uint_from_base_field(value: &G1BaseField) -> U256 {
    U256::from_limbs(value.into_bigint().0)
}

/// Converts a [`Scalar`] into the arkworks scalar field element it represents
pub fn scalar_to_field(scalar: Scalar) -> Result<ScalarField, SerdeError> {
    ScalarField::from_bigint(BigInt(scalar.inner().into_limbs())).ok_or(SerdeError::ScalarConversion)
}

/// Converts an arkworks scalar field element into a [`Scalar`]
pub fn field_to_scalar(value: &ScalarField) -> Scalar {
    Scalar::from_uint_mod_order(U256::from_limbs(value.into_bigint().0))
}

/// Builds a G1 point from affine coordinates, treating `(0, 0)` as the
/// point at infinity.
///
/// Rejects coordinates outside the base field and points off the curve.
pub fn make_g1(x: U256, y: U256) -> Result<G1Affine, SerdeError> {
    if x.is_zero() && y.is_zero() {
        return Ok(G1Affine::identity());
    }

    let point = G1Affine::new_unchecked(base_field_from_uint(x)?, base_field_from_uint(y)?);
    if !point.is_on_curve() {
        return Err(SerdeError::InvalidPoint);
    }

    Ok(point)
}

/// Builds a G2 point from the limbs of its coordinates, `x = x1 + x2 * u`
/// and `y = y1 + y2 * u`, treating all-zero limbs as the point at infinity.
///
/// Rejects points off the curve or outside the prime-order subgroup.
pub fn make_g2(x1: U256, x2: U256, y1: U256, y2: U256) -> Result<G2Affine, SerdeError> {
    if [x1, x2, y1, y2].iter().all(|limb| limb.is_zero()) {
        return Ok(G2Affine::identity());
    }

    let x = G2BaseField::new(base_field_from_uint(x1)?, base_field_from_uint(x2)?);
    let y = G2BaseField::new(base_field_from_uint(y1)?, base_field_from_uint(y2)?);
    let point = G2Affine::new_unchecked(x, y);
    if !point.is_on_curve() || !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err(SerdeError::InvalidPoint);
    }

    Ok(point)
}

/// Negates a G1 point as `(x, (qf - y) mod qf)`
pub fn negate_g1(point: &G1Affine) -> G1Affine {
    if point.infinity {
        return *point;
    }

    let y = uint_from_base_field(&point.y);
    let neg_y = sub_mod(BASE_MODULUS, y, BASE_MODULUS);
    G1Affine::new_unchecked(
        point.x,
        G1BaseField::from_be_bytes_mod_order(&neg_y.to_be_bytes::<32>()),
    )
}

#[cfg(test)]
mod tests {
    use ark_ec::{AffineRepr, CurveGroup};
    use ark_std::UniformRand;
    use rand::thread_rng;
    use ruint::aliases::U256;

    use crate::{
        constants::{BASE_MODULUS, G2_GENERATOR_X, G2_GENERATOR_Y},
        types::{G1Affine, G2Affine},
    };

    use super::{
        g1_generator, g2_generator, make_g1, make_g2, negate_g1, uint_from_base_field,
    };

    #[test]
    fn test_generators_match_arkworks() {
        assert_eq!(g1_generator(), G1Affine::generator());
        assert_eq!(g2_generator(), G2Affine::generator());
        assert_eq!(
            make_g2(G2_GENERATOR_X[0], G2_GENERATOR_X[1], G2_GENERATOR_Y[0], G2_GENERATOR_Y[1])
                .unwrap(),
            g2_generator()
        );
    }

    #[test]
    fn test_negate_g1() {
        let mut rng = thread_rng();
        let point = ark_bn254::G1Projective::rand(&mut rng).into_affine();
        let neg = negate_g1(&point);

        assert_eq!(neg, -point);
        assert_eq!((point + neg).into_affine(), G1Affine::identity());
        assert_eq!(negate_g1(&G1Affine::identity()), G1Affine::identity());
    }

    #[test]
    fn test_make_g1_rejects_invalid() {
        // (1, 3) is not on y^2 = x^3 + 3
        assert!(make_g1(U256::from(1u64), U256::from(3u64)).is_err());
        // coordinates must be reduced
        assert!(make_g1(BASE_MODULUS, U256::from(2u64)).is_err());
        assert_eq!(make_g1(U256::ZERO, U256::ZERO).unwrap(), G1Affine::identity());

        let g = g1_generator();
        assert_eq!(
            make_g1(uint_from_base_field(&g.x), uint_from_base_field(&g.y)).unwrap(),
            g
        );
    }

    #[test]
    fn test_make_g2_rejects_swapped_limbs() {
        // Swapping the limbs of each coordinate produces a point off the twist
        assert!(
            make_g2(G2_GENERATOR_X[1], G2_GENERATOR_X[0], G2_GENERATOR_Y[1], G2_GENERATOR_Y[0])
                .is_err()
        );
    }
}
