//! Modular arithmetic over 256-bit unsigned integers, and the BN254 scalar
//! field element type built on top of it

use alloc::vec::Vec;
use core::{
    fmt::{self, Display},
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use ruint::aliases::{U256, U512};
use serde::{de::Error as DeError, Deserialize, Deserializer, Serialize, Serializer};

use crate::{constants::SCALAR_MODULUS, custom_serde::SerdeError};

// ---------------------------
// | MODULAR INTEGER HELPERS |
// ---------------------------

/// Computes `(a + b) mod m`, returning zero when `m` is zero
pub fn add_mod(a: U256, b: U256, m: U256) -> U256 {
    a.add_mod(b, m)
}

/// Computes `(a - b) mod m`, returning zero when `m` is zero
pub fn sub_mod(a: U256, b: U256, m: U256) -> U256 {
    if m.is_zero() {
        return U256::ZERO;
    }

    let b = b.reduce_mod(m);
    // `m - b` is in `[1, m]`, and `add_mod` reduces both operands
    a.add_mod(m - b, m)
}

/// Computes `(a * b) mod m` through the full 512-bit product,
/// returning zero when `m` is zero
pub fn mul_mod(a: U256, b: U256, m: U256) -> U256 {
    a.mul_mod(b, m)
}

/// Computes the inverse of `a` modulo `m` with the extended Euclidean algorithm.
///
/// Returns 0 when `m <= 1`, when `a ≡ 0 (mod m)`, or when `a` and `m` are not
/// coprime, none of which have an inverse.
pub fn mod_inverse(a: U256, m: U256) -> U256 {
    let one = U256::from(1u64);
    if m <= one {
        return U256::ZERO;
    }

    let mut a = a.reduce_mod(m);
    let mut b = m;
    let mut x0 = SignedWide::ZERO;
    let mut x1 = SignedWide::ONE;

    while a > one {
        if b.is_zero() {
            // gcd(a, m) > 1
            return U256::ZERO;
        }

        let (quotient, remainder) = a.div_rem(b);
        a = b;
        b = remainder;

        let next = x1.sub(x0.scale(widen(quotient)));
        x1 = x0;
        x0 = next;
    }

    if a.is_zero() {
        return U256::ZERO;
    }

    x1.reduce(m)
}

/// A signed integer wider than the field, holding the Bézout coefficients of
/// [`mod_inverse`], whose magnitude is bounded by the modulus
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SignedWide {
    /// The absolute value
    magnitude: U512,
    /// Whether the value is negative, never set for zero
    negative: bool,
}

impl SignedWide {
    /// Zero
    const ZERO: Self = Self { magnitude: U512::ZERO, negative: false };
    /// One
    const ONE: Self = Self { magnitude: U512::from_limbs([1, 0, 0, 0, 0, 0, 0, 0]), negative: false };

    /// Builds a value, clearing the sign of zero
    fn new(magnitude: U512, negative: bool) -> Self {
        Self { negative: negative && !magnitude.is_zero(), magnitude }
    }

    /// Computes `self - rhs`
    fn sub(self, rhs: Self) -> Self {
        if self.negative != rhs.negative {
            // a - (-b) = a + b, and -a - b = -(a + b)
            return Self::new(self.magnitude + rhs.magnitude, self.negative);
        }

        if self.magnitude >= rhs.magnitude {
            Self::new(self.magnitude - rhs.magnitude, self.negative)
        } else {
            Self::new(rhs.magnitude - self.magnitude, !self.negative)
        }
    }

    /// Multiplies by a non-negative factor
    fn scale(self, factor: U512) -> Self {
        Self::new(self.magnitude * factor, self.negative)
    }

    /// Maps the value into `[0, m)`
    fn reduce(self, m: U256) -> U256 {
        let residue = narrow(self.magnitude % widen(m));
        if self.negative && !residue.is_zero() {
            m - residue
        } else {
            residue
        }
    }
}

/// Zero-extends a 256-bit integer to 512 bits
fn widen(value: U256) -> U512 {
    let limbs = value.into_limbs();
    U512::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3], 0, 0, 0, 0])
}

/// Truncates a 512-bit integer known to fit in 256 bits
fn narrow(value: U512) -> U256 {
    let limbs = value.into_limbs();
    U256::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3]])
}

// ----------
// | SCALAR |
// ----------

/// An element of the BN254 scalar field, always reduced modulo the field order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Scalar(U256);

/// An error returned when inverting zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InversionError;

impl Scalar {
    /// The additive identity
    pub const ZERO: Self = Self(U256::ZERO);
    /// The multiplicative identity
    pub const ONE: Self = Self(U256::from_limbs([1, 0, 0, 0]));

    /// Reduces an arbitrary integer into the field
    pub fn from_uint_mod_order(value: U256) -> Self {
        Self(value.reduce_mod(SCALAR_MODULUS))
    }

    /// Wraps an integer, returning `None` unless it is already reduced
    pub fn from_canonical_uint(value: U256) -> Option<Self> {
        (value < SCALAR_MODULUS).then_some(Self(value))
    }

    /// Decodes a canonical big-endian encoding, rejecting values `>= q`
    pub fn from_be_bytes(bytes: &[u8; 32]) -> Option<Self> {
        Self::from_canonical_uint(U256::from_be_bytes(*bytes))
    }

    /// Decodes a big-endian integer, reducing it into the field
    pub fn from_be_bytes_mod_order(bytes: &[u8; 32]) -> Self {
        Self::from_uint_mod_order(U256::from_be_bytes(*bytes))
    }

    /// The 32-byte big-endian encoding of the element
    pub fn to_be_bytes(&self) -> [u8; 32] {
        self.0.to_be_bytes::<32>()
    }

    /// The underlying reduced integer
    pub fn inner(&self) -> U256 {
        self.0
    }

    /// Whether this is the additive identity
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Computes `self^2`
    pub fn square(&self) -> Self {
        *self * *self
    }

    /// Computes `self^exp` by square-and-multiply
    pub fn pow(&self, mut exp: u64) -> Self {
        let mut base = *self;
        let mut acc = Self::ONE;
        while exp > 0 {
            if exp & 1 == 1 {
                acc *= base;
            }
            base = base.square();
            exp >>= 1;
        }

        acc
    }

    /// The multiplicative inverse, `None` for zero
    pub fn inverse(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }

        Some(Self(mod_inverse(self.0, SCALAR_MODULUS)))
    }
}

/// Replaces every element of `values` with `coeff / value`, using a single
/// modular inversion (Montgomery's trick).
///
/// Fails, leaving `values` untouched, if any element is zero.
pub fn batch_inversion_and_mul(values: &mut [Scalar], coeff: Scalar) -> Result<(), InversionError> {
    // prefix_products[i] = values[0] * ... * values[i - 1]
    let mut prefix_products = Vec::with_capacity(values.len());
    let mut acc = Scalar::ONE;
    for value in values.iter() {
        if value.is_zero() {
            return Err(InversionError);
        }
        prefix_products.push(acc);
        acc *= *value;
    }

    let mut inv = acc.inverse().ok_or(InversionError)? * coeff;
    for (value, prefix) in values.iter_mut().zip(prefix_products).rev() {
        let next_inv = inv * *value;
        *value = inv * prefix;
        inv = next_inv;
    }

    Ok(())
}

impl Add for Scalar {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(add_mod(self.0, rhs.0, SCALAR_MODULUS))
    }
}

impl Sub for Scalar {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(sub_mod(self.0, rhs.0, SCALAR_MODULUS))
    }
}

impl Mul for Scalar {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(mul_mod(self.0, rhs.0, SCALAR_MODULUS))
    }
}

impl Neg for Scalar {
    type Output = Self;

    fn neg(self) -> Self {
        Self::ZERO - self
    }
}

impl AddAssign for Scalar {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Scalar {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for Scalar {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl From<u64> for Scalar {
    fn from(value: u64) -> Self {
        Self::from_uint_mod_order(U256::from(value))
    }
}

impl FromStr for Scalar {
    type Err = SerdeError;

    /// Parses a decimal (or `0x`-prefixed hex) string holding a canonical element
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = U256::from_str(s).map_err(|_| SerdeError::ScalarConversion)?;
        Self::from_canonical_uint(value).ok_or(SerdeError::ScalarConversion)
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Serialize for Scalar {
    /// Decimal strings for human-readable formats, big-endian bytes otherwise
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            self.to_be_bytes().serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = <alloc::string::String>::deserialize(deserializer)?;
            s.parse().map_err(|_| D::Error::custom("invalid scalar"))
        } else {
            let bytes = <[u8; 32]>::deserialize(deserializer)?;
            Self::from_be_bytes(&bytes).ok_or_else(|| D::Error::custom("non-canonical scalar"))
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use ark_bn254::Fr;
    use ark_ff::{BigInt, Field, PrimeField, UniformRand};
    use rand::{thread_rng, Rng};
    use ruint::aliases::U256;

    use crate::constants::{BASE_MODULUS, SCALAR_MODULUS};

    use super::{add_mod, batch_inversion_and_mul, mod_inverse, mul_mod, sub_mod, Scalar};

    /// Samples a uniformly random scalar through arkworks
    fn random_scalar(rng: &mut impl Rng) -> Scalar {
        let fr = Fr::rand(rng);
        Scalar::from_canonical_uint(U256::from_limbs(fr.into_bigint().0)).unwrap()
    }

    /// Converts a scalar into the arkworks field element it mirrors
    fn to_fr(scalar: Scalar) -> Fr {
        Fr::from_bigint(BigInt(scalar.inner().into_limbs())).unwrap()
    }

    #[test]
    fn test_mod_inverse_small_prime() {
        let m = U256::from(7u64);
        for a in 1..7u64 {
            let inv = mod_inverse(U256::from(a), m);
            assert_eq!(mul_mod(U256::from(a), inv, m), U256::from(1u64));
        }
        assert_eq!(mod_inverse(U256::from(3u64), m), U256::from(5u64));
    }

    #[test]
    fn test_mod_inverse_degenerate() {
        assert_eq!(mod_inverse(U256::from(5u64), U256::ZERO), U256::ZERO);
        assert_eq!(mod_inverse(U256::from(5u64), U256::from(1u64)), U256::ZERO);
        assert_eq!(mod_inverse(U256::ZERO, SCALAR_MODULUS), U256::ZERO);
        assert_eq!(mod_inverse(SCALAR_MODULUS, SCALAR_MODULUS), U256::ZERO);
        // gcd(4, 10) = 2
        assert_eq!(mod_inverse(U256::from(4u64), U256::from(10u64)), U256::ZERO);
    }

    #[test]
    fn test_mod_inverse_both_fields() {
        let mut rng = thread_rng();
        for modulus in [SCALAR_MODULUS, BASE_MODULUS] {
            for _ in 0..50 {
                let a = U256::from_limbs(rng.gen::<[u64; 4]>()).reduce_mod(modulus);
                if a.is_zero() {
                    continue;
                }
                let inv = mod_inverse(a, modulus);
                assert_eq!(mul_mod(a, inv, modulus), U256::from(1u64));
            }
        }
    }

    #[test]
    fn test_sub_mod_wraps() {
        let m = U256::from(11u64);
        assert_eq!(sub_mod(U256::from(3u64), U256::from(5u64), m), U256::from(9u64));
        assert_eq!(sub_mod(U256::from(5u64), U256::from(5u64), m), U256::ZERO);
        assert_eq!(sub_mod(U256::from(5u64), U256::from(16u64), m), U256::ZERO);
        assert_eq!(add_mod(U256::from(10u64), U256::from(5u64), m), U256::from(4u64));
    }

    #[test]
    fn test_scalar_ops_match_arkworks() {
        let mut rng = thread_rng();
        for _ in 0..50 {
            let a = random_scalar(&mut rng);
            let b = random_scalar(&mut rng);

            assert_eq!(to_fr(a + b), to_fr(a) + to_fr(b));
            assert_eq!(to_fr(a - b), to_fr(a) - to_fr(b));
            assert_eq!(to_fr(a * b), to_fr(a) * to_fr(b));
            assert_eq!(to_fr(-a), -to_fr(a));
            assert_eq!(to_fr(a.pow(1 << 20)), to_fr(a).pow([1u64 << 20]));
            assert_eq!(to_fr(a.inverse().unwrap()), to_fr(a).inverse().unwrap());
        }
    }

    #[test]
    fn test_scalar_byte_decoding() {
        let modulus_bytes = SCALAR_MODULUS.to_be_bytes::<32>();
        assert!(Scalar::from_be_bytes(&modulus_bytes).is_none());
        assert_eq!(Scalar::from_be_bytes_mod_order(&modulus_bytes), Scalar::ZERO);

        let one = Scalar::ONE.to_be_bytes();
        assert_eq!(one[31], 1);
        assert_eq!(Scalar::from_be_bytes(&one), Some(Scalar::ONE));
    }

    #[test]
    fn test_scalar_parse_decimal() {
        let s: Scalar = "21888242871839275222246405745257275088548364400416034343698204186575808495616"
            .parse()
            .unwrap();
        assert_eq!(s + Scalar::ONE, Scalar::ZERO);
        assert!(
            "21888242871839275222246405745257275088548364400416034343698204186575808495617"
                .parse::<Scalar>()
                .is_err()
        );
    }

    #[test]
    fn test_batch_inversion() {
        let mut rng = thread_rng();
        let coeff = random_scalar(&mut rng);
        let values: Vec<Scalar> = (0..10).map(|_| random_scalar(&mut rng)).collect();

        let mut inverted = values.clone();
        batch_inversion_and_mul(&mut inverted, coeff).unwrap();

        for (value, inv) in values.iter().zip(inverted.iter()) {
            assert_eq!(*inv, coeff * value.inverse().unwrap());
        }
    }

    #[test]
    fn test_batch_inversion_rejects_zero() {
        let mut values = [Scalar::ONE, Scalar::ZERO, Scalar::from(3u64)];
        assert!(batch_inversion_and_mul(&mut values, Scalar::ONE).is_err());
        assert_eq!(values, [Scalar::ONE, Scalar::ZERO, Scalar::from(3u64)]);
    }
}
