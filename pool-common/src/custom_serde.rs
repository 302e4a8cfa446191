//! Custom de/serialization logic used to de/serialize objects to/from the
//! byte layouts used by the proof encoding & the transcript

use alloc::vec::Vec;
use ark_ec::AffineRepr;
use core::fmt::{self, Display};
use ruint::aliases::U256;

use crate::{
    constants::{NUM_BYTES_FELT, NUM_BYTES_G1, NUM_BYTES_G2, PROOF_LEN},
    curve::{make_g1, make_g2, uint_from_base_field},
    field::Scalar,
    types::{G1Affine, G2Affine, Proof, PublicInputs},
};

/// An error that occurs during de/serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerdeError {
    /// A sequence of deserialized elements is not the expected length
    InvalidLength,
    /// An integer is not a canonical BN254 scalar field element
    ScalarConversion,
    /// A coordinate is out of range, or a point is not on its curve
    InvalidPoint,
    /// A verification key's domain parameters are inconsistent
    InvalidVerificationKey,
}

impl Display for SerdeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerdeError::InvalidLength => write!(f, "invalid length"),
            SerdeError::ScalarConversion => write!(f, "non-canonical scalar"),
            SerdeError::InvalidPoint => write!(f, "invalid curve point"),
            SerdeError::InvalidVerificationKey => write!(f, "invalid verification key"),
        }
    }
}

// -------------------------------
// | BYTE SERDE TRAIT DEFINITION |
// -------------------------------

/// A trait for serializing types into byte arrays
pub trait BytesSerializable {
    /// Serializes a type into a vector of bytes,
    /// for use in the proof encoding or the transcript
    fn serialize_to_bytes(&self) -> Vec<u8>;
}

/// A trait for deserializing types from byte arrays
pub trait BytesDeserializable {
    /// The number of bytes expected to be deserialized
    const SER_LEN: usize;

    /// Deserializes a type from a slice of exactly `SER_LEN` bytes
    fn deserialize_from_bytes(bytes: &[u8]) -> Result<Self, SerdeError>
    where
        Self: Sized;
}

// -------------------------
// | TRAIT IMPLEMENTATIONS |
// -------------------------

impl BytesSerializable for Scalar {
    fn serialize_to_bytes(&self) -> Vec<u8> {
        self.to_be_bytes().to_vec()
    }
}

impl BytesDeserializable for Scalar {
    const SER_LEN: usize = NUM_BYTES_FELT;

    /// Rejects non-canonical encodings
    fn deserialize_from_bytes(bytes: &[u8]) -> Result<Self, SerdeError> {
        let bytes: &[u8; NUM_BYTES_FELT] = bytes.try_into().map_err(|_| SerdeError::InvalidLength)?;
        Scalar::from_be_bytes(bytes).ok_or(SerdeError::ScalarConversion)
    }
}

impl BytesSerializable for G1Affine {
    /// Big-endian `x || y`, with all zeroes for the point at infinity
    fn serialize_to_bytes(&self) -> Vec<u8> {
        let (x, y) = match self.xy() {
            Some((x, y)) => (uint_from_base_field(x), uint_from_base_field(y)),
            None => (U256::ZERO, U256::ZERO),
        };

        let mut bytes = Vec::with_capacity(NUM_BYTES_G1);
        bytes.extend_from_slice(&x.to_be_bytes::<NUM_BYTES_FELT>());
        bytes.extend_from_slice(&y.to_be_bytes::<NUM_BYTES_FELT>());
        bytes
    }
}

impl BytesDeserializable for G1Affine {
    const SER_LEN: usize = NUM_BYTES_G1;

    fn deserialize_from_bytes(bytes: &[u8]) -> Result<Self, SerdeError> {
        if bytes.len() != Self::SER_LEN {
            return Err(SerdeError::InvalidLength);
        }

        let mut cursor = 0;
        let x = deserialize_uint(bytes, &mut cursor)?;
        let y = deserialize_uint(bytes, &mut cursor)?;
        make_g1(x, y)
    }
}

impl BytesSerializable for G2Affine {
    /// Big-endian `x2 || x1 || y2 || y1`, the higher limb of each coordinate
    /// first, with all zeroes for the point at infinity
    fn serialize_to_bytes(&self) -> Vec<u8> {
        let limbs = match self.xy() {
            Some((x, y)) => [&x.c1, &x.c0, &y.c1, &y.c0].map(uint_from_base_field),
            None => [U256::ZERO; 4],
        };

        limbs.iter().flat_map(|limb| limb.to_be_bytes::<NUM_BYTES_FELT>()).collect()
    }
}

impl BytesDeserializable for G2Affine {
    const SER_LEN: usize = NUM_BYTES_G2;

    fn deserialize_from_bytes(bytes: &[u8]) -> Result<Self, SerdeError> {
        if bytes.len() != Self::SER_LEN {
            return Err(SerdeError::InvalidLength);
        }

        let mut cursor = 0;
        let x2 = deserialize_uint(bytes, &mut cursor)?;
        let x1 = deserialize_uint(bytes, &mut cursor)?;
        let y2 = deserialize_uint(bytes, &mut cursor)?;
        let y1 = deserialize_uint(bytes, &mut cursor)?;
        make_g2(x1, x2, y1, y2)
    }
}

impl BytesSerializable for Proof {
    fn serialize_to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(PROOF_LEN);
        for commitment in self.commitments() {
            bytes.extend(commitment.serialize_to_bytes());
        }
        for eval in self.evaluations() {
            bytes.extend(eval.serialize_to_bytes());
        }
        bytes
    }
}

impl BytesDeserializable for Proof {
    const SER_LEN: usize = PROOF_LEN;

    fn deserialize_from_bytes(bytes: &[u8]) -> Result<Self, SerdeError> {
        if bytes.len() != Self::SER_LEN {
            return Err(SerdeError::InvalidLength);
        }

        let mut cursor = 0;
        Ok(Proof {
            a: deserialize_cursor(bytes, &mut cursor)?,
            b: deserialize_cursor(bytes, &mut cursor)?,
            c: deserialize_cursor(bytes, &mut cursor)?,
            z: deserialize_cursor(bytes, &mut cursor)?,
            t1: deserialize_cursor(bytes, &mut cursor)?,
            t2: deserialize_cursor(bytes, &mut cursor)?,
            t3: deserialize_cursor(bytes, &mut cursor)?,
            w_xi: deserialize_cursor(bytes, &mut cursor)?,
            w_xi_omega: deserialize_cursor(bytes, &mut cursor)?,
            eval_a: deserialize_cursor(bytes, &mut cursor)?,
            eval_b: deserialize_cursor(bytes, &mut cursor)?,
            eval_c: deserialize_cursor(bytes, &mut cursor)?,
            eval_s1: deserialize_cursor(bytes, &mut cursor)?,
            eval_s2: deserialize_cursor(bytes, &mut cursor)?,
            eval_zw: deserialize_cursor(bytes, &mut cursor)?,
            eval_r: deserialize_cursor(bytes, &mut cursor)?,
        })
    }
}

impl BytesSerializable for PublicInputs {
    /// The concatenation of the raw 32-byte words
    fn serialize_to_bytes(&self) -> Vec<u8> {
        self.0.concat()
    }
}

// -----------
// | HELPERS |
// -----------

/// Deserializes the next `D::SER_LEN` bytes at the cursor, advancing it
pub fn deserialize_cursor<D: BytesDeserializable>(
    bytes: &[u8],
    cursor: &mut usize,
) -> Result<D, SerdeError> {
    let end = *cursor + D::SER_LEN;
    let chunk = bytes.get(*cursor..end).ok_or(SerdeError::InvalidLength)?;
    let deserialized = D::deserialize_from_bytes(chunk)?;
    *cursor = end;
    Ok(deserialized)
}

/// Reads a raw big-endian 256-bit integer at the cursor, advancing it
fn deserialize_uint(bytes: &[u8], cursor: &mut usize) -> Result<U256, SerdeError> {
    let end = *cursor + NUM_BYTES_FELT;
    let chunk: [u8; NUM_BYTES_FELT] = bytes
        .get(*cursor..end)
        .and_then(|chunk| chunk.try_into().ok())
        .ok_or(SerdeError::InvalidLength)?;
    *cursor = end;
    Ok(U256::from_be_bytes(chunk))
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use ark_bn254::G1Projective;
    use ark_ec::{AffineRepr, CurveGroup};
    use ark_std::UniformRand;
    use num_bigint::BigUint;
    use rand::{thread_rng, Rng};

    use crate::{
        constants::{
            BASE_MODULUS, NUM_BYTES_FELT, PROOF_EVALS_OFFSET, PROOF_LEN, SCALAR_MODULUS,
        },
        field::Scalar,
        types::{G1Affine, G2Affine, Proof},
    };

    use super::{BytesDeserializable, BytesSerializable, SerdeError};

    /// Generates a proof with random commitments & evaluations
    fn random_proof(rng: &mut impl Rng) -> Proof {
        let mut point = || G1Projective::rand(rng).into_affine();
        let [a, b, c, z, t1, t2, t3, w_xi, w_xi_omega] = [(); 9].map(|_| point());
        let mut eval = || Scalar::from_be_bytes_mod_order(&rng.gen());
        let [eval_a, eval_b, eval_c, eval_s1, eval_s2, eval_zw, eval_r] = [(); 7].map(|_| eval());

        Proof {
            a,
            b,
            c,
            z,
            t1,
            t2,
            t3,
            w_xi,
            w_xi_omega,
            eval_a,
            eval_b,
            eval_c,
            eval_s1,
            eval_s2,
            eval_zw,
            eval_r,
        }
    }

    #[test]
    fn test_proof_layout() {
        let mut rng = thread_rng();
        let proof = random_proof(&mut rng);
        let bytes = proof.serialize_to_bytes();

        assert_eq!(bytes.len(), PROOF_LEN);
        assert_eq!(&bytes[..64], proof.a.serialize_to_bytes().as_slice());
        assert_eq!(&bytes[512..576], proof.w_xi_omega.serialize_to_bytes().as_slice());
        assert_eq!(&bytes[PROOF_EVALS_OFFSET..PROOF_EVALS_OFFSET + 32], &proof.eval_a.to_be_bytes());
        assert_eq!(&bytes[768..], &proof.eval_r.to_be_bytes());

        assert_eq!(Proof::deserialize_from_bytes(&bytes).unwrap(), proof);
    }

    #[test]
    fn test_proof_wrong_length() {
        let mut rng = thread_rng();
        let mut bytes = random_proof(&mut rng).serialize_to_bytes();

        bytes.push(0);
        assert_eq!(Proof::deserialize_from_bytes(&bytes), Err(SerdeError::InvalidLength));
        bytes.truncate(PROOF_LEN - 1);
        assert_eq!(Proof::deserialize_from_bytes(&bytes), Err(SerdeError::InvalidLength));
        assert_eq!(Proof::deserialize_from_bytes(&[]), Err(SerdeError::InvalidLength));
    }

    #[test]
    fn test_proof_rejects_non_canonical_eval() {
        let mut rng = thread_rng();
        let mut bytes = random_proof(&mut rng).serialize_to_bytes();
        bytes[PROOF_EVALS_OFFSET..PROOF_EVALS_OFFSET + NUM_BYTES_FELT]
            .copy_from_slice(&SCALAR_MODULUS.to_be_bytes::<32>());

        assert_eq!(Proof::deserialize_from_bytes(&bytes), Err(SerdeError::ScalarConversion));
    }

    #[test]
    fn test_g1_rejects_out_of_range_coordinate() {
        let mut bytes = G1Affine::generator().serialize_to_bytes();
        bytes[..NUM_BYTES_FELT].copy_from_slice(&BASE_MODULUS.to_be_bytes::<32>());
        assert_eq!(G1Affine::deserialize_from_bytes(&bytes), Err(SerdeError::InvalidPoint));

        let zeros = [0u8; 64];
        assert_eq!(G1Affine::deserialize_from_bytes(&zeros).unwrap(), G1Affine::identity());
    }

    #[test]
    fn test_g2_generator_limb_order() {
        let bytes = G2Affine::generator().serialize_to_bytes();
        let limbs: Vec<BigUint> =
            bytes.chunks(NUM_BYTES_FELT).map(BigUint::from_bytes_be).collect();

        // x2 || x1 || y2 || y1
        let expected = [
            "11559732032986387107991004021392285783925812861821192530917403151452391805634",
            "10857046999023057135944570762232829481370756359578518086990519993285655852781",
            "4082367875863433681332203403145435568316851327593401208105741076214120093531",
            "8495653923123431417604973247489272438418190587263600148770280649306958101930",
        ];
        for (limb, expected) in limbs.iter().zip(expected) {
            assert_eq!(*limb, expected.parse::<BigUint>().unwrap());
        }

        assert_eq!(G2Affine::deserialize_from_bytes(&bytes).unwrap(), G2Affine::generator());
    }
}
