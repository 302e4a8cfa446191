//! Common types used throughout the verifier & the pool

use alloc::vec::Vec;
use ark_bn254::{g1::Config as G1Config, g2::Config as G2Config, Fq, Fq2, Fr};
use ark_ec::short_weierstrass::Affine;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::{
    constants::{MAX_DOMAIN_POWER, NUM_BYTES_FELT, NUM_OPENING_CHALLENGES},
    custom_serde::SerdeError,
    field::Scalar,
    serde_def_types::{SnarkjsG1, SnarkjsG2},
};

/// Type alias for an element of the scalar field of the Bn254 curve
pub type ScalarField = Fr;

/// Type alias for an element of the Bn254 curve's G1 pairing group
pub type G1Affine = Affine<G1Config>;

/// Type alias for an element of the Bn254 curve's G2 pairing group
pub type G2Affine = Affine<G2Config>;

/// Type alias for an element of the Bn254 curve's G1 pairing group's base field
pub type G1BaseField = Fq;

/// Type alias for an element of the Bn254 curve's G2 pairing group's base field
pub type G2BaseField = Fq2;

/// Preprocessed information derived from the circuit definition and the
/// universal SRS, in the layout of a snarkjs `verification_key.json`
#[serde_as]
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct VerificationKey {
    /// The number of public inputs to the circuit
    #[serde(rename = "nPublic")]
    pub n_public: u64,
    /// The log2 of the evaluation domain size
    pub power: u32,
    /// The coset generator of the second wire's permutation
    pub k1: Scalar,
    /// The coset generator of the third wire's permutation
    pub k2: Scalar,
    /// The primitive `2^power`-th root of unity generating the domain
    #[serde(rename = "w")]
    pub omega: Scalar,
    /// The commitment to the multiplication selector
    #[serde(rename = "Qm")]
    #[serde_as(as = "SnarkjsG1")]
    pub q_m: G1Affine,
    /// The commitment to the left-wire selector
    #[serde(rename = "Ql")]
    #[serde_as(as = "SnarkjsG1")]
    pub q_l: G1Affine,
    /// The commitment to the right-wire selector
    #[serde(rename = "Qr")]
    #[serde_as(as = "SnarkjsG1")]
    pub q_r: G1Affine,
    /// The commitment to the output-wire selector
    #[serde(rename = "Qo")]
    #[serde_as(as = "SnarkjsG1")]
    pub q_o: G1Affine,
    /// The commitment to the constant selector
    #[serde(rename = "Qc")]
    #[serde_as(as = "SnarkjsG1")]
    pub q_c: G1Affine,
    /// The commitment to the first permutation polynomial
    #[serde(rename = "S1")]
    #[serde_as(as = "SnarkjsG1")]
    pub s1: G1Affine,
    /// The commitment to the second permutation polynomial
    #[serde(rename = "S2")]
    #[serde_as(as = "SnarkjsG1")]
    pub s2: G1Affine,
    /// The commitment to the third permutation polynomial
    #[serde(rename = "S3")]
    #[serde_as(as = "SnarkjsG1")]
    pub s3: G1Affine,
    /// The G2 commitment to the secret evaluation point of the SRS
    #[serde(rename = "X_2")]
    #[serde_as(as = "SnarkjsG2")]
    pub x_2: G2Affine,
}

impl VerificationKey {
    /// The size of the evaluation domain, `2^power`, or `None` if `power`
    /// exceeds the scalar field's two-adicity
    pub fn domain_size(&self) -> Option<u64> {
        (self.power <= MAX_DOMAIN_POWER).then(|| 1 << self.power)
    }

    /// Checks the parameters that curve decoding cannot: the domain must fit
    /// in the scalar field's two-adic subgroup, `omega` must have order
    /// dividing the domain size, and the public inputs must fit in the domain
    pub fn validate(&self) -> Result<(), SerdeError> {
        let domain_size = self.domain_size().ok_or(SerdeError::InvalidVerificationKey)?;

        if self.omega.pow(domain_size) != Scalar::ONE {
            return Err(SerdeError::InvalidVerificationKey);
        }

        if self.n_public > domain_size {
            return Err(SerdeError::InvalidVerificationKey);
        }

        Ok(())
    }
}

/// A PLONK proof, in the layout of a snarkjs proof
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Proof {
    /// The commitment to the left wire polynomial
    pub a: G1Affine,
    /// The commitment to the right wire polynomial
    pub b: G1Affine,
    /// The commitment to the output wire polynomial
    pub c: G1Affine,
    /// The commitment to the grand product polynomial
    pub z: G1Affine,
    /// The commitment to the low-degree split of the quotient polynomial
    pub t1: G1Affine,
    /// The commitment to the mid-degree split of the quotient polynomial
    pub t2: G1Affine,
    /// The commitment to the high-degree split of the quotient polynomial
    pub t3: G1Affine,
    /// The opening proof at the challenge point `xi`
    pub w_xi: G1Affine,
    /// The opening proof at the shifted challenge point `xi * omega`
    pub w_xi_omega: G1Affine,
    /// The evaluation of the left wire polynomial at `xi`
    pub eval_a: Scalar,
    /// The evaluation of the right wire polynomial at `xi`
    pub eval_b: Scalar,
    /// The evaluation of the output wire polynomial at `xi`
    pub eval_c: Scalar,
    /// The evaluation of the first permutation polynomial at `xi`
    pub eval_s1: Scalar,
    /// The evaluation of the second permutation polynomial at `xi`
    pub eval_s2: Scalar,
    /// The evaluation of the grand product polynomial at `xi * omega`
    pub eval_zw: Scalar,
    /// The evaluation of the linearization polynomial at `xi`
    pub eval_r: Scalar,
}

impl Proof {
    /// The G1 commitments, in serialization order
    pub fn commitments(&self) -> [G1Affine; 9] {
        [
            self.a,
            self.b,
            self.c,
            self.z,
            self.t1,
            self.t2,
            self.t3,
            self.w_xi,
            self.w_xi_omega,
        ]
    }

    /// The evaluations, in serialization order
    pub fn evaluations(&self) -> [Scalar; 7] {
        [
            self.eval_a,
            self.eval_b,
            self.eval_c,
            self.eval_s1,
            self.eval_s2,
            self.eval_zw,
            self.eval_r,
        ]
    }
}

/// The public inputs to a proof, as raw 32-byte big-endian words.
///
/// Words are absorbed into the transcript verbatim, and reduced into the
/// scalar field when evaluating the public input polynomial.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicInputs(pub Vec<[u8; NUM_BYTES_FELT]>);

impl PublicInputs {
    /// Builds the public inputs from byte slices, each of which must be
    /// exactly 32 bytes long
    pub fn from_slices<T: AsRef<[u8]>>(words: &[T]) -> Result<Self, SerdeError> {
        words
            .iter()
            .map(|word| word.as_ref().try_into().map_err(|_| SerdeError::InvalidLength))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// The number of public inputs
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no public inputs
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The public inputs reduced into the scalar field
    pub fn to_scalars(&self) -> Vec<Scalar> {
        self.0.iter().map(Scalar::from_be_bytes_mod_order).collect()
    }
}

/// The Fiat-Shamir challenges squeezed from the transcript
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Challenges {
    /// The first permutation challenge
    pub beta: Scalar,
    /// The second permutation challenge
    pub gamma: Scalar,
    /// The quotient challenge, separating the gate & permutation identities
    pub alpha: Scalar,
    /// The evaluation point
    pub xi: Scalar,
    /// The opening challenges, `v[i] = v[0]^(i + 1)`
    pub v: [Scalar; NUM_OPENING_CHALLENGES],
    /// The multipoint evaluation challenge
    pub u: Scalar,
}
