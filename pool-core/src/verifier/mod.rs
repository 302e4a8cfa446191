//! The Plonk verifier, following the snarkjs flavour of section 8.3 of the paper: https://eprint.iacr.org/2019/953.pdf.
//! Each of the steps of the verification algorithm described in the paper are represented as separate helper functions.
//! This version of the verification algorithm only supports fan-in 2, fan-out 1 gates.
//!
//! The scalar helpers are public so that tooling can recompute the exact
//! linear combinations the verifier forms over the commitments.

pub mod errors;

use alloc::vec::Vec;
use core::{marker::PhantomData, result::Result};
use pool_common::{
    backends::{G1ArithmeticBackend, HashBackend},
    curve::{g1_generator, g2_generator, negate_g1},
    custom_serde::BytesDeserializable,
    field::{batch_inversion_and_mul, Scalar},
    types::{Challenges, G1Affine, Proof, PublicInputs, VerificationKey},
};

use crate::transcript::Transcript;

use self::errors::VerifierError;

/// The evaluations of `X^n` and of the vanishing polynomial `X^n - 1` at `xi`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VanishingEvals {
    /// `xi^n`
    pub xi_n: Scalar,
    /// `xi^n - 1`
    pub zh: Scalar,
}

/// The verifier struct, which is defined generically over elliptic curve arithmetic and hashing backends
pub struct Verifier<G: G1ArithmeticBackend, H: HashBackend> {
    #[doc(hidden)]
    _phantom_g: PhantomData<G>,
    #[doc(hidden)]
    _phantom_h: PhantomData<H>,
}

impl<G: G1ArithmeticBackend, H: HashBackend> Default for Verifier<G, H> {
    fn default() -> Self {
        Self { _phantom_g: PhantomData, _phantom_h: PhantomData }
    }
}

impl<G: G1ArithmeticBackend, H: HashBackend> Verifier<G, H> {
    /// Verify a proof.
    ///
    /// Returns `Ok(false)` when the final pairing check fails, and an error
    /// when verification cannot get that far.
    pub fn verify(
        vkey: &VerificationKey,
        proof: &Proof,
        public_inputs: &PublicInputs,
    ) -> Result<bool, VerifierError> {
        // Steps 1 & 2 of the verifier algorithm are assumed to be completed by this point,
        // by virtue of the type system: deserialization rejects points off the curve
        // and non-canonical scalars.

        Self::step_3(public_inputs, vkey)?;

        let challenges = Self::step_4(proof, public_inputs)?;

        let vanishing = Self::step_5(vkey, &challenges);

        let lagrange_evals = Self::step_6(vkey, &challenges, &vanishing, public_inputs.len())?;
        let l0 = *lagrange_evals.first().ok_or(VerifierError::InvalidInputs)?;

        let pi_eval = Self::step_7(public_inputs, &lagrange_evals)?;

        let t = Self::step_8(proof, &challenges, &vanishing, pi_eval, l0)?;

        let d = Self::step_9(vkey, proof, &challenges, l0)?;

        let f = Self::step_10(vkey, proof, &challenges, &vanishing, d)?;

        let e = Self::step_11(proof, &challenges, t)?;

        Self::step_12(vkey, proof, &challenges, f, e)
    }

    /// Verify a serialized proof, collapsing every failure into `false`
    pub fn verify_bytes(vkey: &VerificationKey, proof: &[u8], public_inputs: &PublicInputs) -> bool {
        match Proof::deserialize_from_bytes(proof) {
            Ok(proof) => Self::verify(vkey, &proof, public_inputs).unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Validate the public inputs against the verification key, and the key's
    /// domain against the scalar field
    pub fn step_3(public_inputs: &PublicInputs, vkey: &VerificationKey) -> Result<(), VerifierError> {
        if vkey.domain_size().is_none() {
            return Err(VerifierError::InvalidInputs);
        }

        if public_inputs.len() as u64 != vkey.n_public {
            return Err(VerifierError::InvalidInputs);
        }

        Ok(())
    }

    /// Compute the challenges
    pub fn step_4(proof: &Proof, public_inputs: &PublicInputs) -> Result<Challenges, VerifierError> {
        let mut transcript = Transcript::<H>::new();
        Ok(transcript.compute_plonk_challenges(proof, public_inputs)?)
    }

    /// Evaluate `X^n` and the vanishing polynomial at `xi`, squaring `power` times
    pub fn step_5(vkey: &VerificationKey, challenges: &Challenges) -> VanishingEvals {
        let mut xi_n = challenges.xi;
        for _ in 0..vkey.power {
            xi_n = xi_n.square();
        }

        VanishingEvals { xi_n, zh: xi_n - Scalar::ONE }
    }

    /// Evaluate the Lagrange bases for the public input positions at `xi`,
    /// `L[i] = w^i * zh / (n * (xi - w^i))`.
    ///
    /// At least `L[0]` is always computed.
    pub fn step_6(
        vkey: &VerificationKey,
        challenges: &Challenges,
        vanishing: &VanishingEvals,
        num_public_inputs: usize,
    ) -> Result<Vec<Scalar>, VerifierError> {
        let num_bases = num_public_inputs.max(1);
        let n = Scalar::from(vkey.domain_size().ok_or(VerifierError::InvalidInputs)?);

        let mut domain_elements = Vec::with_capacity(num_bases);
        let mut denominators = Vec::with_capacity(num_bases);
        let mut w_i = Scalar::ONE;
        for _ in 0..num_bases {
            domain_elements.push(w_i);
            denominators.push(n * (challenges.xi - w_i));
            w_i *= vkey.omega;
        }

        batch_inversion_and_mul(&mut denominators, vanishing.zh)
            .map_err(|_| VerifierError::Inversion)?;

        Ok(domain_elements.into_iter().zip(denominators).map(|(w_i, inv)| w_i * inv).collect())
    }

    /// Evaluate the public input polynomial at `xi`, `pl = -Σ pub[i] * L[i]`
    pub fn step_7(public_inputs: &PublicInputs, lagrange_evals: &[Scalar]) -> Result<Scalar, VerifierError> {
        if lagrange_evals.len() < public_inputs.len() {
            return Err(VerifierError::MsmLength);
        }

        let mut pi_eval = Scalar::ZERO;
        for (input, l_i) in public_inputs.to_scalars().into_iter().zip(lagrange_evals) {
            pi_eval -= input * *l_i;
        }

        Ok(pi_eval)
    }

    /// Compute the quotient polynomial evaluation `t` from the claimed
    /// linearization evaluation
    pub fn step_8(
        proof: &Proof,
        challenges: &Challenges,
        vanishing: &VanishingEvals,
        pi_eval: Scalar,
        l0: Scalar,
    ) -> Result<Scalar, VerifierError> {
        let Challenges { alpha, beta, gamma, .. } = *challenges;

        let e1 = proof.eval_a + beta * proof.eval_s1 + gamma;
        let e2 = proof.eval_b + beta * proof.eval_s2 + gamma;
        let e3 = proof.eval_c + gamma;
        let permutation_term = e1 * e2 * e3 * proof.eval_zw * alpha;

        let num = proof.eval_r + pi_eval - permutation_term - l0 * alpha.square();
        let zh_inv = vanishing.zh.inverse().ok_or(VerifierError::Inversion)?;

        Ok(num * zh_inv)
    }

    /// The scalars applied to `[Qm, Ql, Qr, Qo, Qc, Z, S3]` in the
    /// linearization commitment `[D]`. The last one is subtracted.
    pub fn linearization_scalars(
        vkey: &VerificationKey,
        proof: &Proof,
        challenges: &Challenges,
        l0: Scalar,
    ) -> [Scalar; 7] {
        let Challenges { alpha, beta, gamma, xi, v, u } = *challenges;
        let Proof { eval_a, eval_b, eval_c, eval_s1, eval_s2, eval_zw, .. } = *proof;
        let v0 = v[0];

        let beta_xi = beta * xi;
        let s6a = eval_a + beta_xi + gamma;
        let s6b = eval_b + beta_xi * vkey.k1 + gamma;
        let s6c = eval_c + beta_xi * vkey.k2 + gamma;
        let z_scalar = s6a * s6b * s6c * alpha * v0 + l0 * alpha.square() * v0 + u;

        let s7a = eval_a + beta * eval_s1 + gamma;
        let s7b = eval_b + beta * eval_s2 + gamma;
        let s3_scalar = s7a * s7b * alpha * v0 * beta * eval_zw;

        [eval_a * eval_b * v0, eval_a * v0, eval_b * v0, eval_c * v0, v0, z_scalar, s3_scalar]
    }

    /// Compute the linearization commitment [D]1
    fn step_9(
        vkey: &VerificationKey,
        proof: &Proof,
        challenges: &Challenges,
        l0: Scalar,
    ) -> Result<G1Affine, VerifierError> {
        let [qm, ql, qr, qo, qc, z, s3] = Self::linearization_scalars(vkey, proof, challenges, l0);

        let positive = G::msm(
            &[qm, ql, qr, qo, qc, z],
            &[vkey.q_m, vkey.q_l, vkey.q_r, vkey.q_o, vkey.q_c, proof.z],
        )
        .map_err(|_| VerifierError::ArithmeticBackend)?;
        let negative =
            G::ec_scalar_mul(s3, vkey.s3).map_err(|_| VerifierError::ArithmeticBackend)?;

        G::ec_add(positive, negate_g1(&negative)).map_err(|_| VerifierError::ArithmeticBackend)
    }

    /// The scalars applied to `[T1, T2, T3, D, A, B, C, S1, S2]` in the
    /// aggregate opening commitment `[F]`
    pub fn opening_scalars(challenges: &Challenges, vanishing: &VanishingEvals) -> [Scalar; 9] {
        let Challenges { v, .. } = *challenges;
        let VanishingEvals { xi_n, .. } = *vanishing;

        [Scalar::ONE, xi_n, xi_n.square(), Scalar::ONE, v[1], v[2], v[3], v[4], v[5]]
    }

    /// Compute the aggregate opening commitment [F]1
    fn step_10(
        vkey: &VerificationKey,
        proof: &Proof,
        challenges: &Challenges,
        vanishing: &VanishingEvals,
        d: G1Affine,
    ) -> Result<G1Affine, VerifierError> {
        G::msm(
            &Self::opening_scalars(challenges, vanishing),
            &[proof.t1, proof.t2, proof.t3, d, proof.a, proof.b, proof.c, vkey.s1, vkey.s2],
        )
        .map_err(|_| VerifierError::ArithmeticBackend)
    }

    /// The batched evaluation `e` whose group encoding is [E]1
    pub fn batch_evaluation(proof: &Proof, challenges: &Challenges, t: Scalar) -> Scalar {
        let Challenges { v, u, .. } = *challenges;

        t + v[0] * proof.eval_r
            + v[1] * proof.eval_a
            + v[2] * proof.eval_b
            + v[3] * proof.eval_c
            + v[4] * proof.eval_s1
            + v[5] * proof.eval_s2
            + u * proof.eval_zw
    }

    /// Compute the group-encoded batch evaluation [E]1
    fn step_11(proof: &Proof, challenges: &Challenges, t: Scalar) -> Result<G1Affine, VerifierError> {
        let e = Self::batch_evaluation(proof, challenges, t);
        G::ec_scalar_mul(e, g1_generator()).map_err(|_| VerifierError::ArithmeticBackend)
    }

    /// Compute the G1 elements of the final pairing check and run it:
    /// e(-A1, [x]2) * e(B1, [1]2) == 1, where
    /// A1 = Wxi + u * Wxiw and B1 = xi * Wxi + u * xi * w * Wxiw + F - E
    fn step_12(
        vkey: &VerificationKey,
        proof: &Proof,
        challenges: &Challenges,
        f: G1Affine,
        e: G1Affine,
    ) -> Result<bool, VerifierError> {
        let Challenges { xi, u, .. } = *challenges;

        let a1 = G::msm(&[Scalar::ONE, u], &[proof.w_xi, proof.w_xi_omega])
            .map_err(|_| VerifierError::ArithmeticBackend)?;

        let b1 = G::msm(
            &[xi, u * xi * vkey.omega, Scalar::ONE, Scalar::ONE],
            &[proof.w_xi, proof.w_xi_omega, f, negate_g1(&e)],
        )
        .map_err(|_| VerifierError::ArithmeticBackend)?;

        let pairs = [(negate_g1(&a1), vkey.x_2), (b1, g2_generator())];
        G::ec_pairing_check(&pairs).map_err(|_| VerifierError::ArithmeticBackend)
    }
}
