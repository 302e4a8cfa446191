//! PLONK verification fixtures.
//!
//! The transcript does not absorb the verification key, so an accepting
//! instance can be built without a prover: sample every commitment with a
//! known discrete log, derive the challenges from the proof, replay the
//! verifier's scalar pipeline in the exponent, and finally pick the SRS point
//! `[x]2` that makes the pairing equation hold.
//!
//! Since `[D]1`, `[F]1` and `[E]1` are rebuilt from the verifier's own scalar
//! helpers, these instances cannot catch an error in those helpers' formulas.
//! The verifier's unit tests recompute the linearization scalars separately.

use ark_bn254::Fr;
use ark_ec::CurveGroup;
use ark_ff::{FftField, Field, Zero};
use ark_std::UniformRand;
use eyre::{eyre, Result};
use pool_common::{
    curve::{field_to_scalar, g1_generator, g2_generator, scalar_to_field},
    field::Scalar,
    types::{G1Affine, Proof, PublicInputs, VerificationKey},
};
use pool_core::{
    backends::{ArkG1ArithmeticBackend, NativeHasher},
    verifier::Verifier,
};
use rand::Rng;

use crate::misc::random_scalar;

/// The log2 of the domain size used by fixtures
pub const FIXTURE_DOMAIN_POWER: u32 = 10;

/// The verifier over the native backends
pub type NativeVerifier = Verifier<ArkG1ArithmeticBackend, NativeHasher>;

/// A verification key, a proof and the public inputs it verifies against
pub struct AcceptingInstance {
    pub vkey: VerificationKey,
    pub proof: Proof,
    pub public_inputs: PublicInputs,
}

/// Multiplies the G1 generator by a discrete log
fn g1_mul(dlog: Fr) -> G1Affine {
    (g1_generator() * dlog).into_affine()
}

/// Converts a scalar into an arkworks field element
fn to_fr(scalar: Scalar) -> Result<Fr> {
    scalar_to_field(scalar).map_err(|e| eyre!("{e}"))
}

/// Builds a verification key & proof that verify against the given public inputs
pub fn gen_accepting_instance(
    public_inputs: PublicInputs,
    rng: &mut impl Rng,
) -> Result<AcceptingInstance> {
    let omega = Fr::get_root_of_unity(1 << FIXTURE_DOMAIN_POWER)
        .ok_or_else(|| eyre!("no root of unity of the fixture's order"))?;

    // Discrete logs of the verification key's commitments
    let [q_m, q_l, q_r, q_o, q_c, s1, s2, s3] = [(); 8].map(|_| Fr::rand(rng));
    let mut vkey = VerificationKey {
        n_public: public_inputs.len() as u64,
        power: FIXTURE_DOMAIN_POWER,
        k1: random_scalar(rng),
        k2: random_scalar(rng),
        omega: field_to_scalar(&omega),
        q_m: g1_mul(q_m),
        q_l: g1_mul(q_l),
        q_r: g1_mul(q_r),
        q_o: g1_mul(q_o),
        q_c: g1_mul(q_c),
        s1: g1_mul(s1),
        s2: g1_mul(s2),
        s3: g1_mul(s3),
        // Replaced once the challenges are known
        x_2: g2_generator(),
    };

    // Discrete logs of the proof's commitments
    let [a, b, c, z, t1, t2, t3, w_xi, w_xi_omega] = [(); 9].map(|_| Fr::rand(rng));
    let proof = Proof {
        a: g1_mul(a),
        b: g1_mul(b),
        c: g1_mul(c),
        z: g1_mul(z),
        t1: g1_mul(t1),
        t2: g1_mul(t2),
        t3: g1_mul(t3),
        w_xi: g1_mul(w_xi),
        w_xi_omega: g1_mul(w_xi_omega),
        eval_a: random_scalar(rng),
        eval_b: random_scalar(rng),
        eval_c: random_scalar(rng),
        eval_s1: random_scalar(rng),
        eval_s2: random_scalar(rng),
        eval_zw: random_scalar(rng),
        eval_r: random_scalar(rng),
    };

    let challenges = NativeVerifier::step_4(&proof, &public_inputs).map_err(|e| eyre!("{e}"))?;
    let vanishing = NativeVerifier::step_5(&vkey, &challenges);
    let bases = NativeVerifier::step_6(&vkey, &challenges, &vanishing, public_inputs.len())
        .map_err(|e| eyre!("{e}"))?;
    let l0 = *bases.first().ok_or_else(|| eyre!("no lagrange bases"))?;
    let pi_eval = NativeVerifier::step_7(&public_inputs, &bases).map_err(|e| eyre!("{e}"))?;
    let t = NativeVerifier::step_8(&proof, &challenges, &vanishing, pi_eval, l0)
        .map_err(|e| eyre!("{e}"))?;

    // [D]1 in the exponent
    let lin = NativeVerifier::linearization_scalars(&vkey, &proof, &challenges, l0);
    let mut d = -to_fr(lin[6])? * s3;
    for (scalar, dlog) in lin[..6].iter().zip([q_m, q_l, q_r, q_o, q_c, z]) {
        d += to_fr(*scalar)? * dlog;
    }

    // [F]1 & [E]1 in the exponent
    let mut f = Fr::zero();
    let opening = NativeVerifier::opening_scalars(&challenges, &vanishing);
    for (scalar, dlog) in opening.iter().zip([t1, t2, t3, d, a, b, c, s1, s2]) {
        f += to_fr(*scalar)? * dlog;
    }
    let e = to_fr(NativeVerifier::batch_evaluation(&proof, &challenges, t))?;

    // e(-A1, [x]2) * e(B1, [1]2) == 1 iff x * A1 == B1
    let xi = to_fr(challenges.xi)?;
    let u = to_fr(challenges.u)?;
    let a1 = w_xi + u * w_xi_omega;
    let b1 = xi * w_xi + u * xi * omega * w_xi_omega + f - e;
    let x = b1 * a1.inverse().ok_or_else(|| eyre!("degenerate opening commitment"))?;
    vkey.x_2 = (g2_generator() * x).into_affine();

    Ok(AcceptingInstance { vkey, proof, public_inputs })
}

/// Encodes a recipient identifier into the low bits of a 32-byte word
pub fn recipient_word(recipient: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&recipient.to_be_bytes());
    word
}

/// Builds an accepting instance for a withdrawal's public inputs:
/// `[root, nullifier, recipient]`
pub fn gen_withdrawal_instance(
    root: Scalar,
    nullifier: [u8; 32],
    recipient: u64,
    rng: &mut impl Rng,
) -> Result<AcceptingInstance> {
    let public_inputs = PublicInputs(vec![root.to_be_bytes(), nullifier, recipient_word(recipient)]);
    gen_accepting_instance(public_inputs, rng)
}

#[cfg(test)]
mod tests {
    use rand::thread_rng;

    use super::{gen_accepting_instance, NativeVerifier};
    use crate::misc::random_word;
    use pool_common::types::PublicInputs;

    #[test]
    fn test_instance_verifies() {
        let mut rng = thread_rng();
        let public_inputs = PublicInputs(vec![random_word(&mut rng), random_word(&mut rng)]);
        let instance = gen_accepting_instance(public_inputs, &mut rng).unwrap();

        assert!(instance.vkey.validate().is_ok());
        assert_eq!(
            NativeVerifier::verify(&instance.vkey, &instance.proof, &instance.public_inputs),
            Ok(true)
        );
    }
}
