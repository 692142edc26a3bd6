// -*- mode: rust; -*-
//
// This file is part of sidh-p751.
// See LICENSE for licensing information.

//! Ephemeral supersingular-isogeny Diffie-Hellman over
//! \\(p = 2^{372} \cdot 3^{239} - 1\\), following the naming convention
//! of Costello-Longa-Naehrig: "Alice" walks \\(2^e\\)-isogenies and
//! "Bob" walks \\(3^e\\)-isogenies.
//!
//! Each party derives a secret kernel point \\(R = P + [m]\tau(P)\\) on
//! the starting curve, walks the isogeny tree it spans while pushing
//! the other party's three basis images along, and publishes the
//! normalised image coordinates \\((x_{P'}, x_{Q'}, x_{Q'-P'})\\).  The
//! shared secret is the j-invariant of the far curve.
//!
//! Key validation is not performed beyond range checks: this is an
//! *ephemeral* exchange and each key pair must be used at most once.
//!
//! The tree traversal comes in two shapes: the strategy-guided variant
//! used in production, which consumes the splits arrays from
//! `constants.rs` through a stack of pending branch points, and a
//! quadratic multiply-down variant retained as a cross-check oracle
//! (`*_simple`).

use core::fmt::Debug;

use rand_core::{CryptoRng, RngCore};
#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::backend::u64::field::{scalar_lt_3_238, scalar_mul_by_3};
use crate::constants::*;
use crate::errors::{InternalError, SidhError};
use crate::field::FieldElement;
use crate::fp2::Fp2Element;
use crate::isogeny::{FirstFourIsogeny, FourIsogeny, ThreeIsogeny};
use crate::montgomery::{MontgomeryCurve, ProjectivePoint};
use crate::scalar::{Scalar, ScalarModulus};

/// Alice's public key: the images of Bob's basis under her isogeny,
/// fully normalised.
#[derive(Copy, Clone, PartialEq)]
pub struct PublicKeyAlice {
    pub(crate) affine_xP: Fp2Element,
    pub(crate) affine_xQ: Fp2Element,
    pub(crate) affine_xQmP: Fp2Element,
}

/// Bob's public key: the images of Alice's basis under his isogeny,
/// fully normalised.
#[derive(Copy, Clone, PartialEq)]
pub struct PublicKeyBob {
    pub(crate) affine_xP: Fp2Element,
    pub(crate) affine_xQ: Fp2Element,
    pub(crate) affine_xQmP: Fp2Element,
}

macro_rules! public_key_bytes_impl {
    ($t:ident) => {
        impl $t {
            /// Serialize as \\(x_{P} \| x_{Q} \| x_{Q-P}\\), 576 bytes.
            pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_BYTES] {
                let mut bytes = [0u8; PUBLIC_KEY_BYTES];
                bytes[0..EXTENSION_FIELD_BYTES].copy_from_slice(&self.affine_xP.to_bytes());
                bytes[EXTENSION_FIELD_BYTES..2 * EXTENSION_FIELD_BYTES]
                    .copy_from_slice(&self.affine_xQ.to_bytes());
                bytes[2 * EXTENSION_FIELD_BYTES..]
                    .copy_from_slice(&self.affine_xQmP.to_bytes());
                bytes
            }

            /// Deserialize from 576 bytes.
            pub fn from_bytes(bytes: &[u8]) -> Result<$t, SidhError> {
                if bytes.len() != PUBLIC_KEY_BYTES {
                    return Err(InternalError::ParameterMismatch(
                        "public key must be 576 bytes",
                    )
                    .into());
                }
                let mut chunk = [0u8; EXTENSION_FIELD_BYTES];
                chunk.copy_from_slice(&bytes[0..EXTENSION_FIELD_BYTES]);
                let affine_xP = Fp2Element::from_bytes(&chunk);
                chunk.copy_from_slice(&bytes[EXTENSION_FIELD_BYTES..2 * EXTENSION_FIELD_BYTES]);
                let affine_xQ = Fp2Element::from_bytes(&chunk);
                chunk.copy_from_slice(&bytes[2 * EXTENSION_FIELD_BYTES..]);
                let affine_xQmP = Fp2Element::from_bytes(&chunk);
                Ok($t {
                    affine_xP,
                    affine_xQ,
                    affine_xQmP,
                })
            }
        }

        impl Debug for $t {
            fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
                write!(
                    f,
                    concat!(stringify!($t), "(xP: {:?}\nxQ: {:?}\nxQmP: {:?})"),
                    &self.affine_xP, &self.affine_xQ, &self.affine_xQmP
                )
            }
        }
    };
}

public_key_bytes_impl!(PublicKeyAlice);
public_key_bytes_impl!(PublicKeyBob);

/// Alice's secret key: an even scalar in \\([2, 2^{372})\\).
#[derive(Copy, Clone)]
pub struct SecretKeyAlice {
    pub(crate) scalar: [u8; SECRET_KEY_BYTES],
}

/// Bob's secret key: a multiple of three in \\([3, 3^{239})\\).
#[derive(Copy, Clone)]
pub struct SecretKeyBob {
    pub(crate) scalar: [u8; SECRET_KEY_BYTES],
}

impl Debug for SecretKeyAlice {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "SecretKeyAlice(scalar: [redacted])")
    }
}

impl Debug for SecretKeyBob {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "SecretKeyBob(scalar: [redacted])")
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for SecretKeyAlice {
    fn zeroize(&mut self) {
        self.scalar.zeroize();
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for SecretKeyBob {
    fn zeroize(&mut self) {
        self.scalar.zeroize();
    }
}

impl SecretKeyAlice {
    /// Accept a 48-byte little-endian scalar after checking it is
    /// even, nonzero, and below \\(2^{372}\\).
    pub fn from_bytes(bytes: &[u8; SECRET_KEY_BYTES]) -> Result<SecretKeyAlice, SidhError> {
        if bytes[0] & 1 != 0 {
            return Err(InternalError::ParameterMismatch("Alice's scalar must be even").into());
        }
        if bytes[47] != 0 || bytes[46] >= 0x10 {
            return Err(
                InternalError::ParameterMismatch("Alice's scalar must be below 2^372").into(),
            );
        }
        if bytes.iter().all(|&b| b == 0) {
            return Err(InternalError::ParameterMismatch("Alice's scalar must be nonzero").into());
        }
        Ok(SecretKeyAlice { scalar: *bytes })
    }

    /// The scalar bytes.
    pub fn to_bytes(&self) -> [u8; SECRET_KEY_BYTES] {
        self.scalar
    }

    /// Compute the public key with the strategy-guided traversal.
    ///
    /// The only failure is an internal-invariant error from the
    /// commit-point inversion, which a validated secret key cannot
    /// reach.
    pub fn public_key(&self) -> Result<PublicKeyAlice, SidhError> {
        let (mut xP, mut xQ, mut xQmP, xR, curve) = alice_keygen_setup(&self.scalar);
        let _ = alice_isogeny_walk(curve, xR, &mut [&mut xP, &mut xQ, &mut xQmP]);
        normalize_alice(&xP, &xQ, &xQmP)
    }

    /// Compute the public key with the quadratic multiply-down
    /// traversal; a slow oracle for the fast path.
    pub fn public_key_simple(&self) -> Result<PublicKeyAlice, SidhError> {
        let (mut xP, mut xQ, mut xQmP, mut xR, mut curve) = alice_keygen_setup(&self.scalar);
        for e in (0..=(E_ALICE - 4)).rev().step_by(2) {
            let xs = xR.pow2k(&curve, e as u32);
            let (next, phi) = FourIsogeny::compute(&xs);
            curve = next;
            xR = phi.eval(&xR);
            xP = phi.eval(&xP);
            xQ = phi.eval(&xQ);
            xQmP = phi.eval(&xQmP);
        }
        normalize_alice(&xP, &xQ, &xQmP)
    }

    /// Alice's view of the shared secret.
    pub fn shared_secret(&self, bob_public: &PublicKeyBob) -> Result<[u8; SHARED_SECRET_BYTES], SidhError> {
        let (kernel, curve) = alice_shared_setup(&self.scalar, bob_public)?;
        let j = alice_shared_from_kernel(kernel, curve)?;
        Ok(j.to_bytes())
    }

    /// The shared secret via the multiply-down traversal and the
    /// left-to-right three-point ladder.
    pub fn shared_secret_simple(
        &self,
        bob_public: &PublicKeyBob,
    ) -> Result<[u8; SHARED_SECRET_BYTES], SidhError> {
        let (mut xR, curve) = alice_shared_setup_simple(&self.scalar, bob_public)?;
        let (mut curve, first_phi) = FirstFourIsogeny::compute(&curve);
        xR = first_phi.eval(&xR);
        for e in (2..=(E_ALICE - 4)).rev().step_by(2) {
            let xs = xR.pow2k(&curve, e as u32);
            let (next, phi) = FourIsogeny::compute(&xs);
            curve = next;
            xR = phi.eval(&xR);
        }
        let (final_curve, _) = FourIsogeny::compute(&xR);
        let j = final_curve
            .j_invariant()
            .ok_or(InternalError::ParameterMismatch("walk ended on a singular curve"))?;
        Ok(j.to_bytes())
    }
}

impl SecretKeyBob {
    /// Accept a 48-byte little-endian scalar after checking it is a
    /// nonzero multiple of three below \\(3^{239}\\).
    pub fn from_bytes(bytes: &[u8; SECRET_KEY_BYTES]) -> Result<SecretKeyBob, SidhError> {
        let raw = Scalar::from_bytes_raw(bytes);
        if !raw.lt_modulus(ScalarModulus::ThreePow239) {
            return Err(
                InternalError::ParameterMismatch("Bob's scalar must be below 3^239").into(),
            );
        }
        if raw.mod_3() != 0 {
            return Err(InternalError::ParameterMismatch(
                "Bob's scalar must be a multiple of three",
            )
            .into());
        }
        if raw.is_zero() {
            return Err(InternalError::ParameterMismatch("Bob's scalar must be nonzero").into());
        }
        Ok(SecretKeyBob { scalar: *bytes })
    }

    /// The scalar bytes.
    pub fn to_bytes(&self) -> [u8; SECRET_KEY_BYTES] {
        self.scalar
    }

    /// Compute the public key with the strategy-guided traversal.
    ///
    /// The only failure is an internal-invariant error from the
    /// commit-point inversion, which a validated secret key cannot
    /// reach.
    pub fn public_key(&self) -> Result<PublicKeyBob, SidhError> {
        let (mut xP, mut xQ, mut xQmP, xR, curve) = bob_keygen_setup(&self.scalar);
        let _ = bob_isogeny_walk(curve, xR, &mut [&mut xP, &mut xQ, &mut xQmP]);
        normalize_bob(&xP, &xQ, &xQmP)
    }

    /// Compute the public key with the quadratic multiply-down
    /// traversal; a slow oracle for the fast path.
    pub fn public_key_simple(&self) -> Result<PublicKeyBob, SidhError> {
        let (mut xP, mut xQ, mut xQmP, mut xR, mut curve) = bob_keygen_setup(&self.scalar);
        for e in (0..E_BOB).rev() {
            let xs = xR.pow3k(&curve, e as u32);
            let (next, phi) = ThreeIsogeny::compute(&xs);
            curve = next;
            xR = phi.eval(&xR);
            xP = phi.eval(&xP);
            xQ = phi.eval(&xQ);
            xQmP = phi.eval(&xQmP);
        }
        normalize_bob(&xP, &xQ, &xQmP)
    }

    /// Bob's view of the shared secret.
    pub fn shared_secret(
        &self,
        alice_public: &PublicKeyAlice,
    ) -> Result<[u8; SHARED_SECRET_BYTES], SidhError> {
        let (kernel, curve) = bob_shared_setup(&self.scalar, alice_public)?;
        let j = bob_shared_from_kernel(kernel, curve)?;
        Ok(j.to_bytes())
    }

    /// The shared secret via the multiply-down traversal and the
    /// left-to-right three-point ladder.
    pub fn shared_secret_simple(
        &self,
        alice_public: &PublicKeyAlice,
    ) -> Result<[u8; SHARED_SECRET_BYTES], SidhError> {
        let (mut xR, mut curve) = bob_shared_setup_simple(&self.scalar, alice_public)?;
        for e in (1..E_BOB).rev() {
            let xs = xR.pow3k(&curve, e as u32);
            let (next, phi) = ThreeIsogeny::compute(&xs);
            curve = next;
            xR = phi.eval(&xR);
        }
        let (final_curve, _) = ThreeIsogeny::compute(&xR);
        let j = final_curve
            .j_invariant()
            .ok_or(InternalError::ParameterMismatch("walk ended on a singular curve"))?;
        Ok(j.to_bytes())
    }
}

/// Generate an Alice key pair from the given RNG.
///
/// Because this library performs no key validation beyond range
/// checks, each key pair should be used for at most one shared-secret
/// computation.
pub fn generate_alice_keypair<R>(rng: &mut R) -> Result<(PublicKeyAlice, SecretKeyAlice), SidhError>
where
    R: RngCore + CryptoRng,
{
    let mut scalar = [0u8; SECRET_KEY_BYTES];
    loop {
        rng.fill_bytes(&mut scalar);
        // Clamp into 2 * [0, 2^371).
        scalar[47] = 0;
        scalar[46] &= 15;
        scalar[0] &= 254;
        if scalar.iter().any(|&b| b != 0) {
            break;
        }
    }
    let secret = SecretKeyAlice { scalar };
    let public = secret.public_key()?;
    Ok((public, secret))
}

/// Generate a Bob key pair from the given RNG, by rejection sampling a
/// scalar in \\([0, 3^{238})\\) and tripling it.
pub fn generate_bob_keypair<R>(rng: &mut R) -> Result<(PublicKeyBob, SecretKeyBob), SidhError>
where
    R: RngCore + CryptoRng,
{
    let mut scalar = [0u8; SECRET_KEY_BYTES];
    let mut ok = false;
    // Each draw is masked into [0, 2^378) and accepted with
    // probability 3^238 / 2^378 = 0.58; 102 failures is ~2^-128.
    for _ in 0..102 {
        rng.fill_bytes(&mut scalar);
        scalar[47] &= 3;
        if bool::from(scalar_lt_3_238(&scalar)) && scalar.iter().any(|&b| b != 0) {
            ok = true;
            break;
        }
    }
    if !ok {
        return Err(InternalError::InternalInvariant("rejection sampling failed").into());
    }
    scalar_mul_by_3(&mut scalar);
    let secret = SecretKeyBob { scalar };
    let public = secret.public_key()?;
    Ok((public, secret))
}

// --- shared traversal machinery -----------------------------------------

fn alice_keygen_setup(
    scalar: &[u8; SECRET_KEY_BYTES],
) -> (
    ProjectivePoint,
    ProjectivePoint,
    ProjectivePoint,
    ProjectivePoint,
    MontgomeryCurve,
) {
    // Bob's basis: x(P_B), x(Q_B) = -x(P_B), and x(Q_B - P_B) from the
    // distortion map.
    let xpb = FieldElement(AFFINE_X_PB);
    let mut xP = ProjectivePoint::from_affine_prime_field(&xpb);
    let mut xQ = xP;
    xQ.X = -(&xQ.X);
    let mut xQmP = ProjectivePoint::distort_and_difference(&xpb);

    let mut xR = ProjectivePoint::secret_point(
        &FieldElement(AFFINE_X_PA),
        &FieldElement(AFFINE_Y_PA),
        &scalar[..],
    );

    // The first 4-isogeny absorbs the preliminary isomorphism and
    // consumes the starting curve.
    let (curve, first_phi) = FirstFourIsogeny::compute(&MontgomeryCurve::starting_curve());
    xP = first_phi.eval(&xP);
    xQ = first_phi.eval(&xQ);
    xQmP = first_phi.eval(&xQmP);
    xR = first_phi.eval(&xR);

    (xP, xQ, xQmP, xR, curve)
}

fn bob_keygen_setup(
    scalar: &[u8; SECRET_KEY_BYTES],
) -> (
    ProjectivePoint,
    ProjectivePoint,
    ProjectivePoint,
    ProjectivePoint,
    MontgomeryCurve,
) {
    let xpa = FieldElement(AFFINE_X_PA);
    let xP = ProjectivePoint::from_affine_prime_field(&xpa);
    let mut xQ = xP;
    xQ.X = -(&xQ.X);
    let xQmP = ProjectivePoint::distort_and_difference(&xpa);

    let xR = ProjectivePoint::secret_point(
        &FieldElement(AFFINE_X_PB),
        &FieldElement(AFFINE_Y_PB),
        &scalar[..],
    );

    (xP, xQ, xQmP, xR, MontgomeryCurve::starting_curve())
}

/// Recover the far curve and derive the kernel \\(x(P + [m]Q)\\) from a
/// received key; the fast path uses the right-to-left ladder, the
/// simple path the left-to-right three-point ladder.
fn shared_kernel(
    scalar: &[u8; SECRET_KEY_BYTES],
    xp: &Fp2Element,
    xq: &Fp2Element,
    xqmp: &Fp2Element,
    three_point: bool,
) -> (ProjectivePoint, MontgomeryCurve) {
    let curve = MontgomeryCurve::recover(xp, xq, xqmp);
    let xP = ProjectivePoint::from_affine(xp);
    let xQ = ProjectivePoint::from_affine(xq);
    let xQmP = ProjectivePoint::from_affine(xqmp);
    let kernel = if three_point {
        ProjectivePoint::three_point_ladder(&xP, &xQ, &xQmP, &curve, &scalar[..])
    } else {
        ProjectivePoint::right_to_left_ladder(&xP, &xQ, &xQmP, &curve, &scalar[..])
    };
    (kernel, curve)
}

/// The kernel must generate exactly the \\(2^{372}\\)-torsion; anything
/// else means the public key was off the expected torsion.
fn check_alice_kernel_order(
    kernel: &ProjectivePoint,
    curve: &MontgomeryCurve,
) -> Result<(), SidhError> {
    let almost = kernel.pow2k(curve, (E_ALICE - 1) as u32);
    if almost.is_identity() || !almost.pow2k(curve, 1).is_identity() {
        return Err(
            InternalError::ParameterMismatch("public key is off the 2-power torsion").into(),
        );
    }
    Ok(())
}

fn check_bob_kernel_order(
    kernel: &ProjectivePoint,
    curve: &MontgomeryCurve,
) -> Result<(), SidhError> {
    let almost = kernel.pow3k(curve, (E_BOB - 1) as u32);
    if almost.is_identity() || !almost.pow3k(curve, 1).is_identity() {
        return Err(
            InternalError::ParameterMismatch("public key is off the 3-power torsion").into(),
        );
    }
    Ok(())
}

fn alice_shared_setup(
    scalar: &[u8; SECRET_KEY_BYTES],
    bob_public: &PublicKeyBob,
) -> Result<(ProjectivePoint, MontgomeryCurve), SidhError> {
    let (kernel, curve) = shared_kernel(
        scalar,
        &bob_public.affine_xP,
        &bob_public.affine_xQ,
        &bob_public.affine_xQmP,
        false,
    );
    check_alice_kernel_order(&kernel, &curve)?;
    Ok((kernel, curve))
}

fn alice_shared_setup_simple(
    scalar: &[u8; SECRET_KEY_BYTES],
    bob_public: &PublicKeyBob,
) -> Result<(ProjectivePoint, MontgomeryCurve), SidhError> {
    let (kernel, curve) = shared_kernel(
        scalar,
        &bob_public.affine_xP,
        &bob_public.affine_xQ,
        &bob_public.affine_xQmP,
        true,
    );
    check_alice_kernel_order(&kernel, &curve)?;
    Ok((kernel, curve))
}

fn bob_shared_setup(
    scalar: &[u8; SECRET_KEY_BYTES],
    alice_public: &PublicKeyAlice,
) -> Result<(ProjectivePoint, MontgomeryCurve), SidhError> {
    let (kernel, curve) = shared_kernel(
        scalar,
        &alice_public.affine_xP,
        &alice_public.affine_xQ,
        &alice_public.affine_xQmP,
        false,
    );
    check_bob_kernel_order(&kernel, &curve)?;
    Ok((kernel, curve))
}

fn bob_shared_setup_simple(
    scalar: &[u8; SECRET_KEY_BYTES],
    alice_public: &PublicKeyAlice,
) -> Result<(ProjectivePoint, MontgomeryCurve), SidhError> {
    let (kernel, curve) = shared_kernel(
        scalar,
        &alice_public.affine_xP,
        &alice_public.affine_xQ,
        &alice_public.affine_xQmP,
        true,
    );
    check_bob_kernel_order(&kernel, &curve)?;
    Ok((kernel, curve))
}

/// Strategy-guided 4-isogeny walk.  Applies every constructed isogeny
/// to the points in `others`; the kernel is consumed.
fn alice_isogeny_walk(
    mut curve: MontgomeryCurve,
    mut xR: ProjectivePoint,
    others: &mut [&mut ProjectivePoint],
) -> MontgomeryCurve {
    let mut points: Vec<ProjectivePoint> = Vec::with_capacity(8);
    let mut indices: Vec<usize> = Vec::with_capacity(8);
    let mut i: usize = 0;

    for j in 1..MAX_ALICE {
        while i < MAX_ALICE - j {
            points.push(xR);
            indices.push(i);
            let k = ALICE_STRATEGY[MAX_ALICE - i - j] as usize;
            xR = xR.pow2k(&curve, 2 * k as u32);
            i += k;
        }
        let (next, phi) = FourIsogeny::compute(&xR);
        curve = next;
        for point in points.iter_mut() {
            *point = phi.eval(point);
        }
        for other in others.iter_mut() {
            **other = phi.eval(&**other);
        }
        xR = points.pop().expect("strategy stack underflow");
        i = indices.pop().expect("strategy stack underflow");
    }

    let (next, phi) = FourIsogeny::compute(&xR);
    curve = next;
    for other in others.iter_mut() {
        **other = phi.eval(&**other);
    }
    curve
}

/// Strategy-guided 3-isogeny walk; same contract as
/// [`alice_isogeny_walk`].
fn bob_isogeny_walk(
    mut curve: MontgomeryCurve,
    mut xR: ProjectivePoint,
    others: &mut [&mut ProjectivePoint],
) -> MontgomeryCurve {
    let mut points: Vec<ProjectivePoint> = Vec::with_capacity(8);
    let mut indices: Vec<usize> = Vec::with_capacity(8);
    let mut i: usize = 0;

    for j in 1..MAX_BOB {
        while i < MAX_BOB - j {
            points.push(xR);
            indices.push(i);
            let k = BOB_STRATEGY[MAX_BOB - i - j] as usize;
            xR = xR.pow3k(&curve, k as u32);
            i += k;
        }
        let (next, phi) = ThreeIsogeny::compute(&xR);
        curve = next;
        for point in points.iter_mut() {
            *point = phi.eval(point);
        }
        for other in others.iter_mut() {
            **other = phi.eval(&**other);
        }
        xR = points.pop().expect("strategy stack underflow");
        i = indices.pop().expect("strategy stack underflow");
    }

    let (next, phi) = ThreeIsogeny::compute(&xR);
    curve = next;
    for other in others.iter_mut() {
        **other = phi.eval(&**other);
    }
    curve
}

/// Walk Alice's tree from an order-\\(2^{372}\\) kernel on `curve` and
/// return the j-invariant of the far end.  Used by both the plain and
/// the decompressing shared-secret paths.
pub(crate) fn alice_shared_from_kernel(
    kernel: ProjectivePoint,
    curve: MontgomeryCurve,
) -> Result<Fp2Element, InternalError> {
    let (curve, first_phi) = FirstFourIsogeny::compute(&curve);
    let kernel = first_phi.eval(&kernel);
    let final_curve = alice_isogeny_walk(curve, kernel, &mut []);
    final_curve
        .j_invariant()
        .ok_or(InternalError::ParameterMismatch("walk ended on a singular curve"))
}

/// Walk Bob's tree from an order-\\(3^{239}\\) kernel on `curve` and
/// return the j-invariant of the far end.
pub(crate) fn bob_shared_from_kernel(
    kernel: ProjectivePoint,
    curve: MontgomeryCurve,
) -> Result<Fp2Element, InternalError> {
    let final_curve = bob_isogeny_walk(curve, kernel, &mut []);
    final_curve
        .j_invariant()
        .ok_or(InternalError::ParameterMismatch("walk ended on a singular curve"))
}

fn normalize_alice(
    xP: &ProjectivePoint,
    xQ: &ProjectivePoint,
    xQmP: &ProjectivePoint,
) -> Result<PublicKeyAlice, SidhError> {
    // The 3-way inversion is the commit point of keygen; a valid
    // secret key cannot put any image at infinity.
    let (ip, iq, iqmp) = Fp2Element::batch3_invert(&xP.Z, &xQ.Z, &xQmP.Z)
        .ok_or(InternalError::InternalInvariant("keygen image at infinity"))?;
    Ok(PublicKeyAlice {
        affine_xP: &xP.X * &ip,
        affine_xQ: &xQ.X * &iq,
        affine_xQmP: &xQmP.X * &iqmp,
    })
}

fn normalize_bob(
    xP: &ProjectivePoint,
    xQ: &ProjectivePoint,
    xQmP: &ProjectivePoint,
) -> Result<PublicKeyBob, SidhError> {
    let (ip, iq, iqmp) = Fp2Element::batch3_invert(&xP.Z, &xQ.Z, &xQmP.Z)
        .ok_or(InternalError::InternalInvariant("keygen image at infinity"))?;
    Ok(PublicKeyBob {
        affine_xP: &xP.X * &ip,
        affine_xQ: &xQ.X * &iq,
        affine_xQmP: &xQmP.X * &iqmp,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    // m_A = 2 * randint(0, 2^371), m_B = 3 * randint(0, 3^238)
    const M_A: [u8; 48] = [
        248, 31, 9, 39, 165, 125, 79, 135, 70, 97, 87, 231, 221, 204, 245, 38, 150, 198,
        187, 184, 199, 148, 156, 18, 137, 71, 248, 83, 111, 170, 138, 61, 112, 25, 188,
        197, 132, 151, 1, 0, 207, 178, 24, 72, 171, 22, 11, 0,
    ];
    const M_B: [u8; 48] = [
        246, 217, 158, 190, 100, 227, 224, 181, 171, 32, 120, 72, 92, 115, 113, 62, 103,
        57, 71, 252, 166, 121, 126, 201, 55, 99, 213, 234, 243, 228, 171, 68, 9, 239,
        214, 37, 255, 242, 217, 180, 25, 54, 242, 61, 101, 245, 78, 0,
    ];

    #[test]
    fn alice_keygen_fast_matches_simple() {
        let secret = SecretKeyAlice::from_bytes(&M_A).unwrap();
        let fast = secret.public_key().unwrap();
        let simple = secret.public_key_simple().unwrap();
        assert_eq!(fast.to_bytes()[..], simple.to_bytes()[..]);
    }

    #[test]
    fn bob_keygen_fast_matches_simple() {
        let secret = SecretKeyBob::from_bytes(&M_B).unwrap();
        let fast = secret.public_key().unwrap();
        let simple = secret.public_key_simple().unwrap();
        assert_eq!(fast.to_bytes()[..], simple.to_bytes()[..]);
    }

    #[test]
    fn shared_secrets_agree_fast_and_simple() {
        let alice = SecretKeyAlice::from_bytes(&M_A).unwrap();
        let bob = SecretKeyBob::from_bytes(&M_B).unwrap();
        let alice_public = alice.public_key().unwrap();
        let bob_public = bob.public_key().unwrap();

        let fast_a = alice.shared_secret(&bob_public).unwrap();
        let fast_b = bob.shared_secret(&alice_public).unwrap();
        let slow_a = alice.shared_secret_simple(&bob_public).unwrap();
        let slow_b = bob.shared_secret_simple(&alice_public).unwrap();

        assert_eq!(fast_a[..], fast_b[..]);
        assert_eq!(fast_a[..], slow_a[..]);
        assert_eq!(fast_a[..], slow_b[..]);
    }

    #[test]
    fn secret_key_validation() {
        let mut bytes = [0u8; 48];
        assert!(SecretKeyAlice::from_bytes(&bytes).is_err()); // zero
        bytes[0] = 1;
        assert!(SecretKeyAlice::from_bytes(&bytes).is_err()); // odd
        bytes[0] = 2;
        assert!(SecretKeyAlice::from_bytes(&bytes).is_ok()); // minimal key
        bytes[47] = 1;
        let e = SecretKeyAlice::from_bytes(&bytes).unwrap_err();
        assert!(e.is_parameter_mismatch()); // >= 2^372

        let mut bytes = [0u8; 48];
        assert!(SecretKeyBob::from_bytes(&bytes).is_err()); // zero
        bytes[0] = 4;
        assert!(SecretKeyBob::from_bytes(&bytes).is_err()); // not divisible by 3
        bytes[0] = 3;
        assert!(SecretKeyBob::from_bytes(&bytes).is_ok()); // minimal key
        bytes = [0xff; 48];
        assert!(SecretKeyBob::from_bytes(&bytes).is_err()); // >= 3^239
    }

    #[test]
    fn public_key_bytes_round_trip() {
        let alice = SecretKeyAlice::from_bytes(&M_A).unwrap();
        let pk = alice.public_key().unwrap();
        let pk2 = PublicKeyAlice::from_bytes(&pk.to_bytes()[..]).unwrap();
        assert_eq!(pk, pk2);
        assert!(PublicKeyAlice::from_bytes(&pk.to_bytes()[..100]).is_err());
    }
}
