// -*- mode: rust; -*-
//
// This file is part of sidh-p751.
// See LICENSE for licensing information.

//! Public-key compression and decompression.
//!
//! An uncompressed public key carries three \\(\mathbb F_{p^2}\\)
//! elements.  Compression replaces them with one bit and three scalars
//! modulo the torsion order, plus the recovered curve coefficient: the
//! key's points are expressed in a torsion basis \\((R_1, R_2)\\) that
//! is a pure function of the curve, via Tate pairings and windowed
//! Pohlig-Hellman discrete logarithms,
//!
//! \\(\phi(P) = [a_0]R_1 + [b_0]R_2, \qquad \phi(Q) = [a_1]R_1 + [b_1]R_2,\\)
//!
//! and the four coefficients are normalised by the first unit among
//! \\(a_0, b_0\\) (recorded in the bit) down to three scalars.
//!
//! Decompression never rebuilds the uncompressed key: the receiver
//! folds his secret into the scalars,
//! \\(t = (s_1 + sk \cdot s_3)/(1 + sk \cdot s_2)\\), regenerates the
//! same basis, and forms his kernel \\(R_1 + [t]R_2\\) directly with
//! one two-dimensional scalar multiplication, continuing into the
//! ordinary shared-secret walk.
//!
//! The y-coordinate signs recovered during compression are anchored to
//! the transmitted \\(x(Q - P)\\), which keeps the compressed key
//! interchangeable with the uncompressed one; a key that fails this
//! anchor (or any other consistency check) is reported as a
//! [`SidhError`] domain violation.

use crate::basis;
use crate::constants::*;
use crate::dlog::PohligHellman;
use crate::errors::{InternalError, SidhError};
use crate::fp2::Fp2Element;
use crate::montgomery::{
    okeya_sakurai_recover, xadd_affine_projective, AffinePoint, MontgomeryCurve, ProjectivePoint,
};
use crate::pairing;
use crate::scalar::{Scalar, ScalarModulus};
use crate::sidh::{
    alice_shared_from_kernel, bob_shared_from_kernel, PublicKeyAlice, PublicKeyBob,
    SecretKeyAlice, SecretKeyBob,
};

/// The number of bytes in a compressed Alice public key: a bit, three
/// scalars modulo \\(3^{239}\\) (48 bytes each), and the curve
/// coefficient.
pub const COMPRESSED_PUBLIC_KEY_ALICE_BYTES: usize = 1 + 3 * 48 + EXTENSION_FIELD_BYTES;

/// The number of bytes in a compressed Bob public key: a bit, three
/// scalars modulo \\(2^{372}\\) (47 bytes each), and the curve
/// coefficient.
pub const COMPRESSED_PUBLIC_KEY_BOB_BYTES: usize = 1 + 3 * 47 + EXTENSION_FIELD_BYTES;

/// Alice's public key in compressed form; scalars are modulo
/// \\(3^{239}\\).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CompressedPublicKeyAlice {
    pub(crate) bit: u8,
    pub(crate) s1: Scalar,
    pub(crate) s2: Scalar,
    pub(crate) s3: Scalar,
    pub(crate) curve_a: Fp2Element,
}

/// Bob's public key in compressed form; scalars are modulo
/// \\(2^{372}\\).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CompressedPublicKeyBob {
    pub(crate) bit: u8,
    pub(crate) s1: Scalar,
    pub(crate) s2: Scalar,
    pub(crate) s3: Scalar,
    pub(crate) curve_a: Fp2Element,
}

/// Compress Alice's public key, whose points live on the
/// \\(3^{239}\\)-torsion of her curve.
pub fn compress_alice_public_key(
    pk: &PublicKeyAlice,
) -> Result<CompressedPublicKeyAlice, SidhError> {
    let (bit, s1, s2, s3, curve_a) =
        compress_triple(&pk.affine_xP, &pk.affine_xQ, &pk.affine_xQmP, 3)?;
    Ok(CompressedPublicKeyAlice {
        bit,
        s1,
        s2,
        s3,
        curve_a,
    })
}

/// Compress Bob's public key, whose points live on the
/// \\(2^{372}\\)-torsion of his curve.
pub fn compress_bob_public_key(pk: &PublicKeyBob) -> Result<CompressedPublicKeyBob, SidhError> {
    let (bit, s1, s2, s3, curve_a) =
        compress_triple(&pk.affine_xP, &pk.affine_xQ, &pk.affine_xQmP, 2)?;
    Ok(CompressedPublicKeyBob {
        bit,
        s1,
        s2,
        s3,
        curve_a,
    })
}

impl SecretKeyAlice {
    /// Alice's shared secret from Bob's compressed public key.
    ///
    /// Matches [`SecretKeyAlice::shared_secret`] on the corresponding
    /// uncompressed key byte for byte.
    pub fn shared_secret_compressed(
        &self,
        bob_public: &CompressedPublicKeyBob,
    ) -> Result<[u8; SHARED_SECRET_BYTES], SidhError> {
        let (kernel, curve) = decompress_kernel(
            bob_public.bit,
            &bob_public.s1,
            &bob_public.s2,
            &bob_public.s3,
            &bob_public.curve_a,
            &self.scalar,
            2,
        )?;
        let almost = kernel.pow2k(&curve, (E_ALICE - 1) as u32);
        if almost.is_identity() || !almost.pow2k(&curve, 1).is_identity() {
            return Err(
                InternalError::ParameterMismatch("compressed key is off the 2-power torsion")
                    .into(),
            );
        }
        let j = alice_shared_from_kernel(kernel, curve)?;
        Ok(j.to_bytes())
    }
}

impl SecretKeyBob {
    /// Bob's shared secret from Alice's compressed public key.
    pub fn shared_secret_compressed(
        &self,
        alice_public: &CompressedPublicKeyAlice,
    ) -> Result<[u8; SHARED_SECRET_BYTES], SidhError> {
        let (kernel, curve) = decompress_kernel(
            alice_public.bit,
            &alice_public.s1,
            &alice_public.s2,
            &alice_public.s3,
            &alice_public.curve_a,
            &self.scalar,
            3,
        )?;
        let almost = kernel.pow3k(&curve, (E_BOB - 1) as u32);
        if almost.is_identity() || !almost.pow3k(&curve, 1).is_identity() {
            return Err(
                InternalError::ParameterMismatch("compressed key is off the 3-power torsion")
                    .into(),
            );
        }
        let j = bob_shared_from_kernel(kernel, curve)?;
        Ok(j.to_bytes())
    }
}

fn modulus_for(ell: u32) -> (ScalarModulus, usize) {
    if ell == 2 {
        (ScalarModulus::TwoPow372, E_ALICE)
    } else {
        (ScalarModulus::ThreePow239, E_BOB)
    }
}

fn compress_triple(
    xP: &Fp2Element,
    xQ: &Fp2Element,
    xQmP: &Fp2Element,
    ell: u32,
) -> Result<(u8, Scalar, Scalar, Scalar, Fp2Element), SidhError> {
    let (m, e) = modulus_for(ell);
    let curve = MontgomeryCurve::recover(xP, xQ, xQmP);
    let a = curve
        .affine_coefficient()
        .ok_or(InternalError::DomainViolation("singular curve coefficients"))?;

    // Lift P and Q back off the Kummer line.  The square-root signs are
    // individually arbitrary, but their relative sign must reproduce
    // the transmitted x(Q - P); otherwise the decompressor would walk
    // from the wrong kernel.
    let y_p = AffinePoint::curve_rhs(xP, &a)
        .sqrt()
        .ok_or(InternalError::DomainViolation("public point not on the curve"))?;
    let y_q = AffinePoint::curve_rhs(xQ, &a)
        .sqrt()
        .ok_or(InternalError::DomainViolation("public point not on the curve"))?;
    let p = AffinePoint { x: *xP, y: y_p };
    let mut q = AffinePoint { x: *xQ, y: y_q };
    let anchored = match AffinePoint::difference_x(&p, &q, &a) {
        Some(dx) if dx == *xQmP => true,
        _ => {
            q.y = -(&q.y);
            matches!(AffinePoint::difference_x(&p, &q, &a), Some(dx) if dx == *xQmP)
        }
    };
    if !anchored {
        return Err(InternalError::DomainViolation("x(Q - P) does not match P and Q").into());
    }

    let (r1, r2) = if ell == 2 {
        basis::generate_basis_two(&a)?
    } else {
        basis::generate_basis_three(&a)?
    };
    let (r1_aff, r2_aff) = basis::lift_basis(&r1, &r2, &a)?;

    // g = e(R2, R1) generates mu_{ell^e}; the four targets give
    // e(R2, phi(P)) = g^{a0}, e(R2, phi(Q)) = g^{a1},
    // e(R1, phi(P)) = g^{-b0}, e(R1, phi(Q)) = g^{-b1}.
    let pairings = pairing::tate_pairings_five(ell, &r1_aff, &r2_aff, &p, &q, &a)?;
    let ph = PohligHellman::new(&pairings[0], ell, e);
    let dl = |r: &Fp2Element| -> Result<Scalar, SidhError> {
        // A digit landing outside its table here means the pairing
        // values were not in <g>: the key was off the torsion.
        ph.dlog(r).map_err(|_| {
            InternalError::DomainViolation("public key is off the expected torsion").into()
        })
    };
    let a0 = dl(&pairings[1])?;
    let a1 = dl(&pairings[2])?;
    let b0 = dl(&pairings[3])?.neg_mod(m);
    let b1 = dl(&pairings[4])?.neg_mod(m);

    // Normalise by the first unit among (a0, b0); both cannot be
    // non-units, or phi(P) would not have full order.
    if a0.is_unit(m) {
        let inv = a0
            .invert_mod(m)
            .ok_or(InternalError::InternalInvariant("unit with no inverse"))?;
        Ok((
            0,
            b0.mul_mod(&inv, m),
            a1.mul_mod(&inv, m),
            b1.mul_mod(&inv, m),
            a,
        ))
    } else {
        let inv = b0
            .invert_mod(m)
            .ok_or(InternalError::DomainViolation("public point of non-maximal order"))?;
        Ok((
            1,
            a0.mul_mod(&inv, m),
            a1.mul_mod(&inv, m),
            b1.mul_mod(&inv, m),
            a,
        ))
    }
}

/// Rebuild the receiver's kernel from a compressed key and his secret.
fn decompress_kernel(
    bit: u8,
    s1: &Scalar,
    s2: &Scalar,
    s3: &Scalar,
    curve_a: &Fp2Element,
    sk: &[u8; SECRET_KEY_BYTES],
    ell: u32,
) -> Result<(ProjectivePoint, MontgomeryCurve), SidhError> {
    let (m, _) = modulus_for(ell);
    let (r1, r2) = if ell == 2 {
        basis::generate_basis_two(curve_a)?
    } else {
        basis::generate_basis_three(curve_a)?
    };
    let (r1_aff, r2_aff) = basis::lift_basis(&r1, &r2, curve_a)?;

    let sk_scalar = Scalar::from_bytes_mod(sk, m);
    // With bit = 0 the kernel is R1 + [t]R2 for
    // t = (s1 + sk s3)/(1 + sk s2); with bit = 1 the roles of R1 and
    // R2 (and of s2, s3) swap.  The denominator is a unit whenever the
    // scalars agree with the bit, because sk is divisible by ell.
    let one = Scalar::from_u64(1);
    let (num, den, base, other) = match bit {
        0 => (
            s1.add_mod(&sk_scalar.mul_mod(s3, m), m),
            one.add_mod(&sk_scalar.mul_mod(s2, m), m),
            r2_aff,
            r1_aff,
        ),
        1 => (
            s1.add_mod(&sk_scalar.mul_mod(s2, m), m),
            one.add_mod(&sk_scalar.mul_mod(s3, m), m),
            r1_aff,
            r2_aff,
        ),
        _ => {
            return Err(
                InternalError::ParameterMismatch("compressed key bit must be 0 or 1").into(),
            )
        }
    };
    let den_inv = den.invert_mod(m).ok_or(InternalError::DomainViolation(
        "compressed scalars disagree with the normalisation bit",
    ))?;
    let t = num.mul_mod(&den_inv, m);

    // Two-dimensional multiplication: ladder to x([t]B) and x([t+1]B),
    // recover the y-coordinate, and add the other generator.
    let curve = MontgomeryCurve::from_affine(curve_a);
    let base_proj = ProjectivePoint::from_affine(&base.x);
    let (xt, xt1) = base_proj.ladder(&curve, &t.to_bytes()[..]);
    let (qx, qy, qz) = okeya_sakurai_recover(&base.x, &base.y, &xt, &xt1, curve_a);
    let kernel = xadd_affine_projective(&other, &qx, &qy, &qz, curve_a);
    Ok((kernel, curve))
}

impl CompressedPublicKeyAlice {
    /// Serialize as bit, three 48-byte scalars, and the curve
    /// coefficient.
    pub fn to_bytes(&self) -> [u8; COMPRESSED_PUBLIC_KEY_ALICE_BYTES] {
        let mut bytes = [0u8; COMPRESSED_PUBLIC_KEY_ALICE_BYTES];
        bytes[0] = self.bit;
        bytes[1..49].copy_from_slice(&self.s1.to_bytes());
        bytes[49..97].copy_from_slice(&self.s2.to_bytes());
        bytes[97..145].copy_from_slice(&self.s3.to_bytes());
        bytes[145..].copy_from_slice(&self.curve_a.to_bytes());
        bytes
    }

    /// Deserialize, checking the bit and the scalar ranges.
    pub fn from_bytes(bytes: &[u8]) -> Result<CompressedPublicKeyAlice, SidhError> {
        if bytes.len() != COMPRESSED_PUBLIC_KEY_ALICE_BYTES {
            return Err(InternalError::ParameterMismatch(
                "compressed Alice key must be 337 bytes",
            )
            .into());
        }
        if bytes[0] > 1 {
            return Err(
                InternalError::ParameterMismatch("compressed key bit must be 0 or 1").into(),
            );
        }
        let mut scalars = [Scalar::ZERO; 3];
        for (i, scalar) in scalars.iter_mut().enumerate() {
            let mut sb = [0u8; 48];
            sb.copy_from_slice(&bytes[1 + 48 * i..49 + 48 * i]);
            let raw = Scalar::from_bytes_raw(&sb);
            if !raw.lt_modulus(ScalarModulus::ThreePow239) {
                return Err(InternalError::ParameterMismatch(
                    "compressed scalar must be below 3^239",
                )
                .into());
            }
            *scalar = raw;
        }
        let mut ab = [0u8; EXTENSION_FIELD_BYTES];
        ab.copy_from_slice(&bytes[145..]);
        Ok(CompressedPublicKeyAlice {
            bit: bytes[0],
            s1: scalars[0],
            s2: scalars[1],
            s3: scalars[2],
            curve_a: Fp2Element::from_bytes(&ab),
        })
    }
}

impl CompressedPublicKeyBob {
    /// Serialize as bit, three 47-byte scalars, and the curve
    /// coefficient.
    pub fn to_bytes(&self) -> [u8; COMPRESSED_PUBLIC_KEY_BOB_BYTES] {
        let mut bytes = [0u8; COMPRESSED_PUBLIC_KEY_BOB_BYTES];
        bytes[0] = self.bit;
        bytes[1..48].copy_from_slice(&self.s1.to_bytes()[..47]);
        bytes[48..95].copy_from_slice(&self.s2.to_bytes()[..47]);
        bytes[95..142].copy_from_slice(&self.s3.to_bytes()[..47]);
        bytes[142..].copy_from_slice(&self.curve_a.to_bytes());
        bytes
    }

    /// Deserialize, checking the bit and the scalar ranges.
    pub fn from_bytes(bytes: &[u8]) -> Result<CompressedPublicKeyBob, SidhError> {
        if bytes.len() != COMPRESSED_PUBLIC_KEY_BOB_BYTES {
            return Err(InternalError::ParameterMismatch(
                "compressed Bob key must be 334 bytes",
            )
            .into());
        }
        if bytes[0] > 1 {
            return Err(
                InternalError::ParameterMismatch("compressed key bit must be 0 or 1").into(),
            );
        }
        let mut scalars = [Scalar::ZERO; 3];
        for (i, scalar) in scalars.iter_mut().enumerate() {
            let mut sb = [0u8; 48];
            sb[..47].copy_from_slice(&bytes[1 + 47 * i..48 + 47 * i]);
            let raw = Scalar::from_bytes_raw(&sb);
            if !raw.lt_modulus(ScalarModulus::TwoPow372) {
                return Err(InternalError::ParameterMismatch(
                    "compressed scalar must be below 2^372",
                )
                .into());
            }
            *scalar = raw;
        }
        let mut ab = [0u8; EXTENSION_FIELD_BYTES];
        ab.copy_from_slice(&bytes[142..]);
        Ok(CompressedPublicKeyBob {
            bit: bytes[0],
            s1: scalars[0],
            s2: scalars[1],
            s3: scalars[2],
            curve_a: Fp2Element::from_bytes(&ab),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn compressed_key_bytes_round_trip() {
        let key = CompressedPublicKeyAlice {
            bit: 1,
            s1: Scalar::from_u64(12345),
            s2: Scalar::from_u64(678910),
            s3: Scalar::from_u64(0xfeedface),
            curve_a: Fp2Element::from_u64_pair(17, 23),
        };
        let round = CompressedPublicKeyAlice::from_bytes(&key.to_bytes()[..]).unwrap();
        assert_eq!(key, round);

        let key = CompressedPublicKeyBob {
            bit: 0,
            s1: Scalar::from_u64(1),
            s2: Scalar::from_u64(2),
            s3: Scalar::from_u64(3),
            curve_a: Fp2Element::from_u64_pair(6, 0),
        };
        let round = CompressedPublicKeyBob::from_bytes(&key.to_bytes()[..]).unwrap();
        assert_eq!(key, round);
    }

    #[test]
    fn compressed_key_validation() {
        let key = CompressedPublicKeyAlice {
            bit: 0,
            s1: Scalar::from_u64(5),
            s2: Scalar::from_u64(6),
            s3: Scalar::from_u64(7),
            curve_a: Fp2Element::from_u64_pair(6, 0),
        };
        let mut bytes = key.to_bytes();
        bytes[0] = 2;
        assert!(CompressedPublicKeyAlice::from_bytes(&bytes[..]).is_err());
        let mut bytes = key.to_bytes();
        // force s1 out of range: 3^239 < 2^380, so set the scalar to
        // all-ones
        for b in bytes[1..49].iter_mut() {
            *b = 0xff;
        }
        assert!(CompressedPublicKeyAlice::from_bytes(&bytes[..]).is_err());
    }
}
