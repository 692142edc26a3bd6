// -*- mode: rust; -*-
//
// This file is part of sidh-p751.
// See LICENSE for licensing information.

//! Deterministic torsion-basis generation on an arbitrary supersingular
//! Montgomery curve \\(E_a\\).
//!
//! Compression needs a basis \\((R_1, R_2)\\) of \\(E_a[\ell^e]\\) that
//! both sides can regenerate from \\(a\\) alone.  Candidate
//! x-coordinates are walked deterministically as
//! \\(x(\alpha) = \alpha(i + 4)\\) for \\(\alpha = 1, 2, 3, \ldots\\);
//! a candidate is kept when the curve right-hand side is a square
//! (the point lies on the curve rather than its twist), survives
//! cofactor clearing with the exact order \\(\ell^e\\), and, for the
//! second generator, is independent of the first.  Independence is the
//! nonvanishing determinant \\(X_1 Z_2 - X_2 Z_1\\) of the order-\\(\ell\\)
//! multiples for \\(\ell = 2\\); for \\(\ell = 3\\) the candidate is
//! instead filtered by requiring its Tate pairing against the first
//! generator to be a non-cube, which is what the discrete-log stage
//! needs anyway.  The smallest workable \\(\alpha\\) wins, so the basis
//! is a pure function of \\(a\\).

use crate::errors::InternalError;
use crate::fp2::Fp2Element;
use crate::montgomery::{AffinePoint, MontgomeryCurve, ProjectivePoint};
use crate::pairing;

/// Cap on the candidate walk.  The QR and order filters each pass a
/// constant fraction of candidates, so running out is a sign of a
/// non-supersingular input rather than bad luck.
const MAX_CANDIDATES: u64 = 1024;

fn candidate(alpha: u64) -> ProjectivePoint {
    ProjectivePoint::from_affine(&Fp2Element::from_u64_pair(4 * alpha, alpha))
}

fn on_curve(x: &Fp2Element, a: &Fp2Element) -> bool {
    AffinePoint::curve_rhs(x, a).is_square()
}

/// A basis of the \\(2^{372}\\)-torsion of \\(E_a\\), as projective
/// x-coordinates.
pub(crate) fn generate_basis_two(
    a: &Fp2Element,
) -> Result<(ProjectivePoint, ProjectivePoint), InternalError> {
    let curve = MontgomeryCurve::from_affine(a);
    let mut first: Option<(ProjectivePoint, ProjectivePoint)> = None;

    for alpha in 1..MAX_CANDIDATES {
        let p = candidate(alpha);
        if !on_curve(&p.X, a) {
            continue;
        }
        let s = p.pow3k(&curve, 239);
        // Exact order 2^372: the 2^371-multiple is the surviving
        // order-2 point.
        let t = s.pow2k(&curve, 371);
        if t.is_identity() {
            continue;
        }
        if !t.pow2k(&curve, 1).is_identity() {
            continue;
        }
        match first {
            None => first = Some((s, t)),
            Some((r1, t1)) => {
                // Independent iff the order-2 points differ.
                if &t1.X * &t.Z != &t.X * &t1.Z {
                    return Ok((r1, s));
                }
            }
        }
    }
    Err(InternalError::ParameterMismatch(
        "curve admits no 2-power torsion basis",
    ))
}

/// A basis of the \\(3^{239}\\)-torsion of \\(E_a\\), as projective
/// x-coordinates.
pub(crate) fn generate_basis_three(
    a: &Fp2Element,
) -> Result<(ProjectivePoint, ProjectivePoint), InternalError> {
    let curve = MontgomeryCurve::from_affine(a);
    let mut first: Option<ProjectivePoint> = None;

    for alpha in 1..MAX_CANDIDATES {
        let p = candidate(alpha);
        if !on_curve(&p.X, a) {
            continue;
        }
        let s = p.pow2k(&curve, 372);
        let t = s.pow3k(&curve, 238);
        if t.is_identity() {
            continue;
        }
        if !t.pow3k(&curve, 1).is_identity() {
            continue;
        }
        match first {
            None => first = Some(s),
            Some(r1) => {
                // Keep the candidate only if e(R_1, S) generates the full
                // mu_{3^239}, i.e. is not a cube; this rules out S
                // meeting R_1's subgroup at the order-3 level.
                let r1_aff = lift_single(&r1, a)?;
                let s_aff = lift_single(&s, a)?;
                let g = pairing::tate_pairing_three_single(&r1_aff, &s_aff, a)?;
                if !g.is_cube().ok_or(InternalError::InternalInvariant(
                    "vanishing pairing of torsion generators",
                ))? {
                    return Ok((r1, s));
                }
            }
        }
    }
    Err(InternalError::ParameterMismatch(
        "curve admits no 3-power torsion basis",
    ))
}

/// Lift a pair of basis points to affine coordinates, normalising both
/// denominators with a single 2-way inversion; the y-coordinates come
/// from the deterministic square root, so the lift is as canonical as
/// the basis itself.
pub(crate) fn lift_basis(
    r1: &ProjectivePoint,
    r2: &ProjectivePoint,
    a: &Fp2Element,
) -> Result<(AffinePoint, AffinePoint), InternalError> {
    let (z1_inv, z2_inv) = Fp2Element::batch2_invert(&r1.Z, &r2.Z).ok_or(
        InternalError::InternalInvariant("torsion generator at infinity"),
    )?;
    let x1 = &r1.X * &z1_inv;
    let x2 = &r2.X * &z2_inv;
    let y1 = AffinePoint::curve_rhs(&x1, a)
        .sqrt()
        .ok_or(InternalError::InternalInvariant("torsion generator off the curve"))?;
    let y2 = AffinePoint::curve_rhs(&x2, a)
        .sqrt()
        .ok_or(InternalError::InternalInvariant("torsion generator off the curve"))?;
    Ok((AffinePoint { x: x1, y: y1 }, AffinePoint { x: x2, y: y2 }))
}

/// Lift one basis point.
fn lift_single(p: &ProjectivePoint, a: &Fp2Element) -> Result<AffinePoint, InternalError> {
    let z_inv = p
        .Z
        .invert()
        .ok_or(InternalError::InternalInvariant("torsion generator at infinity"))?;
    let x = &p.X * &z_inv;
    let y = AffinePoint::curve_rhs(&x, a)
        .sqrt()
        .ok_or(InternalError::InternalInvariant("torsion generator off the curve"))?;
    Ok(AffinePoint { x, y })
}
