// -*- mode: rust; -*-
//
// This file is part of sidh-p751.
// See LICENSE for licensing information.

//! Reduced Tate pairings of order \\(2^{372}\\) and \\(3^{239}\\),
//! batched five at a time for public-key compression.
//!
//! The Miller loop is doubling-only for the 2-power order and
//! tripling-with-parabola (one tangent, one chord) for the 3-power
//! order.  Each iteration computes the line data once per base-point
//! chain and absorbs it into a per-query numerator/denominator pair;
//! nothing is inverted until the final exponentiation, which feeds all
//! five pairs through a single 10-way simultaneous inversion, maps each
//! value into the cyclotomic subgroup by \\(z \mapsto n\bar d/(d\bar n)\\)
//! (the exponent \\(1 - p\\)), and finishes with the cofactor
//! \\((p+1)/\ell^e\\): 239 cyclotomic cubings for \\(\ell = 2\\), 372
//! cyclotomic squarings for \\(\ell = 3\\).
//!
//! The last Miller iteration is special in both loops: the running
//! point has order \\(\ell\\), so a tangent (resp. the chord through
//! \\(T\\) and \\(2T = -T\\)) degenerates to a vertical line.

use crate::errors::InternalError;
use crate::fp2::Fp2Element;
use crate::montgomery::AffinePoint;

/// Tangent step: \\(2T\\) and the tangent slope at \\(T\\), on
/// \\(y^2 = x^3 + ax^2 + x\\).  Requires \\(y_T \ne 0\\).
fn double_step(t: &AffinePoint, a: &Fp2Element) -> Result<(AffinePoint, Fp2Element), InternalError> {
    let three = Fp2Element::from_u64_pair(3, 0);
    let mut num = &three * &t.x.square();
    num = &num + &(&(a + a) * &t.x);
    num = &num + &Fp2Element::ONE;
    let den = (&t.y + &t.y)
        .invert()
        .ok_or(InternalError::DomainViolation("tangent at a 2-torsion point"))?;
    let lambda = &num * &den;
    let mut xs = lambda.square();
    xs = &xs - a;
    xs = &xs - &t.x;
    xs = &xs - &t.x;
    let ys = &(&lambda * &(&t.x - &xs)) - &t.y;
    Ok((AffinePoint { x: xs, y: ys }, lambda))
}

/// Chord step: \\(T + U\\) and the chord slope, for distinct
/// x-coordinates.
fn add_step(
    t: &AffinePoint,
    u: &AffinePoint,
    a: &Fp2Element,
) -> Result<(AffinePoint, Fp2Element), InternalError> {
    let den = (&u.x - &t.x)
        .invert()
        .ok_or(InternalError::DomainViolation("chord through equal x-coordinates"))?;
    let lambda = &(&u.y - &t.y) * &den;
    let mut xs = lambda.square();
    xs = &xs - a;
    xs = &xs - &t.x;
    xs = &xs - &u.x;
    let ys = &(&lambda * &(&t.x - &xs)) - &t.y;
    Ok((AffinePoint { x: xs, y: ys }, lambda))
}

/// Evaluate the line through `t` with slope `lambda` at `q`:
/// \\(y_Q - y_T - \lambda (x_Q - x_T)\\).
fn line_eval(lambda: &Fp2Element, t: &AffinePoint, q: &AffinePoint) -> Fp2Element {
    &(&q.y - &t.y) - &(lambda * &(&q.x - &t.x))
}

/// One query's running Miller accumulator.
#[derive(Copy, Clone)]
struct MillerAccumulator {
    n: Fp2Element,
    d: Fp2Element,
}

impl MillerAccumulator {
    fn one() -> MillerAccumulator {
        MillerAccumulator {
            n: Fp2Element::ONE,
            d: Fp2Element::ONE,
        }
    }

    /// \\(f \mapsto f^2 \cdot l/v\\).
    fn square_and_absorb_line(&mut self, l: &Fp2Element, v: &Fp2Element) {
        self.n = &self.n.square() * l;
        self.d = &self.d.square() * v;
    }

    /// \\(f \mapsto f^3 \cdot (l_1 l_2)/(v_1 v_2)\\).
    fn cube_and_absorb_parabola(
        &mut self,
        l1: &Fp2Element,
        l2: &Fp2Element,
        v1: &Fp2Element,
        v2: &Fp2Element,
    ) {
        self.n = &(&self.n.square() * &self.n) * &(l1 * l2);
        self.d = &(&self.d.square() * &self.d) * &(v1 * v2);
    }
}

/// A base point's Miller chain: the running point plus the indices of
/// its queries in the shared accumulator array.
struct Chain<'q> {
    t: AffinePoint,
    queries: &'q [usize],
}

/// The five pairings used by compression, batched:
///
/// \\(e(R_2, R_1),\ e(R_2, P),\ e(R_2, Q),\ e(R_1, P),\ e(R_1, Q)\\)
///
/// with the two base-point chains advanced in lockstep so that each
/// loop iteration computes each line once.
pub(crate) fn tate_pairings_five(
    ell: u32,
    r1: &AffinePoint,
    r2: &AffinePoint,
    p: &AffinePoint,
    q: &AffinePoint,
    a: &Fp2Element,
) -> Result<[Fp2Element; 5], InternalError> {
    let queries = [*r1, *p, *q, *p, *q];
    let chain_r2_queries = [0usize, 1, 2];
    let chain_r1_queries = [3usize, 4];
    let mut accs = [MillerAccumulator::one(); 5];
    let mut chains = [
        Chain { t: *r2, queries: &chain_r2_queries },
        Chain { t: *r1, queries: &chain_r1_queries },
    ];

    match ell {
        2 => {
            for _ in 0..371 {
                for chain in chains.iter_mut() {
                    let (t2, lambda) = double_step(&chain.t, a)?;
                    for &qi in chain.queries {
                        let l = line_eval(&lambda, &chain.t, &queries[qi]);
                        let v = &queries[qi].x - &t2.x;
                        accs[qi].square_and_absorb_line(&l, &v);
                    }
                    chain.t = t2;
                }
            }
            // T has order 2: the tangent is the vertical through T, and
            // 2T = O contributes no vertical.
            for chain in chains.iter_mut() {
                for &qi in chain.queries {
                    let l = &queries[qi].x - &chain.t.x;
                    let one = Fp2Element::ONE;
                    accs[qi].square_and_absorb_line(&l, &one);
                }
            }
        }
        3 => {
            for _ in 0..238 {
                for chain in chains.iter_mut() {
                    let (t2, lambda1) = double_step(&chain.t, a)?;
                    let (t3, lambda2) = add_step(&t2, &chain.t, a)?;
                    for &qi in chain.queries {
                        let l1 = line_eval(&lambda1, &chain.t, &queries[qi]);
                        let v1 = &queries[qi].x - &t2.x;
                        let l2 = line_eval(&lambda2, &t2, &queries[qi]);
                        let v2 = &queries[qi].x - &t3.x;
                        accs[qi].cube_and_absorb_parabola(&l1, &l2, &v1, &v2);
                    }
                    chain.t = t3;
                }
            }
            // T has order 3: tangent at T plus the vertical chord
            // through T and 2T = -T; 3T = O contributes no vertical.
            for chain in chains.iter_mut() {
                let (t2, lambda1) = double_step(&chain.t, a)?;
                for &qi in chain.queries {
                    let l1 = line_eval(&lambda1, &chain.t, &queries[qi]);
                    let v1 = &queries[qi].x - &t2.x;
                    let l2 = &queries[qi].x - &chain.t.x;
                    let one = Fp2Element::ONE;
                    accs[qi].cube_and_absorb_parabola(&l1, &l2, &v1, &one);
                }
            }
        }
        _ => return Err(InternalError::InternalInvariant("unsupported pairing order")),
    }

    let out = final_exponentiation(&mut accs, ell)?;
    Ok(out.try_into().unwrap_or_else(|_| unreachable!()))
}

/// A single order-\\(3^{239}\\) pairing, for the cubic-residue filter in
/// torsion-basis generation.
pub(crate) fn tate_pairing_three_single(
    s: &AffinePoint,
    q: &AffinePoint,
    a: &Fp2Element,
) -> Result<Fp2Element, InternalError> {
    let mut acc = MillerAccumulator::one();
    let mut t = *s;
    for _ in 0..238 {
        let (t2, lambda1) = double_step(&t, a)?;
        let (t3, lambda2) = add_step(&t2, &t, a)?;
        let l1 = line_eval(&lambda1, &t, q);
        let v1 = &q.x - &t2.x;
        let l2 = line_eval(&lambda2, &t2, q);
        let v2 = &q.x - &t3.x;
        acc.cube_and_absorb_parabola(&l1, &l2, &v1, &v2);
        t = t3;
    }
    let (t2, lambda1) = double_step(&t, a)?;
    let l1 = line_eval(&lambda1, &t, q);
    let v1 = &q.x - &t2.x;
    let l2 = &q.x - &t.x;
    let one = Fp2Element::ONE;
    acc.cube_and_absorb_parabola(&l1, &l2, &v1, &one);

    let mut out = final_exponentiation(&mut [acc], 3)?;
    Ok(out.swap_remove(0))
}

/// Map each accumulator into \\(\mu_{\ell^e}\\).
///
/// All denominators and conjugated numerators go through one batched
/// inversion (ten elements for the five-way pairing); each value is
/// then \\(n \bar d (d \bar n)^{-1} = z^{1-p}\\), which lands in the
/// norm-one subgroup, followed by the cofactor exponentiation.
fn final_exponentiation(
    accs: &mut [MillerAccumulator],
    ell: u32,
) -> Result<Vec<Fp2Element>, InternalError> {
    let k = accs.len();
    let mut to_invert = Vec::with_capacity(2 * k);
    for acc in accs.iter() {
        to_invert.push(acc.d);
    }
    for acc in accs.iter() {
        to_invert.push(acc.n.conjugate());
    }
    Fp2Element::batch_invert(&mut to_invert)
        .ok_or(InternalError::DomainViolation("pairing with a degenerate divisor"))?;

    let mut out = Vec::with_capacity(k);
    for (i, acc) in accs.iter().enumerate() {
        let mut z = &acc.n * &acc.d.conjugate();
        z = &z * &to_invert[i];
        z = &z * &to_invert[k + i];
        // z now has norm one by construction; a failure here can only
        // be an arithmetic bug.
        if &z * &z.cyclotomic_invert() != Fp2Element::ONE {
            return Err(InternalError::InternalInvariant(
                "pairing residue outside the cyclotomic subgroup",
            ));
        }
        match ell {
            2 => {
                for _ in 0..239 {
                    z = z.cyclotomic_cube();
                }
            }
            _ => {
                for _ in 0..372 {
                    z = z.cyclotomic_square();
                }
            }
        }
        out.push(z);
    }
    Ok(out)
}
