// -*- mode: rust; -*-
//
// This file is part of sidh-p751.
// See LICENSE for licensing information.

//! x-only arithmetic on Montgomery curves over \\(\mathbb F_{p^2}\\).
//!
//! Curves are carried as a projective coefficient pair \\((A : C)\\) for
//! \\(E_{(A:C)} : Cy^2 = x^3 + Ax^2 + Cx\\), and points as
//! \\((X : Z)\\) on the Kummer line, with \\(Z = 0\\) denoting the
//! identity.  The doubling and differential-addition formulas are the
//! projective-coefficient versions of Costello-Smith, and the tripling
//! is the 7M + 5S form with cached \\((A - 2C : 2C)\\).
//!
//! Ladders run a fixed number of iterations determined by the byte
//! length of the scalar, with `subtle`-masked swaps, so their timing
//! depends only on the scalar length.
//!
//! The y-coordinate never appears during key exchange; compression is
//! the exception and uses [`okeya_sakurai_recover`] to climb back from
//! the Kummer line.

#![allow(non_snake_case)]

use core::fmt::Debug;

use subtle::Choice;
use subtle::ConditionallySelectable;

use crate::field::FieldElement;
use crate::fp2::Fp2Element;

#[cfg(test)]
use quickcheck::{Arbitrary, Gen};

/// A Montgomery curve in projective coefficient form \\((A : C)\\).
#[derive(Copy, Clone, PartialEq)]
pub struct MontgomeryCurve {
    pub(crate) A: Fp2Element,
    pub(crate) C: Fp2Element,
}

/// Cached doubling coefficients \\((A + 2C, 4C)\\).
pub(crate) struct CachedParams {
    a_plus_2c: Fp2Element,
    c4: Fp2Element,
}

/// Cached tripling coefficients \\((A - 2C, 2C)\\).
pub(crate) struct CachedTripleParams {
    a_minus_2c: Fp2Element,
    c2: Fp2Element,
}

impl Debug for MontgomeryCurve {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "MontgomeryCurve(A: {:?}\nC: {:?})", &self.A, &self.C)
    }
}

impl MontgomeryCurve {
    /// The starting curve \\(E_0 : y^2 = x^3 + x\\), i.e. \\((A : C) = (0 : 1)\\).
    pub fn starting_curve() -> MontgomeryCurve {
        MontgomeryCurve {
            A: Fp2Element::ZERO,
            C: Fp2Element::ONE,
        }
    }

    /// A curve with the given affine coefficient \\(a\\).
    pub fn from_affine(a: &Fp2Element) -> MontgomeryCurve {
        MontgomeryCurve {
            A: *a,
            C: Fp2Element::ONE,
        }
    }

    /// Recover the curve through three points with \\(x(R) = x(Q - P)\\):
    ///
    /// \\(a = \frac{(1 - x_P x_Q - x_P x_R - x_Q x_R)^2}{4 x_P x_Q x_R} - x_P - x_Q - x_R\\),
    ///
    /// kept projectively so that no inversion is needed.
    pub fn recover(
        affine_xP: &Fp2Element,
        affine_xQ: &Fp2Element,
        affine_xQmP: &Fp2Element,
    ) -> MontgomeryCurve {
        let mut t0 = Fp2Element::ONE;
        let mut t1 = affine_xP * affine_xQ;
        t0 -= &t1;
        t1 = affine_xP * affine_xQmP;
        t0 -= &t1;
        t1 = affine_xQ * affine_xQmP;
        t0 -= &t1; // 1 - xP xQ - xP xR - xQ xR
        let mut a = t0.square();
        t1 = &t1 * affine_xP;
        t1 = &t1 + &t1;
        let c = &t1 + &t1; // 4 xP xQ xR
        t0 = affine_xP + affine_xQ;
        t0 = &t0 + affine_xQmP;
        t1 = &c * &t0;
        a = &a - &t1;

        MontgomeryCurve { A: a, C: c }
    }

    /// The affine coefficient \\(A/C\\); `None` when \\(C = 0\\).
    pub fn affine_coefficient(&self) -> Option<Fp2Element> {
        Some(&self.C.invert()? * &self.A)
    }

    /// The j-invariant \\(256 (A^2 - 3C^2)^3 / (C^4 (A^2 - 4C^2))\\).
    ///
    /// `None` exactly when the denominator vanishes, i.e. the
    /// coefficients describe a singular curve.
    pub fn j_invariant(&self) -> Option<Fp2Element> {
        let mont_256 = Fp2Element::new(
            FieldElement(crate::constants::MONT_256),
            FieldElement::ZERO,
        );
        let mut v0 = self.C.square(); // C^2
        let mut v1 = self.A.square(); // A^2
        let mut v2 = &v0 + &v0; // 2C^2
        let v3 = &v2 + &v0; // 3C^2
        v2 = &v2 + &v2; // 4C^2
        v2 = &v1 - &v2; // A^2 - 4C^2
        v1 = &v1 - &v3; // A^2 - 3C^2
        let mut num = v1.square();
        num = &num * &v1; // (A^2 - 3C^2)^3
        num = &num * &mont_256;
        v0 = v0.square(); // C^4
        v2 = &v2 * &v0; // C^4 (A^2 - 4C^2)
        let den_inv = v2.invert()?;
        Some(&num * &den_inv)
    }

    pub(crate) fn cached_params(&self) -> CachedParams {
        let mut a_plus_2c = &self.C + &self.C;
        let c4 = &a_plus_2c + &a_plus_2c;
        a_plus_2c = &a_plus_2c + &self.A;
        CachedParams { a_plus_2c, c4 }
    }

    pub(crate) fn cached_triple_params(&self) -> CachedTripleParams {
        let c2 = &self.C + &self.C;
        let a_minus_2c = &self.A - &c2;
        CachedTripleParams { a_minus_2c, c2 }
    }
}

#[cfg(test)]
impl Arbitrary for MontgomeryCurve {
    fn arbitrary(g: &mut Gen) -> MontgomeryCurve {
        MontgomeryCurve {
            A: Fp2Element::arbitrary(g),
            C: Fp2Element::arbitrary(g),
        }
    }
}

/// A point on the Kummer line of a Montgomery curve, as \\((X : Z)\\).
#[derive(Copy, Clone, PartialEq)]
pub struct ProjectivePoint {
    pub(crate) X: Fp2Element,
    pub(crate) Z: Fp2Element,
}

impl Debug for ProjectivePoint {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "ProjectivePoint(X: {:?}\nZ: {:?})", &self.X, &self.Z)
    }
}

impl ConditionallySelectable for ProjectivePoint {
    fn conditional_select(a: &ProjectivePoint, b: &ProjectivePoint, choice: Choice) -> ProjectivePoint {
        ProjectivePoint {
            X: Fp2Element::conditional_select(&a.X, &b.X, choice),
            Z: Fp2Element::conditional_select(&a.Z, &b.Z, choice),
        }
    }

    fn conditional_swap(a: &mut ProjectivePoint, b: &mut ProjectivePoint, choice: Choice) {
        Fp2Element::conditional_swap(&mut a.X, &mut b.X, choice);
        Fp2Element::conditional_swap(&mut a.Z, &mut b.Z, choice);
    }
}

#[cfg(test)]
impl Arbitrary for ProjectivePoint {
    fn arbitrary(g: &mut Gen) -> ProjectivePoint {
        ProjectivePoint {
            X: Fp2Element::arbitrary(g),
            Z: Fp2Element::arbitrary(g),
        }
    }
}

impl ProjectivePoint {
    /// The identity \\((1 : 0)\\).
    pub fn identity() -> ProjectivePoint {
        ProjectivePoint {
            X: Fp2Element::ONE,
            Z: Fp2Element::ZERO,
        }
    }

    /// The point with affine x-coordinate `x`.
    pub fn from_affine(x: &Fp2Element) -> ProjectivePoint {
        ProjectivePoint {
            X: *x,
            Z: Fp2Element::ONE,
        }
    }

    /// Lift an \\(\mathbb F_p\\) x-coordinate onto the Kummer line.
    pub fn from_affine_prime_field(x: &FieldElement) -> ProjectivePoint {
        ProjectivePoint {
            X: Fp2Element::new(*x, FieldElement::ZERO),
            Z: Fp2Element::ONE,
        }
    }

    /// The affine x-coordinate \\(X/Z\\); `None` for the identity.
    pub fn to_affine(&self) -> Option<Fp2Element> {
        Some(&self.Z.invert()? * &self.X)
    }

    /// True for \\(Z = 0\\).  Not constant time.
    pub fn is_identity(&self) -> bool {
        self.Z.is_zero()
    }

    /// Projective equality \\(X_1 Z_2 = X_2 Z_1\\).  Takes variable time.
    pub fn vartime_eq(&self, rhs: &ProjectivePoint) -> bool {
        &self.X * &rhs.Z == &self.Z * &rhs.X
    }

    /// Differential addition: \\(x(P + Q)\\) from \\(x(P), x(Q), x(P - Q)\\).
    pub(crate) fn add(&self, xQ: &ProjectivePoint, xPmQ: &ProjectivePoint) -> ProjectivePoint {
        let mut v0 = &self.X + &self.Z;
        let v1 = &(&xQ.X - &xQ.Z) * &v0;
        v0 = &self.X - &self.Z;
        let v2 = &(&xQ.X + &xQ.Z) * &v0;
        let v3 = (&v1 + &v2).square();
        let v4 = (&v1 - &v2).square();
        ProjectivePoint {
            X: &xPmQ.Z * &v3,
            Z: &xPmQ.X * &v4,
        }
    }

    /// Doubling with cached \\((A + 2C, 4C)\\).
    pub(crate) fn double(&self, cache: &CachedParams) -> ProjectivePoint {
        let v1 = (&self.X + &self.Z).square();
        let mut v2 = (&self.X - &self.Z).square();
        let xz4 = &v1 - &v2;
        v2 = &v2 * &cache.c4;
        let x = &v1 * &v2;
        let mut v3 = &xz4 * &cache.a_plus_2c;
        v3 = &v3 + &v2;
        ProjectivePoint {
            X: x,
            Z: &v3 * &xz4,
        }
    }

    /// Combined doubling and differential addition: given \\(x(P)\\)
    /// (self), \\(x(Q)\\) and \\(x(P - Q)\\), produce
    /// \\((x(2P), x(P + Q))\\).
    pub(crate) fn double_add(
        &self,
        xQ: &ProjectivePoint,
        xPmQ: &ProjectivePoint,
        cache: &CachedParams,
    ) -> (ProjectivePoint, ProjectivePoint) {
        let (x1, z1) = (&xPmQ.X, &xPmQ.Z);
        let (x2, z2) = (&self.X, &self.Z);
        let (x3, z3) = (&xQ.X, &xQ.Z);

        let mut t0 = x2 + z2;
        let mut t1 = x2 - z2;
        let mut t3 = x3 + z3;
        let mut t2 = x3 - z3;
        t2 = &t2 * &t0; // DA
        t3 = &t3 * &t1; // CB

        let mut x = (&t2 + &t3).square();
        let mut z = (&t2 - &t3).square();
        x = &x * z1;
        z = &z * x1;
        let sum = ProjectivePoint { X: x, Z: z };

        t0 = t0.square(); // AA
        t1 = t1.square(); // BB
        t2 = &t0 - &t1; // E
        t3 = &t1 * &cache.c4;
        let mut zd = &t2 * &cache.a_plus_2c;
        zd = &zd + &t3;
        let xd = &t0 * &t3;
        zd = &zd * &t2;
        let dbl = ProjectivePoint { X: xd, Z: zd };

        (dbl, sum)
    }

    /// Tripling with cached \\((A - 2C, 2C)\\).
    pub(crate) fn triple(&self, cache: &CachedTripleParams) -> ProjectivePoint {
        let (x1, z1) = (&self.X, &self.Z);
        let mut t0 = x1.square();
        let mut t1 = z1.square();
        let mut t2 = (x1 + z1).square();
        let t3 = &t0 + &t1;
        let mut t4 = &t2 - &t3;
        let mut t5 = &cache.a_minus_2c * &t4;
        t2 = &cache.c2 * &t2;
        t5 = &t5 + &t2;
        t5 = &t5 + &t5;
        t5 = &t5 + &t5;
        t0 = &t0 * &t5;
        t1 = &t1 * &t5;
        t4 = &t3 - &t4;
        t2 = &t2 * &t4;
        t0 = &t2 - &t0;
        t1 = &t2 - &t1;
        t0 = t0.square();
        t1 = t1.square();
        ProjectivePoint {
            X: x1 * &t1,
            Z: z1 * &t0,
        }
    }

    /// \\(x([2^k] P)\\) by repeated doubling.
    pub fn pow2k(&self, curve: &MontgomeryCurve, k: u32) -> ProjectivePoint {
        let cache = curve.cached_params();
        let mut xQ = *self;
        for _ in 0..k {
            xQ = xQ.double(&cache);
        }
        xQ
    }

    /// \\(x([3^k] P)\\) by repeated tripling.
    pub fn pow3k(&self, curve: &MontgomeryCurve, k: u32) -> ProjectivePoint {
        let cache = curve.cached_triple_params();
        let mut xQ = *self;
        for _ in 0..k {
            xQ = xQ.triple(&cache);
        }
        xQ
    }

    /// The Montgomery ladder: \\((x([m]P), x([m+1]P))\\) for a scalar in
    /// little-endian bytes.  Runs one ladder step per scalar bit
    /// regardless of the scalar's value.
    pub fn ladder(
        &self,
        curve: &MontgomeryCurve,
        scalar: &[u8],
    ) -> (ProjectivePoint, ProjectivePoint) {
        let cache = curve.cached_params();
        let mut x0 = ProjectivePoint::identity();
        let mut x1 = *self;

        let mut prev_bit = 0u8;
        for i in (0..scalar.len()).rev() {
            let byte = scalar[i];
            for j in (0..8).rev() {
                let bit = (byte >> j) & 1;
                ProjectivePoint::conditional_swap(&mut x0, &mut x1, Choice::from(bit ^ prev_bit));
                let (dbl, sum) = x0.double_add(&x1, self, &cache);
                x0 = dbl;
                x1 = sum;
                prev_bit = bit;
            }
        }
        ProjectivePoint::conditional_swap(&mut x0, &mut x1, Choice::from(prev_bit));
        (x0, x1)
    }

    /// \\(x([m]P)\\).
    pub fn scalar_mul(&self, curve: &MontgomeryCurve, scalar: &[u8]) -> ProjectivePoint {
        self.ladder(curve, scalar).0
    }

    /// The three-point ladder of De Feo-Jao-Plut: \\(x(P + [m]Q)\\) from
    /// \\(x(P), x(Q), x(P - Q)\\), processing the scalar from the top
    /// with a uniform double-and-add step.
    pub fn three_point_ladder(
        xP: &ProjectivePoint,
        xQ: &ProjectivePoint,
        xPmQ: &ProjectivePoint,
        curve: &MontgomeryCurve,
        scalar: &[u8],
    ) -> ProjectivePoint {
        let cache = curve.cached_params();

        // (x0, x1, x2) = (x(O), x(Q), x(P)), with (y0, y1) tracking
        // which of x(P), x(P-Q) plays the difference role.
        let mut x0 = ProjectivePoint::identity();
        let mut x1 = *xQ;
        let mut x2 = *xP;
        let mut y0 = *xP;
        let mut y1 = *xPmQ;

        let mut prev_bit = 0u8;
        for i in (0..scalar.len()).rev() {
            let byte = scalar[i];
            for j in (0..8).rev() {
                let bit = (byte >> j) & 1;
                let swap = Choice::from(bit ^ prev_bit);
                ProjectivePoint::conditional_swap(&mut x0, &mut x1, swap);
                ProjectivePoint::conditional_swap(&mut y0, &mut y1, swap);
                x1 = x1.add(&x0, xQ);
                let (dbl, sum) = x0.double_add(&x2, &y0, &cache);
                x0 = dbl;
                x2 = sum;
                prev_bit = bit;
            }
        }
        x2
    }

    /// Right-to-left variant of the three-point ladder; same contract,
    /// processing scalar bits from the bottom.
    pub fn right_to_left_ladder(
        xP: &ProjectivePoint,
        xQ: &ProjectivePoint,
        xPmQ: &ProjectivePoint,
        curve: &MontgomeryCurve,
        scalar: &[u8],
    ) -> ProjectivePoint {
        let cache = curve.cached_params();
        let mut r1 = *xP;
        let mut r2 = *xPmQ;
        let mut r0 = *xQ;

        let mut prev_bit = 0u8;
        for byte in scalar.iter() {
            for j in 0..8 {
                let bit = (byte >> j) & 1;
                ProjectivePoint::conditional_swap(&mut r1, &mut r2, Choice::from(bit ^ prev_bit));
                let (dbl, sum) = r0.double_add(&r2, &r1, &cache);
                r0 = dbl;
                r2 = sum;
                prev_bit = bit;
            }
        }
        ProjectivePoint::conditional_swap(&mut r1, &mut r2, Choice::from(prev_bit));
        r1
    }

    /// \\(x(\tau(P) - P)\\) for \\(P = (x, y)\\) in \\(E_0(\mathbb F_p)\\),
    /// where \\(\tau(x, y) = (-x, iy)\\) is the distortion map.  A short
    /// computation with the affine difference formula gives
    /// \\(x(\tau(P) - P) = (x^2 + 1)i \big/ 2x\\).
    pub fn distort_and_difference(affine_xP: &FieldElement) -> ProjectivePoint {
        let mut t0 = affine_xP.square();
        t0 = &t0 + &FieldElement::ONE;
        let x = Fp2Element::new(FieldElement::ZERO, t0);
        let t1 = affine_xP + affine_xP;
        let z = Fp2Element::new(t1, FieldElement::ZERO);
        ProjectivePoint { X: x, Z: z }
    }

    /// The secret kernel point \\(x(P + [m]\tau(P))\\) for an affine
    /// \\(P = (x, y)\\) in the prime-field subgroup \\(E_0(\mathbb F_p)\\).
    ///
    /// Because \\(x(\tau(P)) = -x \in \mathbb F_p\\) and the trace-zero
    /// subgroup has prime-field x-coordinates, the whole ladder runs
    /// over \\(\mathbb F_p\\):
    ///
    /// 1. the base-field Montgomery ladder gives
    ///    \\(x([m]Q), x([m+1]Q)\\) for \\(Q = \tau(P)\\);
    /// 2. Okeya-Sakurai recovery lifts \\([m]Q = (X : iY : Z)\\) with
    ///    \\(X, Y, Z \in \mathbb F_p\\);
    /// 3. the affine addition formula, split into real and imaginary
    ///    parts, produces \\(x(P + [m]Q) \in \mathbb F_{p^2}\\).
    pub fn secret_point(
        affine_xP: &FieldElement,
        affine_yP: &FieldElement,
        scalar: &[u8],
    ) -> ProjectivePoint {
        let mut xQ = ProjectivePrimePoint::from_affine(affine_xP);
        xQ.X = -(&xQ.X);

        let (xmQ, xm1Q) = ProjectivePrimePoint::ladder(&xQ, scalar);

        // Recover Y_{mQ} = (Z - xP X)(X - xP Z) Z' - X'(X + xP Z)^2,
        // writing (X : Z) for x([m]Q) and (X' : Z') for x([m+1]Q).
        let mut t0 = affine_xP * &xmQ.X;
        let mut YmQ = &xmQ.Z - &t0;
        let mut t1 = affine_xP * &xmQ.Z;
        t0 = &xmQ.X - &t1;
        YmQ = &YmQ * &t0;
        YmQ = &YmQ * &xm1Q.Z;
        t1 = (&t1 + &xmQ.X).square();
        t1 = &t1 * &xm1Q.X;
        YmQ = &YmQ - &t1;

        // Push the recovery denominator -2 y_P Z Z' into X and Z.
        t0 = &(&xmQ.Z * &xm1Q.Z) * affine_yP;
        t0 = -(&t0);
        t0 = &t0 + &t0;
        let ZmQ = &xmQ.Z * &t0;
        let XmQ = &xmQ.X * &t0;

        // x(P + [m]Q) = (X_a + X_b i : Z_R), all coordinates in F_p.
        let mut XRb = &ZmQ.square() * &YmQ;
        XRb = &XRb * affine_yP;
        XRb = &XRb + &XRb;
        XRb = -(&XRb);

        t0 = (affine_yP * &ZmQ).square();
        t1 = YmQ.square();
        let mut XRa = &t0 - &t1;
        XRa = &XRa * &ZmQ;
        t0 = affine_xP * &ZmQ;
        t1 = &XmQ + &t0;
        t0 = &XmQ - &t0;
        t0 = t0.square();
        t1 = &t1 * &t0;
        XRa = &XRa - &t1;

        let ZR = &ZmQ * &t0;

        ProjectivePoint {
            X: Fp2Element::new(XRa, XRb),
            Z: Fp2Element::new(ZR, FieldElement::ZERO),
        }
    }
}

/// A point on the Kummer line of \\(E_0(\mathbb F_p)\\); the secret-point
/// ladder stays in the base field throughout.
#[derive(Copy, Clone)]
pub(crate) struct ProjectivePrimePoint {
    pub(crate) X: FieldElement,
    pub(crate) Z: FieldElement,
}

impl ConditionallySelectable for ProjectivePrimePoint {
    fn conditional_select(
        a: &ProjectivePrimePoint,
        b: &ProjectivePrimePoint,
        choice: Choice,
    ) -> ProjectivePrimePoint {
        ProjectivePrimePoint {
            X: FieldElement::conditional_select(&a.X, &b.X, choice),
            Z: FieldElement::conditional_select(&a.Z, &b.Z, choice),
        }
    }

    fn conditional_swap(a: &mut ProjectivePrimePoint, b: &mut ProjectivePrimePoint, choice: Choice) {
        FieldElement::conditional_swap(&mut a.X, &mut b.X, choice);
        FieldElement::conditional_swap(&mut a.Z, &mut b.Z, choice);
    }
}

impl ProjectivePrimePoint {
    fn from_affine(x: &FieldElement) -> ProjectivePrimePoint {
        ProjectivePrimePoint {
            X: *x,
            Z: FieldElement::ONE,
        }
    }

    /// Combined doubling and differential addition on \\(E_0\\), with
    /// \\((a + 2)/4 = 1/2\\) hardcoded and \\(z(P - Q) = 1\\).
    fn double_add(
        &self,
        xQ: &ProjectivePrimePoint,
        x_diff: &FieldElement,
    ) -> (ProjectivePrimePoint, ProjectivePrimePoint) {
        let a24 = FieldElement(crate::constants::E0_A_PLUS_2_OVER_4);
        let (x2, z2) = (&self.X, &self.Z);
        let (x3, z3) = (&xQ.X, &xQ.Z);

        let mut t0 = x2 + z2;
        let mut t1 = x2 - z2;
        let mut t3 = x3 + z3;
        let mut t2 = x3 - z3;
        t2 = &t2 * &t0;
        t3 = &t3 * &t1;

        let mut x = (&t2 + &t3).square();
        let mut z = (&t2 - &t3).square();
        z = &z * x_diff;
        let sum = ProjectivePrimePoint { X: x, Z: z };

        t0 = t0.square();
        t1 = t1.square();
        x = &t0 * &t1;
        t0 = &t0 - &t1;
        z = &(&a24 * &t0) + &t1;
        z = &z * &t0;
        let dbl = ProjectivePrimePoint { X: x, Z: z };

        (dbl, sum)
    }

    /// The base-field Montgomery ladder, returning
    /// \\((x([m]P), x([m+1]P))\\) for Okeya-Sakurai recovery.
    fn ladder(xP: &ProjectivePrimePoint, scalar: &[u8]) -> (ProjectivePrimePoint, ProjectivePrimePoint) {
        let mut x0 = ProjectivePrimePoint {
            X: FieldElement::ONE,
            Z: FieldElement::ZERO,
        };
        let mut x1 = *xP;

        let mut prev_bit = 0u8;
        for i in (0..scalar.len()).rev() {
            let byte = scalar[i];
            for j in (0..8).rev() {
                let bit = (byte >> j) & 1;
                ProjectivePrimePoint::conditional_swap(&mut x0, &mut x1, Choice::from(bit ^ prev_bit));
                let (dbl, sum) = x0.double_add(&x1, &xP.X);
                x0 = dbl;
                x1 = sum;
                prev_bit = bit;
            }
        }
        ProjectivePrimePoint::conditional_swap(&mut x0, &mut x1, Choice::from(prev_bit));
        (x0, x1)
    }
}

/// An affine point \\((x, y)\\) on a Montgomery curve over
/// \\(\mathbb F_{p^2}\\); only compression works with y-coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct AffinePoint {
    pub(crate) x: Fp2Element,
    pub(crate) y: Fp2Element,
}

impl AffinePoint {
    /// The right-hand side \\(x^3 + ax^2 + x\\) of the curve equation.
    pub(crate) fn curve_rhs(x: &Fp2Element, a: &Fp2Element) -> Fp2Element {
        let inner = &(&(x + a) * x) + &Fp2Element::ONE;
        x * &inner
    }

    /// \\(x(Q - P)\\) by the affine chord formula with \\(-P = (x_P, -y_P)\\):
    /// \\(\lambda = (y_Q + y_P)/(x_Q - x_P)\\),
    /// \\(x(Q - P) = \lambda^2 - a - x_Q - x_P\\).
    ///
    /// `None` when \\(x_P = x_Q\\) (difference of order two or zero).
    pub(crate) fn difference_x(
        p: &AffinePoint,
        q: &AffinePoint,
        a: &Fp2Element,
    ) -> Option<Fp2Element> {
        let den = (&q.x - &p.x).invert()?;
        let lambda = &(&q.y + &p.y) * &den;
        let mut x = lambda.square();
        x = &x - a;
        x = &x - &q.x;
        x = &x - &p.x;
        Some(x)
    }
}

/// Okeya-Sakurai coordinate recovery, general-coefficient form
/// (Costello-Smith Algorithm 5 with \\(b = 1\\)): from affine
/// \\(P = (x, y)\\), \\(x(Q)\\) and \\(x(Q + P)\\), recover
/// \\(Q = (X : Y : Z)\\).
pub(crate) fn okeya_sakurai_recover(
    affine_xP: &Fp2Element,
    affine_yP: &Fp2Element,
    xQ: &ProjectivePoint,
    xQplusP: &ProjectivePoint,
    a: &Fp2Element,
) -> (Fp2Element, Fp2Element, Fp2Element) {
    let mut v1 = affine_xP * &xQ.Z;
    let mut v2 = &xQ.X + &v1;
    let mut v3 = (&xQ.X - &v1).square();
    v3 = &v3 * &xQplusP.X;
    v1 = &(a + a) * &xQ.Z;
    v2 = &v2 + &v1;
    let mut v4 = affine_xP * &xQ.X;
    v4 = &v4 + &xQ.Z;
    v2 = &v2 * &v4;
    v1 = &v1 * &xQ.Z;
    v2 = &v2 - &v1;
    v2 = &v2 * &xQplusP.Z;
    let y = &v2 - &v3;
    let mut v1 = affine_yP + affine_yP;
    v1 = &(&v1 * &xQ.Z) * &xQplusP.Z;
    let x = &v1 * &xQ.X;
    let z = &v1 * &xQ.Z;
    (x, y, z)
}

/// \\(x(P + Q)\\) for affine \\(P = (x_1, y_1)\\) and projective
/// \\(Q = (X : Y : Z)\\), as \\((X' : Z')\\):
///
/// \\(X' = \lambda_n^2 Z - (a + x_1)\lambda_d^2 Z - X \lambda_d^2\\),
/// \\(Z' = \lambda_d^2 Z\\), with
/// \\(\lambda_n = Y - y_1 Z\\), \\(\lambda_d = X - x_1 Z\\).
pub(crate) fn xadd_affine_projective(
    p: &AffinePoint,
    xQ: &Fp2Element,
    yQ: &Fp2Element,
    zQ: &Fp2Element,
    a: &Fp2Element,
) -> ProjectivePoint {
    let ln = yQ - &(&p.y * zQ);
    let ld = xQ - &(&p.x * zQ);
    let ld2 = ld.square();
    let mut x = &ln.square() * zQ;
    x = &x - &(&(&(a + &p.x) * &ld2) * zQ);
    x = &x - &(xQ * &ld2);
    let z = &ld2 * zQ;
    ProjectivePoint { X: x, Z: z }
}
