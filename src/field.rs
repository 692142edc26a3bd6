// -*- mode: rust; -*-
//
// This file is part of sidh-p751.
// See LICENSE for licensing information.

//! Arithmetic in the prime field \\(\mathbb F_p\\), \\(p = 2^{372} \cdot 3^{239} - 1\\).
//!
//! A `FieldElement` holds a Montgomery-form representative on twelve
//! 64-bit limbs, allowed to drift within \\([0, 2p)\\) between strong
//! reductions.  The limb-level routines live in the backend; this module
//! provides the operator impls and the exponentiation chains (inversion
//! is delegated to the backend's binary-GCD routine).

use core::fmt::Debug;
use core::ops::{Add, AddAssign};
use core::ops::{Mul, MulAssign};
use core::ops::Neg;
use core::ops::{Sub, SubAssign};

use subtle::Choice;
use subtle::ConditionallySelectable;
use subtle::ConstantTimeEq;

use crate::backend::u64::field::*;
use crate::constants;

#[cfg(test)]
use quickcheck::{Arbitrary, Gen};

/// An element of \\(\mathbb F_p\\) in Montgomery form: the value \\(a\\)
/// is represented by \\(aR \bmod p\\) with \\(R = 2^{768}\\).
#[derive(Copy, Clone)]
pub struct FieldElement(pub(crate) Limbs);

impl Debug for FieldElement {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "FieldElement({:?})", &self.0[..])
    }
}

impl<'b> AddAssign<&'b FieldElement> for FieldElement {
    fn add_assign(&mut self, rhs: &'b FieldElement) {
        let mut z = [0u64; NUM_WORDS];
        fp_add(&self.0, &rhs.0, &mut z);
        self.0 = z;
    }
}

impl<'a, 'b> Add<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn add(self, rhs: &'b FieldElement) -> FieldElement {
        let mut z = [0u64; NUM_WORDS];
        fp_add(&self.0, &rhs.0, &mut z);
        FieldElement(z)
    }
}

impl<'b> SubAssign<&'b FieldElement> for FieldElement {
    fn sub_assign(&mut self, rhs: &'b FieldElement) {
        let mut z = [0u64; NUM_WORDS];
        fp_sub(&self.0, &rhs.0, &mut z);
        self.0 = z;
    }
}

impl<'a, 'b> Sub<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn sub(self, rhs: &'b FieldElement) -> FieldElement {
        let mut z = [0u64; NUM_WORDS];
        fp_sub(&self.0, &rhs.0, &mut z);
        FieldElement(z)
    }
}

impl<'b> MulAssign<&'b FieldElement> for FieldElement {
    fn mul_assign(&mut self, rhs: &'b FieldElement) {
        let result = (self as &FieldElement) * rhs;
        self.0 = result.0;
    }
}

impl<'a, 'b> Mul<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn mul(self, rhs: &'b FieldElement) -> FieldElement {
        // (aR)(bR) = abR^2, reduced once to abR.
        let mut wide = [0u64; 2 * NUM_WORDS];
        fp_mul(&self.0, &rhs.0, &mut wide);
        let mut z = [0u64; NUM_WORDS];
        fp_rdc(&wide, &mut z);
        FieldElement(z)
    }
}

impl<'a> Neg for &'a FieldElement {
    type Output = FieldElement;
    fn neg(self) -> FieldElement {
        &FieldElement::ZERO - self
    }
}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &FieldElement, b: &FieldElement, choice: Choice) -> FieldElement {
        let mut limbs = [0u64; NUM_WORDS];
        for i in 0..NUM_WORDS {
            limbs[i] = u64::conditional_select(&a.0[i], &b.0[i], choice);
        }
        FieldElement(limbs)
    }

    fn conditional_swap(a: &mut FieldElement, b: &mut FieldElement, choice: Choice) {
        fp_cswap(&mut a.0, &mut b.0, choice);
    }

    fn conditional_assign(&mut self, other: &FieldElement, choice: Choice) {
        fp_cassign(&mut self.0, &other.0, choice);
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &FieldElement) -> Choice {
        let mut a = self.0;
        let mut b = other.0;
        fp_strong_reduce(&mut a);
        fp_strong_reduce(&mut b);
        a[..].ct_eq(&b[..])
    }
}

impl PartialEq for FieldElement {
    /// Test equality between two `FieldElement`s.
    ///
    /// # Warning
    ///
    /// This comparison is *not* constant time.
    fn eq(&self, other: &FieldElement) -> bool {
        let mut a = self.0;
        let mut b = other.0;
        fp_strong_reduce(&mut a);
        fp_strong_reduce(&mut b);
        a == b
    }
}

impl Eq for FieldElement {}

impl FieldElement {
    /// The additive identity.
    pub const ZERO: FieldElement = FieldElement([0; NUM_WORDS]);

    /// The multiplicative identity, i.e. \\(R \bmod p\\).
    pub const ONE: FieldElement = FieldElement(constants::MONT_ONE);

    /// Convert a small integer into Montgomery form.
    pub fn from_u64(x: u64) -> FieldElement {
        let mut limbs = [0u64; NUM_WORDS];
        limbs[0] = x;
        &FieldElement(limbs) * &FieldElement(constants::MONT_R_SQUARED)
    }

    /// True if this element is zero.  Not constant time.
    pub fn is_zero(&self) -> bool {
        let mut a = self.0;
        fp_strong_reduce(&mut a);
        a.iter().all(|&l| l == 0)
    }

    /// Reduce the representative into the canonical range \\([0, p)\\).
    pub fn strong_reduce(&self) -> FieldElement {
        let mut a = self.0;
        fp_strong_reduce(&mut a);
        FieldElement(a)
    }

    /// The low bit of the canonical representative; fixes square-root
    /// signs deterministically.
    pub(crate) fn is_odd(&self) -> bool {
        self.strong_reduce().0[0] & 1 == 1
    }

    /// Squaring.
    pub fn square(&self) -> FieldElement {
        self * self
    }

    /// Raise to the \\(2^k\\)-th power by repeated squaring, \\(k \ge 1\\).
    fn pow2k(&self, k: u8) -> FieldElement {
        let mut result = self.square();
        for _ in 1..k {
            result = result.square();
        }
        result
    }

    /// Raise to the power \\((p - 3)/4\\).
    ///
    /// For square \\(x\\) this is \\(1/\sqrt x\\).  The addition chain is a
    /// fixed sliding-window strategy: 744 squarings and 137 window
    /// multiplications over a 16-entry table of odd powers.
    pub(crate) fn p34(&self) -> FieldElement {
        const POW_STRATEGY: [u8; 137] = [
            5, 7, 6, 2, 10, 4, 6, 9, 8, 5, 9, 4, 7, 5, 5, 4, 8, 3, 9, 5, 5, 4, 10, 4,
            6, 6, 6, 5, 8, 9, 3, 4, 9, 4, 5, 6, 6, 2, 9, 4, 5, 5, 5, 7, 7, 9, 4, 6, 4,
            8, 5, 8, 6, 6, 2, 9, 7, 4, 8, 8, 8, 4, 6, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5,
            5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5,
            5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5,
            5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 2,
        ];
        const MUL_STRATEGY: [u8; 137] = [
            31, 23, 21, 1, 31, 7, 7, 7, 9, 9, 19, 15, 23, 23, 11, 7, 25, 5, 21, 17, 11,
            5, 17, 7, 11, 9, 23, 9, 1, 19, 5, 3, 25, 15, 11, 29, 31, 1, 29, 11, 13, 9,
            11, 27, 13, 19, 15, 31, 3, 29, 23, 31, 25, 11, 1, 21, 19, 15, 15, 21, 29,
            13, 23, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31,
            31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31,
            31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31,
            31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 31, 3,
        ];
        const INITIAL_MUL: u8 = 27;

        // Lookup table of odd powers: lookup[i] = x^(2i + 1).
        let mut lookup = [FieldElement::ZERO; 16];
        let xx = self.square();
        lookup[0] = *self;
        for i in 1..16 {
            lookup[i] = &lookup[i - 1] * &xx;
        }

        let mut result = lookup[(INITIAL_MUL / 2) as usize];
        for i in 0..137 {
            result = result.pow2k(POW_STRATEGY[i]);
            result = &result * &lookup[(MUL_STRATEGY[i] / 2) as usize];
        }
        result
    }

    /// The square root of a square, as \\(x^{(p+1)/4} = x \cdot x^{(p-3)/4}\\)
    /// (valid because \\(p \equiv 3 \pmod 4\\)).  If `self` is not a
    /// square the result is undefined; callers verify by squaring.
    pub(crate) fn sqrt(&self) -> FieldElement {
        &self.p34() * self
    }

    /// Whether this element is a square, by Euler's criterion
    /// \\(x^{(p-1)/2} = x \cdot (x^{(p-3)/4})^2\\).  Zero counts as square.
    pub(crate) fn is_square(&self) -> bool {
        let chi = &self.p34().square() * self;
        chi == FieldElement::ONE || self.is_zero()
    }

    /// Multiplicative inverse, `None` for zero.
    ///
    /// Binary-GCD based and variable time; only ever applied to public
    /// values (projective denominators of public keys and pairings).
    pub fn invert(&self) -> Option<FieldElement> {
        fp_inv(&self.0).map(FieldElement)
    }

    /// Serialize to 96 little-endian bytes in canonical form.
    pub fn to_bytes(&self) -> [u8; constants::FIELD_ELEMENT_BYTES] {
        // Leave Montgomery form: reduce aR with a zero-padded high half.
        let mut wide = [0u64; 2 * NUM_WORDS];
        wide[..NUM_WORDS].copy_from_slice(&self.0);
        let mut plain = [0u64; NUM_WORDS];
        fp_rdc(&wide, &mut plain);
        fp_strong_reduce(&mut plain);

        let mut bytes = [0u8; constants::FIELD_ELEMENT_BYTES];
        for i in 0..NUM_WORDS {
            for j in 0..8 {
                bytes[8 * i + j] = (plain[i] >> (8 * j)) as u8;
            }
        }
        bytes
    }

    /// Deserialize 96 little-endian bytes and enter Montgomery form.
    pub fn from_bytes(bytes: &[u8; constants::FIELD_ELEMENT_BYTES]) -> FieldElement {
        let mut plain = [0u64; NUM_WORDS];
        for i in 0..NUM_WORDS {
            for j in 0..8 {
                plain[i] |= (bytes[8 * i + j] as u64) << (8 * j);
            }
        }
        &FieldElement(plain) * &FieldElement(constants::MONT_R_SQUARED)
    }
}

#[cfg(test)]
impl Arbitrary for FieldElement {
    fn arbitrary(g: &mut Gen) -> FieldElement {
        // Random limbs with the top limb capped near the top limb of 2p,
        // then strong-reduced twice so the representative is canonical.
        let mut limbs = [0u64; NUM_WORDS];
        for l in limbs.iter_mut() {
            *l = u64::arbitrary(g);
        }
        limbs[NUM_WORDS - 1] %= 246065832128056;
        fp_strong_reduce(&mut limbs);
        fp_strong_reduce(&mut limbs);
        FieldElement(limbs)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use quickcheck::QuickCheck;

    const QC_TESTS: u64 = 64;

    #[test]
    fn one_is_multiplicative_identity() {
        fn prop(x: FieldElement) -> bool {
            &x * &FieldElement::ONE == x
        }
        QuickCheck::new()
            .tests(QC_TESTS)
            .quickcheck(prop as fn(FieldElement) -> bool);
    }

    #[test]
    fn mul_commutes_and_reduces_canonically() {
        fn prop(x: FieldElement, y: FieldElement) -> bool {
            let xy = (&x * &y).strong_reduce();
            let yx = (&y * &x).strong_reduce();
            xy == yx && xy.0 == xy.strong_reduce().0
        }
        QuickCheck::new()
            .tests(QC_TESTS)
            .quickcheck(prop as fn(FieldElement, FieldElement) -> bool);
    }

    #[test]
    fn mul_distributes_over_add() {
        fn prop(x: FieldElement, y: FieldElement, z: FieldElement) -> bool {
            let lhs = &(&x + &y) * &z;
            let rhs = &(&x * &z) + &(&y * &z);
            lhs == rhs
        }
        QuickCheck::new()
            .tests(QC_TESTS)
            .quickcheck(prop as fn(FieldElement, FieldElement, FieldElement) -> bool);
    }

    #[test]
    fn invert_then_multiply_is_one() {
        fn prop(x: FieldElement) -> bool {
            match x.invert() {
                Some(xinv) => &x * &xinv == FieldElement::ONE,
                None => x.is_zero(),
            }
        }
        QuickCheck::new()
            .tests(QC_TESTS)
            .quickcheck(prop as fn(FieldElement) -> bool);
    }

    #[test]
    fn sqrt_of_square_squares_back() {
        fn prop(x: FieldElement) -> bool {
            let sq = x.square();
            let root = sq.sqrt();
            root.square() == sq
        }
        QuickCheck::new()
            .tests(QC_TESTS)
            .quickcheck(prop as fn(FieldElement) -> bool);
    }

    #[test]
    fn squares_pass_is_square() {
        fn prop(x: FieldElement) -> bool {
            x.square().is_square()
        }
        QuickCheck::new()
            .tests(QC_TESTS)
            .quickcheck(prop as fn(FieldElement) -> bool);
    }

    #[test]
    fn bytes_round_trip() {
        fn prop(x: FieldElement) -> bool {
            FieldElement::from_bytes(&x.to_bytes()) == x
        }
        QuickCheck::new()
            .tests(QC_TESTS)
            .quickcheck(prop as fn(FieldElement) -> bool);
    }

    #[test]
    fn from_u64_matches_one() {
        assert_eq!(FieldElement::from_u64(1), FieldElement::ONE);
        let six = FieldElement::from_u64(6);
        let two = FieldElement::from_u64(2);
        let three = FieldElement::from_u64(3);
        assert_eq!(&two * &three, six);
    }
}
