// -*- mode: rust; -*-
//
// This file is part of sidh-p751.
// See LICENSE for licensing information.

//! Fixed-width scalar arithmetic modulo \\(2^{372}\\) and \\(3^{239}\\).
//!
//! Compression expresses torsion points through discrete logarithms,
//! which are scalars modulo the torsion order rather than field
//! elements.  This module provides the handful of operations the
//! compression pipeline needs on 48-byte little-endian scalars:
//! modular addition and multiplication, inversion of units by Hensel
//! lifting, and digit assembly for the Pohlig-Hellman solver.
//!
//! Everything here is variable time.  The only secret entering this
//! module is the caller's own secret key during decompression, whose
//! protection is out of scope for scalar recombination (the surrounding
//! isogeny walk dominates and is fixed-iteration).

use core::fmt::Debug;

use crate::constants;

const NW: usize = 6;

/// Which torsion order a scalar lives modulo.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ScalarModulus {
    /// \\(2^{372}\\), Alice's torsion order.
    TwoPow372,
    /// \\(3^{239}\\), Bob's torsion order.
    ThreePow239,
}

impl ScalarModulus {
    fn limbs(&self) -> [u64; NW] {
        match self {
            // 2^372 = 2^(5*64 + 52)
            ScalarModulus::TwoPow372 => [0, 0, 0, 0, 0, 1u64 << 52],
            ScalarModulus::ThreePow239 => constants::THREE_POW_239,
        }
    }
}

/// A scalar below its modulus, on six little-endian 64-bit limbs.
#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) struct Scalar(pub(crate) [u64; NW]);

impl Debug for Scalar {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "Scalar({:?})", &self.0[..])
    }
}

#[inline(always)]
fn addc(carry: u64, a: u64, b: u64) -> (u64, u64) {
    let t = (a as u128) + (b as u128) + (carry as u128);
    ((t >> 64) as u64, t as u64)
}

#[inline(always)]
fn subb(borrow: u64, a: u64, b: u64) -> (u64, u64) {
    let t = (a as u128).wrapping_sub((b as u128) + (borrow as u128));
    (((t >> 64) as u64) & 1, t as u64)
}

fn geq(x: &[u64], y: &[u64]) -> bool {
    for i in (0..x.len()).rev() {
        if x[i] != y[i] {
            return x[i] > y[i];
        }
    }
    true
}

impl Scalar {
    pub(crate) const ZERO: Scalar = Scalar([0; NW]);

    pub(crate) fn from_u64(x: u64) -> Scalar {
        let mut limbs = [0u64; NW];
        limbs[0] = x;
        Scalar(limbs)
    }

    /// Parse 48 little-endian bytes without reduction; for validation
    /// of externally supplied scalars.
    pub(crate) fn from_bytes_raw(bytes: &[u8; 48]) -> Scalar {
        let mut limbs = [0u64; NW];
        for i in 0..NW {
            for j in 0..8 {
                limbs[i] |= (bytes[8 * i + j] as u64) << (8 * j);
            }
        }
        Scalar(limbs)
    }

    /// Whether this (possibly unreduced) scalar lies below the modulus.
    pub(crate) fn lt_modulus(&self, m: ScalarModulus) -> bool {
        !geq(&self.0, &m.limbs())
    }

    /// Parse 48 little-endian bytes and reduce modulo `m`.
    pub(crate) fn from_bytes_mod(bytes: &[u8; 48], m: ScalarModulus) -> Scalar {
        let mut limbs = [0u64; NW];
        for i in 0..NW {
            for j in 0..8 {
                limbs[i] |= (bytes[8 * i + j] as u64) << (8 * j);
            }
        }
        let mut wide = [0u64; 2 * NW];
        wide[..NW].copy_from_slice(&limbs);
        Scalar(reduce_wide(&wide, m))
    }

    /// Serialize to 48 little-endian bytes.
    pub(crate) fn to_bytes(&self) -> [u8; 48] {
        let mut bytes = [0u8; 48];
        for i in 0..NW {
            for j in 0..8 {
                bytes[8 * i + j] = (self.0[i] >> (8 * j)) as u8;
            }
        }
        bytes
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.0.iter().all(|&l| l == 0)
    }

    /// The residue modulo 3, using \\(2^{64} \equiv 1 \pmod 3\\).
    pub(crate) fn mod_3(&self) -> u8 {
        let mut acc = 0u64;
        for &l in self.0.iter() {
            acc = (acc + l % 3) % 3;
        }
        acc as u8
    }

    /// Whether this scalar is a unit modulo `m`.
    pub(crate) fn is_unit(&self, m: ScalarModulus) -> bool {
        match m {
            ScalarModulus::TwoPow372 => self.0[0] & 1 == 1,
            ScalarModulus::ThreePow239 => self.mod_3() != 0,
        }
    }

    /// The additive inverse modulo `m`.
    pub(crate) fn neg_mod(&self, m: ScalarModulus) -> Scalar {
        if self.is_zero() {
            return Scalar::ZERO;
        }
        let mm = m.limbs();
        let mut z = [0u64; NW];
        let mut borrow = 0u64;
        for i in 0..NW {
            let (b, zi) = subb(borrow, mm[i], self.0[i]);
            z[i] = zi;
            borrow = b;
        }
        Scalar(z)
    }

    pub(crate) fn add_mod(&self, rhs: &Scalar, m: ScalarModulus) -> Scalar {
        let mm = m.limbs();
        let mut z = [0u64; NW];
        let mut carry = 0u64;
        for i in 0..NW {
            let (c, zi) = addc(carry, self.0[i], rhs.0[i]);
            z[i] = zi;
            carry = c;
        }
        if carry != 0 || geq(&z, &mm) {
            let mut borrow = 0u64;
            for i in 0..NW {
                let (b, zi) = subb(borrow, z[i], mm[i]);
                z[i] = zi;
                borrow = b;
            }
        }
        Scalar(z)
    }

    pub(crate) fn mul_mod(&self, rhs: &Scalar, m: ScalarModulus) -> Scalar {
        let mut wide = [0u64; 2 * NW];
        for i in 0..NW {
            let mut carry = 0u128;
            for j in 0..NW {
                let cur = (wide[i + j] as u128)
                    + (self.0[i] as u128) * (rhs.0[j] as u128)
                    + carry;
                wide[i + j] = cur as u64;
                carry = cur >> 64;
            }
            wide[i + NW] = carry as u64;
        }
        Scalar(reduce_wide(&wide, m))
    }

    /// The inverse of a unit, by Hensel lifting: starting from the
    /// inverse modulo \\(\ell\\), each step of
    /// \\(x \mapsto x(2 - ax)\\) doubles the \\(\ell\\)-adic precision,
    /// so nine steps cover both moduli.
    pub(crate) fn invert_mod(&self, m: ScalarModulus) -> Option<Scalar> {
        if !self.is_unit(m) {
            return None;
        }
        let mut x = match m {
            ScalarModulus::TwoPow372 => Scalar::from_u64(1),
            // 1^-1 = 1 and 2^-1 = 2 modulo 3
            ScalarModulus::ThreePow239 => Scalar::from_u64(self.mod_3() as u64),
        };
        let two = Scalar::from_u64(2);
        for _ in 0..9 {
            let t = self.mul_mod(&x, m);
            // u = 2 - t (mod m)
            let u = if geq(&two.0, &t.0) {
                let mut z = [0u64; NW];
                let mut borrow = 0u64;
                for i in 0..NW {
                    let (b, zi) = subb(borrow, two.0[i], t.0[i]);
                    z[i] = zi;
                    borrow = b;
                }
                Scalar(z)
            } else {
                let mm = m.limbs();
                let mut z = [0u64; NW];
                let mut borrow = 0u64;
                for i in 0..NW {
                    let (b, zi) = subb(borrow, mm[i], t.0[i]);
                    z[i] = zi;
                    borrow = b;
                }
                Scalar(z).add_mod(&two, m)
            };
            x = x.mul_mod(&u, m);
        }
        Some(x)
    }

    /// Assemble a scalar from little-endian bits.
    pub(crate) fn from_bits(bits: &[u8]) -> Scalar {
        let mut limbs = [0u64; NW];
        for (k, &b) in bits.iter().enumerate() {
            if b != 0 {
                limbs[k / 64] |= 1u64 << (k % 64);
            }
        }
        Scalar(limbs)
    }

    /// Assemble a scalar from little-endian base-3 digits by Horner
    /// evaluation.
    pub(crate) fn from_base3_digits(digits: &[u8]) -> Scalar {
        let m = ScalarModulus::ThreePow239;
        let mut s = Scalar::ZERO;
        for &d in digits.iter().rev() {
            let s3 = s.add_mod(&s, m).add_mod(&s, m);
            s = s3.add_mod(&Scalar::from_u64(d as u64), m);
        }
        s
    }
}

/// Reduce a double-width product modulo `m` by shift-and-subtract.
fn reduce_wide(wide: &[u64; 2 * NW], m: ScalarModulus) -> [u64; NW] {
    match m {
        ScalarModulus::TwoPow372 => {
            let mut z = [0u64; NW];
            z.copy_from_slice(&wide[..NW]);
            z[NW - 1] &= (1u64 << 52) - 1;
            z
        }
        ScalarModulus::ThreePow239 => {
            // 3^239 is a 379-bit number; slide it down from the top.
            let mm = m.limbs();
            let mut acc = *wide;
            for shift in (0..=(12 * 64 - 379)).rev() {
                let mut shifted = [0u64; 2 * NW];
                let limb_off = shift / 64;
                let bit_off = shift % 64;
                for i in 0..NW {
                    let lo = mm[i] << bit_off;
                    shifted[i + limb_off] |= lo;
                    if bit_off > 0 && i + limb_off + 1 < 2 * NW {
                        shifted[i + limb_off + 1] |= mm[i] >> (64 - bit_off);
                    }
                }
                if geq(&acc, &shifted) {
                    let mut borrow = 0u64;
                    for i in 0..2 * NW {
                        let (b, zi) = subb(borrow, acc[i], shifted[i]);
                        acc[i] = zi;
                        borrow = b;
                    }
                }
            }
            let mut z = [0u64; NW];
            z.copy_from_slice(&acc[..NW]);
            z
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn small_products_are_exact() {
        let a = Scalar::from_u64(123456789);
        let b = Scalar::from_u64(987654321);
        for m in [ScalarModulus::TwoPow372, ScalarModulus::ThreePow239] {
            let c = a.mul_mod(&b, m);
            assert_eq!(c.0[0], 123456789u64 * 987654321u64);
            assert!(c.0[1..].iter().all(|&l| l == 0));
        }
    }

    #[test]
    fn tripling_one_239_times_reaches_zero() {
        let m = ScalarModulus::ThreePow239;
        let mut s = Scalar::from_u64(1);
        for _ in 0..238 {
            s = s.add_mod(&s, m).add_mod(&s, m);
        }
        // s = 3^238 != 0, 3*s = 3^239 = 0
        assert!(!s.is_zero());
        let z = s.add_mod(&s, m).add_mod(&s, m);
        assert!(z.is_zero());
    }

    #[test]
    fn doubling_one_372_times_reaches_zero() {
        let m = ScalarModulus::TwoPow372;
        let mut s = Scalar::from_u64(1);
        for _ in 0..371 {
            s = s.add_mod(&s, m);
        }
        assert!(!s.is_zero());
        assert!(s.add_mod(&s, m).is_zero());
    }

    #[test]
    fn inversion_of_units() {
        for m in [ScalarModulus::TwoPow372, ScalarModulus::ThreePow239] {
            for base in [3u64, 5, 7, 123456789, 0xdeadbeefcafe] {
                let a = Scalar::from_u64(base);
                if !a.is_unit(m) {
                    continue;
                }
                let ainv = a.invert_mod(m).unwrap();
                let prod = a.mul_mod(&ainv, m);
                assert_eq!(prod, Scalar::from_u64(1));
            }
        }
        // non-units have no inverse
        assert!(Scalar::from_u64(6).invert_mod(ScalarModulus::ThreePow239).is_none());
        assert!(Scalar::from_u64(4).invert_mod(ScalarModulus::TwoPow372).is_none());
    }

    #[test]
    fn digit_assembly() {
        // 25 = 1 + 2*3 + 2*9 little-endian base 3
        let s = Scalar::from_base3_digits(&[1, 2, 2]);
        assert_eq!(s, Scalar::from_u64(25));
        // 25 = 1 + 8 + 16
        let s2 = Scalar::from_bits(&[1, 0, 0, 1, 1]);
        assert_eq!(s2, Scalar::from_u64(25));
    }

    #[test]
    fn bytes_round_trip() {
        let a = Scalar::from_u64(0x123456789abcdef);
        let b = Scalar::from_bytes_mod(&a.to_bytes(), ScalarModulus::ThreePow239);
        assert_eq!(a, b);
    }
}
