// -*- mode: rust; -*-
//
// This file is part of sidh-p751.
// See LICENSE for licensing information.

//! Windowed Pohlig-Hellman discrete logarithms in \\(\mu_{\ell^e}\\).
//!
//! Given a generator \\(g\\) of order \\(\ell^e\\) in the cyclotomic
//! subgroup and a target \\(r \in \langle g \rangle\\), recover
//! \\(\alpha\\) with \\(g^\alpha = r\\).  The solver precomputes the
//! table \\(g^{\ell^k}\\) for all \\(k\\) (cheap: one cyclotomic
//! squaring or cubing each), then splits the exponent recursively:
//! the low half of the digits comes from raising \\(r\\) to the
//! complementary cofactor, the high half from dividing the low part
//! back out.  The recursion bottoms out in a one-digit solver reading a
//! two-entry (\\(\ell = 2\\)) or three-entry (\\(\ell = 3\\))
//! comparison table \\(\\{1, z, z^2 = \bar z\\}\\).
//!
//! A leaf value outside its table means the target was not in
//! \\(\langle g \rangle\\); the caller classifies that (compression
//! reports the public key itself as malformed).

use crate::errors::InternalError;
use crate::fp2::Fp2Element;
use crate::scalar::Scalar;

/// A Pohlig-Hellman instance for one generator.
pub(crate) struct PohligHellman {
    /// pows[k] = g^(ell^k), k = 0..e.
    pows: Vec<Fp2Element>,
    ell: u32,
    e: usize,
}

impl PohligHellman {
    /// Precompute the power table of `g`, assumed of order
    /// \\(\ell^e\\) in the cyclotomic subgroup.
    pub(crate) fn new(g: &Fp2Element, ell: u32, e: usize) -> PohligHellman {
        let mut pows = Vec::with_capacity(e);
        pows.push(*g);
        for k in 1..e {
            let prev = pows[k - 1];
            pows.push(if ell == 2 {
                prev.cyclotomic_square()
            } else {
                prev.cyclotomic_cube()
            });
        }
        PohligHellman { pows, ell, e }
    }

    /// Solve \\(g^\alpha = r\\); \\(\alpha\\) comes back as a scalar
    /// below \\(\ell^e\\).
    pub(crate) fn dlog(&self, r: &Fp2Element) -> Result<Scalar, InternalError> {
        let mut digits = vec![0u8; self.e];
        self.extract(0, self.e, r, &mut digits, 0)?;
        Ok(if self.ell == 2 {
            Scalar::from_bits(&digits)
        } else {
            Scalar::from_base3_digits(&digits)
        })
    }

    fn shift(&self, r: &Fp2Element, count: usize) -> Fp2Element {
        let mut z = *r;
        for _ in 0..count {
            z = if self.ell == 2 {
                z.cyclotomic_square()
            } else {
                z.cyclotomic_cube()
            };
        }
        z
    }

    /// base^(digits), digits little-endian base ell, by Horner.
    fn pow_digits(&self, base: &Fp2Element, digits: &[u8]) -> Fp2Element {
        let base_sq = base.square();
        let mut acc = Fp2Element::ONE;
        for &d in digits.iter().rev() {
            acc = if self.ell == 2 {
                acc.cyclotomic_square()
            } else {
                acc.cyclotomic_cube()
            };
            match d {
                0 => {}
                1 => acc = &acc * base,
                _ => acc = &acc * &base_sq,
            }
        }
        acc
    }

    /// Extract `e` digits of the exponent of `r` with respect to
    /// pows[k], writing them at `digits[offset..offset + e]`.
    fn extract(
        &self,
        k: usize,
        e: usize,
        r: &Fp2Element,
        digits: &mut [u8],
        offset: usize,
    ) -> Result<(), InternalError> {
        if e == 1 {
            let z = &self.pows[self.e - 1];
            let digit = if *r == Fp2Element::ONE {
                0
            } else if r == z {
                1
            } else if self.ell == 3 && *r == z.conjugate() {
                2
            } else {
                return Err(InternalError::InternalInvariant(
                    "discrete-log digit outside its window table",
                ));
            };
            digits[offset] = digit;
            return Ok(());
        }
        let e1 = e / 2;
        let e2 = e - e1;
        // Low half: push r down to order ell^e1.
        let rl = self.shift(r, e2);
        self.extract(k + e2, e1, &rl, digits, offset)?;
        // High half: divide the low part out of r.
        let low_contrib = self.pow_digits(&self.pows[k], &digits[offset..offset + e1]);
        let rr = r * &low_contrib.cyclotomic_invert();
        self.extract(k + e1, e2, &rr, digits, offset + e1)
    }
}
