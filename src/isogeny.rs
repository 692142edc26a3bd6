// -*- mode: rust; -*-
//
// This file is part of sidh-p751.
// See LICENSE for licensing information.

//! Construction and evaluation of the small-degree isogenies the key
//! exchange walks through.
//!
//! Three kinds appear.  Bob's side uses 3-isogenies, which store only
//! the kernel point and recompute what they need per evaluation
//! (6M + 2S).  Alice's side uses 4-isogenies with five precomputed
//! coefficients (9M + 1S per evaluation), plus a special first step:
//! on the starting curve the point \\((1, \ldots)\\) lies in the kernel,
//! and the usual formulas degenerate, so the first 4-isogeny absorbs
//! the preliminary isomorphism and is computed from the curve
//! coefficients alone.

#![allow(non_snake_case)]

use crate::fp2::Fp2Element;
use crate::montgomery::{MontgomeryCurve, ProjectivePoint};

/// A 3-isogeny \\(\phi : E_{(A:C)} \to E_{(A:C)}/\langle P_3 \rangle\\),
/// determined by the kernel x-coordinate.
#[derive(Copy, Clone)]
pub(crate) struct ThreeIsogeny {
    X: Fp2Element,
    Z: Fp2Element,
}

impl ThreeIsogeny {
    /// Build the isogeny with kernel generated by the order-3 point
    /// `x3`, returning the codomain
    /// \\((A' : C') = (Z^4 + 18X^2Z^2 - 27X^4 : 4XZ^3)\\) and the
    /// evaluator.
    pub(crate) fn compute(x3: &ProjectivePoint) -> (MontgomeryCurve, ThreeIsogeny) {
        let isogeny = ThreeIsogeny { X: x3.X, Z: x3.Z };
        // 18X^2Z^2 - 27X^4 = 9X^2 (2Z^2 - 3X^2)
        let mut v1 = x3.X.square();
        let mut v0 = &(&v1 + &v1) + &v1; // 3X^2
        v1 = &(&v0 + &v0) + &v0; // 9X^2
        let mut v2 = x3.Z.square();
        let v3 = v2.square();
        v2 = &v2 + &v2;
        v0 = &v2 - &v0;
        v1 = &v1 * &v0;
        v0 = &x3.X * &x3.Z;
        v0 = &v0 + &v0;
        let a = &v3 + &v1;
        let c = &v0 * &v2;

        (MontgomeryCurve { A: a, C: c }, isogeny)
    }

    /// Push a point through: \\(x \mapsto x (X_3 x - Z_3 z)^2 / (z (Z_3 x - X_3 z)^2)\\).
    pub(crate) fn eval(&self, xP: &ProjectivePoint) -> ProjectivePoint {
        let mut t0 = &self.X * &xP.X;
        let mut t1 = &self.Z * &xP.Z;
        let mut t2 = &t0 - &t1;
        t0 = &self.Z * &xP.X;
        t1 = &self.X * &xP.Z;
        t0 = &t0 - &t1;
        t2 = t2.square();
        t0 = t0.square();
        ProjectivePoint {
            X: &t2 * &xP.X,
            Z: &t0 * &xP.Z,
        }
    }
}

/// A 4-isogeny with kernel \\(\langle P_4 \rangle\\),
/// \\(x(P_4) = (X_4 : Z_4)\\), holding the five coefficients its
/// evaluator consumes.  Valid only when \\((1, \ldots)\\) is *not* in
/// the kernel; the first step of Alice's walk uses
/// [`FirstFourIsogeny`] instead.
#[derive(Copy, Clone)]
pub(crate) struct FourIsogeny {
    Xsq_plus_Zsq: Fp2Element,
    Xsq_minus_Zsq: Fp2Element,
    XZ2: Fp2Element,
    Xpow4: Fp2Element,
    Zpow4: Fp2Element,
}

impl FourIsogeny {
    /// Build the isogeny and its codomain
    /// \\((A' : C') = (2(2X_4^4 - Z_4^4) : Z_4^4)\\).
    pub(crate) fn compute(x4: &ProjectivePoint) -> (MontgomeryCurve, FourIsogeny) {
        let mut v0 = x4.X.square();
        let v1 = x4.Z.square();
        let Xsq_plus_Zsq = &v0 + &v1;
        let Xsq_minus_Zsq = &v0 - &v1;
        let mut XZ2 = &x4.X + &x4.Z;
        XZ2 = XZ2.square();
        XZ2 = &XZ2 - &Xsq_plus_Zsq; // 2 X_4 Z_4
        let Xpow4 = v0.square();
        let Zpow4 = v1.square();
        v0 = &Xpow4 + &Xpow4;
        v0 = &v0 - &Zpow4;
        let a = &v0 + &v0;
        let c = Zpow4;

        let isogeny = FourIsogeny {
            Xsq_plus_Zsq,
            Xsq_minus_Zsq,
            XZ2,
            Xpow4,
            Zpow4,
        };
        (MontgomeryCurve { A: a, C: c }, isogeny)
    }

    /// Push a point through, evaluating formula (7) of
    /// Costello-Longa-Naehrig scaled by
    /// \\(16 (X_4 + Z_4)(X_4 - Z_4) X_4^2 Z_4^4\\).
    pub(crate) fn eval(&self, xP: &ProjectivePoint) -> ProjectivePoint {
        let mut t0 = &xP.X * &self.XZ2;
        let mut t1 = &xP.Z * &self.Xsq_plus_Zsq;
        t0 = &t0 - &t1;
        t1 = &xP.Z * &self.Xsq_minus_Zsq;
        let mut t2 = (&t0 - &t1).square();
        t0 = &t0 * &t1;
        t0 = &t0 + &t0;
        t0 = &t0 + &t0;
        t1 = &t0 + &t2;
        t0 = &t0 * &t2;
        let z = &t0 * &self.Zpow4;
        t2 = &t2 * &self.Zpow4;
        t0 = &t1 * &self.Xpow4;
        t0 = &t2 - &t0;
        let x = &t1 * &t0;
        ProjectivePoint { X: x, Z: z }
    }
}

/// The first 4-isogeny from the starting curve, whose kernel contains
/// \\((1, \ldots)\\).  Computed from the curve coefficients alone; the
/// preliminary isomorphism of the generic formulas is absorbed.
#[derive(Copy, Clone)]
pub(crate) struct FirstFourIsogeny {
    A: Fp2Element,
    C: Fp2Element,
}

impl FirstFourIsogeny {
    /// Build the isogeny and its codomain
    /// \\((A' : C') = (2(A + 6C) : A - 2C)\\).
    pub(crate) fn compute(domain: &MontgomeryCurve) -> (MontgomeryCurve, FirstFourIsogeny) {
        let mut t0 = &domain.C + &domain.C;
        let c = &domain.A - &t0;
        let mut t1 = &t0 + &t0;
        t1 = &t1 + &t0;
        t0 = &t1 + &domain.A;
        let a = &t0 + &t0;

        let isogeny = FirstFourIsogeny {
            A: domain.A,
            C: domain.C,
        };
        (MontgomeryCurve { A: a, C: c }, isogeny)
    }

    /// Push a point through the first step.
    pub(crate) fn eval(&self, xP: &ProjectivePoint) -> ProjectivePoint {
        let mut t0 = (&xP.X + &xP.Z).square();
        let t2 = &xP.X * &xP.Z;
        let mut t1 = &t2 + &t2;
        t1 = &t0 - &t1; // X^2 + Z^2
        let mut x = &self.A * &t2;
        let t3 = &self.C * &t1;
        x = &x + &t3;
        x = &x * &t0;
        t0 = (&xP.X - &xP.Z).square();
        t0 = &t0 * &t2;
        t1 = &self.C + &self.C;
        t1 = &t1 - &self.A;
        let z = &t1 * &t0;
        ProjectivePoint { X: x, Z: z }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::backend::u64::field::Limbs;
    use crate::field::FieldElement;

    fn fp2(a0: Limbs, a1: Limbs) -> Fp2Element {
        Fp2Element::new(FieldElement(a0), FieldElement(a1))
    }

    #[test]
    fn first_four_isogeny_versus_sage() {
        let xR = ProjectivePoint::from_affine(&fp2(
            [0xa179cb7e2a95fce9, 0xbfd6a0f3a0a892c0, 0x8b2f0aa4250ab3f3, 0x2e7aa4dd4118732d, 0x627969e493acbc2a, 0x21a5b852c7b8cc83, 0x26084278586324f2, 0x383be1aa5aa947c0, 0xc6558ecbb5c0183e, 0xf1f192086a52b035, 0x4c58b755b865c1b, 0x67b4ceea2d2c],
            [0xfceb02a2797fecbf, 0x3fee9e1d21f95e99, 0xa1c4ce896024e166, 0xc09c024254517358, 0xf0255994b17b94e7, 0xa4834359b41ee894, 0x9487f7db7ebefbe, 0x3bbeeb34a0bf1f24, 0xfa7e5533514c6a05, 0x92b0328146450a9a, 0xfde71ca3fada4c06, 0x3610f995c2bd],
        ));
        let expected = ProjectivePoint::from_affine(&fp2(
            [0xff99e76f78da1e05, 0xdaa36bd2bb8d97c4, 0xb4328cee0a409daf, 0xc28b099980c5da3f, 0xf2d7cd15cfebb852, 0x1935103dded6cdef, 0xade81528de1429c3, 0x6775b0fa90a64319, 0x25f89817ee52485d, 0x706e2d00848e697, 0xc4958ec4216d65c0, 0xc519681417f],
            [0x742fe7dde60e1fb9, 0x801a3c78466a456b, 0xa9f945b786f48c35, 0x20ce89e1b144348f, 0xf633970b7776217e, 0x4c6077a9b38976e5, 0x34a513fc766c7825, 0xacccba359b9cd65, 0xd0ca8383f0fd0125, 0x77350437196287a, 0x9fe1ad7706d4ea21, 0x4d26129ee42d],
        ));

        let (_, phi) = FirstFourIsogeny::compute(&MontgomeryCurve::starting_curve());
        let image = phi.eval(&xR);
        assert!(expected.vartime_eq(&image));
    }

    #[test]
    fn four_isogeny_versus_sage() {
        let xR = ProjectivePoint::from_affine(&fp2(
            [0xff99e76f78da1e05, 0xdaa36bd2bb8d97c4, 0xb4328cee0a409daf, 0xc28b099980c5da3f, 0xf2d7cd15cfebb852, 0x1935103dded6cdef, 0xade81528de1429c3, 0x6775b0fa90a64319, 0x25f89817ee52485d, 0x706e2d00848e697, 0xc4958ec4216d65c0, 0xc519681417f],
            [0x742fe7dde60e1fb9, 0x801a3c78466a456b, 0xa9f945b786f48c35, 0x20ce89e1b144348f, 0xf633970b7776217e, 0x4c6077a9b38976e5, 0x34a513fc766c7825, 0xacccba359b9cd65, 0xd0ca8383f0fd0125, 0x77350437196287a, 0x9fe1ad7706d4ea21, 0x4d26129ee42d],
        ));
        let xP4 = ProjectivePoint::from_affine(&fp2(
            [0x2afd75a913f3d5e7, 0x2918fba06f88c9ab, 0xa4ac4dc7cb526f05, 0x2d19e9391a607300, 0x7a79e2b34091b54, 0x3ad809dcb42f1792, 0xd46179328bd6402a, 0x1afa73541e2c4f3f, 0xf602d73ace9bdbd8, 0xd77ac58f6bab7004, 0x4689d97f6793b3b3, 0x4f26b00e42b7],
            [0x6cdf918dafdcb890, 0x666f273cc29cfae2, 0xad00fcd31ba618e2, 0x5fbcf62bef2f6a33, 0xf408bb88318e5098, 0x84ab97849453d175, 0x501bbfcdcfb8e1ac, 0xf2370098e6b5542c, 0xc7dc73f5f0f6bd32, 0xdd76dcd86729d1cf, 0xca22c905029996e4, 0x5cf4a9373de3],
        ));
        let expected = ProjectivePoint::from_affine(&fp2(
            [0x111efd8bd0b7a01e, 0x6ab75a4f3789ca9b, 0x939dbe518564cac4, 0xf9eeaba1601d0434, 0x8d41f8ba6edac998, 0xfcd2557efe9aa170, 0xb3c3549c098b7844, 0x52874fef6f81127c, 0xb2b9ac82aa518bb3, 0xee70820230520a86, 0xd4012b7f5efb184a, 0x573e4536329b],
            [0xa99952281e932902, 0x569a89a571f2c7b1, 0x6150143846ba3f6b, 0x11fd204441e91430, 0x7f469bd55c9b07b, 0xb72db8b9de35b161, 0x455a9a37a940512a, 0xb0cff7670abaf906, 0x18c785b7583375fe, 0x603ab9ca403c9148, 0xab54ba3a6e6c62c1, 0x2726d7d57c4f],
        ));

        let (_, phi) = FourIsogeny::compute(&xP4);
        let image = phi.eval(&xR);
        assert!(expected.vartime_eq(&image));
    }

    #[test]
    fn three_isogeny_versus_sage() {
        let xR = ProjectivePoint::from_affine(&fp2(
            [0xbd0737ed5cc9a3d7, 0x45ae6d476517c101, 0x6f228e9e7364fdb2, 0xbba4871225b3dbd, 0x6299ccd2e5da1a07, 0x38488fe4af5f2d0e, 0xec23cae5a86e980c, 0x26c804ba3f1edffa, 0xfbbed81932df60e5, 0x7e00e9d182ae9187, 0xc7654abb66d05f4b, 0x262d0567237b],
            [0x3a3b5b6ad0b2ac33, 0x246602b5179127d3, 0x502ae0e9ad65077d, 0x10a3a37237e1bf70, 0x4a1ab9294dd05610, 0xb0f3adac30fe1fa6, 0x341995267faf70cb, 0xa14dd94d39cf4ec1, 0xce4b7527d1bf5568, 0xe0410423ed45c7e4, 0x38011809b6425686, 0x28f52472ebed],
        ));
        let xP3 = ProjectivePoint::from_affine(&fp2(
            [0x7bb7a4a07b0788dc, 0xdc36a3f6607b21b0, 0x4750e18ee74cf2f0, 0x464e319d0b7ab806, 0xc25aa44c04f758ff, 0x392e8521a46e0a68, 0xfc4e76b63eff37df, 0x1f3566d892e67dd8, 0xf8d2eb0f73295e65, 0x457b13ebc470bccb, 0xfda1cc9efef5be33, 0x5dbf3d92cc02],
            [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        ));
        let expected = ProjectivePoint::from_affine(&fp2(
            [0x286db7d75913c5b1, 0xcb2049ad50189220, 0xccee90ef765fa9f4, 0x65e52ce2730e7d88, 0xa6b6b553bd0d06e7, 0xb561ecec14591590, 0x17b7a66d8c64d959, 0x77778cecbe1461e, 0x9405c9c0c41a57ce, 0x8f6b4847e8ca7d3d, 0xf625eb987b366937, 0x421b3590e345],
            [0x566b893803e7d8d6, 0xe8c71a04d527e696, 0x5a1d8f87bf5eb51, 0x42ae08ae098724f, 0x4ee3d7c7af40ca2e, 0xd9f9ab9067bb10a7, 0xecd53d69edd6328c, 0xa581e9202dea107d, 0x8bcdfb6c8ecf9257, 0xe7cbbc2e5cbcf2af, 0x5f031a8701f0e53e, 0x18312d93e3cb],
        ));

        let (_, phi) = ThreeIsogeny::compute(&xP3);
        let image = phi.eval(&xR);
        assert!(expected.vartime_eq(&image));
    }
}
