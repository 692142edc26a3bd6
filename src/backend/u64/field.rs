// -*- mode: rust; -*-
//
// This file is part of sidh-p751.
// See LICENSE for licensing information.

//! Multiprecision arithmetic for \\(\mathbb F_p\\), \\(p = 2^{372} \cdot 3^{239} - 1\\),
//! on 12 little-endian 64-bit limbs.
//!
//! Field elements are kept in Montgomery form with \\(R = 2^{768}\\), and
//! every routine maintains the invariant that representatives produced by
//! addition, subtraction and Montgomery reduction lie in \\([0, 2p)\\);
//! only [`fp_strong_reduce`] produces the canonical range \\([0, p)\\).
//!
//! The reduction shape exploits two facts about this prime:
//! \\(p \equiv -1 \pmod{2^{64}}\\), so the per-limb Montgomery quotient
//! digit is the limb itself, and \\(p + 1 = 2^{372} \cdot 3^{239}\\) has
//! five zero low limbs, so folding with \\(p + 1\\) skips almost half of
//! the partial products.

use subtle::Choice;
use subtle::ConditionallySelectable;

/// The number of 64-bit limbs in an element of \\(\mathbb F_p\\).
pub const NUM_WORDS: usize = 12;

/// Limbs of an element of \\(\mathbb F_p\\).
pub type Limbs = [u64; NUM_WORDS];

/// Limbs of an unreduced double-width product.
pub type WideLimbs = [u64; 2 * NUM_WORDS];

/// The prime \\(p = 2^{372} \cdot 3^{239} - 1\\).
pub const P751: Limbs = [
    0xffffffffffffffff, 0xffffffffffffffff, 0xffffffffffffffff, 0xffffffffffffffff,
    0xffffffffffffffff, 0xeeafffffffffffff, 0xe3ec968549f878a8, 0xda959b1a13f7cc76,
    0x84e9867d6ebe876, 0x8562b5045cb25748, 0xe12909f97badc66, 0x6fe5d541f71c,
];

/// \\(2p\\), the bound on unreduced representatives.
pub const P751_TIMES_2: Limbs = [
    0xfffffffffffffffe, 0xffffffffffffffff, 0xffffffffffffffff, 0xffffffffffffffff,
    0xffffffffffffffff, 0xdd5fffffffffffff, 0xc7d92d0a93f0f151, 0xb52b363427ef98ed,
    0x109d30cfadd7d0ed, 0xac56a08b964ae90, 0x1c25213f2f75b8cd, 0xdfcbaa83ee38,
];

/// \\(p + 1 = 2^{372} \cdot 3^{239}\\); its five low limbs are zero.
pub const P751_PLUS_1: Limbs = [
    0x0, 0x0, 0x0, 0x0,
    0x0, 0xeeb0000000000000, 0xe3ec968549f878a8, 0xda959b1a13f7cc76,
    0x84e9867d6ebe876, 0x8562b5045cb25748, 0xe12909f97badc66, 0x6fe5d541f71c,
];

/// The number of zero low limbs of \\(p + 1\\).
const P751_PLUS_1_ZERO_WORDS: usize = 5;

/// \\(3^{238}\\) as six little-endian limbs, for secret-scalar sampling.
const THREE_238: [u64; 6] = [
    0xedcd718a828384f9, 0x733b35bfd4427a14, 0xf88229cf94d7cf38,
    0x63c56c990c7c2ad6, 0xb858a87e8f4222c7, 0x254c9c6b525eaf5,
];

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

/// Multiprecision addition with carry out; no reduction.
pub fn mp_add(x: &Limbs, y: &Limbs, z: &mut Limbs) -> u64 {
    let mut carry = 0u64;
    for i in 0..NUM_WORDS {
        let (c, zi) = addc(carry, x[i], y[i]);
        z[i] = zi;
        carry = c;
    }
    carry
}

/// Multiprecision subtraction with borrow out; no reduction.
pub fn mp_sub(x: &Limbs, y: &Limbs, z: &mut Limbs) -> u64 {
    let mut borrow = 0u64;
    for i in 0..NUM_WORDS {
        let (b, zi) = subb(borrow, x[i], y[i]);
        z[i] = zi;
        borrow = b;
    }
    borrow
}

/// Double-width addition; no reduction.  Carries cannot escape because
/// the operands are products of elements below \\(2p\\).
pub fn mp_add_wide(x: &WideLimbs, y: &WideLimbs, z: &mut WideLimbs) {
    let mut carry = 0u64;
    for i in 0..2 * NUM_WORDS {
        let (c, zi) = addc(carry, x[i], y[i]);
        z[i] = zi;
        carry = c;
    }
    debug_assert_eq!(carry, 0);
}

/// Double-width subtraction with correction: on borrow, \\(p \cdot 2^{768}\\)
/// is added back, which vanishes under Montgomery reduction.
pub fn fp_sub_wide(x: &WideLimbs, y: &WideLimbs, z: &mut WideLimbs) {
    let mut borrow = 0u64;
    for i in 0..2 * NUM_WORDS {
        let (b, zi) = subb(borrow, x[i], y[i]);
        z[i] = zi;
        borrow = b;
    }
    let mask = 0u64.wrapping_sub(borrow);
    let mut carry = 0u64;
    for i in 0..NUM_WORDS {
        let (c, zi) = addc(carry, z[NUM_WORDS + i], P751[i] & mask);
        z[NUM_WORDS + i] = zi;
        carry = c;
    }
}

/// Field addition: \\(z = x + y \bmod 2p\\), inputs and output in \\([0, 2p)\\).
pub fn fp_add(x: &Limbs, y: &Limbs, z: &mut Limbs) {
    // x + y < 4p < 2^768, so the raw sum cannot carry out.
    let mut carry = 0u64;
    for i in 0..NUM_WORDS {
        let (c, zi) = addc(carry, x[i], y[i]);
        z[i] = zi;
        carry = c;
    }
    debug_assert_eq!(carry, 0);
    let mut borrow = 0u64;
    for i in 0..NUM_WORDS {
        let (b, zi) = subb(borrow, z[i], P751_TIMES_2[i]);
        z[i] = zi;
        borrow = b;
    }
    let mask = 0u64.wrapping_sub(borrow);
    let mut c = 0u64;
    for i in 0..NUM_WORDS {
        let (cc, zi) = addc(c, z[i], P751_TIMES_2[i] & mask);
        z[i] = zi;
        c = cc;
    }
}

/// Field subtraction: \\(z = x - y \bmod 2p\\), inputs and output in \\([0, 2p)\\).
pub fn fp_sub(x: &Limbs, y: &Limbs, z: &mut Limbs) {
    let mut borrow = 0u64;
    for i in 0..NUM_WORDS {
        let (b, zi) = subb(borrow, x[i], y[i]);
        z[i] = zi;
        borrow = b;
    }
    let mask = 0u64.wrapping_sub(borrow);
    let mut carry = 0u64;
    for i in 0..NUM_WORDS {
        let (c, zi) = addc(carry, z[i], P751_TIMES_2[i] & mask);
        z[i] = zi;
        carry = c;
    }
}

/// Strong reduction from \\([0, 2p)\\) to the canonical range \\([0, p)\\).
pub fn fp_strong_reduce(x: &mut Limbs) {
    let mut z = [0u64; NUM_WORDS];
    let mut borrow = 0u64;
    for i in 0..NUM_WORDS {
        let (b, zi) = subb(borrow, x[i], P751[i]);
        z[i] = zi;
        borrow = b;
    }
    let mask = 0u64.wrapping_sub(borrow);
    let mut carry = 0u64;
    for i in 0..NUM_WORDS {
        let (c, zi) = addc(carry, z[i], P751[i] & mask);
        x[i] = zi;
        carry = c;
    }
}

/// Branchless swap of `x` and `y` when `choice` is set.
pub fn fp_cswap(x: &mut Limbs, y: &mut Limbs, choice: Choice) {
    for i in 0..NUM_WORDS {
        u64::conditional_swap(&mut x[i], &mut y[i], choice);
    }
}

/// Branchless assignment `x = y` when `choice` is set.
pub fn fp_cassign(x: &mut Limbs, y: &Limbs, choice: Choice) {
    for i in 0..NUM_WORDS {
        x[i] = u64::conditional_select(&x[i], &y[i], choice);
    }
}

/// Comba (product-scanning) multiplication of two 6-limb halves into a
/// 12-limb product, carrying through a 3-limb column accumulator.
fn comba_6x6(x: &[u64], y: &[u64], z: &mut [u64; 12]) {
    let mut t0 = 0u64;
    let mut t1 = 0u64;
    let mut t2 = 0u64;
    for k in 0..11 {
        let lo = if k >= 6 { k - 5 } else { 0 };
        let hi = if k < 6 { k } else { 5 };
        for i in lo..=hi {
            let prod = (x[i] as u128) * (y[k - i] as u128);
            let (v, c1) = t0.overflowing_add(prod as u64);
            t0 = v;
            let (u, c2) = t1.overflowing_add(((prod >> 64) as u64) + (c1 as u64));
            t1 = u;
            t2 += c2 as u64;
        }
        z[k] = t0;
        t0 = t1;
        t1 = t2;
        t2 = 0;
    }
    z[11] = t0;
}

/// `|a - b|` on 6-limb halves; returns true when `a < b`.
fn half_sub_abs(a: &[u64], b: &[u64], out: &mut [u64; 6]) -> bool {
    let mut borrow = 0u64;
    for i in 0..6 {
        let (bo, d) = subb(borrow, a[i], b[i]);
        out[i] = d;
        borrow = bo;
    }
    if borrow != 0 {
        let mut bo = 0u64;
        for i in 0..6 {
            let (b2, d) = subb(bo, b[i], a[i]);
            out[i] = d;
            bo = b2;
        }
        true
    } else {
        false
    }
}

/// Full multiplication \\(z = x \cdot y\\): one level of Karatsuba over
/// the 6/6 limb split, with Comba sub-products.
pub fn fp_mul(x: &Limbs, y: &Limbs, z: &mut WideLimbs) {
    let (xl, xh) = x.split_at(6);
    let (yl, yh) = y.split_at(6);

    let mut ll = [0u64; 12];
    let mut hh = [0u64; 12];
    comba_6x6(xl, yl, &mut ll);
    comba_6x6(xh, yh, &mut hh);

    let mut d1 = [0u64; 6];
    let mut d2 = [0u64; 6];
    let s1 = half_sub_abs(xl, xh, &mut d1);
    let s2 = half_sub_abs(yl, yh, &mut d2);
    let mut dd = [0u64; 12];
    comba_6x6(&d1, &d2, &mut dd);

    // mid = ll + hh -+ dd over 13 limbs.  The subtraction cannot
    // underflow: ll + hh - dd = xl*yh + xh*yl >= 0.
    let mut mid = [0u64; 13];
    let mut carry = 0u64;
    for i in 0..12 {
        let (c, m) = addc(carry, ll[i], hh[i]);
        mid[i] = m;
        carry = c;
    }
    mid[12] = carry;
    if s1 ^ s2 {
        let mut c = 0u64;
        for i in 0..12 {
            let (cc, m) = addc(c, mid[i], dd[i]);
            mid[i] = m;
            c = cc;
        }
        mid[12] += c;
    } else {
        let mut b = 0u64;
        for i in 0..12 {
            let (bb, m) = subb(b, mid[i], dd[i]);
            mid[i] = m;
            b = bb;
        }
        mid[12] -= b;
    }

    z[..12].copy_from_slice(&ll);
    z[12..].copy_from_slice(&hh);
    let mut c = 0u64;
    for i in 0..13 {
        let (cc, m) = addc(c, z[6 + i], mid[i]);
        z[6 + i] = m;
        c = cc;
    }
    let mut i = 19;
    while c != 0 && i < 24 {
        let (cc, m) = addc(0, z[i], c);
        z[i] = m;
        c = cc;
        i += 1;
    }
}

/// Montgomery reduction: \\(z = x \cdot R^{-1} \bmod p\\), output in \\([0, 2p)\\).
pub fn fp_rdc(x: &WideLimbs, z: &mut Limbs) {
    let mut t = [0u64; 2 * NUM_WORDS + 1];
    t[..2 * NUM_WORDS].copy_from_slice(x);
    for i in 0..NUM_WORDS {
        // Quotient digit is the current low limb, and
        // q*p = q*(p+1) - q cancels it exactly.
        let q = t[i];
        let mut carry = 0u128;
        for j in P751_PLUS_1_ZERO_WORDS..NUM_WORDS {
            let cur = (t[i + j] as u128) + (q as u128) * (P751_PLUS_1[j] as u128) + carry;
            t[i + j] = cur as u64;
            carry = cur >> 64;
        }
        let mut jj = i + NUM_WORDS;
        while carry != 0 && jj <= 2 * NUM_WORDS {
            let cur = (t[jj] as u128) + carry;
            t[jj] = cur as u64;
            carry = cur >> 64;
            jj += 1;
        }
        t[i] = 0;
    }
    debug_assert_eq!(t[2 * NUM_WORDS], 0);
    z.copy_from_slice(&t[NUM_WORDS..2 * NUM_WORDS]);
}

fn mp_is_zero(x: &Limbs) -> bool {
    x.iter().all(|&l| l == 0)
}

fn mp_is_one(x: &Limbs) -> bool {
    x[0] == 1 && x[1..].iter().all(|&l| l == 0)
}

fn mp_gt(x: &Limbs, y: &Limbs) -> bool {
    for i in (0..NUM_WORDS).rev() {
        if x[i] != y[i] {
            return x[i] > y[i];
        }
    }
    false
}

fn mp_shr1(x: &mut Limbs) {
    for i in 0..NUM_WORDS - 1 {
        x[i] = (x[i] >> 1) | (x[i + 1] << 63);
    }
    x[NUM_WORDS - 1] >>= 1;
}

fn mp_shl1(x: &mut Limbs) {
    for i in (1..NUM_WORDS).rev() {
        x[i] = (x[i] << 1) | (x[i - 1] >> 63);
    }
    x[0] <<= 1;
}

/// One doubling modulo \\(p\\), input and output in \\([0, p)\\).
fn mod_p_dbl(x: &mut Limbs) {
    let mut d = *x;
    mp_shl1(&mut d);
    let mut z = [0u64; NUM_WORDS];
    let mut borrow = 0u64;
    for i in 0..NUM_WORDS {
        let (b, zi) = subb(borrow, d[i], P751[i]);
        z[i] = zi;
        borrow = b;
    }
    // d < 2p, so d - p underflows exactly when d < p.
    *x = if borrow != 0 { d } else { z };
}

/// Montgomery inversion by the binary extended Euclidean method of
/// Savaş and Koç.
///
/// Takes \\(\hat a = aR \bmod p\\) and returns \\(a^{-1} R \bmod p\\), or
/// `None` when the input is zero.  Phase I finds \\((r, k)\\) with
/// \\(r \equiv -\hat a^{-1} 2^k \pmod p\\) and \\(751 \le k \le 1502\\);
/// after the sign fix, phase II shifts the stray power of two away with
/// \\(1536 - k\\) modular doublings, landing back in Montgomery form.
///
/// Variable time; callers only invert public values.
pub fn fp_inv(x: &Limbs) -> Option<Limbs> {
    let mut v = *x;
    fp_strong_reduce(&mut v);
    if mp_is_zero(&v) {
        return None;
    }

    let mut u = P751;
    let mut r = [0u64; NUM_WORDS];
    let mut s = [0u64; NUM_WORDS];
    s[0] = 1;
    let mut k = 0u32;

    while !mp_is_zero(&v) {
        if u[0] & 1 == 0 {
            mp_shr1(&mut u);
            mp_shl1(&mut s);
        } else if v[0] & 1 == 0 {
            mp_shr1(&mut v);
            mp_shl1(&mut r);
        } else if mp_gt(&u, &v) {
            let mut d = [0u64; NUM_WORDS];
            mp_sub(&u, &v, &mut d);
            mp_shr1(&mut d);
            u = d;
            let mut t = [0u64; NUM_WORDS];
            mp_add(&r, &s, &mut t);
            r = t;
            mp_shl1(&mut s);
        } else {
            let mut d = [0u64; NUM_WORDS];
            mp_sub(&v, &u, &mut d);
            mp_shr1(&mut d);
            v = d;
            let mut t = [0u64; NUM_WORDS];
            mp_add(&s, &r, &mut t);
            s = t;
            mp_shl1(&mut r);
        }
        k += 1;
    }
    if !mp_is_one(&u) {
        return None;
    }
    // r <= 2p here; bring into [0, p) and flip the sign.
    if !mp_gt(&P751, &r) {
        let mut t = [0u64; NUM_WORDS];
        mp_sub(&r, &P751, &mut t);
        r = t;
    }
    let mut t = [0u64; NUM_WORDS];
    mp_sub(&P751, &r, &mut t);
    r = t;

    for _ in 0..(1536 - k) {
        mod_p_dbl(&mut r);
    }
    Some(r)
}

/// Constant-time test whether a 48-byte little-endian scalar is below
/// \\(3^{238}\\).  Used by rejection sampling of Bob's secret key.
pub fn scalar_lt_3_238(scalar: &[u8; 48]) -> Choice {
    let mut words = [0u64; 6];
    for i in 0..6 {
        let mut w = 0u64;
        for j in 0..8 {
            w |= (scalar[8 * i + j] as u64) << (8 * j);
        }
        words[i] = w;
    }
    let mut borrow = 0u64;
    for i in 0..6 {
        let (b, _) = subb(borrow, words[i], THREE_238[i]);
        borrow = b;
    }
    Choice::from(borrow as u8)
}

/// Multiply a 48-byte little-endian scalar by 3 in place.
///
/// The scalar must be below \\(3^{238}\\) so that the product cannot
/// overflow 48 bytes.
pub fn scalar_mul_by_3(scalar: &mut [u8; 48]) {
    let mut carry = 0u16;
    for b in scalar.iter_mut() {
        let cur = 3 * (*b as u16) + carry;
        *b = cur as u8;
        carry = cur >> 8;
    }
    debug_assert_eq!(carry, 0);
}

#[cfg(test)]
mod test {
    use super::*;

    // Random operands below 2p, with their product and its Montgomery
    // reduction, generated with an independent bignum implementation.
    static TEST_X: Limbs = [
        17026702066521327207, 5108203422050077993, 10225396685796065916,
        11153620995215874678, 6531160855165088358, 15302925148404145445,
        1248821577836769963, 9789766903037985294, 7493111552032041328,
        10838999828319306046, 18103257655515297935, 27403304611634,
    ];
    static TEST_Y: Limbs = [
        4227467157325093378, 10699492810770426363, 13500940151395637365,
        12966403950118934952, 16517692605450415877, 13647111148905630666,
        14223628886152717087, 7167843152346903316, 15855377759596736571,
        4300673881383687338, 6635288001920617779, 30486099554235,
    ];
    static TEST_PRODUCT: WideLimbs = [
        0xa5659338742c02ce, 0xbe0a8ad86169704e, 0x232b15cd281b64b1, 0xce65f5076c22cc8d,
        0xbba4653713aafa50, 0xb14b0912c9a2c041, 0x987febe95fd48ffa, 0xf6ece375257503ea,
        0x7a3174b6c9487a2b, 0xf6d7a62da901f340, 0xc4f0ee421ad0ddba, 0xe495b913093c8112,
        0x95a6b994ffdec554, 0x30a301321aa75291, 0xa63c8f7e31af6ef6, 0xe82f49e06ac8c706,
        0x3e168e5df7e2e74a, 0x6cddca3ed023ccc5, 0xa57b2fb768fb61e5, 0xc11bd8d08647e674,
        0xf11c0c2478945c47, 0xb5c5e03de6686db9, 0x90f7ed3ed3a0914, 0x2b30b0a,
    ];
    static TEST_RDC: Limbs = [
        0x1ca2608206597834, 0xa0211d7ac0e34318, 0xb045603be2abf1f, 0xf83eb2b466cbbc78,
        0x518fe6408a2c8f7e, 0xc261a178ff223d6f, 0xff26b083cb4d0785, 0xa727e1e14d401b32,
        0xb48d04b88004377d, 0xce927349589c57bf, 0xcd2e0b1b49b99277, 0x1afbc49f699a,
    ];
    // 123456789 in Montgomery form, inverted.
    static TEST_INV: Limbs = [
        0xf1361211f56a0b47, 0xd8759410b17c319, 0xb8daf349fcfb272c, 0x3dfdfc8970bc5b36,
        0xc15336733ae72c0e, 0xbd5caecbb506d793, 0xa8baade909a8ca0c, 0xc64f0c4b476aa1e6,
        0x6bb8d5861586a601, 0x43a0c5985bb1c8f5, 0x7ee0178bfbed7dd6, 0x9fc6fb9a8e,
    ];

    #[test]
    fn mul_against_generated_product() {
        let mut z = [0u64; 2 * NUM_WORDS];
        fp_mul(&TEST_X, &TEST_Y, &mut z);
        assert_eq!(z[..], TEST_PRODUCT[..]);
    }

    #[test]
    fn rdc_against_generated_product() {
        let mut z = [0u64; NUM_WORDS];
        fp_rdc(&TEST_PRODUCT, &mut z);
        assert_eq!(z[..], TEST_RDC[..]);
    }

    #[test]
    fn mul_commutes() {
        let mut xy = [0u64; 2 * NUM_WORDS];
        let mut yx = [0u64; 2 * NUM_WORDS];
        fp_mul(&TEST_X, &TEST_Y, &mut xy);
        fp_mul(&TEST_Y, &TEST_X, &mut yx);
        assert_eq!(xy[..], yx[..]);
    }

    #[test]
    fn strong_reduce_is_idempotent() {
        let mut z = TEST_X;
        fp_strong_reduce(&mut z);
        let once = z;
        fp_strong_reduce(&mut z);
        assert_eq!(z[..], once[..]);
    }

    #[test]
    fn add_then_sub_round_trips() {
        let mut s = [0u64; NUM_WORDS];
        let mut d = [0u64; NUM_WORDS];
        fp_add(&TEST_X, &TEST_Y, &mut s);
        fp_sub(&s, &TEST_Y, &mut d);
        let mut lhs = d;
        let mut rhs = TEST_X;
        fp_strong_reduce(&mut lhs);
        fp_strong_reduce(&mut rhs);
        assert_eq!(lhs[..], rhs[..]);
    }

    #[test]
    fn x_plus_p_minus_x_is_zero() {
        let mut negx = [0u64; NUM_WORDS];
        let zero = [0u64; NUM_WORDS];
        fp_sub(&zero, &TEST_X, &mut negx);
        let mut s = [0u64; NUM_WORDS];
        fp_add(&TEST_X, &negx, &mut s);
        fp_strong_reduce(&mut s);
        assert!(mp_is_zero(&s));
    }

    #[test]
    fn inversion_against_generated_vector() {
        // 123456789 * R mod p: convert via a multiplication by R^2.
        let mut small = [0u64; NUM_WORDS];
        small[0] = 123456789;
        let mut wide = [0u64; 2 * NUM_WORDS];
        fp_mul(&small, &crate::constants::MONT_R_SQUARED, &mut wide);
        let mut mont = [0u64; NUM_WORDS];
        fp_rdc(&wide, &mut mont);
        let inv = fp_inv(&mont).unwrap();
        assert_eq!(inv[..], TEST_INV[..]);
        // and multiplying back gives one
        fp_mul(&mont, &inv, &mut wide);
        let mut one = [0u64; NUM_WORDS];
        fp_rdc(&wide, &mut one);
        fp_strong_reduce(&mut one);
        assert_eq!(one[..], crate::constants::MONT_ONE[..]);
    }

    #[test]
    fn inversion_of_zero_is_none() {
        let zero = [0u64; NUM_WORDS];
        assert!(fp_inv(&zero).is_none());
        // p itself is congruent to zero
        assert!(fp_inv(&P751).is_none());
    }

    #[test]
    fn cswap_and_cassign() {
        let mut x = TEST_X;
        let mut y = TEST_Y;
        fp_cswap(&mut x, &mut y, Choice::from(0));
        assert_eq!(x[..], TEST_X[..]);
        fp_cswap(&mut x, &mut y, Choice::from(1));
        assert_eq!(x[..], TEST_Y[..]);
        assert_eq!(y[..], TEST_X[..]);
        fp_cassign(&mut x, &TEST_X, Choice::from(0));
        assert_eq!(x[..], TEST_Y[..]);
        fp_cassign(&mut x, &TEST_X, Choice::from(1));
        assert_eq!(x[..], TEST_X[..]);
    }

    #[test]
    fn scalar_lt_3_238_boundaries() {
        let mut exact = [0u8; 48];
        for i in 0..6 {
            for j in 0..8 {
                exact[8 * i + j] = (THREE_238[i] >> (8 * j)) as u8;
            }
        }
        let mut below = exact;
        below[0] -= 1;
        let mut above = exact;
        above[0] += 1;
        assert_eq!(scalar_lt_3_238(&below).unwrap_u8(), 1);
        assert_eq!(scalar_lt_3_238(&exact).unwrap_u8(), 0);
        assert_eq!(scalar_lt_3_238(&above).unwrap_u8(), 0);
    }

    #[test]
    fn triple_scalar() {
        let mut x: [u8; 48] = [
            248, 132, 131, 130, 138, 113, 205, 237, 20, 122, 66, 212, 191, 53, 59, 115,
            56, 207, 215, 148, 207, 41, 130, 248, 214, 42, 124, 12, 153, 108, 197, 99,
            199, 34, 66, 143, 126, 168, 88, 184, 245, 234, 37, 181, 198, 201, 84, 2,
        ];
        // 3 * (3^238 - 1) = 3^239 - 3
        let expected: [u8; 48] = [
            232, 142, 138, 135, 159, 84, 104, 201, 62, 110, 199, 124, 63, 161, 177, 89,
            169, 109, 135, 190, 110, 125, 134, 233, 132, 128, 116, 37, 203, 69, 80, 43,
            86, 104, 198, 173, 123, 249, 9, 41, 225, 192, 113, 31, 84, 93, 254, 6,
        ];
        scalar_mul_by_3(&mut x);
        assert_eq!(x[..], expected[..]);
    }
}
