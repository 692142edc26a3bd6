// -*- mode: rust; -*-
//
// This file is part of sidh-p751.
// See LICENSE for licensing information.

//! Public parameters for the prime \\(p = 2^{372} \cdot 3^{239} - 1\\).
//!
//! Everything here is read-only configuration: the Montgomery-form
//! representation constants, the affine generators of the two torsion
//! subgroups on the starting curve \\(E_0 : y^2 = x^3 + x\\), and the
//! tree-traversal strategies.  No global mutable state exists anywhere
//! in the crate.
//!
//! The base points were generated, following the original parameter
//! search, as \\(P_A = [3^{239}](11, \sqrt{11^3 + 11})\\) and
//! \\(P_B = [2^{372}](6, \sqrt{6^3 + 6})\\) over \\(\mathbb F_p\\), taking
//! the odd square root in both cases.  `strategy.rs` has a test that
//! regenerates the traversal strategies from the cost model.

use crate::backend::u64::field::Limbs;

/// The number of bytes in a serialized field element.
pub const FIELD_ELEMENT_BYTES: usize = 96;

/// The number of bytes in a serialized \\(\mathbb F_{p^2}\\) element.
pub const EXTENSION_FIELD_BYTES: usize = 2 * FIELD_ELEMENT_BYTES;

/// The number of bytes in a secret-key scalar.
pub const SECRET_KEY_BYTES: usize = 48;

/// The number of bytes in an uncompressed public key.
pub const PUBLIC_KEY_BYTES: usize = 3 * EXTENSION_FIELD_BYTES;

/// The number of bytes in a shared secret (one j-invariant).
pub const SHARED_SECRET_BYTES: usize = EXTENSION_FIELD_BYTES;

/// The 2-adic exponent: \\(2^{372}\\) divides \\(p + 1\\).
pub const E_ALICE: usize = 372;

/// The 3-adic exponent: \\(3^{239}\\) divides \\(p + 1\\).
pub const E_BOB: usize = 239;

/// Leaves of Alice's isogeny tree (4-isogeny steps): \\(372 / 2\\) plus
/// the special first step.
pub const MAX_ALICE: usize = 185;

/// Leaves of Bob's isogeny tree (3-isogeny steps).
pub const MAX_BOB: usize = 239;

/// \\(R = 2^{768} \bmod p\\); the Montgomery representation of one.
pub const MONT_ONE: Limbs = [
    0x249ad, 0x0, 0x0, 0x0,
    0x0, 0x8310000000000000, 0x5527b1e4375c6c66, 0x697797bf3f4f24d0,
    0xc89db7b2ac5c4e2e, 0x4ca4b439d2076956, 0x10f7926c7512c7e9, 0x2d5b24bce5e2,
];

/// \\(R^2 \bmod p\\), used to convert into Montgomery form.
pub const MONT_R_SQUARED: Limbs = [
    0x233046449dad4058, 0xdb010161a696452a, 0x5e36941472e3fd8e, 0xf40bfe2082a2e706,
    0x4932cca8904f8751, 0x1f735f1f1ee7fc81, 0xa24f4d80c1048e18, 0xb56c383ccdb607c5,
    0x441dd47b735f9c90, 0x5673ed2c6a6ac82a, 0x6c905261132294b, 0x41ad830f1f35,
];

/// \\(x(P_A)\\), Montgomery form.  \\(P_A\\) generates the prime-field
/// part of the \\(2^{372}\\)-torsion of \\(E_0\\).
pub const AFFINE_X_PA: Limbs = [
    0xd56fe52627914862, 0x1fad60dc96b5baea, 0x1e137d0bf07ab91, 0x404d3e9252161964,
    0x3c5385e4cd09a337, 0x4476426769e4af73, 0x9790c6db989dfe33, 0xe06e1c04d2aa8b5e,
    0x38c08185edea73b9, 0xaa41f678a4396ca6, 0x92b9259b2229e9a0, 0x2f9326818be0,
];

/// \\(y(P_A)\\), Montgomery form; the odd square root of \\(x^3 + x\\).
pub const AFFINE_Y_PA: Limbs = [
    0x332bd16fbe3d7739, 0x7e5e20ff2319e3db, 0xea856234aefbd81b, 0xe016df7d6d071283,
    0x8ae42796f73cd34f, 0x6364b408a4774575, 0xa71c97f17ce99497, 0xda03cdd9aa0cbe71,
    0xe52b4fda195bd56f, 0xdac41f811fce0a46, 0x9333720f0ee84a61, 0x1399f006e578,
];

/// \\(x(P_B)\\), Montgomery form.  \\(P_B\\) generates the prime-field
/// part of the \\(3^{239}\\)-torsion of \\(E_0\\).
pub const AFFINE_X_PB: Limbs = [
    0xf1a8c9ed7b96c4ab, 0x299429da5178486e, 0xef4926f20cd5c2f4, 0x683b2e2858b4716a,
    0xdda2fbcc3cac3eeb, 0xec055f9f3a600460, 0xd5a5a17a58c3848b, 0x4652d836f42eaed5,
    0x2f2e71ed78b3a3b3, 0xa771c057180add1d, 0xc780a5d2d835f512, 0x114ea3b55ac1,
];

/// \\(y(P_B)\\), Montgomery form; the odd square root of \\(x^3 + x\\).
pub const AFFINE_Y_PB: Limbs = [
    0xd1e1471273e3736b, 0xf9301ba94da241fe, 0xe14ab3c17fef0a85, 0xb4ddd26a037e9e62,
    0x66142dfb2afeb69, 0xe297cb70649d6c9e, 0x214dfc6e8b1a0912, 0x9f5ba818b01cf859,
    0x87d15b4907c12828, 0xa4da70c53a880dbf, 0xac5df62a72c8f253, 0x2e26a42ec617,
];

/// \\((a + 2) / 4 = 1/2\\) on \\(E_0\\) (where \\(a = 0\\)), Montgomery form.
/// Cached curve constant of the prime-field-only ladder.
pub const E0_A_PLUS_2_OVER_4: Limbs = [
    0x124d6, 0x0, 0x0, 0x0,
    0x0, 0xb8e0000000000000, 0x9c8a2434c0aa7287, 0xa206996ca9a378a3,
    0x6876280d41a41b52, 0xe903b49f175ce04f, 0xf8511860666d227, 0x4ea07cff6e7f,
];

/// 256 in Montgomery form, for the j-invariant numerator.
pub const MONT_256: Limbs = [
    0x249ad67, 0x0, 0x0, 0x0,
    0x0, 0x730000000000000, 0x738154969973da8b, 0x856657c146718c7f,
    0x461860e4e363a697, 0xf9fd6510bba838cd, 0x4e1a3c3f06993c0c, 0x55abef5b75c7,
];

/// \\(3^{239}\\) as little-endian limbs, the modulus of Bob-side
/// compression scalars.
pub const THREE_POW_239: [u64; 6] = [
    0xc968549f878a8eeb, 0x59b1a13f7cc76e3e, 0xe9867d6ebe876da9,
    0x2b5045cb25748084, 0x2909f97badc66856, 0x6fe5d541f71c0e1,
];

/// Alice's traversal strategy.  Indexed by the number of tree rows left
/// below the current point; the entry is the count of quadruplings to
/// apply before pushing the next branch point.  Produced by the
/// dynamic program in `strategy.rs` with weights (24.2, 21.6).
pub const ALICE_STRATEGY: [u8; MAX_ALICE] = [
    0, 1, 2, 2, 3, 4, 4, 4, 5, 6, 7, 7, 7, 8, 8, 8,
    9, 10, 11, 11, 12, 12, 12, 12, 14, 14, 15, 15, 16, 15, 16, 16,
    17, 18, 19, 19, 20, 21, 21, 21, 22, 24, 22, 24, 24, 27, 26, 27,
    27, 28, 29, 27, 27, 27, 28, 29, 30, 31, 32, 31, 31, 31, 32, 32,
    33, 34, 35, 35, 36, 38, 38, 38, 38, 38, 38, 41, 42, 43, 44, 43,
    43, 44, 48, 46, 48, 48, 48, 48, 48, 51, 49, 48, 48, 48, 51, 51,
    53, 51, 51, 56, 56, 58, 56, 56, 58, 58, 58, 58, 58, 61, 58, 58,
    58, 58, 61, 63, 61, 60, 61, 62, 63, 63, 63, 63, 63, 63, 64, 64,
    65, 65, 66, 67, 68, 70, 70, 71, 71, 73, 71, 71, 73, 73, 73, 73,
    80, 76, 78, 78, 78, 80, 81, 83, 83, 83, 85, 85, 86, 86, 86, 87,
    87, 88, 88, 86, 86, 87, 87, 90, 86, 87, 88, 87, 90, 91, 91, 91,
    92, 95, 96, 97, 96, 97, 100, 101, 102,
];

/// Bob's traversal strategy, from the same dynamic program with
/// weights (24.3, 16.6).
pub const BOB_STRATEGY: [u8; MAX_BOB] = [
    0, 1, 2, 2, 3, 4, 4, 4, 5, 5, 6, 7, 7, 7, 8, 9,
    9, 9, 10, 12, 12, 13, 12, 12, 13, 14, 15, 16, 16, 16, 17, 17,
    17, 18, 19, 20, 21, 21, 21, 21, 22, 22, 22, 24, 27, 27, 27, 27,
    28, 29, 28, 28, 29, 30, 29, 29, 30, 31, 32, 32, 33, 34, 35, 36,
    37, 37, 37, 38, 38, 38, 38, 40, 38, 38, 43, 39, 40, 42, 43, 44,
    45, 45, 46, 48, 48, 49, 49, 50, 51, 49, 53, 49, 53, 53, 50, 50,
    49, 53, 53, 54, 53, 54, 58, 58, 57, 58, 59, 60, 60, 62, 63, 64,
    64, 65, 65, 65, 66, 65, 65, 66, 65, 65, 66, 66, 68, 68, 68, 69,
    70, 70, 71, 71, 71, 73, 73, 71, 73, 73, 78, 75, 76, 78, 78, 81,
    80, 81, 83, 83, 84, 85, 86, 86, 86, 87, 86, 86, 87, 87, 88, 88,
    89, 87, 88, 88, 88, 89, 93, 88, 88, 88, 100, 91, 91, 91, 100, 95,
    93, 93, 96, 100, 100, 98, 98, 99, 100, 101, 103, 103, 106, 106, 106, 107,
    107, 108, 110, 110, 111, 112, 113, 114, 114, 115, 115, 117, 114, 116, 116, 116,
    118, 114, 114, 114, 119, 117, 114, 125, 117, 119, 117, 116, 117, 122, 119, 117,
    120, 122, 127, 124, 122, 125, 127, 125, 126, 127, 128, 129, 129, 131, 132,
];
