// -*- mode: rust; -*-
//
// This file is part of sidh-p751.
// See LICENSE for licensing information.

//! The `u64` backend: 12 x 64-bit limbs with `u128` products.

pub mod field;
