// -*- mode: rust; -*-
//
// This file is part of sidh-p751.
// See LICENSE for licensing information.

#![deny(missing_docs)]

//! # sidh-p751
//!
//! **A pure-Rust implementation of ephemeral supersingular-isogeny
//! Diffie-Hellman over the prime \\(p = 2^{372} \cdot 3^{239} - 1\\),
//! with optional public-key compression.**
//!
//! Two peers, conventionally Alice and Bob, walk commuting isogeny
//! graphs rooted at the supersingular curve
//! \\(E_0 : y^2 = x^3 + x\\) over \\(\mathbb F_{p^2}\\); the
//! j-invariants of the two far curves coincide and form the shared
//! secret.  Alice's walk is through 4-isogenies, Bob's through
//! 3-isogenies.
//!
//! This library implements *ephemeral* key exchange only.  It performs
//! no key validation beyond range checks, so each key pair must be
//! used for at most one shared-secret computation.
//!
//! # Example
//!
//! ```
//! use sidh_p751::{generate_alice_keypair, generate_bob_keypair};
//!
//! let mut rng = rand::thread_rng();
//!
//! let (alice_public, alice_secret) = generate_alice_keypair(&mut rng).unwrap();
//! let (bob_public, bob_secret) = generate_bob_keypair(&mut rng).unwrap();
//!
//! let alice_shared = alice_secret.shared_secret(&bob_public).unwrap();
//! let bob_shared = bob_secret.shared_secret(&alice_public).unwrap();
//!
//! assert_eq!(alice_shared[..], bob_shared[..]);
//! ```
//!
//! # Compression
//!
//! A 576-byte public key can be compressed to roughly 60% of its size:
//! three discrete logarithms with respect to a deterministic torsion
//! basis, plus the curve coefficient.  Decompression folds directly
//! into the shared-secret computation, so the uncompressed key is
//! never rebuilt:
//!
//! ```
//! use sidh_p751::{compress_alice_public_key, generate_alice_keypair, generate_bob_keypair};
//!
//! let mut rng = rand::thread_rng();
//! let (alice_public, alice_secret) = generate_alice_keypair(&mut rng).unwrap();
//! let (bob_public, bob_secret) = generate_bob_keypair(&mut rng).unwrap();
//!
//! let compressed = compress_alice_public_key(&alice_public).unwrap();
//! let from_compressed = bob_secret.shared_secret_compressed(&compressed).unwrap();
//! let from_plain = bob_secret.shared_secret(&alice_public).unwrap();
//! assert_eq!(from_compressed[..], from_plain[..]);
//! # let _ = (alice_secret, bob_public);
//! ```

// Low-level arithmetic layers: limb-level Fp, the quadratic extension,
// and x-only Montgomery curve operations.
mod backend;
pub mod field;
pub mod fp2;
pub mod montgomery;

// The isogeny walk: small-degree isogenies, the traversal strategy
// optimiser, and the key-exchange driver.
mod isogeny;
pub mod strategy;
mod sidh;

// Public-key compression: torsion bases, Tate pairings, and windowed
// Pohlig-Hellman discrete logarithms.
mod basis;
mod compress;
mod dlog;
mod pairing;
mod scalar;

// Read-only public parameters and the error taxonomy.
pub mod constants;
mod errors;

pub use crate::compress::{
    compress_alice_public_key, compress_bob_public_key, CompressedPublicKeyAlice,
    CompressedPublicKeyBob, COMPRESSED_PUBLIC_KEY_ALICE_BYTES, COMPRESSED_PUBLIC_KEY_BOB_BYTES,
};
pub use crate::errors::SidhError;
pub use crate::sidh::{
    generate_alice_keypair, generate_bob_keypair, PublicKeyAlice, PublicKeyBob, SecretKeyAlice,
    SecretKeyBob,
};
