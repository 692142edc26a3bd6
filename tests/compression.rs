// -*- mode: rust; -*-
//
// This file is part of sidh-p751.
// See LICENSE for licensing information.

//! Compression round-trip scenarios: a compressed public key must be
//! interchangeable with the uncompressed one.

use sidh_p751::{
    compress_alice_public_key, compress_bob_public_key, CompressedPublicKeyAlice,
    CompressedPublicKeyBob, SecretKeyAlice, SecretKeyBob,
};

const M_A: [u8; 48] = [
    248, 31, 9, 39, 165, 125, 79, 135, 70, 97, 87, 231, 221, 204, 245, 38, 150, 198,
    187, 184, 199, 148, 156, 18, 137, 71, 248, 83, 111, 170, 138, 61, 112, 25, 188, 197,
    132, 151, 1, 0, 207, 178, 24, 72, 171, 22, 11, 0,
];
const M_B: [u8; 48] = [
    246, 217, 158, 190, 100, 227, 224, 181, 171, 32, 120, 72, 92, 115, 113, 62, 103, 57,
    71, 252, 166, 121, 126, 201, 55, 99, 213, 234, 243, 228, 171, 68, 9, 239, 214, 37,
    255, 242, 217, 180, 25, 54, 242, 61, 101, 245, 78, 0,
];

#[test]
fn alice_key_compression_round_trips() {
    let alice = SecretKeyAlice::from_bytes(&M_A).unwrap();
    let bob = SecretKeyBob::from_bytes(&M_B).unwrap();
    let alice_public = alice.public_key().unwrap();

    let compressed = compress_alice_public_key(&alice_public).unwrap();
    let via_compressed = bob.shared_secret_compressed(&compressed).unwrap();
    let via_plain = bob.shared_secret(&alice_public).unwrap();
    assert_eq!(via_compressed[..], via_plain[..]);

    // and the other side still agrees
    let bob_public = bob.public_key().unwrap();
    let alice_view = alice.shared_secret(&bob_public).unwrap();
    assert_eq!(via_compressed[..], alice_view[..]);
}

#[test]
fn bob_key_compression_round_trips() {
    let alice = SecretKeyAlice::from_bytes(&M_A).unwrap();
    let bob = SecretKeyBob::from_bytes(&M_B).unwrap();
    let bob_public = bob.public_key().unwrap();

    let compressed = compress_bob_public_key(&bob_public).unwrap();
    let via_compressed = alice.shared_secret_compressed(&compressed).unwrap();
    let via_plain = alice.shared_secret(&bob_public).unwrap();
    assert_eq!(via_compressed[..], via_plain[..]);
}

#[test]
fn compressed_key_survives_serialization() {
    let alice = SecretKeyAlice::from_bytes(&M_A).unwrap();
    let bob = SecretKeyBob::from_bytes(&M_B).unwrap();

    let ca = compress_alice_public_key(&alice.public_key().unwrap()).unwrap();
    let ca2 = CompressedPublicKeyAlice::from_bytes(&ca.to_bytes()[..]).unwrap();
    assert_eq!(ca, ca2);
    let shared = bob.shared_secret_compressed(&ca2).unwrap();
    assert_eq!(shared[..], bob.shared_secret(&alice.public_key().unwrap()).unwrap()[..]);

    let cb = compress_bob_public_key(&bob.public_key().unwrap()).unwrap();
    let cb2 = CompressedPublicKeyBob::from_bytes(&cb.to_bytes()[..]).unwrap();
    assert_eq!(cb, cb2);
}

#[test]
fn compression_is_deterministic() {
    let alice = SecretKeyAlice::from_bytes(&M_A).unwrap();
    let pk = alice.public_key().unwrap();
    let c1 = compress_alice_public_key(&pk).unwrap();
    let c2 = compress_alice_public_key(&pk).unwrap();
    assert_eq!(c1.to_bytes()[..], c2.to_bytes()[..]);
}
