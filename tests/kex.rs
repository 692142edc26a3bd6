// -*- mode: rust; -*-
//
// This file is part of sidh-p751.
// See LICENSE for licensing information.

//! End-to-end two-party key-exchange scenarios.

use sidh_p751::{
    generate_alice_keypair, generate_bob_keypair, PublicKeyAlice, SecretKeyAlice, SecretKeyBob,
};

/// The smallest legal keys: sk_A = 2, sk_B = 3.
#[test]
fn minimal_keys_agree() {
    let mut a = [0u8; 48];
    a[0] = 2;
    let mut b = [0u8; 48];
    b[0] = 3;
    let alice = SecretKeyAlice::from_bytes(&a).unwrap();
    let bob = SecretKeyBob::from_bytes(&b).unwrap();

    let alice_public = alice.public_key().unwrap();
    let bob_public = bob.public_key().unwrap();
    let shared_a = alice.shared_secret(&bob_public).unwrap();
    let shared_b = bob.shared_secret(&alice_public).unwrap();
    assert_eq!(shared_a[..], shared_b[..]);
}

/// The largest legal keys: sk_A = 2^372 - 2, sk_B = 3^239 - 3.
#[test]
fn maximal_keys_agree() {
    let a: [u8; 48] = [
        254, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255,
        255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255,
        255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 15, 0,
    ];
    let b: [u8; 48] = [
        232, 142, 138, 135, 159, 84, 104, 201, 62, 110, 199, 124, 63, 161, 177, 89, 169,
        109, 135, 190, 110, 125, 134, 233, 132, 128, 116, 37, 203, 69, 80, 43, 86, 104,
        198, 173, 123, 249, 9, 41, 225, 192, 113, 31, 84, 93, 254, 6,
    ];
    let alice = SecretKeyAlice::from_bytes(&a).unwrap();
    let bob = SecretKeyBob::from_bytes(&b).unwrap();

    let shared_a = alice.shared_secret(&bob.public_key().unwrap()).unwrap();
    let shared_b = bob.shared_secret(&alice.public_key().unwrap()).unwrap();
    assert_eq!(shared_a[..], shared_b[..]);
}

/// Fixed keys must give byte-identical keys and secrets on every run.
#[test]
fn exchange_is_deterministic() {
    let mut a = [0u8; 48];
    a[0] = 2;
    a[7] = 0xa4;
    let mut b = [0u8; 48];
    b[0] = 3;
    b[11] = 0x5d;
    let alice = SecretKeyAlice::from_bytes(&a).unwrap();
    let bob = SecretKeyBob::from_bytes(&b).unwrap();

    let pk_a1 = alice.public_key().unwrap().to_bytes();
    let pk_a2 = alice.public_key().unwrap().to_bytes();
    assert_eq!(pk_a1[..], pk_a2[..]);

    let bob_public = bob.public_key().unwrap();
    let s1 = alice.shared_secret(&bob_public).unwrap();
    let s2 = alice.shared_secret(&bob_public).unwrap();
    assert_eq!(s1[..], s2[..]);
}

/// Randomly generated key pairs agree.
#[test]
fn random_keypairs_agree() {
    let mut rng = rand::thread_rng();
    let (alice_public, alice_secret) = generate_alice_keypair(&mut rng).unwrap();
    let (bob_public, bob_secret) = generate_bob_keypair(&mut rng).unwrap();

    let shared_a = alice_secret.shared_secret(&bob_public).unwrap();
    let shared_b = bob_secret.shared_secret(&alice_public).unwrap();
    assert_eq!(shared_a[..], shared_b[..]);
}

/// Tampering with x(Q - P) must be caught by the torsion order check,
/// as a parameter mismatch.
#[test]
fn corrupted_public_key_is_rejected() {
    let mut a = [0u8; 48];
    a[0] = 2;
    let mut b = [0u8; 48];
    b[0] = 3;
    let alice = SecretKeyAlice::from_bytes(&a).unwrap();
    let bob = SecretKeyBob::from_bytes(&b).unwrap();

    let mut pk_bytes = alice.public_key().unwrap().to_bytes();
    // x(Q - P) occupies the final third; scramble it.
    pk_bytes[400] ^= 0x5a;
    pk_bytes[410] ^= 0xc3;
    let tampered = PublicKeyAlice::from_bytes(&pk_bytes[..]).unwrap();

    let err = bob.shared_secret(&tampered).unwrap_err();
    assert!(err.is_parameter_mismatch());
}
