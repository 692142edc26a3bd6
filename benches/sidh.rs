// -*- mode: rust; -*-
//
// This file is part of sidh-p751.
// See LICENSE for licensing information.

use criterion::{criterion_group, criterion_main, Criterion};

use sidh_p751::{compress_alice_public_key, generate_alice_keypair, generate_bob_keypair};

fn keygen(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    c.bench_function("alice keygen", |b| {
        b.iter(|| generate_alice_keypair(&mut rng).unwrap())
    });
    c.bench_function("bob keygen", |b| {
        b.iter(|| generate_bob_keypair(&mut rng).unwrap())
    });
}

fn shared_secret(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let (alice_public, alice_secret) = generate_alice_keypair(&mut rng).unwrap();
    let (bob_public, bob_secret) = generate_bob_keypair(&mut rng).unwrap();
    c.bench_function("alice shared secret", |b| {
        b.iter(|| alice_secret.shared_secret(&bob_public).unwrap())
    });
    c.bench_function("bob shared secret", |b| {
        b.iter(|| bob_secret.shared_secret(&alice_public).unwrap())
    });
}

fn compression(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let (alice_public, _) = generate_alice_keypair(&mut rng).unwrap();
    let (_, bob_secret) = generate_bob_keypair(&mut rng).unwrap();
    let compressed = compress_alice_public_key(&alice_public).unwrap();
    c.bench_function("compress alice public key", |b| {
        b.iter(|| compress_alice_public_key(&alice_public).unwrap())
    });
    c.bench_function("bob shared secret from compressed key", |b| {
        b.iter(|| bob_secret.shared_secret_compressed(&compressed).unwrap())
    });
}

criterion_group!(benches, keygen, shared_secret, compression);
criterion_main!(benches);
