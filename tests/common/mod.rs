//! Common test utilities for iso9564 integration tests

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Hand made PAN 4012345678909 (check digit 9)
pub const TEST_PAN: [u8; 7] = [0x40, 0x12, 0x34, 0x56, 0x78, 0x90, 0x9F];

/// 16-digit PAN 4111111111111111
pub const TEST_PAN_16: [u8; 8] = [0x41, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x11];

/// Install a test subscriber honouring `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Decode a hex string, panicking on malformed test data
pub fn from_hex(text: &str) -> Vec<u8> {
    hex::decode(text.replace(' ', "")).expect("valid hex test vector")
}

/// Deterministic RNG for reproducible tests
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Random PIN of `len` digits
pub fn random_pin(rng: &mut StdRng, len: usize) -> Vec<u8> {
    (0..len).map(|_| rng.gen_range(0..10)).collect()
}

/// Random compressed numeric PAN of `digits` digits
pub fn random_pan(rng: &mut StdRng, digits: usize) -> Vec<u8> {
    let mut nibbles: Vec<u8> = (0..digits).map(|_| rng.gen_range(0..10)).collect();
    if nibbles.len() % 2 == 1 {
        nibbles.push(0xF);
    }
    nibbles.chunks(2).map(|pair| (pair[0] << 4) | pair[1]).collect()
}
