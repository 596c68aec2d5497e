// Copyright (c) 2024-2025 The Sigil Project Authors

//! Keccak-256 hash
//!
//! The original Keccak sponge with multi-rate padding (`0x01` / `0x80`),
//! not the later-standardized SHA3-256 (`0x06`) — transaction hashing on
//! the consuming chain requires the original domain. 1600-bit state as
//! 5x5 64-bit lanes, 136-byte rate, 24 permutation rounds.

/// Output width in bytes
pub const HASH_LEN: usize = 32;

/// Sponge rate: 200 - 2 * 32
const RATE: usize = 200 - HASH_LEN * 2;

const ROUNDS: usize = 24;

/// Per-lane rotation offsets for the rho step
const ROTATION: [[u32; 5]; 5] = [
    [0, 36, 3, 41, 18],
    [1, 44, 10, 45, 2],
    [62, 6, 43, 15, 61],
    [28, 55, 25, 21, 56],
    [27, 20, 39, 8, 14],
];

/// 24 rounds of the Keccak-f[1600] permutation
fn permute(a: &mut [[u64; 5]; 5]) {
    // LFSR generating the iota round constants
    let mut lfsr = 1u8;

    for _ in 0..ROUNDS {
        // Theta
        let mut c = [0u64; 5];
        for x in 0..5 {
            for y in 0..5 {
                c[x] ^= a[x][y];
            }
        }
        for x in 0..5 {
            let d = c[(x + 4) % 5] ^ c[(x + 1) % 5].rotate_left(1);
            for y in 0..5 {
                a[x][y] ^= d;
            }
        }

        // Rho and pi
        let mut b = [[0u64; 5]; 5];
        for x in 0..5 {
            for y in 0..5 {
                b[y][(x * 2 + y * 3) % 5] = a[x][y].rotate_left(ROTATION[x][y]);
            }
        }

        // Chi
        for x in 0..5 {
            for y in 0..5 {
                a[x][y] = b[x][y] ^ (!b[(x + 1) % 5][y] & b[(x + 2) % 5][y]);
            }
        }

        // Iota
        for j in 0..7 {
            a[0][0] ^= ((lfsr & 1) as u64) << ((1u32 << j) - 1);
            lfsr = (lfsr << 1) ^ ((lfsr >> 7) * 0x71);
        }
    }
}

/// Keccak-256 of `data`
pub fn keccak256(data: &[u8]) -> [u8; HASH_LEN] {
    let mut state = [[0u64; 5]; 5];

    // Absorb: XOR message bytes into the state, permuting per full block
    let mut block_off = 0;
    for &byte in data {
        let lane = block_off >> 3;
        state[lane % 5][lane / 5] ^= (byte as u64) << ((block_off & 7) << 3);
        block_off += 1;
        if block_off == RATE {
            permute(&mut state);
            block_off = 0;
        }
    }

    // Pad the final block: 0x01 after the message, 0x80 at the rate
    // boundary (the two land in the same byte when the block is full
    // to one short)
    let lane = block_off >> 3;
    state[lane % 5][lane / 5] ^= 0x01u64 << ((block_off & 7) << 3);
    let last = RATE - 1;
    let lane = last >> 3;
    state[lane % 5][lane / 5] ^= 0x80u64 << ((last & 7) << 3);
    permute(&mut state);

    // Squeeze: first 32 bytes, lane-wise little-endian
    let mut hash = [0u8; HASH_LEN];
    for (i, byte) in hash.iter_mut().enumerate() {
        let lane = i >> 3;
        *byte = (state[lane % 5][lane / 5] >> ((i & 7) << 3)) as u8;
    }

    hash
}
