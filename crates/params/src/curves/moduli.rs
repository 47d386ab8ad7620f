//! Primes of each special form, used to exercise every reduction strategy.
//!
//! None of these carry a curve; they exist so the field layer can be checked
//! against all four reductions with the same limb layout as BN254.

use crate::Chunk;

/// Curve25519 prime `2^255 - 19`
pub const PM255_MODULUS: [Chunk; 5] = [
    0xFFFFFFFFFFFFED,
    0xFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFF,
    0x7FFFFFFF,
];
/// The `c` in `2^255 - c`
pub const PM255_MCONST: Chunk = 19;
/// Bits in the pseudo-Mersenne prime
pub const PM255_MODBITS: usize = 255;
/// Residue of the pseudo-Mersenne prime modulo 8
pub const PM255_MOD8: usize = 5;

/// Montgomery-friendly prime `0x20000057 * 2^224 - 1`
pub const MF254_MODULUS: [Chunk; 5] = [
    0xFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFF,
    0x20000056,
];
/// Top digit `c` of `c * 2^224 - 1`
pub const MF254_MCONST: Chunk = 0x20000057;
/// Bits in the Montgomery-friendly prime
pub const MF254_MODBITS: usize = 254;
/// Residue of the Montgomery-friendly prime modulo 8
pub const MF254_MOD8: usize = 7;

/// Generalised-Mersenne prime `2^252 - 2^116 - 1`
pub const GM252_MODULUS: [Chunk; 5] = [
    0xFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFEF,
    0xFFFFFFFFFFFFFF,
    0xFFFFFFF,
];
/// Bits in the generalised-Mersenne prime
pub const GM252_MODBITS: usize = 252;
/// The `k` in `2^252 - 2^k - 1`
pub const GM252_GMBITS: usize = 116;
/// Residue of the generalised-Mersenne prime modulo 8
pub const GM252_MOD8: usize = 7;
