//! BN254 (Nogami et al.) curve parameters
//!
//! `E: y^2 = x^3 + 2` over `Fp`, `u = -(2^62 + 2^55 + 1)`. The sextic twist is
//! of D-type, `E': y^2 = x^3 + 2/(1+i)` over `Fp2 = Fp[i]/(i^2 + 1)`.
//! Limbs are 56-bit, least significant first.

use crate::Chunk;

/// Bits in the field modulus
pub const MODBITS: usize = 254;

/// Field modulus residue modulo 8
pub const MOD8: usize = 3;

/// Field modulus `p = 36u^4 + 36u^3 + 24u^2 + 6u + 1`
pub const MODULUS: [Chunk; 5] = [0x13, 0x13A7, 0x80000000086121, 0x40000001BA344D, 0x25236482];

/// Montgomery constant `-1/p mod 2^56`
pub const MCONST: Chunk = 0x435E50D79435E5;

/// Curve coefficient `b`
pub const CURVE_B: i64 = 2;

/// Group order `r`
pub const CURVE_ORDER: [Chunk; 5] = [0xD, 0x800000000010A1, 0x8000000007FF9F, 0x40000001BA344D, 0x25236482];

/// Cofactor of G1
pub const CURVE_COF: [Chunk; 5] = [0x1, 0x0, 0x0, 0x0, 0x0];

/// G1 generator x-coordinate (`p - 1`)
pub const CURVE_GX: [Chunk; 5] = [0x12, 0x13A7, 0x80000000086121, 0x40000001BA344D, 0x25236482];

/// G1 generator y-coordinate
pub const CURVE_GY: [Chunk; 5] = [0x1, 0x0, 0x0, 0x0, 0x0];

/// Frobenius constant, real part
pub const CURVE_FRA: [Chunk; 5] = [0x7DE6C06F2A6DE9, 0x74924D3F77C2E1, 0x50A846953F8509, 0x212E7C8CB6499B, 0x1B377619];

/// Frobenius constant, imaginary part
pub const CURVE_FRB: [Chunk; 5] = [0x82193F90D5922A, 0x8B6DB2C08850C5, 0x2F57B96AC8DC17, 0x1ED1837503EAB2, 0x9EBEE69];

/// G2 generator x-coordinate, real part
pub const CURVE_PXA: [Chunk; 5] = [0xEE4224C803FB2B, 0x8BBB4898BF0D91, 0x7E8C61EDB6A464, 0x519EB62FEB8D8C, 0x61A10BB];

/// G2 generator x-coordinate, imaginary part
pub const CURVE_PXB: [Chunk; 5] = [0x8C34C1E7D54CF3, 0x746BAE3784B70D, 0x8C5982AA5B1F4D, 0xBA737833310AA7, 0x516AAF9];

/// G2 generator y-coordinate, real part
pub const CURVE_PYA: [Chunk; 5] = [0xF0E07891CD2B9A, 0xAE6BDBE09BD19, 0x96698C822329BD, 0x6BAF93439A90E0, 0x21897A0];

/// G2 generator y-coordinate, imaginary part
pub const CURVE_PYB: [Chunk; 5] = [0x2D1AEC6B3ACE9B, 0x6FFD739C9578A, 0x56F5F38D37B090, 0x7C8B15268F6D44, 0xEBB2B0E];

/// Magnitude of the BN parameter `u` (the sign is negative)
pub const CURVE_BNX: [Chunk; 5] = [0x80000000000001, 0x40, 0x0, 0x0, 0x0];

/// Cube root of unity in `Fp`, used by the G1 endomorphism
pub const CURVE_CRU: [Chunk; 5] = [0x80000000000007, 0x6CD, 0x40000000024909, 0x49B362, 0x0];

/// GLV lattice: rounding multipliers
pub const CURVE_W: [[Chunk; 5]; 2] = [
    [0x3, 0x80000000000204, 0x6181, 0x0, 0x0],
    [0x1, 0x81, 0x0, 0x0, 0x0],
];

/// GLV lattice: short basis
pub const CURVE_SB: [[[Chunk; 5]; 2]; 2] = [
    [[0x4, 0x80000000000285, 0x6181, 0x0, 0x0], [0x1, 0x81, 0x0, 0x0, 0x0]],
    [[0x1, 0x81, 0x0, 0x0, 0x0], [0xA, 0xE9D, 0x80000000079E1E, 0x40000001BA344D, 0x25236482]],
];

/// Galbraith-Scott lattice: rounding multipliers
pub const CURVE_WB: [[Chunk; 5]; 4] = [
    [0x80000000000000, 0x80000000000040, 0x2080, 0x0, 0x0],
    [0x80000000000005, 0x54A, 0x8000000001C707, 0x312241, 0x0],
    [0x80000000000003, 0x800000000002C5, 0xC000000000E383, 0x189120, 0x0],
    [0x80000000000001, 0x800000000000C1, 0x2080, 0x0, 0x0],
];

/// Galbraith-Scott lattice: short basis
pub const CURVE_BB: [[[Chunk; 5]; 4]; 4] = [
    [
        [0x8000000000000D, 0x80000000001060, 0x8000000007FF9F, 0x40000001BA344D, 0x25236482],
        [0x8000000000000C, 0x80000000001060, 0x8000000007FF9F, 0x40000001BA344D, 0x25236482],
        [0x8000000000000C, 0x80000000001060, 0x8000000007FF9F, 0x40000001BA344D, 0x25236482],
        [0x2, 0x81, 0x0, 0x0, 0x0],
    ],
    [
        [0x1, 0x81, 0x0, 0x0, 0x0],
        [0x8000000000000C, 0x80000000001060, 0x8000000007FF9F, 0x40000001BA344D, 0x25236482],
        [0x8000000000000D, 0x80000000001060, 0x8000000007FF9F, 0x40000001BA344D, 0x25236482],
        [0x8000000000000C, 0x80000000001060, 0x8000000007FF9F, 0x40000001BA344D, 0x25236482],
    ],
    [
        [0x2, 0x81, 0x0, 0x0, 0x0],
        [0x1, 0x81, 0x0, 0x0, 0x0],
        [0x1, 0x81, 0x0, 0x0, 0x0],
        [0x1, 0x81, 0x0, 0x0, 0x0],
    ],
    [
        [0x80000000000002, 0x40, 0x0, 0x0, 0x0],
        [0x2, 0x102, 0x0, 0x0, 0x0],
        [0xA, 0x80000000001020, 0x8000000007FF9F, 0x40000001BA344D, 0x25236482],
        [0x80000000000002, 0x40, 0x0, 0x0, 0x0],
    ],
];
