//! Concrete primes, one per reduction strategy

use mpin_params::curves::{bn254, moduli, ModType};

use super::FieldModulus;
use crate::bignum::Chunk;

/// BN254 base field prime, general Montgomery reduction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bn254Modulus;

impl FieldModulus for Bn254Modulus {
    const NAME: &'static str = "Fp";
    const MODULUS: [Chunk; 5] = bn254::MODULUS;
    const MODBITS: usize = bn254::MODBITS;
    const MOD8: usize = bn254::MOD8;
    const MODTYPE: ModType = ModType::NotSpecial;
    const MCONST: Chunk = bn254::MCONST;
}

/// `2^255 - 19`, pseudo-Mersenne reduction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pm255;

impl FieldModulus for Pm255 {
    const NAME: &'static str = "Pm255";
    const MODULUS: [Chunk; 5] = moduli::PM255_MODULUS;
    const MODBITS: usize = moduli::PM255_MODBITS;
    const MOD8: usize = moduli::PM255_MOD8;
    const MODTYPE: ModType = ModType::PseudoMersenne;
    const MCONST: Chunk = moduli::PM255_MCONST;
}

/// `0x20000057 * 2^224 - 1`, Montgomery-friendly reduction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Mf254;

impl FieldModulus for Mf254 {
    const NAME: &'static str = "Mf254";
    const MODULUS: [Chunk; 5] = moduli::MF254_MODULUS;
    const MODBITS: usize = moduli::MF254_MODBITS;
    const MOD8: usize = moduli::MF254_MOD8;
    const MODTYPE: ModType = ModType::MontgomeryFriendly;
    const MCONST: Chunk = moduli::MF254_MCONST;
}

/// `2^252 - 2^116 - 1`, generalised-Mersenne reduction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Gm252;

impl FieldModulus for Gm252 {
    const NAME: &'static str = "Gm252";
    const MODULUS: [Chunk; 5] = moduli::GM252_MODULUS;
    const MODBITS: usize = moduli::GM252_MODBITS;
    const MOD8: usize = moduli::GM252_MOD8;
    const MODTYPE: ModType = ModType::GeneralisedMersenne;
    const MCONST: Chunk = 1;
    const GMBITS: usize = moduli::GM252_GMBITS;
}
