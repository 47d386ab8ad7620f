//! Fixed-width multi-precision integers
//!
//! [`Big`] holds `NLEN` signed limbs of `BASEBITS` bits, least significant
//! first. Limbs are allowed to leave `[0, 2^BASEBITS)` between operations
//! (carries are not propagated eagerly and a limb may go negative after a
//! subtraction); [`Big::norm`] restores the canonical form. Comparisons,
//! bit access and byte export assume normalised inputs.
//!
//! [`DBig`] is the double-width product of two `Big`s, reduced back to a
//! `Big` by the field layer.

mod big;
mod dbig;


pub use big::Big;
pub use dbig::DBig;

pub use mpin_params::bignum::{BASEBITS, BIGBITS, BMASK, DNLEN, MODBYTES, NEXCESS, NLEN};
pub use mpin_params::Chunk;

/// `a*b + c + r` split into `(top, bottom)` where `bottom` is one limb.
#[inline(always)]
pub(crate) fn muladd(a: Chunk, b: Chunk, c: Chunk, r: Chunk) -> (Chunk, Chunk) {
    let prod = (a as i128) * (b as i128) + (c as i128) + (r as i128);
    let bot = (prod & (BMASK as i128)) as Chunk;
    let top = (prod >> BASEBITS) as Chunk;
    (top, bot)
}
