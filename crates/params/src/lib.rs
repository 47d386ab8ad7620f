//! Constant values for the mpin-zkp workspace.
//!
//! Curve parameters are stored as limb arrays in the radix used by the
//! arithmetic layer (`BASEBITS`-bit limbs, least significant first). They are
//! never mutated; every arithmetic type refers to them through an immutable
//! modulus description.

#![no_std]

pub mod bignum;
pub mod curves;
pub mod mpin;

pub use bignum::Chunk;
