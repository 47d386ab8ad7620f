//! Pairing arithmetic for M-PIN over BN254
//!
//! This crate provides the arithmetic the M-PIN protocol rests on, written
//! with constant-time operations wherever secret data flows:
//!
//! - [`bignum`]: fixed-width multi-precision integers in 56-bit limbs
//! - [`field`]: prime fields with pseudo-Mersenne, Montgomery-friendly,
//!   generalised-Mersenne and generic Montgomery reduction
//! - [`ec::bn254`]: the `Fp2`/`Fp4`/`Fp12` tower, the groups G1 and G2, the
//!   optimal ate pairing and the target group GT
//!
//! Secret scalars are multiplied with endomorphism splits and masked table
//! reads; the few variable-time helpers say so in their names.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

// Error module and re-exports
pub mod error;
pub use error::{validate, Error, Result};

// Multi-precision integers
pub mod bignum;
pub use bignum::{Big, DBig};

// Prime fields
pub mod field;
pub use field::{FieldElement, FieldModulus};

// Elliptic curves and the pairing
pub mod ec;
pub use ec::bn254::{
    G1Affine, G1Projective, G2Affine, G2Projective, Gt, Scalar,
};
