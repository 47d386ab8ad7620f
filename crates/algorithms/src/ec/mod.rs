//! Elliptic curve primitives
//!
//! Only the BN254 pairing-friendly curve is provided. Its modules follow the
//! layout of a pairing curve: the extension field tower, the two source
//! groups, and the pairing with its target group.

pub mod bn254;
