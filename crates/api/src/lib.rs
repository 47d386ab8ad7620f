//! Public API traits and types for the mpin-zkp workspace
//!
//! This crate provides the surface shared by the arithmetic and protocol
//! crates: the protocol-level error kinds with their wire codes, the byte
//! serialization traits, and zeroizing containers for secret material.

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, Result};
pub use traits::{Serialize, SerializeSecret};
pub use types::*;
