//! # mpin-zkp
//!
//! M-PIN zero-knowledge two-factor authentication over the BN254 pairing
//! curve, together with the big-integer, field-tower, elliptic-curve and
//! pairing arithmetic it is built on.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! mpin-zkp = "0.3"
//! ```
//!
//! ## Features
//!
//! - `protocol` (default): the M-PIN client, server and authority operations
//! - `serde`: `Serialize`/`Deserialize` for the protocol configuration
//! - `full`: All features enabled
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports functionality from several sub-crates:
//!
//! - [`mpin-params`]: curve constants and protocol sizes
//! - [`mpin-internal`]: constant-time helpers
//! - [`mpin-api`]: error type, serialization traits, secret containers
//! - [`mpin-algorithms`]: BIG/DBIG, the BN254 field tower, G1, G2 and the pairing
//! - [`mpin-protocol`]: the M-PIN state machine

#![cfg_attr(not(feature = "std"), no_std)]

// Core re-exports (always available)
pub use mpin_algorithms as algorithms;
pub use mpin_api as api;
pub use mpin_internal as internal;
pub use mpin_params as params;

// Support crates that appear in the public API
pub use rand_core;
pub use subtle;
pub use zeroize;

// Feature-gated re-exports
#[cfg(feature = "protocol")]
pub use mpin_protocol as protocol;

/// Common imports for mpin-zkp users
pub mod prelude {
    // Re-export error types
    pub use crate::api::{Error, Result};

    // Re-export core traits
    pub use crate::api::{Serialize, SerializeSecret};

    // Re-export secret containers
    pub use crate::api::{ScalarBytes, SecretBytes, SessionKey};

    // Re-export the curve types
    pub use crate::algorithms::{G1Affine, G1Projective, G2Affine, G2Projective, Gt, Scalar};

    #[cfg(feature = "protocol")]
    pub use crate::protocol::{
        AuthRequest, ClientSecret, ClientState, Commitment, HashedId, MasterSecret,
        PinErrorEvidence, Precomputed, ProtocolConfig, ServerIdentity, ServerSecret, TimePermit,
        Token, Verdict,
    };
}
