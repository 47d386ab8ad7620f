//! M-PIN zero-knowledge two-factor authentication over BN254
//!
//! A trusted authority (or several, each holding a share) issues every
//! client a secret `s·H(ID)` in G1 and every server `s·Q` in G2. The client
//! strips a small PIN multiple out of its secret and stores the remainder as
//! a token; proving knowledge of token and PIN together then reduces to a
//! pairing equation the server can check without learning either.
//!
//! The crate is organised by role:
//!
//! - [`authority`]: master secret shares, server and client secrets, time
//!   permits, share recombination
//! - [`pin`]: turning a client secret into a token and back
//! - [`client`] / [`server`]: the two-pass and single-pass exchanges
//! - [`kangaroo`]: recovering how far a rejected PIN was from the right one
//! - [`full`]: M-PIN Full session-key agreement
//! - [`encoding`]: Elligator-squared obfuscation of G1 points
//! - [`crypto`]: the symmetric collaborators (AES-GCM, HMAC, PBKDF2)
//! - [`time`]: permit slots and timestamps from the system clock
//!
//! All operations are synchronous and side-effect free apart from the RNG
//! they are handed. Secret-bearing values are wiped when dropped.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod authority;
pub mod client;
pub mod config;
pub mod crypto;
pub mod encoding;
pub mod full;
pub mod hash;
pub mod kangaroo;
pub mod pin;
pub mod server;
pub mod time;
pub mod types;

pub use authority::G1Base;
pub use config::ProtocolConfig;
pub use encoding::EncodedPoint;
pub use server::ServerOutcome;
pub use types::{
    AuthRequest, ClientSecret, ClientState, Commitment, HashedId, MasterSecret, PinErrorEvidence,
    Precomputed, ServerIdentity, ServerSecret, TimePermit, Token, Verdict,
};

pub use mpin_api::{Error, Result, SessionKey};
