//! Shared fixtures for the mpin-zkp end-to-end tests
//!
//! Everything here is deterministic: the RNG is ChaCha20 seeded from the
//! published M-PIN test seed, and the identity, date and timestamp are the
//! ones used by the reference test vectors.

use mpin_protocol::authority::{
    get_client_permit, get_client_secret, get_server_secret, random_generate,
};
use mpin_protocol::hash::hash_id;
use mpin_protocol::pin::extract_pin;
use mpin_protocol::{HashedId, ProtocolConfig, ServerSecret, TimePermit, Token};
use rand_chacha::ChaCha20Rng;
use rand_core::{CryptoRng, RngCore, SeedableRng};
use tracing_subscriber::EnvFilter;

/// Identity of the test user
pub const TEST_ID: &[u8] = b"testUser@miracl.com";

/// Permit slot of the test vectors
pub const DATE: u32 = 16660;

/// Client clock of the test vectors, within [`DATE`]
pub const TIME_VALUE: u32 = 1_439_465_203;

/// PIN the token is issued under
pub const PIN: u32 = 1234;

/// RNG seed of the test vectors, zero-padded to 32 bytes before use
pub const SEED_HEX: &str = "9e8b4178790cd57a5761c4a6f164ba72";

/// ChaCha20 seeded with [`SEED_HEX`]
pub fn seeded_rng() -> ChaCha20Rng {
    rng_from_hex(SEED_HEX)
}

/// ChaCha20 seeded with up to 32 hex-encoded bytes, zero-padded
pub fn rng_from_hex(seed_hex: &str) -> ChaCha20Rng {
    let bytes = hex::decode(seed_hex).expect("seed is valid hex");
    assert!(bytes.len() <= 32, "seed longer than 32 bytes");
    let mut seed = [0u8; 32];
    seed[..bytes.len()].copy_from_slice(&bytes);
    ChaCha20Rng::from_seed(seed)
}

/// Route `tracing` output to the test harness, filtered by `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// What two cooperating authorities hand out for one user
pub struct Deployment {
    /// Settings shared by client and server
    pub config: ProtocolConfig,
    /// `H(ID)`
    pub hid: HashedId,
    /// Recombined server secret
    pub sst: ServerSecret,
    /// Client secret with [`PIN`] taken out
    pub token: Token,
    /// Recombined permit for [`DATE`]
    pub permit: TimePermit,
}

/// Issue secrets for `id` from two independent master secret shares
pub fn deploy<R: RngCore + CryptoRng>(rng: &mut R, id: &[u8], pin: u32) -> Deployment {
    let config = ProtocolConfig::default();
    let ms1 = random_generate(rng);
    let ms2 = random_generate(rng);
    let hid = hash_id(id);

    let sst = get_server_secret(&ms1).recombine(&get_server_secret(&ms2));
    let cs = get_client_secret(&ms1, &hid).recombine(&get_client_secret(&ms2, &hid));
    let permit = get_client_permit(DATE, &ms1, &hid)
        .expect("non-zero date")
        .recombine(&get_client_permit(DATE, &ms2, &hid).expect("non-zero date"));
    let token = extract_pin(id, pin, &cs, &config);

    Deployment {
        config,
        hid,
        sst,
        token,
        permit,
    }
}
