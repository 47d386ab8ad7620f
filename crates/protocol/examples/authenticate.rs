//! Issue a token, authenticate with it and agree a session key.
//!
//! Run with `RUST_LOG=debug` to see the protocol steps.

use mpin_algorithms::ec::bn254::Scalar;
use mpin_protocol::authority::{
    get_client_secret, get_g1_multiple, get_server_secret, random_generate, G1Base,
};
use mpin_protocol::client::{client_1, client_2};
use mpin_protocol::crypto::{aes_gcm_decrypt, aes_gcm_encrypt};
use mpin_protocol::full::{client_key, precompute, server_key};
use mpin_protocol::hash::{hash_all, hash_id};
use mpin_protocol::pin::extract_pin;
use mpin_protocol::server::{server_1, server_2};
use mpin_protocol::{ProtocolConfig, Result};
use rand_core::OsRng;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = ProtocolConfig::default();
    let id = b"alice@example.com";

    // authority
    let ms = random_generate(&mut OsRng);
    let sst = get_server_secret(&ms);
    let token = extract_pin(id, 2468, &get_client_secret(&ms, &hash_id(id)), &config);

    // two-pass authentication
    let (commitment, state) = client_1(&mut OsRng, id, 2468, &token, None, &config)?;
    let identity = server_1(id, None)?;
    let y = Scalar::random(&mut OsRng);
    let v = client_2(&state, &y);
    let verdict = server_2(&identity, &y, &sst, &commitment, &v, false)?;
    println!("authentication: {:?}", verdict);
    verdict.into_result()?;

    // M-PIN Full
    let pre = precompute(&token, id, None)?;
    let (r, z) = get_g1_multiple(&mut OsRng, G1Base::Point(identity.target()));
    let (w, t) = get_g1_multiple(&mut OsRng, G1Base::Point(identity.target()));
    let h = hash_all(&hash_id(id), commitment.bound(), &v, &y, &z, &t);
    let ck = client_key(&pre, 2468, &r, state.x(), &h, &t, &config)?;
    let sk = server_key(&z, &sst, &w, &h, &identity, &commitment)?;

    let iv = [0u8; 12];
    let (ct, tag) = aes_gcm_encrypt(&ck, &iv, b"session", b"hello from the client")?;
    let pt = aes_gcm_decrypt(&sk, &iv, b"session", &ct, &tag)?;
    println!("server read: {}", String::from_utf8_lossy(&pt));
    Ok(())
}
