//! M-PIN Full: a session key agreed on the back of an authentication
//!
//! After the exchange the client sends `Z = r·A` and the server `T = w·A`,
//! where `A` is the identity point the pairing check ran against (`HTID`
//! with a time permit, `HID` without). Both sides hash the transcript into
//! `h` and then compute the same value `e(sQ, A)^(r + h)`: the client from
//! its precomputed pairings and PIN, the server from its secret. The key is
//! the hash of that value's trace and of the Diffie-Hellman point
//! `x·T = w·U`.

use mpin_algorithms::ec::bn254::{pairing, G1Affine, G1Projective, G2Affine, Scalar};
use mpin_api::{Error, Result, SessionKey};
use mpin_params::mpin::HASH_BYTES;
use tracing::{debug, instrument};
use zeroize::Zeroizing;

use crate::config::ProtocolConfig;
use crate::hash::{hash_id, map_to_g1, session_key};
use crate::types::{Commitment, Precomputed, ServerIdentity, ServerSecret, TimePermit, Token};

/// `g1 = e(Q, token + permit)` and `g2 = e(Q, H(ID))`, for a client that
/// will run M-PIN Full with the same permit (or none)
#[instrument(level = "debug", skip_all, fields(date = permit.map(|(d, _)| d)))]
pub fn precompute(
    token: &Token,
    id: &[u8],
    permit: Option<(u32, &TimePermit)>,
) -> Result<Precomputed> {
    token
        .point()
        .validate(false)
        .map_err(|e| Error::from(e).with_context("precompute token"))?;

    let hid = hash_id(id);
    let mut t = G1Projective::from(token.point());
    if let Some((date, tp)) = permit {
        if date == 0 {
            return Err(Error::param("precompute", "permit date must be non-zero"));
        }
        t += G1Projective::from(tp.point());
    }

    let q = G2Affine::generator();
    Ok(Precomputed {
        g1: pairing(&q, &t.to_affine()),
        g2: pairing(&q, &map_to_g1(&hid.to_array())),
    })
}

fn check_point(p: &G1Affine, context: &'static str) -> Result<()> {
    p.validate(false)
        .map_err(|e| Error::from(e).with_context(context))
}

/// Client half of the key: `(g1·g2^pin)^(r + h)` with `W = x·T`.
///
/// `r` is the scalar behind the `Z` the client sent, `x` the ephemeral from
/// [`crate::client::client_1`], and `t` the server's `T`.
#[instrument(level = "debug", skip_all)]
pub fn client_key(
    pre: &Precomputed,
    pin: u32,
    r: &Scalar,
    x: &Scalar,
    h: &[u8; HASH_BYTES],
    t: &G1Affine,
    config: &ProtocolConfig,
) -> Result<SessionKey> {
    config.validate()?;
    check_point(t, "client_key T")?;

    let z = Zeroizing::new(r + &Scalar::from_bytes_reduced(h));
    let base = &pre.g1 * &pre.g2.pinpow(config.reduce_pin(pin), config.pin_bits);
    let g = Zeroizing::new(base.pow(&z));
    let w = (G1Projective::from(t).multiply(x)).to_affine();

    debug!("client session key derived");
    Ok(session_key(&g.trace(), &w))
}

/// Server half of the key: `e(sQ, Z + h·A)` with `W = w·U`.
///
/// `identity` and `commitment` are the values of the authentication this
/// key is bound to, and `w` is the scalar behind the `T` the server sent.
#[instrument(level = "debug", skip_all, fields(time_permit = identity.htid.is_some()))]
pub fn server_key(
    z: &G1Affine,
    sst: &ServerSecret,
    w: &Scalar,
    h: &[u8; HASH_BYTES],
    identity: &ServerIdentity,
    commitment: &Commitment,
) -> Result<SessionKey> {
    check_point(z, "server_key Z")?;
    check_point(commitment.bound(), "server_key U")?;

    let hs = Zeroizing::new(Scalar::from_bytes_reduced(h));
    let r = (G1Projective::from(identity.target()).multiply(&hs) + z).to_affine();
    let g = Zeroizing::new(pairing(sst.point(), &r));
    let u = (G1Projective::from(commitment.bound()).multiply(w)).to_affine();

    debug!("server session key derived");
    Ok(session_key(&g.trace(), &u))
}
