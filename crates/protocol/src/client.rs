//! Client side of the exchange
//!
//! Pass one rebuilds the client secret from token and PIN, adds the time
//! permit when there is one, and commits to a fresh `x`. Pass two answers
//! the server's challenge `y` with `V = -(x + y)·SEC`. The single-pass
//! variant derives `y` from a timestamp and optional message instead of
//! waiting for the server.

use mpin_algorithms::ec::bn254::{G1Affine, G1Projective, Scalar};
use mpin_api::error::validate;
use mpin_api::{Error, Result};
use rand_core::{CryptoRng, RngCore};
use tracing::{debug, instrument};
use zeroize::Zeroizing;

use crate::authority::random_scalar;
use crate::config::ProtocolConfig;
use crate::hash::{date_point, hash_id, map_to_g1};
use crate::types::{challenge, AuthRequest, ClientState, Commitment, TimePermit, Token};

/// First pass with a fresh ephemeral `x`
pub fn client_1<R: RngCore + CryptoRng>(
    rng: &mut R,
    id: &[u8],
    pin: u32,
    token: &Token,
    permit: Option<(u32, &TimePermit)>,
    config: &ProtocolConfig,
) -> Result<(Commitment, ClientState)> {
    let x = random_scalar(rng);
    client_1_with_x(&x, id, pin, token, permit, config)
}

/// First pass with a caller-supplied `x`.
///
/// Reconstructs `SEC = token + pin·H(ID)` (plus the permit when a dated
/// permit is given) and commits with `U = x·H(ID)` and, for a dated permit,
/// `UT = x·(H(ID) + H(date | H(ID)))`.
#[instrument(level = "debug", skip_all, fields(date = permit.map(|(d, _)| d)))]
pub fn client_1_with_x(
    x: &Scalar,
    id: &[u8],
    pin: u32,
    token: &Token,
    permit: Option<(u32, &TimePermit)>,
    config: &ProtocolConfig,
) -> Result<(Commitment, ClientState)> {
    config.validate()?;
    token
        .point()
        .validate(false)
        .map_err(|e| Error::from(e).with_context("client_1 token"))?;

    let hid = hash_id(id);
    let a = G1Projective::from(map_to_g1(&hid.to_array()));
    let mut sec =
        G1Projective::from(token.point()) + a.pinmul(config.reduce_pin(pin), config.pin_bits);

    let u = a.multiply(x);
    let ut = match permit {
        Some((date, tp)) => {
            validate::parameter(date != 0, "client_1", "permit date must be non-zero")?;
            sec += G1Projective::from(tp.point());
            let at = date_point(date, &hid);
            Some((u + G1Projective::from(at).multiply(x)).to_affine())
        }
        None => None,
    };

    debug!(time_permit = ut.is_some(), "client pass one");
    Ok((
        Commitment {
            u: u.to_affine(),
            ut,
        },
        ClientState::new(*x, sec.to_affine()),
    ))
}

/// Second pass: `V = -((x + y) mod r)·SEC`
pub fn client_2(state: &ClientState, y: &Scalar) -> G1Affine {
    let e = Zeroizing::new(state.x() + y);
    (-G1Projective::from(state.sec()).multiply(&e)).to_affine()
}

/// Single-pass client: both passes with `Y = H(time_value | bound || message)`
#[allow(clippy::too_many_arguments)]
pub fn client<R: RngCore + CryptoRng>(
    rng: &mut R,
    id: &[u8],
    pin: u32,
    token: &Token,
    permit: Option<(u32, &TimePermit)>,
    message: &[u8],
    time_value: u32,
    config: &ProtocolConfig,
) -> Result<(AuthRequest, ClientState)> {
    let (commitment, state) = client_1(rng, id, pin, token, permit, config)?;
    let y = challenge(&commitment, time_value, message);
    let v = client_2(&state, &y);
    debug!(time_value, message_len = message.len(), "single-pass request built");
    Ok((
        AuthRequest {
            commitment,
            v,
            time_value,
            message: message.to_vec(),
        },
        state,
    ))
}
