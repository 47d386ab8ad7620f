//! Server side of the exchange
//!
//! The server accepts when `e(Q, V)·e(sQ, y·HID + U) = 1`, with `HTID` and
//! `UT` standing in for `HID` and `U` when time permits are in use. A wrong
//! PIN leaves the product at a known power of `e(Q, y·HID + U)`, which is
//! kept as [`PinErrorEvidence`] when the caller asks for it.

use mpin_algorithms::ec::bn254::{pairing, pairing2, G1Affine, G1Projective, G2Affine, Scalar};
use mpin_api::error::validate;
use mpin_api::{Error, Result};
use tracing::{debug, instrument, warn};

use crate::config::ProtocolConfig;
use crate::hash::{date_point, hash_id, map_to_g1};
use crate::types::{AuthRequest, Commitment, PinErrorEvidence, ServerIdentity, ServerSecret, Verdict};

/// Result of the single-pass server, with what M-PIN Full needs next
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerOutcome {
    /// Accept or reject
    pub verdict: Verdict,
    /// `HID` and `HTID` for the client
    pub identity: ServerIdentity,
    /// The challenge derived from the request
    pub y: Scalar,
}

/// Map the client identity to `HID` and, for a date, `HTID`
pub fn server_1(id: &[u8], date: Option<u32>) -> Result<ServerIdentity> {
    let hid = hash_id(id);
    let a = map_to_g1(&hid.to_array());
    let htid = match date {
        Some(0) => return Err(Error::param("server_1", "date must be non-zero")),
        Some(d) => Some((G1Projective::from(a) + date_point(d, &hid)).to_affine()),
        None => None,
    };
    debug!(date, "server pass one");
    Ok(ServerIdentity { hid: a, htid })
}

fn check_point(p: &G1Affine, context: &'static str) -> Result<()> {
    // G1 has cofactor one, so the curve check implies subgroup membership
    p.validate(false)
        .map_err(|e| Error::from(e).with_context(context))
}

/// Check the client's response `V` to challenge `y`.
///
/// Malformed input (identity points, a time permit on one side only) is an
/// `Err`; a failed check is `Ok(Verdict::BadPin(..))`, carrying
/// [`PinErrorEvidence`] when `want_error` is set.
#[instrument(level = "debug", skip_all, fields(time_permit = identity.htid.is_some()))]
pub fn server_2(
    identity: &ServerIdentity,
    y: &Scalar,
    sst: &ServerSecret,
    commitment: &Commitment,
    v: &G1Affine,
    want_error: bool,
) -> Result<Verdict> {
    validate::parameter(
        identity.htid.is_some() == commitment.ut.is_some(),
        "server_2",
        "time permit used on one side only",
    )?;
    check_point(&commitment.u, "server_2 U")?;
    if let Some(ut) = &commitment.ut {
        check_point(ut, "server_2 UT")?;
    }
    check_point(v, "server_2 V")?;

    let q = G2Affine::generator();
    let p = (G1Projective::from(identity.target()).multiply(y) + commitment.bound()).to_affine();
    let g = pairing2(&q, v, sst.point(), &p);

    if bool::from(g.is_identity()) {
        debug!("client accepted");
        return Ok(Verdict::Accepted);
    }

    warn!("pairing check failed");
    let evidence = want_error.then(|| {
        // the error lies in the PIN, not the permit, so F leaves the permit out
        let base = (G1Projective::from(identity.hid).multiply(y) + commitment.u).to_affine();
        PinErrorEvidence {
            e: g,
            f: pairing(&q, &base),
        }
    });
    Ok(Verdict::BadPin(evidence))
}

/// Single-pass server: derive `y` from the request and run both passes.
///
/// A request whose timestamp is further than `config.time_window_secs` from
/// `now` is [`Verdict::Expired`] without any pairing being computed.
#[instrument(level = "debug", skip_all, fields(date, time_value = request.time_value))]
pub fn server(
    id: &[u8],
    date: Option<u32>,
    sst: &ServerSecret,
    request: &AuthRequest,
    now: u32,
    want_error: bool,
    config: &ProtocolConfig,
) -> Result<ServerOutcome> {
    let identity = server_1(id, date)?;
    let y = request.challenge();

    let skew = now.abs_diff(request.time_value);
    let verdict = if skew > config.time_window_secs {
        warn!(skew, window = config.time_window_secs, "request outside time window");
        Verdict::Expired
    } else {
        server_2(&identity, &y, sst, &request.commitment, &request.v, want_error)?
    };

    Ok(ServerOutcome {
        verdict,
        identity,
        y,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authority::{
        get_client_permit, get_client_secret, get_server_secret, random_generate,
    };
    use crate::client::{client_1, client_2};
    use crate::pin::extract_pin;
    use crate::types::{TimePermit, Token};
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    const ID: &[u8] = b"testUser@miracl.com";
    const DATE: u32 = 16660;

    struct Setup {
        sst: ServerSecret,
        token: Token,
        permit: TimePermit,
        rng: ChaCha20Rng,
    }

    fn setup(seed: u64) -> Setup {
        let config = ProtocolConfig::default();
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let ms = random_generate(&mut rng);
        let hid = hash_id(ID);
        Setup {
            sst: get_server_secret(&ms),
            token: extract_pin(ID, 1234, &get_client_secret(&ms, &hid), &config),
            permit: get_client_permit(DATE, &ms, &hid).unwrap(),
            rng,
        }
    }

    fn two_pass(s: &mut Setup, pin: u32, date: Option<u32>, want_error: bool) -> Verdict {
        let config = ProtocolConfig::default();
        let permit = date.map(|d| (d, &s.permit));
        let (commitment, state) = client_1(&mut s.rng, ID, pin, &s.token, permit, &config).unwrap();
        let identity = server_1(ID, date).unwrap();
        let y = Scalar::random(&mut s.rng);
        let v = client_2(&state, &y);
        server_2(&identity, &y, &s.sst, &commitment, &v, want_error).unwrap()
    }

    #[test]
    fn test_two_pass_good_pin() {
        let mut s = setup(70);
        assert_eq!(two_pass(&mut s, 1234, None, false), Verdict::Accepted);
        assert_eq!(two_pass(&mut s, 1234, Some(DATE), false), Verdict::Accepted);
    }

    #[test]
    fn test_two_pass_bad_pin() {
        let mut s = setup(71);
        assert_eq!(two_pass(&mut s, 1235, None, false), Verdict::BadPin(None));
        match two_pass(&mut s, 1235, Some(DATE), true) {
            Verdict::BadPin(Some(evidence)) => assert_ne!(evidence.e, evidence.f),
            other => panic!("unexpected verdict {:?}", other),
        }
    }

    #[test]
    fn test_permit_for_other_day_fails() {
        let mut s = setup(72);
        let config = ProtocolConfig::default();
        let (commitment, state) = client_1(
            &mut s.rng,
            ID,
            1234,
            &s.token,
            Some((DATE, &s.permit)),
            &config,
        )
        .unwrap();
        let identity = server_1(ID, Some(DATE + 1)).unwrap();
        let y = Scalar::random(&mut s.rng);
        let v = client_2(&state, &y);
        let verdict = server_2(&identity, &y, &s.sst, &commitment, &v, false).unwrap();
        assert_eq!(verdict, Verdict::BadPin(None));
    }

    #[test]
    fn test_mismatched_permit_use_is_malformed() {
        let mut s = setup(73);
        let config = ProtocolConfig::default();
        let (commitment, state) = client_1(&mut s.rng, ID, 1234, &s.token, None, &config).unwrap();
        let identity = server_1(ID, Some(DATE)).unwrap();
        let y = Scalar::one();
        let v = client_2(&state, &y);
        let err = server_2(&identity, &y, &s.sst, &commitment, &v, false).unwrap_err();
        assert_eq!(err.code(), -11);
    }

    #[test]
    fn test_identity_response_is_malformed() {
        let mut s = setup(74);
        let config = ProtocolConfig::default();
        let (commitment, _) = client_1(&mut s.rng, ID, 1234, &s.token, None, &config).unwrap();
        let identity = server_1(ID, None).unwrap();
        let err = server_2(
            &identity,
            &Scalar::one(),
            &s.sst,
            &commitment,
            &G1Affine::identity(),
            false,
        )
        .unwrap_err();
        assert_eq!(err.code(), -14);
    }

    #[test]
    fn test_server_1_shapes() {
        let plain = server_1(ID, None).unwrap();
        assert!(plain.htid.is_none());
        assert_eq!(plain.target(), &plain.hid);
        let dated = server_1(ID, Some(DATE)).unwrap();
        assert_eq!(dated.hid, plain.hid);
        assert_ne!(dated.target(), &dated.hid);
        assert!(server_1(ID, Some(0)).is_err());
    }
}
