//! End-to-end M-PIN scenarios with the reference identity, date, timestamp
//! and seed

use mpin_algorithms::ec::bn254::Scalar;
use mpin_api::{Error, Serialize};
use mpin_protocol::authority::{get_g1_multiple, G1Base};
use mpin_protocol::client::{client, client_1, client_2};
use mpin_protocol::full::{client_key, precompute, server_key};
use mpin_protocol::hash::hash_all;
use mpin_protocol::server::{server, server_1, server_2};
use mpin_protocol::{AuthRequest, SessionKey, Verdict};
use mpin_tests::{deploy, init_tracing, rng_from_hex, seeded_rng, DATE, PIN, TEST_ID, TIME_VALUE};

/// Single-pass exchange: the client authenticates with `pin2` and the server
/// checks at `now`
fn single_pass(pin2: u32, now: u32, date: Option<u32>) -> Verdict {
    let mut rng = seeded_rng();
    let d = deploy(&mut rng, TEST_ID, PIN);
    let permit = date.map(|day| (day, &d.permit));
    let (request, _) = client(
        &mut rng,
        TEST_ID,
        pin2,
        &d.token,
        permit,
        b"",
        TIME_VALUE,
        &d.config,
    )
    .unwrap();

    // the request crosses the wire
    let request = AuthRequest::from_bytes(&request.to_bytes()).unwrap();
    let outcome = server(TEST_ID, date, &d.sst, &request, now, false, &d.config).unwrap();
    outcome.verdict
}

#[test]
fn scenario_good_pin() {
    init_tracing();
    let verdict = single_pass(PIN, TIME_VALUE, Some(DATE));
    assert_eq!(verdict, Verdict::Accepted);
    assert_eq!(verdict.code(), 0);

    assert_eq!(single_pass(PIN, TIME_VALUE, None), Verdict::Accepted);
}

#[test]
fn scenario_bad_pin() {
    init_tracing();
    let verdict = single_pass(1235, TIME_VALUE, Some(DATE));
    assert_eq!(verdict, Verdict::BadPin(None));
    assert_eq!(verdict.code(), -19);
}

#[test]
fn scenario_bad_token() {
    init_tracing();
    let mut rng = seeded_rng();
    let d = deploy(&mut rng, TEST_ID, PIN);
    let (mut request, _) = client(
        &mut rng,
        TEST_ID,
        PIN,
        &d.token,
        Some((DATE, &d.permit)),
        b"",
        TIME_VALUE,
        &d.config,
    )
    .unwrap();

    // UT submitted in place of V
    request.v = request.commitment.ut.unwrap();
    let outcome = server(TEST_ID, Some(DATE), &d.sst, &request, TIME_VALUE, true, &d.config)
        .unwrap();
    assert_eq!(outcome.verdict.code(), -19);

    match outcome.verdict {
        Verdict::BadPin(Some(evidence)) => {
            assert_eq!(evidence.pin_offset(&d.config), 0);
            assert_eq!(evidence.diagnose(&d.config), Error::BadToken);
        }
        other => panic!("unexpected verdict {:?}", other),
    }
}

#[test]
fn scenario_expired() {
    init_tracing();
    let window = mpin_protocol::ProtocolConfig::default().time_window_secs;
    let verdict = single_pass(PIN, TIME_VALUE + window + 10, Some(DATE));
    assert_eq!(verdict, Verdict::Expired);
    assert_eq!(verdict.code(), -19);

    // inside the window the same request passes
    assert_eq!(
        single_pass(PIN, TIME_VALUE + window, Some(DATE)),
        Verdict::Accepted
    );
}

#[test]
fn scenario_bad_signature() {
    init_tracing();
    let mut rng = seeded_rng();
    let d = deploy(&mut rng, TEST_ID, PIN);
    let (mut request, _) = client(
        &mut rng,
        TEST_ID,
        PIN,
        &d.token,
        Some((DATE, &d.permit)),
        b"transfer 10 coins",
        TIME_VALUE,
        &d.config,
    )
    .unwrap();

    let accepted = server(TEST_ID, Some(DATE), &d.sst, &request, TIME_VALUE, false, &d.config)
        .unwrap();
    assert!(accepted.verdict.is_accepted());

    request.message = b"transfer 99 coins".to_vec();
    let tampered = server(TEST_ID, Some(DATE), &d.sst, &request, TIME_VALUE, false, &d.config)
        .unwrap();
    assert_eq!(tampered.verdict.code(), -19);
}

#[test]
fn scenario_wrong_pin_is_recovered() {
    init_tracing();
    let mut rng = seeded_rng();
    let d = deploy(&mut rng, TEST_ID, PIN);
    let (request, _) = client(
        &mut rng,
        TEST_ID,
        1250,
        &d.token,
        Some((DATE, &d.permit)),
        b"",
        TIME_VALUE,
        &d.config,
    )
    .unwrap();
    let outcome = server(TEST_ID, Some(DATE), &d.sst, &request, TIME_VALUE, true, &d.config)
        .unwrap();
    match outcome.verdict {
        Verdict::BadPin(Some(evidence)) => {
            assert_eq!(evidence.pin_offset(&d.config), 16);
            assert_eq!(evidence.diagnose(&d.config), Error::BadPin);
        }
        other => panic!("unexpected verdict {:?}", other),
    }
}

/// Session key agreed for [`SEED_HEX`](mpin_tests::SEED_HEX) with a permit
/// for [`DATE`]
const FULL_KEY_WITH_PERMIT: &str = "96a2049b996b721c87ad2971b510fb71";

/// Session key agreed for the same seed without a time permit
const FULL_KEY_WITHOUT_PERMIT: &str = "d8bda069f336c78f588622d8448eaf4b";

/// Two-pass authentication followed by M-PIN Full key agreement
fn full_flow(seed_hex: &str, date: Option<u32>) -> (SessionKey, SessionKey) {
    let mut rng = rng_from_hex(seed_hex);
    let d = deploy(&mut rng, TEST_ID, PIN);
    let permit = date.map(|day| (day, &d.permit));

    let pre = precompute(&d.token, TEST_ID, permit).unwrap();
    let (commitment, state) =
        client_1(&mut rng, TEST_ID, PIN, &d.token, permit, &d.config).unwrap();
    let identity = server_1(TEST_ID, date).unwrap();
    let y = Scalar::random(&mut rng);
    let v = client_2(&state, &y);
    let verdict = server_2(&identity, &y, &d.sst, &commitment, &v, false).unwrap();
    assert_eq!(verdict, Verdict::Accepted);

    let (r, z) = get_g1_multiple(&mut rng, G1Base::Point(identity.target()));
    let (w, t) = get_g1_multiple(&mut rng, G1Base::Point(identity.target()));
    let h = hash_all(&d.hid, commitment.bound(), &v, &y, &z, &t);

    let client_side = client_key(&pre, PIN, &r, state.x(), &h, &t, &d.config).unwrap();
    let server_side = server_key(&z, &d.sst, &w, &h, &identity, &commitment).unwrap();
    (client_side, server_side)
}

#[test]
fn scenario_key_agreement() {
    init_tracing();
    let (client_side, server_side) = full_flow(mpin_tests::SEED_HEX, Some(DATE));
    assert_eq!(client_side, server_side);
    assert_eq!(hex::encode(&client_side[..]), FULL_KEY_WITH_PERMIT);

    // the same seed always yields the same key
    let (again, _) = full_flow(mpin_tests::SEED_HEX, Some(DATE));
    assert_eq!(again, client_side);

    let (other, other_server) = full_flow("00112233445566778899aabbccddeeff", Some(DATE));
    assert_eq!(other, other_server);
    assert_ne!(other, client_side);
}

#[test]
fn scenario_key_agreement_without_permit() {
    let (client_side, server_side) = full_flow(mpin_tests::SEED_HEX, None);
    assert_eq!(client_side, server_side);
    assert_eq!(hex::encode(&server_side[..]), FULL_KEY_WITHOUT_PERMIT);
}
