//! Property-based tests for the PIN factor, permit encoding and the
//! kangaroo search

use mpin_algorithms::ec::bn254::{Gt, Scalar};
use mpin_api::{Serialize, SerializeSecret};
use mpin_protocol::authority::{get_client_secret, random_generate};
use mpin_protocol::client::{client_1, client_2};
use mpin_protocol::encoding::{decode_permit, encode_permit, EncodedPoint};
use mpin_protocol::hash::hash_id;
use mpin_protocol::kangaroo::kangaroo;
use mpin_protocol::pin::{add_pin, extract_pin};
use mpin_protocol::server::{server_1, server_2};
use mpin_protocol::{ProtocolConfig, Token, Verdict};
use mpin_tests::{deploy, rng_from_hex, DATE, TEST_ID};
use proptest::prelude::*;
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;

fn seed_hex() -> impl Strategy<Value = String> {
    any::<[u8; 16]>().prop_map(hex::encode)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn token_restores_with_its_pin(seed in any::<u64>(), pin in 0u32..10_000) {
        let config = ProtocolConfig::default();
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let ms = random_generate(&mut rng);
        let cs = get_client_secret(&ms, &hash_id(TEST_ID));
        let token = extract_pin(TEST_ID, pin, &cs, &config);
        prop_assert_eq!(add_pin(TEST_ID, pin, &token, &config), cs);

        let bytes = token.to_bytes_zeroizing();
        prop_assert_eq!(Token::from_bytes(&bytes).unwrap(), token);
    }

    #[test]
    fn only_the_right_pin_passes(seed in seed_hex(), pin in 0u32..10_000, delta in 1u32..10_000) {
        let mut rng = rng_from_hex(&seed);
        let d = deploy(&mut rng, TEST_ID, pin);
        let identity = server_1(TEST_ID, Some(DATE)).unwrap();

        for (tried, accept) in [(pin, true), ((pin + delta) % 10_000, false)] {
            let (commitment, state) = client_1(
                &mut rng,
                TEST_ID,
                tried,
                &d.token,
                Some((DATE, &d.permit)),
                &d.config,
            )
            .unwrap();
            let y = Scalar::random(&mut rng);
            let v = client_2(&state, &y);
            let verdict = server_2(&identity, &y, &d.sst, &commitment, &v, false).unwrap();
            prop_assert_eq!(verdict == Verdict::Accepted, accept);
        }
    }

    #[test]
    fn permit_encoding_restores(seed in any::<u64>()) {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let d = deploy(&mut rng, TEST_ID, 1234);
        let e = encode_permit(&mut rng, &d.permit).unwrap();
        let back = decode_permit(&EncodedPoint::from_bytes(&e.to_bytes()).unwrap()).unwrap();
        prop_assert_eq!(back, d.permit);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(4))]

    #[test]
    fn kangaroo_finds_offsets_in_range(seed in any::<u64>(), d in -500i64..500) {
        prop_assume!(d != 0);
        let config = ProtocolConfig::default();
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let f = Gt::random(&mut rng);
        let k = Scalar::from(d.unsigned_abs());
        let e = if d > 0 { f.pow(&-k) } else { f.pow(&k) };
        prop_assert_eq!(i64::from(kangaroo(&e, &f, &config)), d);
    }
}
