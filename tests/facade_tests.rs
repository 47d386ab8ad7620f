//! The facade crate exposes a working M-PIN stack through its prelude

use mpin_zkp::prelude::*;
use mpin_zkp::protocol::authority::{get_client_secret, get_server_secret, random_generate};
use mpin_zkp::protocol::client::client;
use mpin_zkp::protocol::hash::hash_id;
use mpin_zkp::protocol::pin::extract_pin;
use mpin_zkp::protocol::server::server;
use mpin_zkp::rand_core::SeedableRng;
use mpin_zkp::subtle::ConstantTimeEq;
use mpin_zkp::zeroize::Zeroize;
use rand_chacha::ChaCha20Rng;

#[test]
fn test_single_pass_through_prelude() {
    let mut rng = ChaCha20Rng::seed_from_u64(7);
    let config = ProtocolConfig::default();
    let ms = random_generate(&mut rng);
    let id = b"alice@example.com";
    let sst = get_server_secret(&ms);
    let token = extract_pin(id, 4321, &get_client_secret(&ms, &hash_id(id)), &config);

    let (request, _) = client(&mut rng, id, 4321, &token, None, b"", 1_000_000, &config).unwrap();
    let outcome = server(id, None, &sst, &request, 1_000_002, false, &config).unwrap();
    assert_eq!(outcome.verdict, Verdict::Accepted);
    assert_eq!(outcome.verdict.into_result(), Ok(()));
}

#[test]
fn test_secret_types_export_through_traits() {
    let mut rng = ChaCha20Rng::seed_from_u64(8);
    let ms = random_generate(&mut rng);
    let bytes = ms.to_bytes_zeroizing();
    assert_eq!(bytes.len(), 32);
    let back = MasterSecret::from_bytes(&bytes).unwrap();
    assert_eq!(
        get_server_secret(&back).to_bytes_zeroizing()[..],
        get_server_secret(&ms).to_bytes_zeroizing()[..]
    );

    let err = MasterSecret::from_bytes(&[0u8; 32]).unwrap_err();
    assert_eq!(err.code(), -11);
}

#[test]
fn test_support_crates_reexported() {
    let mut rng = ChaCha20Rng::seed_from_u64(9);
    let p = G1Affine::from(G1Projective::generator() * Scalar::random(&mut rng));
    assert!(bool::from(p.ct_eq(&p)));
    assert!(!bool::from(p.ct_eq(&G1Affine::generator())));

    let mut key = SessionKey::new([7u8; 16]);
    key.zeroize();
    assert_eq!(*key, [0u8; 16]);
}
