//! Elligator-squared style encoding of G1 points
//!
//! A point `P` is written as `map(u) + map(v)` for a random `u` and a random
//! preimage `v` of `P - map(u)`, so the 65-byte encoding looks uniformly
//! random while still decoding to exactly `P`. It hides the structure of
//! stored time permits; it is not needed for security.

use mpin_algorithms::ec::bn254::{G1Affine, G1Projective};
use mpin_algorithms::field::Bn254Modulus;
use mpin_algorithms::{Big, FieldModulus};
use mpin_api::error::validate;
use mpin_api::{Error, Result, Serialize};
use mpin_params::bignum::MODBYTES;
use mpin_params::mpin::G1S;
use rand_core::{CryptoRng, RngCore};
use subtle::Choice;
use tracing::debug;

use crate::types::TimePermit;

/// `flags || u || v`, where bit 0 of `flags` is the parity of `map(u)` and
/// bit 1 the parity of `map(v)`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodedPoint([u8; G1S]);

impl EncodedPoint {
    /// The raw 65 bytes
    pub fn to_array(&self) -> [u8; G1S] {
        self.0
    }
}

impl AsRef<[u8]> for EncodedPoint {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for EncodedPoint {
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        validate::length("EncodedPoint::from_bytes", bytes.len(), G1S)?;
        validate::parameter(
            bytes[0] & !3 == 0,
            "EncodedPoint::from_bytes",
            "unknown flag bits",
        )?;
        let mut out = [0u8; G1S];
        out.copy_from_slice(bytes);
        Ok(Self(out))
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

fn random_bit<R: RngCore + CryptoRng>(rng: &mut R) -> u8 {
    let mut b = [0u8; 1];
    rng.fill_bytes(&mut b);
    b[0] & 1
}

/// Encode `p` so that the result is indistinguishable from random bytes
pub fn encoding<R: RngCore + CryptoRng>(rng: &mut R, p: &G1Affine) -> Result<EncodedPoint> {
    p.validate(false)
        .map_err(|e| Error::from(e).with_context("encoding"))?;
    let modulus = Bn254Modulus::modulus();

    let mut attempts = 0u32;
    let (u, su, rest) = loop {
        attempts += 1;
        let u = Big::randomnum(&modulus, rng);
        let su = random_bit(rng);
        let w = G1Affine::map_to_point(&u, Choice::from(su));
        let rest = (G1Projective::from(p) - &w).to_affine();
        if !bool::from(rest.is_identity()) {
            break (u, su, rest);
        }
    };

    let (mut v, gap) = rest.preimage_gap();
    let sv = rest.sign().unwrap_u8();
    let mut b = [0u8; 4];
    rng.fill_bytes(&mut b);
    let m = u32::from_be_bytes(b) % gap;
    v.inc(i64::from(m) + 1);
    v.norm();

    debug!(attempts, "point encoded");
    let mut out = [0u8; G1S];
    out[0] = su + 2 * sv;
    out[1..1 + MODBYTES].copy_from_slice(&u.to_bytes());
    out[1 + MODBYTES..].copy_from_slice(&v.to_bytes());
    Ok(EncodedPoint(out))
}

/// Recover the point behind an [`EncodedPoint`]
pub fn decoding(d: &EncodedPoint) -> Result<G1Affine> {
    let flags = d.0[0];
    if flags & !3 != 0 {
        return Err(Error::InvalidPoint { context: "decoding" });
    }
    let mut u = [0u8; MODBYTES];
    let mut v = [0u8; MODBYTES];
    u.copy_from_slice(&d.0[1..1 + MODBYTES]);
    v.copy_from_slice(&d.0[1 + MODBYTES..]);

    let pu = G1Affine::map_to_point(&Big::from_bytes(&u), Choice::from(flags & 1));
    let pv = G1Affine::map_to_point(&Big::from_bytes(&v), Choice::from((flags >> 1) & 1));
    let p = (G1Projective::from(pu) + pv).to_affine();
    if bool::from(p.is_identity()) {
        return Err(Error::InvalidPoint { context: "decoding" });
    }
    Ok(p)
}

/// [`encoding`] for a time permit
pub fn encode_permit<R: RngCore + CryptoRng>(
    rng: &mut R,
    permit: &TimePermit,
) -> Result<EncodedPoint> {
    encoding(rng, permit.point())
}

/// [`decoding`] for a time permit
pub fn decode_permit(d: &EncodedPoint) -> Result<TimePermit> {
    decoding(d).map(TimePermit::from_point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authority::{get_client_permit, random_generate};
    use crate::hash::hash_id;
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    #[test]
    fn test_decoding_inverts_encoding() {
        let mut rng = ChaCha20Rng::seed_from_u64(110);
        for _ in 0..8 {
            let p = G1Projective::random(&mut rng).to_affine();
            let e = encoding(&mut rng, &p).unwrap();
            assert!(e.0[0] < 4);
            assert_eq!(decoding(&e).unwrap(), p);
        }
    }

    #[test]
    fn test_encoding_is_randomised() {
        let mut rng = ChaCha20Rng::seed_from_u64(111);
        let p = G1Affine::generator();
        let a = encoding(&mut rng, &p).unwrap();
        let b = encoding(&mut rng, &p).unwrap();
        assert_ne!(a, b);
        assert_eq!(decoding(&a).unwrap(), decoding(&b).unwrap());
    }

    #[test]
    fn test_permit_survives_encoding() {
        let mut rng = ChaCha20Rng::seed_from_u64(112);
        let ms = random_generate(&mut rng);
        let permit = get_client_permit(16660, &ms, &hash_id(b"testUser@miracl.com")).unwrap();
        let e = encode_permit(&mut rng, &permit).unwrap();
        let bytes = e.to_bytes();
        let back = decode_permit(&EncodedPoint::from_bytes(&bytes).unwrap()).unwrap();
        assert_eq!(back, permit);
    }

    #[test]
    fn test_rejects_unknown_flags() {
        let mut bytes = [0u8; G1S];
        bytes[0] = 4;
        assert!(EncodedPoint::from_bytes(&bytes).is_err());
        assert_eq!(decoding(&EncodedPoint(bytes)).unwrap_err().code(), -14);
    }

    #[test]
    fn test_rejects_identity() {
        let mut rng = ChaCha20Rng::seed_from_u64(113);
        assert!(encoding(&mut rng, &G1Affine::identity()).is_err());
    }
}
