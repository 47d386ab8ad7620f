//! Hashing into the protocol's domains
//!
//! Every hash is SHA-256. Identities, dates and transcripts are hashed with
//! an optional 4-byte big-endian prefix; digests are mapped to G1 by
//! try-and-increment and reduced into scalars modulo the group order.

use mpin_algorithms::ec::bn254::{Fp4, G1Affine, Scalar};
use mpin_api::SessionKey;
use mpin_params::mpin::{HASH_BYTES, PAS};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::types::HashedId;

/// `SHA256([n as 4 BE bytes if n > 0] || parts...)`
pub fn hashit(n: u32, parts: &[&[u8]]) -> [u8; HASH_BYTES] {
    let mut hasher = Sha256::new();
    if n > 0 {
        hasher.update(n.to_be_bytes());
    }
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// `H(ID)`, the digest every secret for this identity is bound to
pub fn hash_id(id: &[u8]) -> HashedId {
    HashedId::new(hashit(0, &[id]))
}

/// Map a digest to G1
pub fn map_to_g1(h: &[u8; HASH_BYTES]) -> G1Affine {
    G1Affine::from_hash(h)
}

/// `H(date | H(ID))` mapped to G1, the point time permits are issued on
pub fn date_point(date: u32, hid: &HashedId) -> G1Affine {
    map_to_g1(&hashit(date, &[hid.as_ref()]))
}

/// Challenge `Y = H(time_value | data) mod r` for the single-pass flow
pub fn get_y(time_value: u32, data: &[u8]) -> Scalar {
    Scalar::from_bytes_reduced(&hashit(time_value, &[data]))
}

/// Transcript hash bound into both M-PIN Full session keys:
/// `H(H(ID) || commitment || V || Y || Z || T)` where the commitment is
/// `UT` when time permits are in use and `U` otherwise.
pub fn hash_all(
    hid: &HashedId,
    commitment: &G1Affine,
    v: &G1Affine,
    y: &Scalar,
    z: &G1Affine,
    t: &G1Affine,
) -> [u8; HASH_BYTES] {
    hashit(
        0,
        &[
            hid.as_ref(),
            &commitment.to_uncompressed(),
            &v.to_uncompressed(),
            &y.to_bytes(),
            &z.to_uncompressed(),
            &t.to_uncompressed(),
        ],
    )
}

/// Session key `SHA256(c || W.x || W.y)` truncated to 16 bytes, where `c`
/// is the Fp4 trace of the shared GT value
pub(crate) fn session_key(c: &Fp4, w: &G1Affine) -> SessionKey {
    let mut trace = c.to_bytes();
    let mut h: [u8; HASH_BYTES] = Sha256::new()
        .chain_update(trace)
        .chain_update(w.x().to_bytes())
        .chain_update(w.y().to_bytes())
        .finalize()
        .into();
    let mut key = [0u8; PAS];
    key.copy_from_slice(&h[..PAS]);
    trace.zeroize();
    h.zeroize();
    SessionKey::new(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpin_algorithms::ec::bn254::{order, G1Projective};

    const ID: &[u8] = b"testUser@miracl.com";

    #[test]
    fn test_hash_id_is_plain_sha256() {
        assert_eq!(
            hex::encode(hash_id(ID).as_ref()),
            "f319830bd08041e5bc2961538f2547f704477d6dc94f683d0c6585ec67706b75"
        );
    }

    #[test]
    fn test_date_prefix() {
        let hid = hash_id(ID);
        assert_eq!(
            hex::encode(hashit(16660, &[hid.as_ref()])),
            "0753a8695d0f9f5052e0be3e03da3174c77f29eb5c226c7c2bd134d36e2e1fe7"
        );
        // zero means no prefix
        assert_eq!(hashit(0, &[ID]), hashit(0, &[&ID[..4], &ID[4..]]));
    }

    #[test]
    fn test_map_to_g1_lands_in_group() {
        let p = map_to_g1(&hash_id(ID).to_array());
        assert!(p.validate(true).is_ok());
        assert!(!bool::from(p.sign()));
        let q = date_point(16660, &hash_id(ID));
        assert_ne!(p, q);
    }

    #[test]
    fn test_get_y_is_reduced() {
        let y = get_y(1439465203, b"data");
        let mut r = order();
        r.norm();
        assert_eq!(
            mpin_algorithms::Big::comp(y.as_big(), &r),
            core::cmp::Ordering::Less
        );
        assert_ne!(y, get_y(1439465204, b"data"));
    }

    #[test]
    fn test_hash_all_binds_every_input() {
        let hid = hash_id(ID);
        let g = G1Projective::generator().to_affine();
        let g2 = G1Projective::generator().double().to_affine();
        let y = Scalar::from(7u64);
        let base = hash_all(&hid, &g, &g, &y, &g, &g);
        assert_ne!(base, hash_all(&hid, &g2, &g, &y, &g, &g));
        assert_ne!(base, hash_all(&hid, &g, &g2, &y, &g, &g));
        assert_ne!(base, hash_all(&hid, &g, &g, &Scalar::from(8u64), &g, &g));
        assert_ne!(base, hash_all(&hid, &g, &g, &y, &g2, &g));
        assert_ne!(base, hash_all(&hid, &g, &g, &y, &g, &g2));
    }
}
