//! Trusted-authority operations: secret issuance and share recombination
//!
//! Each authority holds its own master secret share `s_i`. The secrets it
//! issues are `s_i` multiples of fixed points, so adding the outputs of all
//! authorities gives the secrets of `sum s_i` without any party ever holding
//! that sum.

use mpin_algorithms::ec::bn254::{G1Affine, G1Projective, G2Affine, G2Projective, Scalar};
use mpin_api::{Error, Result};
use rand_core::{CryptoRng, RngCore};
use tracing::debug;
use zeroize::Zeroizing;

use crate::hash::{date_point, map_to_g1};
use crate::types::{ClientSecret, HashedId, MasterSecret, ServerSecret, TimePermit};

/// A uniformly random non-zero scalar, as used for master secret shares and
/// the protocol's ephemeral values
pub fn random_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Zeroizing<Scalar> {
    loop {
        let s = Zeroizing::new(Scalar::random(rng));
        if !bool::from(s.is_zero()) {
            return s;
        }
    }
}

/// Draw a fresh master secret share
pub fn random_generate<R: RngCore + CryptoRng>(rng: &mut R) -> MasterSecret {
    MasterSecret::from_scalar(*random_scalar(rng))
}

/// Server secret `s·Q` for the fixed G2 generator `Q`
pub fn get_server_secret(ms: &MasterSecret) -> ServerSecret {
    ServerSecret::from_point(G2Projective::generator().multiply(ms.scalar()).to_affine())
}

/// Client secret `s·H(ID)`
pub fn get_client_secret(ms: &MasterSecret, hid: &HashedId) -> ClientSecret {
    let a = G1Projective::from(map_to_g1(&hid.to_array()));
    ClientSecret::from_point(a.multiply(ms.scalar()).to_affine())
}

/// Time permit `s·H(date | H(ID))` for the given day
pub fn get_client_permit(date: u32, ms: &MasterSecret, hid: &HashedId) -> Result<TimePermit> {
    if date == 0 {
        return Err(Error::param("get_client_permit", "date must be non-zero"));
    }
    debug!(date, "issuing time permit");
    let p = G1Projective::from(date_point(date, hid));
    Ok(TimePermit::from_point(p.multiply(ms.scalar()).to_affine()))
}

/// Sum of two G1 shares
pub fn recombine_g1(a: &G1Affine, b: &G1Affine) -> G1Affine {
    (G1Projective::from(a) + G1Projective::from(b)).to_affine()
}

/// Sum of two G2 shares
pub fn recombine_g2(a: &G2Affine, b: &G2Affine) -> G2Affine {
    (G2Projective::from(a) + G2Projective::from(b)).to_affine()
}

/// What a G1 multiple is taken of
#[derive(Clone, Copy, Debug)]
pub enum G1Base<'a> {
    /// A point already on the curve
    Point(&'a G1Affine),
    /// A digest, mapped to G1 first
    Hash(&'a HashedId),
}

/// `x·G`, or `x·map(G)` for a digest
pub fn g1_multiple(x: &Scalar, base: G1Base<'_>) -> G1Affine {
    let p = match base {
        G1Base::Point(p) => G1Projective::from(p),
        G1Base::Hash(h) => G1Projective::from(map_to_g1(&h.to_array())),
    };
    p.multiply(x).to_affine()
}

/// Draw a fresh `x` and return it with `x·G`; the Diffie-Hellman halves of
/// M-PIN Full (`Z = r·H(ID)`, `T = w·HTID`) are made this way
pub fn get_g1_multiple<R: RngCore + CryptoRng>(
    rng: &mut R,
    base: G1Base<'_>,
) -> (Zeroizing<Scalar>, G1Affine) {
    let x = random_scalar(rng);
    let w = g1_multiple(&x, base);
    (x, w)
}

/// `x·G` in G2, or `x⁻¹·G` when `invert` is set
pub fn g2_multiple(x: &Scalar, g: &G2Affine, invert: bool) -> Result<G2Affine> {
    let x = if invert {
        Zeroizing::new(
            Option::<Scalar>::from(x.invert())
                .ok_or_else(|| Error::param("g2_multiple", "zero has no inverse"))?,
        )
    } else {
        Zeroizing::new(*x)
    };
    Ok(G2Projective::from(g).multiply(&x).to_affine())
}

/// Draw a fresh `x` and return it with `x·G` in G2
pub fn get_g2_multiple<R: RngCore + CryptoRng>(
    rng: &mut R,
    g: &G2Affine,
) -> (Zeroizing<Scalar>, G2Affine) {
    let x = random_scalar(rng);
    let w = G2Projective::from(g).multiply(&x).to_affine();
    (x, w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::hash_id;
    use mpin_algorithms::ec::bn254::pairing;
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    fn shares(n: usize) -> Vec<MasterSecret> {
        let mut rng = ChaCha20Rng::seed_from_u64(40);
        (0..n).map(|_| random_generate(&mut rng)).collect()
    }

    #[test]
    fn test_random_generate_is_nonzero_and_fresh() {
        let ms = shares(2);
        assert!(!bool::from(ms[0].scalar().is_zero()));
        assert_ne!(ms[0].scalar(), ms[1].scalar());
    }

    #[test]
    fn test_recombination_is_order_independent() {
        let ms = shares(3);
        let hid = hash_id(b"alice@example.com");
        let cs: Vec<ClientSecret> = ms.iter().map(|s| get_client_secret(s, &hid)).collect();
        let left = cs[0].recombine(&cs[1]).recombine(&cs[2]);
        let right = cs[0].recombine(&cs[1].recombine(&cs[2]));
        let swapped = cs[2].recombine(&cs[0]).recombine(&cs[1]);
        assert_eq!(left, right);
        assert_eq!(left, swapped);

        let ss: Vec<ServerSecret> = ms.iter().map(get_server_secret).collect();
        assert_eq!(
            ss[0].recombine(&ss[1]).recombine(&ss[2]),
            ss[2].recombine(&ss[1].recombine(&ss[0]))
        );
    }

    #[test]
    fn test_shares_sum_to_secret_of_summed_master() {
        let ms = shares(2);
        let hid = hash_id(b"alice@example.com");
        let sum = MasterSecret::from_scalar(ms[0].scalar() + ms[1].scalar());
        let combined = get_client_secret(&ms[0], &hid).recombine(&get_client_secret(&ms[1], &hid));
        assert_eq!(combined, get_client_secret(&sum, &hid));
        let permit = get_client_permit(7, &ms[0], &hid)
            .unwrap()
            .recombine(&get_client_permit(7, &ms[1], &hid).unwrap());
        assert_eq!(permit, get_client_permit(7, &sum, &hid).unwrap());
    }

    #[test]
    fn test_secrets_pair_consistently() {
        // e(sQ, H(ID)) = e(Q, s·H(ID))
        let ms = shares(1);
        let hid = hash_id(b"bob@example.com");
        let cs = get_client_secret(&ms[0], &hid);
        let sst = get_server_secret(&ms[0]);
        let lhs = pairing(sst.point(), &map_to_g1(&hid.to_array()));
        let rhs = pairing(&G2Affine::generator(), cs.point());
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_permit_requires_date() {
        let ms = shares(1);
        let err = get_client_permit(0, &ms[0], &hash_id(b"x")).unwrap_err();
        assert_eq!(err.code(), -11);
    }

    #[test]
    fn test_g1_multiple_of_hash_matches_point() {
        let hid = hash_id(b"carol@example.com");
        let x = Scalar::from(12345u64);
        let a = map_to_g1(&hid.to_array());
        assert_eq!(g1_multiple(&x, G1Base::Hash(&hid)), g1_multiple(&x, G1Base::Point(&a)));

        let mut rng = ChaCha20Rng::seed_from_u64(41);
        let (r, z) = get_g1_multiple(&mut rng, G1Base::Hash(&hid));
        assert_eq!(z, g1_multiple(&r, G1Base::Point(&a)));
    }

    #[test]
    fn test_g2_multiple_inverse_undoes_multiple() {
        let q = G2Affine::generator();
        let x = Scalar::from(99u64);
        let w = g2_multiple(&x, &q, false).unwrap();
        assert_eq!(g2_multiple(&x, &w, true).unwrap(), q);
        assert!(g2_multiple(&Scalar::zero(), &q, true).is_err());

        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let (x, w) = get_g2_multiple(&mut rng, &q);
        assert_eq!(w, g2_multiple(&x, &q, false).unwrap());
    }
}
