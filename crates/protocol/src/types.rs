//! Domain types exchanged between authority, client and server
//!
//! Every type that crosses a trust boundary is decoded through a
//! constructor that checks its length and that any point it carries lies in
//! the right group. Secret-bearing types are wiped on drop and only export
//! their bytes through [`SerializeSecret::to_bytes_zeroizing`].

use core::fmt;

use mpin_algorithms::ec::bn254::{
    G1Affine, G2Affine, Gt, Scalar, G1_UNCOMPRESSED_SIZE, GT_SIZE,
};
use mpin_api::error::validate;
use mpin_api::{Error, Result, Serialize, SerializeSecret};
use mpin_params::mpin::{EGS, HASH_BYTES};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::authority::{recombine_g1, recombine_g2};
use crate::config::ProtocolConfig;
use crate::hash::get_y;
use crate::kangaroo::kangaroo;

/// SHA-256 digest of a client identity, `H(ID)`
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct HashedId([u8; HASH_BYTES]);

impl HashedId {
    /// Wrap a digest
    pub fn new(bytes: [u8; HASH_BYTES]) -> Self {
        Self(bytes)
    }

    /// The digest bytes
    pub fn to_array(&self) -> [u8; HASH_BYTES] {
        self.0
    }
}

impl AsRef<[u8]> for HashedId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for HashedId {
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        validate::length("HashedId::from_bytes", bytes.len(), HASH_BYTES)?;
        let mut h = [0u8; HASH_BYTES];
        h.copy_from_slice(bytes);
        Ok(Self(h))
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

/// One trusted authority's share of the master secret
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MasterSecret(Scalar);

impl MasterSecret {
    pub(crate) fn from_scalar(s: Scalar) -> Self {
        Self(s)
    }

    pub(crate) fn scalar(&self) -> &Scalar {
        &self.0
    }
}

impl fmt::Debug for MasterSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterSecret[REDACTED]")
    }
}

impl SerializeSecret for MasterSecret {
    /// Decode a 32-byte big-endian share, which must be non-zero and below
    /// the group order
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        validate::length("MasterSecret::from_bytes", bytes.len(), EGS)?;
        let mut buf = Zeroizing::new([0u8; EGS]);
        buf.copy_from_slice(bytes);
        let s = Option::<Scalar>::from(Scalar::from_bytes(&buf))
            .ok_or_else(|| Error::param("MasterSecret::from_bytes", "not below the group order"))?;
        validate::parameter(
            !bool::from(s.is_zero()),
            "MasterSecret::from_bytes",
            "zero share",
        )?;
        Ok(Self(s))
    }

    fn to_bytes_zeroizing(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.0.to_bytes().to_vec())
    }
}

/// Decode a G1 point carried by a secret, rejecting the identity
fn decode_g1_secret(bytes: &[u8], context: &'static str) -> Result<G1Affine> {
    let p = G1Affine::from_bytes(bytes, true).map_err(|e| Error::from(e).with_context(context))?;
    p.validate(true)
        .map_err(|e| Error::from(e).with_context(context))?;
    Ok(p)
}

macro_rules! g1_secret {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct $name(G1Affine);

        impl $name {
            pub(crate) fn from_point(p: G1Affine) -> Self {
                Self(p)
            }

            pub(crate) fn point(&self) -> &G1Affine {
                &self.0
            }

            /// Add another authority's share
            pub fn recombine(&self, other: &Self) -> Self {
                Self(recombine_g1(&self.0, &other.0))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(concat!(stringify!($name), "[REDACTED]"))
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                bool::from(self.0.ct_eq(&other.0))
            }
        }

        impl Eq for $name {}

        impl SerializeSecret for $name {
            /// Decode a 65-byte uncompressed or 33-byte compressed point
            fn from_bytes(bytes: &[u8]) -> Result<Self> {
                decode_g1_secret(bytes, concat!(stringify!($name), "::from_bytes")).map(Self)
            }

            /// 65-byte uncompressed encoding
            fn to_bytes_zeroizing(&self) -> Zeroizing<Vec<u8>> {
                Zeroizing::new(self.0.to_uncompressed().to_vec())
            }
        }
    };
}

g1_secret!(
    /// Client secret `s·H(ID)`, or one authority's share of it
    ClientSecret
);

g1_secret!(
    /// Client secret with the PIN removed, `s·H(ID) - pin·H(ID)`.
    ///
    /// This is what the client stores; on its own it proves nothing.
    Token
);

g1_secret!(
    /// Time permit `s·H(date | H(ID))` for one day, or a share of it
    TimePermit
);

/// Server secret `s·Q` in G2, or one authority's share of it
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ServerSecret(G2Affine);

impl ServerSecret {
    pub(crate) fn from_point(p: G2Affine) -> Self {
        Self(p)
    }

    pub(crate) fn point(&self) -> &G2Affine {
        &self.0
    }

    /// Add another authority's share
    pub fn recombine(&self, other: &Self) -> Self {
        Self(recombine_g2(&self.0, &other.0))
    }
}

impl fmt::Debug for ServerSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ServerSecret[REDACTED]")
    }
}

impl PartialEq for ServerSecret {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.0.ct_eq(&other.0))
    }
}

impl Eq for ServerSecret {}

impl SerializeSecret for ServerSecret {
    /// Decode a 128-byte or 65-byte compressed G2 point
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let context = "ServerSecret::from_bytes";
        let p = G2Affine::from_bytes(bytes, true)
            .map_err(|e| Error::from(e).with_context(context))?;
        p.validate(true)
            .map_err(|e| Error::from(e).with_context(context))?;
        Ok(Self(p))
    }

    /// 128-byte encoding
    fn to_bytes_zeroizing(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.0.to_uncompressed().to_vec())
    }
}

/// The client's first message: `U = x·H(ID)` and, with a time permit,
/// `UT = x·(H(ID) + H(date | H(ID)))`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Commitment {
    /// `x·H(ID)`
    pub u: G1Affine,
    /// `x·(H(ID) + H(date | H(ID)))`, present when a time permit is used
    pub ut: Option<G1Affine>,
}

impl Commitment {
    /// The value the server's check runs against: `UT` with a time permit,
    /// `U` without
    pub fn bound(&self) -> &G1Affine {
        self.ut.as_ref().unwrap_or(&self.u)
    }
}

/// What the client keeps between its two passes: the ephemeral `x` and the
/// reconstructed secret
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ClientState {
    x: Scalar,
    sec: G1Affine,
}

impl ClientState {
    pub(crate) fn new(x: Scalar, sec: G1Affine) -> Self {
        Self { x, sec }
    }

    /// The ephemeral scalar, needed again for M-PIN Full key derivation
    pub fn x(&self) -> &Scalar {
        &self.x
    }

    pub(crate) fn sec(&self) -> &G1Affine {
        &self.sec
    }
}

impl fmt::Debug for ClientState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientState[REDACTED]")
    }
}

/// The server's view of an identity: `HID = H(ID)` mapped to G1 and, for a
/// given date, `HTID = HID + H(date | H(ID))`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ServerIdentity {
    /// `H(ID)` in G1
    pub hid: G1Affine,
    /// `H(ID) + H(date | H(ID))` in G1, present when time permits are in use
    pub htid: Option<G1Affine>,
}

impl ServerIdentity {
    /// The point the pairing check is made against
    pub fn target(&self) -> &G1Affine {
        self.htid.as_ref().unwrap_or(&self.hid)
    }
}

/// Pairing values left by a failed check from which the PIN error can be
/// recovered: `E = F^(-d)` where `d` is the PIN used minus the right one
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PinErrorEvidence {
    /// The failed product `e(Q, V)·e(sQ, yHID + U)`
    pub e: Gt,
    /// The base `e(Q, yHID + U)`
    pub f: Gt,
}

impl PinErrorEvidence {
    /// Signed distance between the PIN used and the right PIN, or 0 when it
    /// is not within `config.max_pin`
    pub fn pin_offset(&self, config: &ProtocolConfig) -> i32 {
        kangaroo(&self.e, &self.f, config)
    }

    /// Classify the rejection: a recoverable offset means a wrong PIN,
    /// anything else a response that never came from a valid token
    pub fn diagnose(&self, config: &ProtocolConfig) -> Error {
        if self.pin_offset(config) != 0 {
            Error::BadPin
        } else {
            Error::BadToken
        }
    }

    /// 768-byte encoding `E || F`
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(2 * GT_SIZE);
        out.extend_from_slice(&self.e.to_bytes());
        out.extend_from_slice(&self.f.to_bytes());
        out
    }

    /// Decode [`PinErrorEvidence::to_bytes`]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        validate::length("PinErrorEvidence::from_bytes", bytes.len(), 2 * GT_SIZE)?;
        let decode = |chunk: &[u8]| -> Result<Gt> {
            let mut buf = [0u8; GT_SIZE];
            buf.copy_from_slice(chunk);
            Option::<Gt>::from(Gt::from_bytes(&buf)).ok_or(Error::InvalidPoint {
                context: "PinErrorEvidence::from_bytes",
            })
        };
        Ok(Self {
            e: decode(&bytes[..GT_SIZE])?,
            f: decode(&bytes[GT_SIZE..])?,
        })
    }
}

/// Outcome of a server-side check.
///
/// Rejections are expected results rather than faults; malformed input is
/// reported through the `Err` side of the surrounding `Result` instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The client proved possession of token and PIN
    Accepted,
    /// The pairing check failed, with the evidence when it was requested
    BadPin(Option<PinErrorEvidence>),
    /// The single-pass request fell outside the time window
    Expired,
}

impl Verdict {
    /// True for [`Verdict::Accepted`]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }

    /// `Ok(())` when accepted, otherwise the matching rejection error
    pub fn into_result(self) -> Result<()> {
        match self {
            Verdict::Accepted => Ok(()),
            Verdict::BadPin(_) => Err(Error::BadPin),
            Verdict::Expired => Err(Error::Expired),
        }
    }

    /// Wire code used by deployed services: 0 when accepted
    pub fn code(&self) -> i32 {
        match self.clone().into_result() {
            Ok(()) => 0,
            Err(e) => e.code(),
        }
    }
}

/// The single message of the single-pass exchange
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthRequest {
    /// `U` and, with a time permit, `UT`
    pub commitment: Commitment,
    /// Response `V = -(x + y)·SEC`
    pub v: G1Affine,
    /// Client clock in seconds since the epoch
    pub time_value: u32,
    /// Message signed along with the authentication, possibly empty
    pub message: Vec<u8>,
}

impl AuthRequest {
    /// The challenge both sides derive, `Y = H(time_value | bound || message)`
    pub fn challenge(&self) -> Scalar {
        challenge(&self.commitment, self.time_value, &self.message)
    }

    /// Decode with an explicit choice of subgroup checks
    pub fn from_bytes_with(bytes: &[u8], config: &ProtocolConfig) -> Result<Self> {
        const HEADER: usize = 3 * G1_UNCOMPRESSED_SIZE + 4;
        let context = "AuthRequest::from_bytes";
        validate::parameter(bytes.len() >= HEADER, context, "shorter than the fixed header")?;
        let full = config.full_validation;
        let point = |i: usize| -> Result<G1Affine> {
            let chunk = &bytes[i * G1_UNCOMPRESSED_SIZE..(i + 1) * G1_UNCOMPRESSED_SIZE];
            G1Affine::from_bytes(chunk, full).map_err(|e| Error::from(e).with_context(context))
        };
        let u = point(0)?;
        let ut = point(1)?;
        let v = point(2)?;
        let mut tv = [0u8; 4];
        tv.copy_from_slice(&bytes[3 * G1_UNCOMPRESSED_SIZE..HEADER]);
        Ok(Self {
            commitment: Commitment {
                u,
                ut: (!bool::from(ut.is_identity())).then_some(ut),
            },
            v,
            time_value: u32::from_be_bytes(tv),
            message: bytes[HEADER..].to_vec(),
        })
    }
}

impl Serialize for AuthRequest {
    /// Decode `U || UT || V || time_value || message`, with `UT` all zeros
    /// when absent
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes_with(bytes, &ProtocolConfig::default())
    }

    fn to_bytes(&self) -> Vec<u8> {
        let ut = self.commitment.ut.unwrap_or_else(G1Affine::identity);
        let mut out = Vec::with_capacity(3 * G1_UNCOMPRESSED_SIZE + 4 + self.message.len());
        out.extend_from_slice(&self.commitment.u.to_uncompressed());
        out.extend_from_slice(&ut.to_uncompressed());
        out.extend_from_slice(&self.v.to_uncompressed());
        out.extend_from_slice(&self.time_value.to_be_bytes());
        out.extend_from_slice(&self.message);
        out
    }
}

/// `Y = H(time_value | bound || message) mod r`
pub(crate) fn challenge(commitment: &Commitment, time_value: u32, message: &[u8]) -> Scalar {
    let mut data = Vec::with_capacity(G1_UNCOMPRESSED_SIZE + message.len());
    data.extend_from_slice(&commitment.bound().to_uncompressed());
    data.extend_from_slice(message);
    get_y(time_value, &data)
}

/// Pairings a client can compute once per token for M-PIN Full:
/// `g1 = e(Q, token)` and `g2 = e(Q, H(ID))`
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Precomputed {
    pub(crate) g1: Gt,
    pub(crate) g2: Gt,
}

impl fmt::Debug for Precomputed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Precomputed[REDACTED]")
    }
}

impl SerializeSecret for Precomputed {
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let e = PinErrorEvidence::from_bytes(bytes)
            .map_err(|e| e.with_context("Precomputed::from_bytes"))?;
        Ok(Self { g1: e.e, g2: e.f })
    }

    fn to_bytes_zeroizing(&self) -> Zeroizing<Vec<u8>> {
        let mut out = Vec::with_capacity(2 * GT_SIZE);
        out.extend_from_slice(&self.g1.to_bytes());
        out.extend_from_slice(&self.g2.to_bytes());
        Zeroizing::new(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpin_algorithms::ec::bn254::{G1Projective, G2Projective};
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    #[test]
    fn test_master_secret_rejects_zero_and_overflow() {
        assert_eq!(
            MasterSecret::from_bytes(&[0u8; EGS]).unwrap_err().code(),
            -11
        );
        assert!(MasterSecret::from_bytes(&[0xff; EGS]).is_err());
        assert!(MasterSecret::from_bytes(&[1u8; 31]).is_err());
        let mut one = [0u8; EGS];
        one[EGS - 1] = 1;
        let ms = MasterSecret::from_bytes(&one).unwrap();
        assert_eq!(ms.to_bytes_zeroizing().as_slice(), &one);
    }

    #[test]
    fn test_g1_secret_round_trip_and_redaction() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let p = G1Projective::random(&mut rng).to_affine();
        let token = Token::from_point(p);
        let bytes = token.to_bytes_zeroizing();
        assert_eq!(bytes.len(), 65);
        assert_eq!(Token::from_bytes(&bytes).unwrap(), token);
        assert_eq!(Token::from_bytes(&p.to_compressed()).unwrap(), token);
        assert_eq!(format!("{:?}", token), "Token[REDACTED]");
    }

    #[test]
    fn test_g1_secret_rejects_identity_and_garbage() {
        let err = ClientSecret::from_bytes(&[0u8; 65]).unwrap_err();
        assert_eq!(err.code(), -14);
        let mut bad = G1Projective::generator().to_affine().to_uncompressed();
        bad[64] ^= 1;
        assert_eq!(TimePermit::from_bytes(&bad).unwrap_err().code(), -14);
        assert_eq!(TimePermit::from_bytes(&bad[..60]).unwrap_err().code(), -11);
    }

    #[test]
    fn test_server_secret_round_trip() {
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        let q = G2Projective::random(&mut rng).to_affine();
        let sst = ServerSecret::from_point(q);
        let bytes = sst.to_bytes_zeroizing();
        assert_eq!(bytes.len(), 128);
        assert_eq!(ServerSecret::from_bytes(&bytes).unwrap(), sst);
        assert!(ServerSecret::from_bytes(&[0u8; 128]).is_err());
    }

    #[test]
    fn test_auth_request_round_trip() {
        let g = G1Projective::generator();
        let request = AuthRequest {
            commitment: Commitment {
                u: g.to_affine(),
                ut: Some(g.double().to_affine()),
            },
            v: (g.double() + g).to_affine(),
            time_value: 1439465203,
            message: b"test message to sign".to_vec(),
        };
        let bytes = request.to_bytes();
        assert_eq!(bytes.len(), 3 * 65 + 4 + 20);
        let back = AuthRequest::from_bytes(&bytes).unwrap();
        assert_eq!(back, request);
        assert_eq!(back.challenge(), request.challenge());

        let no_permit = AuthRequest {
            commitment: Commitment {
                u: g.to_affine(),
                ut: None,
            },
            message: Vec::new(),
            ..request
        };
        let back = AuthRequest::from_bytes(&no_permit.to_bytes()).unwrap();
        assert_eq!(back.commitment.ut, None);
        assert!(AuthRequest::from_bytes(&[0u8; 10]).is_err());
    }

    #[test]
    fn test_challenge_uses_bound_commitment() {
        let g = G1Projective::generator();
        let with = Commitment {
            u: g.to_affine(),
            ut: Some(g.double().to_affine()),
        };
        let without = Commitment {
            u: g.double().to_affine(),
            ut: None,
        };
        assert_eq!(with.bound(), without.bound());
        assert_eq!(challenge(&with, 5, b"m"), challenge(&without, 5, b"m"));
        assert_ne!(challenge(&with, 5, b"m"), challenge(&with, 6, b"m"));
    }

    #[test]
    fn test_verdict_codes() {
        assert_eq!(Verdict::Accepted.code(), 0);
        assert_eq!(Verdict::BadPin(None).code(), -19);
        assert_eq!(Verdict::Expired.code(), -19);
        assert_eq!(Verdict::Expired.into_result(), Err(Error::Expired));
        assert!(Verdict::Accepted.is_accepted());
    }
}
