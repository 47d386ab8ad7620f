//! Moving the PIN factor in and out of a client secret
//!
//! `Token = CS - pin·H(ID)`. Four-digit PINs go through a fixed-length
//! ladder of `pin_bits` steps; 256-bit PINs use the constant-time scalar
//! multiplication, and may be held as two XOR shares by separate custodians.

use mpin_algorithms::ec::bn254::{G1Projective, Scalar};
use mpin_api::ScalarBytes;
use mpin_params::mpin::EGS;
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::config::ProtocolConfig;
use crate::hash::{hash_id, map_to_g1};
use crate::types::{ClientSecret, Token};

/// `pin·H(ID)` for a PIN reduced into range
fn pin_point(id: &[u8], pin: u32, config: &ProtocolConfig) -> G1Projective {
    let a = G1Projective::from(map_to_g1(&hash_id(id).to_array()));
    a.pinmul(config.reduce_pin(pin), config.pin_bits)
}

/// `pin·H(ID)` for a 256-bit PIN
fn big_pin_point(id: &[u8], pin: &ScalarBytes) -> G1Projective {
    let a = G1Projective::from(map_to_g1(&hash_id(id).to_array()));
    let e = Zeroizing::new(Scalar::from_bytes_reduced(pin));
    a.multiply(&e)
}

/// Remove the PIN from a client secret, leaving the token the client stores
pub fn extract_pin(id: &[u8], pin: u32, cs: &ClientSecret, config: &ProtocolConfig) -> Token {
    let t = G1Projective::from(cs.point()) - pin_point(id, pin, config);
    Token::from_point(t.to_affine())
}

/// Put the PIN back: the inverse of [`extract_pin`]
pub fn add_pin(id: &[u8], pin: u32, token: &Token, config: &ProtocolConfig) -> ClientSecret {
    let s = G1Projective::from(token.point()) + pin_point(id, pin, config);
    ClientSecret::from_point(s.to_affine())
}

/// [`extract_pin`] for a 256-bit PIN
pub fn extract_big_pin(id: &[u8], pin: &ScalarBytes, cs: &ClientSecret) -> Token {
    let t = G1Projective::from(cs.point()) - big_pin_point(id, pin);
    Token::from_point(t.to_affine())
}

/// [`add_pin`] for a 256-bit PIN
pub fn add_big_pin(id: &[u8], pin: &ScalarBytes, token: &Token) -> ClientSecret {
    let s = G1Projective::from(token.point()) + big_pin_point(id, pin);
    ClientSecret::from_point(s.to_affine())
}

/// Split a 256-bit PIN into two XOR shares, each uniformly random on its own
pub fn split_pin<R: RngCore + CryptoRng>(
    pin: &ScalarBytes,
    rng: &mut R,
) -> (ScalarBytes, ScalarBytes) {
    let a = ScalarBytes::random(rng);
    let b = combine_pin(pin, &a);
    (a, b)
}

/// XOR two PIN shares back together
pub fn combine_pin(a: &ScalarBytes, b: &ScalarBytes) -> ScalarBytes {
    let mut out = Zeroizing::new([0u8; EGS]);
    for (o, (x, y)) in out.iter_mut().zip(a.iter().zip(b.iter())) {
        *o = x ^ y;
    }
    ScalarBytes::new(*out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authority::{get_client_secret, random_generate};
    use rand_chacha::ChaCha20Rng;
    use rand_core::SeedableRng;

    const ID: &[u8] = b"testUser@miracl.com";

    fn client_secret() -> ClientSecret {
        let mut rng = ChaCha20Rng::seed_from_u64(50);
        let ms = random_generate(&mut rng);
        get_client_secret(&ms, &hash_id(ID))
    }

    #[test]
    fn test_add_pin_inverts_extract_pin() {
        let config = ProtocolConfig::default();
        let cs = client_secret();
        let token = extract_pin(ID, 1234, &cs, &config);
        assert_ne!(token.point(), cs.point());
        assert_eq!(add_pin(ID, 1234, &token, &config), cs);
        assert_ne!(add_pin(ID, 1235, &token, &config), cs);
    }

    #[test]
    fn test_pin_is_reduced() {
        let config = ProtocolConfig::default();
        let cs = client_secret();
        assert_eq!(
            extract_pin(ID, 11234, &cs, &config),
            extract_pin(ID, 1234, &cs, &config)
        );
    }

    #[test]
    fn test_zero_pin_keeps_secret() {
        let config = ProtocolConfig::default();
        let cs = client_secret();
        assert_eq!(extract_pin(ID, 0, &cs, &config).point(), cs.point());
    }

    #[test]
    fn test_small_big_pin_matches_ladder() {
        let config = ProtocolConfig::default();
        let cs = client_secret();
        let mut pin = [0u8; EGS];
        pin[EGS - 2..].copy_from_slice(&1234u16.to_be_bytes());
        let big = extract_big_pin(ID, &ScalarBytes::new(pin), &cs);
        assert_eq!(big.point(), extract_pin(ID, 1234, &cs, &config).point());
    }

    #[test]
    fn test_split_pin_shares_recombine() {
        let mut rng = ChaCha20Rng::seed_from_u64(51);
        let pin = ScalarBytes::random(&mut rng);
        let (a, b) = split_pin(&pin, &mut rng);
        assert_ne!(a, pin);
        assert_ne!(b, pin);
        assert_eq!(combine_pin(&a, &b), pin);

        let cs = client_secret();
        let token = extract_big_pin(ID, &combine_pin(&a, &b), &cs);
        assert_eq!(add_big_pin(ID, &pin, &token), cs);
    }
}
