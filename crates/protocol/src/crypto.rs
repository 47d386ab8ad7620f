//! Symmetric collaborators: AES-GCM with the agreed session key, HMAC and
//! PBKDF2 over SHA-256

use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::Aes128Gcm;
use hmac::{Hmac, Mac};
use mpin_api::error::validate;
use mpin_api::{Error, Result, SessionKey};
use mpin_internal::constant_time::ct_eq;
use mpin_params::mpin::{GCM_IV_SIZE, GCM_TAG_SIZE, HASH_BYTES};
use sha2::Sha256;
use zeroize::Zeroizing;

type HmacSha256 = Hmac<Sha256>;

/// Encrypt `plaintext` under `key`, authenticating `header` as well.
///
/// Returns the ciphertext (same length as the plaintext) and the 16-byte tag.
pub fn aes_gcm_encrypt(
    key: &SessionKey,
    iv: &[u8; GCM_IV_SIZE],
    header: &[u8],
    plaintext: &[u8],
) -> Result<(Vec<u8>, [u8; GCM_TAG_SIZE])> {
    let cipher = Aes128Gcm::new(GenericArray::from_slice(&key[..]));
    let mut buf = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(GenericArray::from_slice(iv), header, &mut buf)
        .map_err(|_| Error::Other {
            context: "aes_gcm_encrypt",
            message: "plaintext too long".into(),
        })?;
    let mut out = [0u8; GCM_TAG_SIZE];
    out.copy_from_slice(&tag);
    Ok((buf, out))
}

/// Decrypt and check the tag; a mismatch is
/// [`Error::AuthenticationFailed`] and releases no plaintext
pub fn aes_gcm_decrypt(
    key: &SessionKey,
    iv: &[u8; GCM_IV_SIZE],
    header: &[u8],
    ciphertext: &[u8],
    tag: &[u8; GCM_TAG_SIZE],
) -> Result<Zeroizing<Vec<u8>>> {
    let cipher = Aes128Gcm::new(GenericArray::from_slice(&key[..]));
    let mut buf = Zeroizing::new(ciphertext.to_vec());
    cipher
        .decrypt_in_place_detached(
            GenericArray::from_slice(iv),
            header,
            &mut buf,
            GenericArray::from_slice(tag),
        )
        .map_err(|_| Error::AuthenticationFailed {
            context: "aes_gcm_decrypt",
        })?;
    Ok(buf)
}

/// HMAC-SHA256 of `data` under `key`
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<[u8; HASH_BYTES]> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key)
        .map_err(|_| Error::param("hmac_sha256", "invalid key length"))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().into())
}

/// Check an HMAC-SHA256 tag in constant time
pub fn hmac_sha256_verify(key: &[u8], data: &[u8], tag: &[u8]) -> Result<()> {
    let expected = hmac_sha256(key, data)?;
    if ct_eq(expected, tag) {
        Ok(())
    } else {
        Err(Error::AuthenticationFailed {
            context: "hmac_sha256_verify",
        })
    }
}

/// PBKDF2-HMAC-SHA256 stretching of `password` to `len` bytes
pub fn pbkdf2_sha256(
    password: &[u8],
    salt: &[u8],
    rounds: u32,
    len: usize,
) -> Result<Zeroizing<Vec<u8>>> {
    validate::parameter(rounds > 0, "pbkdf2_sha256", "rounds must be positive")?;
    validate::parameter(len > 0, "pbkdf2_sha256", "output length must be positive")?;
    let mut out = Zeroizing::new(vec![0u8; len]);
    pbkdf2::pbkdf2::<HmacSha256>(password, salt, rounds, &mut out);
    Ok(out)
}
