//! Anonymous sealed-box encryption.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use crypto_box::aead::OsRng;
use crypto_box::PublicKey;
use tracing::trace;

use super::RepositoryPublicKey;
use crate::error::{CipherError, Result};

/// Seal `plaintext` for the holder of `public_key`'s private half.
///
/// Output is base64 of `ephemeral_pk || box`, the layout of libsodium's
/// `crypto_box_seal`. Each call uses a fresh ephemeral key, so repeated
/// calls produce different ciphertexts.
///
/// # Errors
///
/// Returns `CipherError::InvalidPublicKey` if the key is not base64 of
/// 32 bytes, `CipherError::EncryptionFailed` if sealing fails.
pub fn seal(public_key: &RepositoryPublicKey, plaintext: &str) -> Result<String> {
    let recipient = parse_public_key(&public_key.key)?;

    trace!(
        key_id = %public_key.key_id,
        plaintext_len = plaintext.len(),
        "sealing"
    );

    let sealed = recipient
        .seal(&mut OsRng, plaintext.as_bytes())
        .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;

    Ok(STANDARD.encode(sealed))
}

fn parse_public_key(encoded: &str) -> Result<PublicKey> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| CipherError::InvalidPublicKey(format!("not base64: {}", e)))?;
    let bytes: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
        CipherError::InvalidPublicKey(format!("expected 32 bytes, got {}", bytes.len()))
    })?;
    Ok(PublicKey::from(bytes))
}
