//! Content-addressed identifier generation.
//!
//! Ids are the URL-safe base64 encoding of `SHA-256(salt || content)`, cut to
//! the requested length. A cut that would leave a trailing `_` is extended
//! past the underscores, up to the full digest.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use sha2::{Digest, Sha256};

use crate::{IdError, IdMeta};

/// Separator placed between canonicalized files when hashing a snippet.
pub const CONTENT_DELIMITER: &str = "&";

/// Length of an unpadded base64 SHA-256 digest.
const ENCODED_LEN: usize = 43;

/// Derive an identifier from `content` and the salt and length in `meta`.
///
/// # Errors
///
/// Returns `IdError::InvalidLength` if `meta.id_length` is not in `1..=43`.
pub fn generate_id(content: &str, meta: &IdMeta) -> Result<String, IdError> {
    let length = usize::try_from(meta.id_length)
        .ok()
        .filter(|len| (1..=ENCODED_LEN).contains(len))
        .ok_or(IdError::InvalidLength(meta.id_length))?;

    let mut hasher = Sha256::new();
    hasher.update(meta.salt.as_bytes());
    hasher.update(content.as_bytes());
    let encoded = URL_SAFE_NO_PAD.encode(hasher.finalize());

    let bytes = encoded.as_bytes();
    let mut cut = length;
    while cut < bytes.len() && bytes[cut - 1] == b'_' {
        cut += 1;
    }

    Ok(encoded[..cut].to_string())
}
