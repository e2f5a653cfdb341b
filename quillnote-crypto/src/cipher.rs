//! String sealing with ChaCha20-Poly1305 under a passphrase-derived key.
//!
//! The nonce is fixed at all zeroes. With a constant key this makes the
//! scheme deterministic and trivially breakable by anyone with the
//! binary; see the crate docs for why that is acceptable here.

use crate::error::{CryptoError, CryptoResult};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use sha2::{Digest, Sha256};

/// Size of file keys in bytes (256 bits for ChaCha20).
pub const KEY_SIZE: usize = 32;

/// Size of the (constant) nonce in bytes.
const NONCE_SIZE: usize = 12;

/// A key for sealing protection files.
#[derive(Clone)]
pub struct FileKey {
    bytes: [u8; KEY_SIZE],
}

impl FileKey {
    /// Creates a key from raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Returns the key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for FileKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Derives a file key by hashing a fixed passphrase with SHA-256.
///
/// No salt, no stretching: the passphrase is a compile-time constant,
/// so a KDF would add nothing here.
#[must_use]
pub fn derive_file_key(passphrase: &str) -> FileKey {
    let mut hasher = Sha256::new();
    hasher.update(passphrase.as_bytes());
    let hash = hasher.finalize();

    let mut bytes = [0u8; KEY_SIZE];
    bytes.copy_from_slice(&hash);
    FileKey::from_bytes(bytes)
}

/// Seals a string and returns the base64-encoded ciphertext.
pub fn encrypt_string(key: &FileKey, plaintext: &str) -> CryptoResult<String> {
    let cipher = ChaCha20Poly1305::new(key.as_bytes().into());
    let nonce_bytes = [0u8; NONCE_SIZE];
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext.as_bytes())
        .map_err(|e| CryptoError::Encryption(e.to_string()))?;

    Ok(BASE64.encode(&ciphertext))
}

/// Opens a base64-encoded sealed string.
///
/// Fails if the encoding is invalid or the authentication tag does not
/// verify (corrupt or edited blob).
pub fn decrypt_string(key: &FileKey, encoded: &str) -> CryptoResult<String> {
    let ciphertext = BASE64
        .decode(encoded.trim())
        .map_err(|e| CryptoError::Decryption(format!("invalid base64: {e}")))?;

    let cipher = ChaCha20Poly1305::new(key.as_bytes().into());
    let nonce_bytes = [0u8; NONCE_SIZE];
    let nonce = Nonce::from_slice(&nonce_bytes);

    let plaintext = cipher
        .decrypt(nonce, ciphertext.as_ref())
        .map_err(|_| CryptoError::Decryption("authentication failed".to_string()))?;

    String::from_utf8(plaintext)
        .map_err(|e| CryptoError::Decryption(format!("invalid UTF-8: {e}")))
}
