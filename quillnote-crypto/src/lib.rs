//! File obfuscation for the Quillnote protection core.
//!
//! Encrypts the license-key and activation-timestamp files with
//! ChaCha20-Poly1305 under a key derived by hashing a fixed passphrase,
//! using an all-zero nonce.
//!
//! # This is not a security boundary
//!
//! The passphrase ships inside the binary and the nonce is constant, so
//! anyone who reads the code can decrypt the files. The point is only to
//! raise the cost of casual tampering above "open the file in a text
//! editor". The AEAD tag is still useful: a corrupted or hand-edited
//! blob fails authentication, and callers treat that as absent data.

mod cipher;
mod error;

pub use cipher::{decrypt_string, derive_file_key, encrypt_string, FileKey};
pub use error::{CryptoError, CryptoResult};
