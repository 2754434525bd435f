//! Authenticated encryption of refresh credentials at rest.
//!
//! Tokens have the shape `base64(iv):base64(tag):base64(ciphertext)` using
//! AES-256-GCM with a fresh 96-bit IV per call and a 128-bit tag. Every stored
//! credential must round-trip through [`CredentialCipher::decrypt`], so the
//! layout must not change.

use crate::{CipherError, CipherResult};

use std::panic::Location;

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use error_location::ErrorLocation;
use zeroize::Zeroizing;

const KEY_LEN: usize = 32;
const IV_LEN: usize = 12;
const TAG_LEN: usize = 16;
const SEPARATOR: char = ':';

pub struct CredentialCipher {
    key: Zeroizing<[u8; KEY_LEN]>,
}

impl CredentialCipher {
    pub fn new(key: [u8; KEY_LEN]) -> Self {
        Self {
            key: Zeroizing::new(key),
        }
    }

    /// Build from the 64-character hex secret.
    ///
    /// A bad secret is a startup failure, never a per-call one.
    #[track_caller]
    pub fn from_hex(secret: &str) -> CipherResult<Self> {
        let bytes = Zeroizing::new(hex::decode(secret.trim()).map_err(|e| {
            CipherError::Configuration {
                message: format!("encryption key is not valid hex: {}", e),
                location: ErrorLocation::from(Location::caller()),
            }
        })?);

        let key: [u8; KEY_LEN] =
            bytes
                .as_slice()
                .try_into()
                .map_err(|_| CipherError::Configuration {
                    message: format!(
                        "encryption key must be {} bytes (256 bits), got {}",
                        KEY_LEN,
                        bytes.len()
                    ),
                    location: ErrorLocation::from(Location::caller()),
                })?;

        Ok(Self::new(key))
    }

    #[track_caller]
    pub fn encrypt(&self, plaintext: &str) -> CipherResult<String> {
        let iv: [u8; IV_LEN] = rand::random();

        let mut sealed = self
            .aead()
            .encrypt(Nonce::from_slice(&iv), plaintext.as_bytes())
            .map_err(|_| CipherError::Encryption {
                location: ErrorLocation::from(Location::caller()),
            })?;

        // aes-gcm appends the tag to the ciphertext
        let tag = sealed.split_off(sealed.len() - TAG_LEN);

        Ok(format!(
            "{}{SEPARATOR}{}{SEPARATOR}{}",
            STANDARD.encode(iv),
            STANDARD.encode(tag),
            STANDARD.encode(&sealed)
        ))
    }

    #[track_caller]
    pub fn decrypt(&self, token: &str) -> CipherResult<Zeroizing<String>> {
        let segments: Vec<&str> = token.split(SEPARATOR).collect();
        let [iv_b64, tag_b64, ct_b64] = segments.as_slice() else {
            return Err(CipherError::Format {
                message: format!("expected 3 segments, found {}", segments.len()),
                location: ErrorLocation::from(Location::caller()),
            });
        };

        let iv = decode_segment("iv", iv_b64)?;
        let tag = decode_segment("tag", tag_b64)?;
        let mut sealed = decode_segment("ciphertext", ct_b64)?;

        if iv.len() != IV_LEN || tag.len() != TAG_LEN {
            return Err(CipherError::Integrity {
                message: format!("bad iv/tag length ({}/{})", iv.len(), tag.len()),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        sealed.extend_from_slice(&tag);

        let plaintext = self
            .aead()
            .decrypt(Nonce::from_slice(&iv), sealed.as_slice())
            .map_err(|_| CipherError::Integrity {
                message: "authentication tag mismatch".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        String::from_utf8(plaintext)
            .map(Zeroizing::new)
            .map_err(|_| CipherError::Integrity {
                message: "plaintext is not valid UTF-8".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    fn aead(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.key[..]))
    }
}

impl std::fmt::Debug for CredentialCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialCipher")
            .field("key", &"<redacted>")
            .finish()
    }
}

#[track_caller]
fn decode_segment(name: &str, segment: &str) -> CipherResult<Vec<u8>> {
    STANDARD
        .decode(segment)
        .map_err(|e| CipherError::Integrity {
            message: format!("{} segment is not valid base64: {}", name, e),
            location: ErrorLocation::from(Location::caller()),
        })
}
