//! Ticket Identifier Codec
//!
//! Transforms raw ticket ids into the keys actually handed to a backend.
//! Lookups always re-encode the caller's id, so no inverse exists.

use sha2::{Digest, Sha256};

/// Maps a raw ticket id to its storage key.
///
/// Implementations must be deterministic for the lifetime of the process and
/// must not map two distinct ids to the same key.
pub trait TicketIdCodec: Send + Sync {
    fn encode(&self, raw_id: &str) -> String;
}

// == Identity Codec ==
/// Stores ids as-is. Used when no obfuscation is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityCodec;

impl TicketIdCodec for IdentityCodec {
    fn encode(&self, raw_id: &str) -> String {
        raw_id.to_string()
    }
}

// == Digest Codec ==
/// Stores ids as a salted SHA-256 digest, hex encoded.
///
/// Keeps guessable session ids away from whoever operates the backend.
#[derive(Clone)]
pub struct DigestCodec {
    salt: Vec<u8>,
}

impl DigestCodec {
    pub fn new(salt: impl Into<Vec<u8>>) -> Self {
        Self { salt: salt.into() }
    }
}

impl std::fmt::Debug for DigestCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigestCodec").finish_non_exhaustive()
    }
}

impl TicketIdCodec for DigestCodec {
    fn encode(&self, raw_id: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.salt);
        hasher.update(raw_id.as_bytes());
        hex::encode(hasher.finalize())
    }
}
