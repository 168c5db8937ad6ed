//! SHA-256 computed by the device.
//!
//! The message is streamed as Start, one Update per full 64-byte block and an
//! End carrying the 0..63 trailing bytes (p96, 11.15 SHA Command).
//!
//! Every sub-command runs in its own wake/idle session. The hash context
//! lives in the chip's volatile memory, which idle keeps and sleep clears, so
//! the device is only put to sleep once the digest has been read.

use std::fmt;

use tracing::{debug, info, instrument};

use crate::device::AteccDevice;
use crate::error::{Error, Result};
use crate::events::AteccObserver;
use crate::protocol::ShaMode;
use crate::protocol::constants::{SHA_BLOCK_SIZE, SHA256_DIGEST_SIZE};
use crate::protocol::packet::{Command, sha_block_split};
use crate::transport::BusTransport;

/// Message to hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Hex-encoded bytes.
    Hex(String),
    /// Literal text, hashed as its UTF-8 bytes.
    Text(String),
}

impl Message {
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        match self {
            Message::Hex(s) => Ok(hex::decode(s.trim())?),
            Message::Text(s) => Ok(s.as_bytes().to_vec()),
        }
    }
}

/// Digest returned by the SHA End command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sha256Digest(pub [u8; SHA256_DIGEST_SIZE]);

impl Sha256Digest {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SHA256 HexDigest: {}", self.to_hex())
    }
}

impl<T: BusTransport, O: AteccObserver> AteccDevice<T, O> {
    /// Hash `message` on the device.
    pub fn sha256(&mut self, message: &Message) -> Result<Sha256Digest> {
        let bytes = message.to_bytes()?;
        self.sha256_bytes(&bytes)
    }

    #[instrument(skip(self, message), fields(len = message.len()))]
    pub fn sha256_bytes(&mut self, message: &[u8]) -> Result<Sha256Digest> {
        let (blocks, trailing) = sha_block_split(message.len());
        debug!(blocks, trailing, "Streaming message");

        self.execute(&Command::sha(ShaMode::Sha256Start, &[]), true)?;

        let chunks = message.chunks_exact(SHA_BLOCK_SIZE);
        let tail = chunks.remainder();
        for block in chunks {
            self.execute(&Command::sha(ShaMode::Sha256Update, block), true)?;
        }

        let res = self.execute(&Command::sha(ShaMode::Sha256End, tail), true)?;
        let payload = res.payload();
        let digest: [u8; SHA256_DIGEST_SIZE] =
            payload.try_into().map_err(|_| Error::UnexpectedPayload {
                command: "SHA",
                expected: SHA256_DIGEST_SIZE,
                actual: payload.len(),
            })?;
        let digest = Sha256Digest(digest);

        info!(digest = %digest.to_hex(), "SHA-256 complete");

        let _ = self.sleep();
        Ok(digest)
    }
}
