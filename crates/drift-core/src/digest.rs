//! Digest of simulation output for reproducibility checks

use crate::types::Vec2;
use sha2::{Digest, Sha256};
use std::fmt;

/// A SHA-256 digest over a sequence of simulated frames.
///
/// Two runs with the same configuration and seed must produce the same
/// digest; `drift run --digest` prints it so runs can be compared.
#[derive(Clone, Copy, Hash, Eq, PartialEq)]
pub struct FrameDigest([u8; 32]);

impl FrameDigest {
    /// Start an incremental digest
    pub fn builder() -> DigestBuilder {
        DigestBuilder {
            hasher: Sha256::new(),
        }
    }

    /// Get the digest as a hex string
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Get the digest as a prefixed hex string (e.g., "sha256:abcdef...")
    pub fn to_prefixed_hex(&self) -> String {
        format!("sha256:{}", self.to_hex())
    }
}

impl fmt::Debug for FrameDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FrameDigest({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for FrameDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}

/// Incremental hasher producing a [`FrameDigest`]
pub struct DigestBuilder {
    hasher: Sha256,
}

impl DigestBuilder {
    /// Mark the start of a frame
    pub fn frame(&mut self, index: u64) {
        self.hasher.update(b"frame");
        self.hasher.update(index.to_le_bytes());
    }

    /// Feed a tagged point sequence (positions or hull vertices)
    pub fn points(&mut self, tag: u64, points: &[Vec2]) {
        self.hasher.update(tag.to_le_bytes());
        self.hasher.update((points.len() as u64).to_le_bytes());
        for p in points {
            self.hasher.update(p.x.to_bits().to_le_bytes());
            self.hasher.update(p.y.to_bits().to_le_bytes());
        }
    }

    pub fn finish(self) -> FrameDigest {
        FrameDigest(self.hasher.finalize().into())
    }
}
