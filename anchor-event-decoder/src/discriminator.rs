//! Anchor discriminators: `sha256("<namespace>:<name>")[..8]`.
//!
//! Comparison is always on the raw 8 bytes. Base58 is only used for display
//! and for parsing discriminators written by hand.

use std::{fmt, str::FromStr};

use sha2::{Digest, Sha256};

/// Size of a discriminator in bytes.
pub const DISCRIMINATOR_SIZE: usize = 8;

/// Namespace Anchor uses for instruction sighashes.
pub const SIGHASH_GLOBAL_NAMESPACE: &str = "global";

/// Namespace Anchor uses for `#[event]` structs.
pub const SIGHASH_EVENT_NAMESPACE: &str = "event";

/// Namespace Anchor uses for `#[account]` structs.
pub const SIGHASH_ACCOUNT_NAMESPACE: &str = "account";

/// Prefix of the self-CPI instruction Anchor's `emit_cpi!` uses to carry an
/// event (`EVENT_IX_TAG_LE` in anchor-lang). The event discriminator follows it.
pub const EVENT_IX_TAG: [u8; DISCRIMINATOR_SIZE] =
    [0xe4, 0x45, 0xa5, 0x2e, 0x51, 0xcb, 0x9a, 0x1d];

/// Eight-byte prefix identifying which schema decodes a payload.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Discriminator([u8; DISCRIMINATOR_SIZE]);

impl Discriminator {
    pub const fn new(bytes: [u8; DISCRIMINATOR_SIZE]) -> Self {
        Self(bytes)
    }

    /// Compute the discriminator for `name` in `namespace`.
    pub fn compute(namespace: &str, name: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(namespace.as_bytes());
        hasher.update(b":");
        hasher.update(name.as_bytes());
        let hash = hasher.finalize();
        let mut disc = [0u8; DISCRIMINATOR_SIZE];
        disc.copy_from_slice(&hash[..DISCRIMINATOR_SIZE]);
        Self(disc)
    }

    /// Instruction discriminator, e.g. `instruction("swap")`.
    pub fn instruction(name: &str) -> Self {
        Self::compute(SIGHASH_GLOBAL_NAMESPACE, name)
    }

    /// Event discriminator, e.g. `event("SwapEvent")`.
    pub fn event(name: &str) -> Self {
        Self::compute(SIGHASH_EVENT_NAMESPACE, name)
    }

    /// Account discriminator, e.g. `account("LbPair")`.
    pub fn account(name: &str) -> Self {
        Self::compute(SIGHASH_ACCOUNT_NAMESPACE, name)
    }

    /// Read the discriminator embedded in the first 8 bytes of `data`.
    /// Returns `None` if `data` is shorter than that.
    pub fn extract(data: &[u8]) -> Option<Self> {
        data.get(..DISCRIMINATOR_SIZE)
            .and_then(|prefix| prefix.try_into().ok())
            .map(Self)
    }

    pub const fn to_bytes(self) -> [u8; DISCRIMINATOR_SIZE] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8; DISCRIMINATOR_SIZE] {
        &self.0
    }

    pub fn to_base58(&self) -> String {
        bs58::encode(self.0).into_string()
    }
}

impl From<[u8; DISCRIMINATOR_SIZE]> for Discriminator {
    fn from(bytes: [u8; DISCRIMINATOR_SIZE]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Discriminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Debug for Discriminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Discriminator({})", self.to_base58())
    }
}

/// Error parsing a base58 discriminator string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseDiscriminatorError {
    #[error("invalid base58: {0}")]
    Base58(String),
    #[error("expected 8 bytes, got {0}")]
    Length(usize),
}

impl FromStr for Discriminator {
    type Err = ParseDiscriminatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|err| ParseDiscriminatorError::Base58(err.to_string()))?;
        let len = bytes.len();
        <[u8; DISCRIMINATOR_SIZE]>::try_from(bytes)
            .map(Self)
            .map_err(|_| ParseDiscriminatorError::Length(len))
    }
}
