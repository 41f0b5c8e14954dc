//! Error types for payload decoding and schema dispatch.
//!
//! "No matching schema" is not represented here: dispatch returns `Ok(None)`
//! for it, since trying several schema sets against unrelated data is the
//! common case.

use thiserror::Error;

use crate::discriminator::Discriminator;

/// Errors raised while reading fields out of a payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A read would consume past the end of the buffer.
    #[error("out of bounds: need {needed} bytes at offset {offset}, buffer has {len}")]
    OutOfBounds {
        offset: usize,
        needed: usize,
        len: usize,
    },

    /// A length-prefixed string field is not valid UTF-8.
    #[error("invalid utf-8 in string field at offset {offset}")]
    InvalidUtf8 { offset: usize },

    /// A composite field read through borsh failed.
    #[error("borsh decode failed at offset {offset}: {message}")]
    Borsh { offset: usize, message: String },
}

/// Errors raised while building a [`SchemaRegistry`](crate::SchemaRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("schemas `{first}` and `{second}` share discriminator {discriminator}")]
    DuplicateDiscriminator {
        discriminator: Discriminator,
        first: String,
        second: String,
    },
}

/// Errors raised by a single dispatch call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The discriminator matched but the payload did not decode.
    #[error("failed to decode `{schema}`: {source}")]
    Decode {
        schema: &'static str,
        #[source]
        source: DecodeError,
    },
}

/// Errors raised for one candidate instruction of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstructionError {
    /// Instruction data in an RPC response is not valid base58.
    #[error("instruction data is not valid base58: {0}")]
    InvalidBase58(String),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Errors raised while reading an RPC transaction response.
#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("invalid transaction json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid transaction signature: {0}")]
    InvalidSignature(String),
}

pub type Result<T, E = DecodeError> = std::result::Result<T, E>;
