//! Decoder for Anchor instruction and event payloads.
//!
//! This crate provides:
//! - A byte [`Cursor`] with fixed-layout little-endian primitive reads
//! - Anchor [`Discriminator`]s (`sha256("<namespace>:<name>")[..8]`)
//! - [`Schema`]s and a [`SchemaRegistry`] that dispatches a payload to the
//!   schema whose discriminator prefixes it
//! - Transaction-level decoding over a program's instruction and event
//!   schemas, with per-candidate failure reporting
//! - Formatting and snapshot utilities, and schema sets for a few programs
//!
//! Decoding is pure and synchronous. Registries are immutable once built and
//! can be shared across threads.

pub use solana_pubkey;
pub use solana_signature;

mod core;
pub mod config;
pub mod cursor;
pub mod discriminator;
pub mod error;
pub mod formatter;
pub mod primitives;
pub mod programs;
pub mod rpc;
pub mod schema;
pub mod snapshot;
pub mod transaction;

pub use core::{DecodedField, RecordFields};

pub use config::{DecoderConfig, DispatchPriority, LogVerbosity};
pub use cursor::Cursor;
pub use discriminator::{
    Discriminator, DISCRIMINATOR_SIZE, EVENT_IX_TAG, SIGHASH_ACCOUNT_NAMESPACE,
    SIGHASH_EVENT_NAMESPACE, SIGHASH_GLOBAL_NAMESPACE,
};
pub use error::{DecodeError, DispatchError, InstructionError, RegistryError, TransactionError};
pub use formatter::RecordFormatter;
pub use primitives::Primitive;
pub use rpc::RpcTransaction;
pub use schema::{decode_events, decode_structs, DecodeFn, DecodedRecord, Schema, SchemaRegistry};
pub use snapshot::TransactionSnapshot;
pub use transaction::{
    CandidateInstruction, ItemFailure, ParsedRecord, ProgramDecoder, ProgramSchemas, RecordKind,
    TransactionRecords,
};
