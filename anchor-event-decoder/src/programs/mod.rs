//! Schema sets for Anchor programs, one module per program.
//!
//! Each module exposes its program id, a closed enum of the records it
//! decodes, and a `schemas()` constructor for [`ProgramDecoder`](crate::ProgramDecoder).

pub mod jupiter;
pub mod meteora_dlmm;

pub use jupiter::{JupiterRecord, JUPITER_V6_PROGRAM_ID};
pub use meteora_dlmm::{MeteoraDlmmRecord, METEORA_DLMM_PROGRAM_ID};
