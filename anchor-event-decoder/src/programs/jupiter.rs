//! Jupiter aggregator v6 events.
//!
//! Jupiter emits one `SwapEvent` per route hop and a `FeeEvent` when a
//! platform fee is taken, both through `emit_cpi!`.

use solana_pubkey::Pubkey;

use crate::{
    core::{DecodedField, RecordFields},
    cursor::Cursor,
    error::Result,
    schema::Schema,
    transaction::ProgramSchemas,
};

pub const JUPITER_V6_PROGRAM_ID: Pubkey =
    solana_pubkey::pubkey!("JUP6LkbZbjS1jKKwapdHNy74zcZ3tLUZoi5QNyVTaV4");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapEvent {
    pub amm: Pubkey,
    pub input_mint: Pubkey,
    pub input_amount: u64,
    pub output_mint: Pubkey,
    pub output_amount: u64,
}

impl SwapEvent {
    pub fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            amm: cursor.read_pubkey()?,
            input_mint: cursor.read_pubkey()?,
            input_amount: cursor.read_u64()?,
            output_mint: cursor.read_pubkey()?,
            output_amount: cursor.read_u64()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeEvent {
    pub account: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
}

impl FeeEvent {
    pub fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            account: cursor.read_pubkey()?,
            mint: cursor.read_pubkey()?,
            amount: cursor.read_u64()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JupiterRecord {
    Swap(SwapEvent),
    Fee(FeeEvent),
}

impl RecordFields for JupiterRecord {
    fn fields(&self) -> Vec<DecodedField> {
        match self {
            JupiterRecord::Swap(ev) => vec![
                DecodedField::new("amm", ev.amm),
                DecodedField::new("input_mint", ev.input_mint),
                DecodedField::new("input_amount", ev.input_amount),
                DecodedField::new("output_mint", ev.output_mint),
                DecodedField::new("output_amount", ev.output_amount),
            ],
            JupiterRecord::Fee(ev) => vec![
                DecodedField::new("account", ev.account),
                DecodedField::new("mint", ev.mint),
                DecodedField::new("amount", ev.amount),
            ],
        }
    }
}

pub fn swap_event_schema() -> Schema<JupiterRecord> {
    Schema::event("SwapEvent", "SwapEvent", |c| SwapEvent::decode(c).map(JupiterRecord::Swap))
}

pub fn fee_event_schema() -> Schema<JupiterRecord> {
    Schema::event("FeeEvent", "FeeEvent", |c| FeeEvent::decode(c).map(JupiterRecord::Fee))
}

/// Jupiter has no instruction schemas here; only its events are decoded.
pub fn schemas() -> ProgramSchemas<JupiterRecord> {
    ProgramSchemas {
        program_id: JUPITER_V6_PROGRAM_ID,
        program_name: "Jupiter Aggregator v6",
        instructions: vec![],
        events: vec![swap_event_schema(), fee_event_schema()],
    }
}
