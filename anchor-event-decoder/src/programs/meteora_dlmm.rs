//! Meteora DLMM (liquidity book) swap instruction and event.
//!
//! The `swap` instruction arguments are plain borsh; the `Swap` event is read
//! field by field since `swap_for_y` accepts any nonzero byte.

use borsh::BorshDeserialize;
use solana_pubkey::Pubkey;

use crate::{
    core::{DecodedField, RecordFields},
    cursor::Cursor,
    error::Result,
    schema::Schema,
    transaction::ProgramSchemas,
};

pub const METEORA_DLMM_PROGRAM_ID: Pubkey =
    solana_pubkey::pubkey!("LBUZKhRxPF3XUpBCjp4YzTKgLccjZhTSDM9YuVaPwxo");

/// Arguments of the `swap` instruction.
#[derive(BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapInstruction {
    pub amount_in: u64,
    pub min_amount_out: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapEvent {
    pub lb_pair: Pubkey,
    pub from: Pubkey,
    pub start_bin_id: i32,
    pub end_bin_id: i32,
    pub amount_in: u64,
    pub amount_out: u64,
    pub swap_for_y: bool,
    pub fee: u64,
    pub protocol_fee: u64,
    pub fee_bps: u128,
    pub host_fee: u64,
}

impl SwapEvent {
    pub fn decode(cursor: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            lb_pair: cursor.read_pubkey()?,
            from: cursor.read_pubkey()?,
            start_bin_id: cursor.read_i32()?,
            end_bin_id: cursor.read_i32()?,
            amount_in: cursor.read_u64()?,
            amount_out: cursor.read_u64()?,
            swap_for_y: cursor.read_bool()?,
            fee: cursor.read_u64()?,
            protocol_fee: cursor.read_u64()?,
            fee_bps: cursor.read_u128()?,
            host_fee: cursor.read_u64()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeteoraDlmmRecord {
    SwapInstruction(SwapInstruction),
    SwapEvent(SwapEvent),
}

impl RecordFields for MeteoraDlmmRecord {
    fn fields(&self) -> Vec<DecodedField> {
        match self {
            MeteoraDlmmRecord::SwapInstruction(ix) => vec![
                DecodedField::new("amount_in", ix.amount_in),
                DecodedField::new("min_amount_out", ix.min_amount_out),
            ],
            MeteoraDlmmRecord::SwapEvent(ev) => vec![
                DecodedField::new("lb_pair", ev.lb_pair),
                DecodedField::new("from", ev.from),
                DecodedField::with_children(
                    "bins",
                    vec![
                        DecodedField::new("start_bin_id", ev.start_bin_id),
                        DecodedField::new("end_bin_id", ev.end_bin_id),
                    ],
                ),
                DecodedField::new("amount_in", ev.amount_in),
                DecodedField::new("amount_out", ev.amount_out),
                DecodedField::new("swap_for_y", ev.swap_for_y),
                DecodedField::with_children(
                    "fees",
                    vec![
                        DecodedField::new("fee", ev.fee),
                        DecodedField::new("protocol_fee", ev.protocol_fee),
                        DecodedField::new("fee_bps", ev.fee_bps),
                        DecodedField::new("host_fee", ev.host_fee),
                    ],
                ),
            ],
        }
    }
}

pub fn swap_instruction_schema() -> Schema<MeteoraDlmmRecord> {
    Schema::instruction("SwapInstruction", "swap", |c| {
        c.read_borsh::<SwapInstruction>()
            .map(MeteoraDlmmRecord::SwapInstruction)
    })
}

/// Anchor names the event struct `Swap`; the record is exposed as `SwapEvent`.
pub fn swap_event_schema() -> Schema<MeteoraDlmmRecord> {
    Schema::event("SwapEvent", "Swap", |c| {
        SwapEvent::decode(c).map(MeteoraDlmmRecord::SwapEvent)
    })
}

pub fn schemas() -> ProgramSchemas<MeteoraDlmmRecord> {
    ProgramSchemas {
        program_id: METEORA_DLMM_PROGRAM_ID,
        program_name: "Meteora DLMM",
        instructions: vec![swap_instruction_schema()],
        events: vec![swap_event_schema()],
    }
}
