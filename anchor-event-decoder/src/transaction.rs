//! Transaction-level decoding: run one program's schemas over every candidate
//! instruction of a transaction.
//!
//! Candidates are filtered by program id, then tried against the instruction
//! and event registries in the configured order. A candidate that fails to
//! decode is recorded in [`TransactionRecords::failures`] and the remaining
//! candidates are still decoded.

use std::{borrow::Cow, fmt};

use solana_instruction::Instruction;
use solana_pubkey::Pubkey;
use tracing::{debug, warn};

use crate::{
    config::{DecoderConfig, DispatchPriority},
    error::{DispatchError, InstructionError, RegistryError},
    schema::{DecodedRecord, Schema, SchemaRegistry},
};

/// An instruction that may carry a payload for the decoder.
pub trait CandidateInstruction {
    /// Program the instruction targets, `None` if it cannot be determined.
    fn program_id(&self) -> Option<Pubkey>;

    /// Raw instruction data. `Ok(None)` when the source has no raw data
    /// (e.g. an instruction the RPC node already parsed).
    fn data(&self) -> Result<Option<Cow<'_, [u8]>>, InstructionError>;
}

impl CandidateInstruction for Instruction {
    fn program_id(&self) -> Option<Pubkey> {
        Some(self.program_id)
    }

    fn data(&self) -> Result<Option<Cow<'_, [u8]>>, InstructionError> {
        Ok(Some(Cow::Borrowed(&self.data)))
    }
}

impl<C: CandidateInstruction + ?Sized> CandidateInstruction for &C {
    fn program_id(&self) -> Option<Pubkey> {
        (**self).program_id()
    }

    fn data(&self) -> Result<Option<Cow<'_, [u8]>>, InstructionError> {
        (**self).data()
    }
}

/// Category of the schema set a record was decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Instruction,
    Event,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Instruction => "instruction",
            RecordKind::Event => "event",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DispatchPriority {
    fn order(self) -> [RecordKind; 2] {
        match self {
            DispatchPriority::InstructionsFirst => [RecordKind::Instruction, RecordKind::Event],
            DispatchPriority::EventsFirst => [RecordKind::Event, RecordKind::Instruction],
        }
    }
}

/// Schema sets of one program.
#[derive(Debug, Clone)]
pub struct ProgramSchemas<T> {
    pub program_id: Pubkey,
    pub program_name: &'static str,
    pub instructions: Vec<Schema<T>>,
    pub events: Vec<Schema<T>>,
}

/// A decoded record tagged with its category and candidate position.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecord<T> {
    /// Position of the candidate in the input sequence.
    pub index: usize,
    pub kind: RecordKind,
    pub record: DecodedRecord<T>,
}

impl<T> ParsedRecord<T> {
    pub fn name(&self) -> &'static str {
        self.record.name
    }

    pub fn data(&self) -> &T {
        &self.record.data
    }
}

/// A candidate that belonged to the program but could not be decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFailure {
    pub index: usize,
    /// Schema set whose discriminator matched, if any.
    pub kind: Option<RecordKind>,
    pub error: InstructionError,
}

/// Output of decoding a sequence of candidates.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecords<T> {
    /// Records in encounter order.
    pub records: Vec<ParsedRecord<T>>,
    pub failures: Vec<ItemFailure>,
}

impl<T> Default for TransactionRecords<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            failures: Vec::new(),
        }
    }
}

impl<T> TransactionRecords<T> {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.failures.is_empty()
    }

    pub fn instructions(&self) -> impl Iterator<Item = &ParsedRecord<T>> {
        self.records
            .iter()
            .filter(|r| r.kind == RecordKind::Instruction)
    }

    pub fn events(&self) -> impl Iterator<Item = &ParsedRecord<T>> {
        self.records.iter().filter(|r| r.kind == RecordKind::Event)
    }
}

/// Prebuilt registries for one program.
#[derive(Debug, Clone)]
pub struct ProgramDecoder<T> {
    program_id: Pubkey,
    program_name: &'static str,
    instructions: SchemaRegistry<T>,
    events: SchemaRegistry<T>,
}

impl<T> ProgramDecoder<T> {
    pub fn new(schemas: ProgramSchemas<T>) -> Result<Self, RegistryError> {
        Ok(Self {
            program_id: schemas.program_id,
            program_name: schemas.program_name,
            instructions: SchemaRegistry::new(schemas.instructions)?,
            events: SchemaRegistry::new(schemas.events)?,
        })
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    pub fn program_name(&self) -> &'static str {
        self.program_name
    }

    pub fn instructions(&self) -> &SchemaRegistry<T> {
        &self.instructions
    }

    pub fn events(&self) -> &SchemaRegistry<T> {
        &self.events
    }

    /// Decode one instruction's data, trying the schema sets in `priority`
    /// order. At most one record is produced.
    pub fn dispatch(
        &self,
        data: &[u8],
        priority: DispatchPriority,
    ) -> Result<Option<(RecordKind, DecodedRecord<T>)>, (RecordKind, DispatchError)> {
        for kind in priority.order() {
            let result = match kind {
                RecordKind::Instruction => self.instructions.dispatch(data),
                RecordKind::Event => self.events.dispatch_event(data),
            };
            match result {
                Ok(Some(record)) => return Ok(Some((kind, record))),
                Ok(None) => {}
                Err(err) => return Err((kind, err)),
            }
        }
        Ok(None)
    }

    /// Decode every candidate addressed to this decoder's program.
    pub fn decode_candidates<C: CandidateInstruction>(
        &self,
        candidates: impl IntoIterator<Item = C>,
        config: &DecoderConfig,
    ) -> TransactionRecords<T> {
        let program_id = self.program_id;
        self.decode_candidates_where(candidates, |id| *id == program_id, config)
    }

    /// Decode every candidate whose program id satisfies `is_program`.
    pub fn decode_candidates_where<C: CandidateInstruction>(
        &self,
        candidates: impl IntoIterator<Item = C>,
        is_program: impl Fn(&Pubkey) -> bool,
        config: &DecoderConfig,
    ) -> TransactionRecords<T> {
        let mut out = TransactionRecords::default();

        for (index, candidate) in candidates.into_iter().enumerate() {
            if !candidate.program_id().is_some_and(|id| is_program(&id)) {
                continue;
            }
            let data = match candidate.data() {
                Ok(Some(data)) => data,
                Ok(None) => continue,
                Err(error) => {
                    self.record_failure(&mut out, index, None, error, config);
                    continue;
                }
            };

            match self.dispatch(&data, config.priority) {
                Ok(Some((kind, record))) => {
                    debug!(
                        program = self.program_name,
                        index,
                        kind = kind.as_str(),
                        name = record.name,
                        "matched candidate"
                    );
                    out.records.push(ParsedRecord {
                        index,
                        kind,
                        record,
                    });
                }
                Ok(None) => {}
                Err((kind, error)) => {
                    self.record_failure(&mut out, index, Some(kind), error.into(), config);
                }
            }
        }

        out
    }

    fn record_failure(
        &self,
        out: &mut TransactionRecords<T>,
        index: usize,
        kind: Option<RecordKind>,
        error: InstructionError,
        config: &DecoderConfig,
    ) {
        if config.log_failures {
            warn!(
                program = self.program_name,
                index,
                kind = kind.map(|k| k.as_str()),
                %error,
                "failed to decode candidate"
            );
        }
        out.failures.push(ItemFailure { index, kind, error });
    }
}
