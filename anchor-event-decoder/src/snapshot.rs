//! JSON-serializable snapshots of decoded transactions (for insta).

use serde::Serialize;

use crate::{
    core::{DecodedField, RecordFields},
    transaction::{ItemFailure, ParsedRecord, TransactionRecords},
};

/// JSON-serializable snapshot of one program's records in a transaction.
#[derive(Debug, Serialize)]
pub struct TransactionSnapshot {
    pub program: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    pub records: Vec<RecordSnapshot>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<FailureSnapshot>,
}

/// JSON-serializable snapshot of a decoded record.
#[derive(Debug, Serialize)]
pub struct RecordSnapshot {
    pub index: usize,
    pub kind: String,
    pub name: String,
    pub fields: Vec<FieldSnapshot>,
}

/// JSON-serializable snapshot of a decoded field.
#[derive(Debug, Serialize)]
pub struct FieldSnapshot {
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FieldSnapshot>,
}

/// JSON-serializable snapshot of a candidate that failed to decode.
#[derive(Debug, Serialize)]
pub struct FailureSnapshot {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub error: String,
}

impl TransactionSnapshot {
    pub fn new<T: RecordFields>(
        program: impl Into<String>,
        signature: Option<String>,
        records: &TransactionRecords<T>,
    ) -> Self {
        Self {
            program: program.into(),
            signature,
            records: records.records.iter().map(record_to_snapshot).collect(),
            failures: records.failures.iter().map(failure_to_snapshot).collect(),
        }
    }
}

fn record_to_snapshot<T: RecordFields>(record: &ParsedRecord<T>) -> RecordSnapshot {
    RecordSnapshot {
        index: record.index,
        kind: record.kind.to_string(),
        name: record.name().to_string(),
        fields: record.record.fields().iter().map(field_to_snapshot).collect(),
    }
}

fn field_to_snapshot(field: &DecodedField) -> FieldSnapshot {
    FieldSnapshot {
        name: field.name.clone(),
        value: field.value.clone(),
        children: field.children.iter().map(field_to_snapshot).collect(),
    }
}

fn failure_to_snapshot(failure: &ItemFailure) -> FailureSnapshot {
    FailureSnapshot {
        index: failure.index,
        kind: failure.kind.map(|k| k.to_string()),
        error: failure.error.to_string(),
    }
}
