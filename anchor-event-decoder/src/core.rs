//! Display representation of decoded records.

use crate::schema::DecodedRecord;

/// A decoded record field for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedField {
    /// Field name
    pub name: String,
    /// Field value as string
    pub value: String,
    /// Optional nested fields (for complex types)
    pub children: Vec<DecodedField>,
}

impl DecodedField {
    /// Create a simple field with name and value.
    pub fn new(name: impl Into<String>, value: impl ToString) -> Self {
        Self {
            name: name.into(),
            value: value.to_string(),
            children: Vec::new(),
        }
    }

    /// Create a field with nested children.
    pub fn with_children(name: impl Into<String>, children: Vec<DecodedField>) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            children,
        }
    }
}

/// Implemented by typed records so they can be formatted and snapshotted
/// without knowing their concrete shape.
pub trait RecordFields {
    fn fields(&self) -> Vec<DecodedField>;
}

impl<T: RecordFields> RecordFields for DecodedRecord<T> {
    fn fields(&self) -> Vec<DecodedField> {
        self.data.fields()
    }
}
