//! Human-readable rendering of decoded transaction records.

use tabled::{builder::Builder, settings::Style, Table};

use crate::{
    config::{DecoderConfig, LogVerbosity},
    core::{DecodedField, RecordFields},
    transaction::TransactionRecords,
};

/// Renders [`TransactionRecords`] as tables.
pub struct RecordFormatter {
    verbosity: LogVerbosity,
}

impl RecordFormatter {
    pub fn new(config: &DecoderConfig) -> Self {
        Self {
            verbosity: config.verbosity,
        }
    }

    /// Format the records of one program.
    pub fn format<T: RecordFields>(
        &self,
        program_name: &str,
        records: &TransactionRecords<T>,
    ) -> String {
        let mut out = format!(
            "{program_name}: {} record(s), {} failure(s)\n",
            records.records.len(),
            records.failures.len()
        );

        if !records.records.is_empty() {
            out.push_str(&format!("{}\n", self.records_table(records)));
        }
        if !records.failures.is_empty() {
            out.push_str(&format!("{}\n", failures_table(records)));
        }
        out
    }

    fn records_table<T: RecordFields>(&self, records: &TransactionRecords<T>) -> Table {
        let mut builder = Builder::default();
        if self.verbosity == LogVerbosity::Brief {
            builder.push_record(["#", "Kind", "Name"]);
        } else {
            builder.push_record(["#", "Kind", "Name", "Fields"]);
        }

        for record in &records.records {
            let mut row = vec![
                record.index.to_string(),
                record.kind.to_string(),
                record.name().to_string(),
            ];
            if self.verbosity != LogVerbosity::Brief {
                row.push(self.render_fields(&record.record.fields()));
            }
            builder.push_record(row);
        }

        let mut table = builder.build();
        table.with(Style::rounded());
        table
    }

    fn render_fields(&self, fields: &[DecodedField]) -> String {
        let mut lines = Vec::with_capacity(fields.len());
        for field in fields {
            if field.children.is_empty() {
                lines.push(format!("{}: {}", field.name, field.value));
            } else if self.verbosity == LogVerbosity::Detailed {
                lines.push(format!("{}:", field.name));
                lines.extend(
                    field
                        .children
                        .iter()
                        .map(|child| format!("  {}: {}", child.name, child.value)),
                );
            } else {
                let inline = field
                    .children
                    .iter()
                    .map(|child| format!("{}={}", child.name, child.value))
                    .collect::<Vec<_>>()
                    .join(", ");
                lines.push(format!("{}: {inline}", field.name));
            }
        }
        lines.join("\n")
    }
}

fn failures_table<T>(records: &TransactionRecords<T>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["#", "Kind", "Error"]);
    for failure in &records.failures {
        builder.push_record([
            failure.index.to_string(),
            failure
                .kind
                .map(|k| k.to_string())
                .unwrap_or_else(|| "-".to_string()),
            failure.error.to_string(),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::rounded());
    table
}
