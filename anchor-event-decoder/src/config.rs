//! Configuration for transaction-level decoding and output.

use std::env;

/// Which schema set is tried first when a program has both instruction and
/// event schemas. The first match wins; the other set is not consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchPriority {
    #[default]
    InstructionsFirst,
    EventsFirst,
}

impl DispatchPriority {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "instructions" | "instructions-first" | "instruction" => Some(Self::InstructionsFirst),
            "events" | "events-first" | "event" => Some(Self::EventsFirst),
            _ => None,
        }
    }
}

/// How much detail the formatter prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogVerbosity {
    /// Record names only
    Brief,
    /// Top-level fields
    #[default]
    Standard,
    /// Top-level and nested fields, plus failures
    Detailed,
}

impl LogVerbosity {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "brief" => Some(Self::Brief),
            "standard" => Some(Self::Standard),
            "detailed" | "debug" => Some(Self::Detailed),
            _ => None,
        }
    }
}

/// Settings for [`ProgramDecoder`](crate::ProgramDecoder) and
/// [`RecordFormatter`](crate::RecordFormatter).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfig {
    pub priority: DispatchPriority,
    /// Also decode top-level instructions, not just inner (CPI) ones.
    pub include_outer_instructions: bool,
    pub verbosity: LogVerbosity,
    /// Emit a `warn` event for every candidate that fails to decode.
    pub log_failures: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            priority: DispatchPriority::InstructionsFirst,
            include_outer_instructions: false,
            verbosity: LogVerbosity::Standard,
            log_failures: true,
        }
    }
}

impl DecoderConfig {
    /// Detailed output, outer instructions included.
    pub fn debug() -> Self {
        Self {
            include_outer_instructions: true,
            verbosity: LogVerbosity::Detailed,
            ..Self::default()
        }
    }

    /// Defaults overridden by environment variables:
    /// - `ANCHOR_DECODER_PRIORITY`: `instructions` | `events`
    /// - `ANCHOR_DECODER_OUTER`: `true` / `false` (also `1`/`0`, `yes`/`no`, `on`/`off`)
    /// - `ANCHOR_DECODER_VERBOSITY`: `brief` | `standard` | `detailed`
    ///
    /// Unrecognized values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(priority) = lookup("ANCHOR_DECODER_PRIORITY")
            .as_deref()
            .and_then(DispatchPriority::parse)
        {
            config.priority = priority;
        }
        if let Some(outer) = lookup("ANCHOR_DECODER_OUTER")
            .as_deref()
            .and_then(parse_flag)
        {
            config.include_outer_instructions = outer;
        }
        if let Some(verbosity) = lookup("ANCHOR_DECODER_VERBOSITY")
            .as_deref()
            .and_then(LogVerbosity::parse)
        {
            config.verbosity = verbosity;
        }
        config
    }

    pub fn with_priority(mut self, priority: DispatchPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_outer_instructions(mut self, include: bool) -> Self {
        self.include_outer_instructions = include;
        self
    }

    pub fn with_verbosity(mut self, verbosity: LogVerbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_log_failures(mut self, log_failures: bool) -> Self {
        self.log_failures = log_failures;
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
