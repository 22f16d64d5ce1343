/// Verdict matrix decoding - pure functions over one input line at a time
///
/// A result record is one line of 18 whitespace-separated fields: a model
/// identifier, a 16-character verdict string (one code per query slot), and
/// sixteen payload tokens carried through opaquely. Decoding is streaming:
/// nothing is retained across lines, so input size is unbounded.
use crate::config::types::*;
use serde::Serialize;
use std::fmt;
use std::io::{BufRead, Write};

/// Number of query slots in one verdict record.
pub const SLOT_COUNT: usize = 16;

/// Total field count of a well-formed record: model id + verdict string +
/// one payload per slot.
pub const FIELD_COUNT: usize = 2 + SLOT_COUNT;

/// One parsed result record, before per-slot classification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerdictRecord {
    /// Model identifier (field 0)
    pub model: String,
    /// Verdict codes, one per slot (field 1)
    pub codes: Vec<char>,
    /// Opaque payload tokens (fields 2..18), one per slot
    pub payloads: Vec<String>,
}

/// One decoded report entry for a single query slot.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct VerdictEntry {
    pub model: String,
    pub slot: usize,
    pub verdict: Verdict,
    pub payload: String,
}

impl fmt::Display for VerdictEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{:02} {} {}",
            self.model,
            self.slot,
            self.verdict.label(),
            self.payload
        )
    }
}

impl VerdictRecord {
    /// Parse one input line into a record.
    ///
    /// A field count other than 18 is a malformed record and poisons the
    /// whole run: the caller must not emit anything for this line and must
    /// not continue to later lines. `line_no` is 1-based, for diagnostics.
    pub fn parse(line: &str, line_no: usize) -> Result<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != FIELD_COUNT {
            return Err(ReportError::MalformedRecord {
                line_no,
                found: fields.len(),
            });
        }

        let codes: Vec<char> = fields[1].chars().collect();
        if codes.len() != SLOT_COUNT {
            return Err(ReportError::MalformedVerdictString {
                line_no,
                found: codes.len(),
            });
        }

        Ok(VerdictRecord {
            model: fields[0].to_string(),
            codes,
            payloads: fields[2..].iter().map(|s| s.to_string()).collect(),
        })
    }

    /// Classify every slot of the record, in increasing slot order.
    ///
    /// Slots whose code is outside the known alphabet are handled per
    /// `policy`; under the default policy they produce no entry.
    pub fn entries(&self, policy: UnknownCodePolicy) -> Result<Vec<VerdictEntry>> {
        let mut out = Vec::with_capacity(SLOT_COUNT);
        for (slot, &code) in self.codes.iter().enumerate() {
            match Verdict::from_code(code) {
                Some(verdict) => out.push(VerdictEntry {
                    model: self.model.clone(),
                    slot,
                    verdict,
                    payload: self.payloads[slot].clone(),
                }),
                None => match policy {
                    UnknownCodePolicy::Ignore => {}
                    UnknownCodePolicy::Warn => {
                        log::warn!(
                            "dropping slot {} of model {}: unknown verdict code {:?}",
                            slot,
                            self.model,
                            code
                        );
                    }
                    UnknownCodePolicy::Fail => {
                        return Err(ReportError::UnknownVerdictCode { code, slot });
                    }
                },
            }
        }
        Ok(out)
    }
}

/// Output shape for decoded entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `<model>-<slot:02> <LABEL> <payload>` text lines
    #[default]
    Text,
    /// One JSON object per entry
    Json,
}

/// Decode a whole verdict file, streaming entries to `writer` line by line.
///
/// The first malformed record aborts the run with no output for that record;
/// everything already written for earlier records stands.
pub fn decode_stream<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    policy: UnknownCodePolicy,
    format: OutputFormat,
) -> Result<()> {
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        // A blank line tokenizes to 0 fields and fails the 18-field
        // precondition like any other malformed record.
        let record = VerdictRecord::parse(&line, idx + 1)?;
        for entry in record.entries(policy)? {
            match format {
                OutputFormat::Text => writeln!(writer, "{}", entry)?,
                OutputFormat::Json => {
                    let json = serde_json::to_string(&entry)
                        .map_err(|e| ReportError::Serialize(e.to_string()))?;
                    writeln!(writer, "{}", json)?;
                }
            }
        }
    }
    Ok(())
}
