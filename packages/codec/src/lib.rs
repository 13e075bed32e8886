//! # Definition Codec
//!
//! Converts between an ordered collection of definition records and the
//! multi-document YAML text the console's code pane edits.
//!
//! ```text
//! encode: Vec<DefinitionRecord> ──strip view state──▶ YAML documents ── "---" ──▶ text
//! decode: text ── "---" ──▶ YAML documents ──▶ Vec<DefinitionRecord> | CodecError
//! ```
//!
//! Decoding is all-or-nothing: if any document fails to parse, the whole
//! decode fails with the index of the offending document and no partial
//! collection is surfaced. Encoding strips ephemeral view state from every
//! record, so round-tripping can never leak editor state into persisted
//! text.

mod error;

pub use error::CodecError;

use ballast_definitions::DefinitionRecord;
use serde::Deserialize;
use serde_yaml::Value;

/// Delimiter line between serialized documents.
pub const DOCUMENT_DELIMITER: &str = "---\n";

/// Decode multi-document YAML text into a collection of definition records.
///
/// Documents are separated by a literal `---` line. Blank documents are
/// skipped; an empty buffer decodes to an empty collection. Document order
/// is preserved.
pub fn decode_definitions(text: &str) -> Result<Vec<DefinitionRecord>, CodecError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut records = Vec::new();
    for (index, document) in serde_yaml::Deserializer::from_str(text).enumerate() {
        let value = Value::deserialize(document).map_err(|error| CodecError::Parse {
            document: index,
            message: error.to_string(),
        })?;
        if value.is_null() {
            continue;
        }

        let record: DefinitionRecord =
            serde_yaml::from_value(value).map_err(|error| CodecError::Parse {
                document: index,
                message: error.to_string(),
            })?;
        if record.id().is_empty() {
            return Err(CodecError::Validation {
                document: index,
                message: format!("{} definition is missing an id", record.kind()),
            });
        }

        records.push(record);
    }

    Ok(records)
}

/// Encode a collection of definition records as multi-document YAML text.
///
/// Emits documents in collection iteration order, joined by the same
/// delimiter [`decode_definitions`] splits on. View state is stripped from
/// every record before emission.
pub fn encode_definitions(records: &[DefinitionRecord]) -> Result<String, CodecError> {
    let mut documents = Vec::with_capacity(records.len());
    for record in records {
        let stripped = record.without_view_state();
        let document = serde_yaml::to_string(&stripped)
            .map_err(|error| CodecError::Serialize(error.to_string()))?;
        documents.push(document);
    }

    Ok(documents.join(DOCUMENT_DELIMITER))
}
