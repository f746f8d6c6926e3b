// 🏗️ Record Parser - Stage 1 of the rename pipeline
// Raw batch text → ordered PhotoEntry values with arrival sequence numbers

use crate::error::ClassifyError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

// ============================================================================
// INPUT FORMAT
// ============================================================================

pub const RECORD_DELIMITER: char = '\n';
pub const FIELD_DELIMITER: char = ',';
pub const EXTENSION_DELIMITER: char = '.';

/// chrono pattern equivalent of `yyyy-MM-dd HH:mm:ss`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Minimum fields per record: filename, city, timestamp
const REQUIRED_FIELDS: usize = 3;

// ============================================================================
// CORE TYPES
// ============================================================================

/// PhotoEntry - One parsed photo record
///
/// Built once by the parser. The namer hands back a copy carrying
/// `assigned_id` (see [`PhotoEntry::with_assigned_id`]); nothing else changes
/// after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoEntry {
    /// Filename without extension, as supplied
    pub original_name: String,

    /// Suffix after the last '.'
    pub extension: String,

    /// Grouping key, verbatim (whitespace included)
    pub city: String,

    pub captured_at: NaiveDateTime,

    /// Position in the input batch, starting at 0
    pub sequence: usize,

    /// Zero-padded position inside the city group (None until named)
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_id: Option<String>,
}

impl PhotoEntry {
    pub fn new(
        original_name: String,
        extension: String,
        city: String,
        captured_at: NaiveDateTime,
        sequence: usize,
    ) -> Self {
        PhotoEntry {
            original_name,
            extension,
            city,
            captured_at,
            sequence,
            assigned_id: None,
        }
    }

    /// Builder pattern: attach the id computed by the namer
    pub fn with_assigned_id(mut self, id: String) -> Self {
        self.assigned_id = Some(id);
        self
    }

    /// Ordering inside a city group: timestamp first, arrival breaks ties
    pub fn order_key(&self) -> (NaiveDateTime, usize) {
        (self.captured_at, self.sequence)
    }

    /// Filename as it appeared in the input
    pub fn original_filename(&self) -> String {
        format!("{}{}{}", self.original_name, EXTENSION_DELIMITER, self.extension)
    }

    /// `<city><id>.<extension>`, or None before naming
    pub fn renamed(&self) -> Option<String> {
        self.assigned_id
            .as_ref()
            .map(|id| format!("{}{}{}{}", self.city, id, EXTENSION_DELIMITER, self.extension))
    }
}

// ============================================================================
// PARSING
// ============================================================================

/// Parse a whole batch into entries, in input order
///
/// Trailing empty records are dropped so `"a\nb\n"` and `"a\nb"` parse the
/// same. Any bad record fails the whole batch.
///
/// The arrival counter is the record index, so every call starts again at 0.
pub fn parse_records(input: &str) -> Result<Vec<PhotoEntry>, ClassifyError> {
    let mut records: Vec<&str> = input.split(RECORD_DELIMITER).collect();
    while records.last().map_or(false, |r| r.is_empty()) {
        records.pop();
    }

    let entries = records
        .iter()
        .enumerate()
        .map(|(sequence, record)| parse_record(record, sequence))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(records = entries.len(), "parsed photo records");
    Ok(entries)
}

/// Parse one record: `<filename>,<city>,<timestamp>`
///
/// The city is kept exactly as written, so `"a.jpg, Warsaw, ..."` has city
/// `" Warsaw"`. Only the timestamp is trimmed. Extra fields are ignored.
pub fn parse_record(record: &str, sequence: usize) -> Result<PhotoEntry, ClassifyError> {
    let line = sequence + 1;

    if record.is_empty() {
        return Err(ClassifyError::structural(line, record, "empty record"));
    }

    let fields: Vec<&str> = record.split(FIELD_DELIMITER).collect();
    if fields.len() < REQUIRED_FIELDS {
        return Err(ClassifyError::structural(
            line,
            record,
            &format!("expected {} fields, found {}", REQUIRED_FIELDS, fields.len()),
        ));
    }

    let (name, extension) = split_filename(fields[0]).ok_or_else(|| {
        ClassifyError::structural(line, record, "filename has no extension")
    })?;

    let timestamp_text = fields[2].trim();
    let captured_at = parse_timestamp(timestamp_text).ok_or_else(|| ClassifyError::Timestamp {
        line,
        value: timestamp_text.to_string(),
    })?;

    trace!(sequence, city = %fields[1], %captured_at, "parsed record");

    Ok(PhotoEntry::new(
        name.to_string(),
        extension.to_string(),
        fields[1].to_string(),
        captured_at,
        sequence,
    ))
}

/// Split `name.ext` on the last '.'
///
/// Returns None when there is no '.' or the extension is empty.
/// `archive.tar.gz` → `("archive.tar", "gz")`.
pub fn split_filename(filename: &str) -> Option<(&str, &str)> {
    let (name, extension) = filename.rsplit_once(EXTENSION_DELIMITER)?;
    if extension.is_empty() {
        return None;
    }
    Some((name, extension))
}

/// Parse `yyyy-MM-dd HH:mm:ss` strictly
///
/// chrono alone accepts short fields like `2013-9-5`, so the fixed layout is
/// checked before handing the text to chrono for calendar validation.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    if !has_timestamp_shape(text) {
        return None;
    }
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).ok()
}

fn has_timestamp_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    if bytes.len() != 19 {
        return false;
    }

    bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        10 => *b == b' ',
        13 | 16 => *b == b':',
        _ => b.is_ascii_digit(),
    })
}
