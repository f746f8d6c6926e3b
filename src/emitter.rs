// 📤 Emitter - Stage 4 of the rename pipeline
// Back to input order, one renamed filename per line

use crate::error::ClassifyError;
use crate::grouper::CityGroups;
use crate::parser::{PhotoEntry, RECORD_DELIMITER};
use tracing::debug;

/// Flatten every city bucket and restore arrival order
pub fn collect_in_arrival_order(groups: CityGroups) -> Vec<PhotoEntry> {
    let mut entries: Vec<PhotoEntry> = groups.into_inner().into_values().flatten().collect();
    entries.sort_by_key(|e| e.sequence);
    entries
}

/// Render `<city><id>.<ext>\n` for each entry, last line included
pub fn render(entries: &[PhotoEntry]) -> Result<String, ClassifyError> {
    let mut output = String::new();
    for entry in entries {
        let renamed = entry.renamed().ok_or(ClassifyError::MissingId {
            sequence: entry.sequence,
        })?;
        output.push_str(&renamed);
        output.push(RECORD_DELIMITER);
    }
    Ok(output)
}

/// Named groups → final output string
pub fn emit(groups: CityGroups) -> Result<String, ClassifyError> {
    let entries = collect_in_arrival_order(groups);
    let output = render(&entries)?;
    debug!(lines = entries.len(), "emitted renamed photos");
    Ok(output)
}
