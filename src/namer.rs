// 🔢 Namer - Stage 3 of the rename pipeline
// Sequential, zero-padded ids per city. Width follows the city's own size.

use crate::grouper::CityGroups;
use crate::parser::PhotoEntry;
use std::collections::HashMap;
use tracing::trace;

/// Digits needed to print `group_size` in decimal (1..=9 → 1, 10..=99 → 2)
pub fn id_width(group_size: usize) -> usize {
    group_size.to_string().len()
}

/// Left-pad `position` with zeros to `width` digits
pub fn format_id(position: usize, width: usize) -> String {
    format!("{:0width$}", position, width = width)
}

/// Number every city independently, 1-based, in bucket order
///
/// Buckets arrive sorted by `(captured_at, sequence)`, so the earliest photo
/// of each city gets id 1.
pub fn assign_ids(groups: CityGroups) -> CityGroups {
    let named: HashMap<String, Vec<PhotoEntry>> = groups
        .into_inner()
        .into_iter()
        .map(|(city, entries)| {
            let width = id_width(entries.len());
            trace!(city = %city, photos = entries.len(), width, "assigning ids");

            let entries = entries
                .into_iter()
                .enumerate()
                .map(|(index, entry)| entry.with_assigned_id(format_id(index + 1, width)))
                .collect();
            (city, entries)
        })
        .collect();

    CityGroups::from_sorted(named)
}
