// 📸 Photo Classifier - Pipeline entry points
// parse → group by city → assign ids → emit in arrival order

use crate::emitter::{collect_in_arrival_order, emit};
use crate::error::ClassifyError;
use crate::grouper::group_by_city;
use crate::namer::assign_ids;
use crate::parser::parse_records;
use crate::plan::RenamePlan;
use tracing::debug;

/// Rename a batch of photo records
///
/// Input: one `<filename>, <city>, <yyyy-MM-dd HH:mm:ss>` record per line.
/// Output: one `<city><id>.<extension>` per line, in input order, every line
/// newline-terminated. Empty input gives empty output.
///
/// Pure function: every call owns its own state, so repeated or concurrent
/// calls cannot affect each other.
///
/// # Example
/// ```
/// let out = photo_classifier::classify("a.jpg,X,2020-01-01 00:00:01\nb.jpg,X,2020-01-01 00:00:00\n").unwrap();
/// assert_eq!(out, "X2.jpg\nX1.jpg\n");
/// ```
pub fn classify(input: &str) -> Result<String, ClassifyError> {
    if input.is_empty() {
        return Ok(String::new());
    }

    let entries = parse_records(input)?;
    let groups = assign_ids(group_by_city(entries));
    emit(groups)
}

/// Same pipeline as [`classify`], returning the structured plan
pub fn build_plan(input: &str) -> Result<RenamePlan, ClassifyError> {
    if input.is_empty() {
        return Ok(RenamePlan::default());
    }

    let entries = parse_records(input)?;
    let groups = assign_ids(group_by_city(entries));
    let ordered = collect_in_arrival_order(groups);
    let plan = RenamePlan::from_entries(&ordered)?;

    debug!(renames = plan.len(), cities = plan.cities.len(), "built rename plan");
    Ok(plan)
}
