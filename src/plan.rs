// 📋 Rename Plan - Structured view of one classification run
// Same result as the output string, but keeps original filenames for traceability

use crate::error::ClassifyError;
use crate::namer::id_width;
use crate::parser::{PhotoEntry, RECORD_DELIMITER};
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// PLAN TYPES
// ============================================================================

/// One line of the plan: where a photo came from and what it becomes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedRename {
    pub sequence: usize,

    /// `<original_name>.<extension>`
    pub original: String,

    pub city: String,
    pub captured_at: NaiveDateTime,
    pub assigned_id: String,

    /// `<city><assigned_id>.<extension>`
    pub renamed: String,
}

impl PlannedRename {
    fn from_entry(entry: &PhotoEntry) -> Result<Self, ClassifyError> {
        let missing = || ClassifyError::MissingId {
            sequence: entry.sequence,
        };
        let assigned_id = entry.assigned_id.clone().ok_or_else(missing)?;
        let renamed = entry.renamed().ok_or_else(missing)?;

        Ok(PlannedRename {
            sequence: entry.sequence,
            original: entry.original_filename(),
            city: entry.city.clone(),
            captured_at: entry.captured_at,
            assigned_id,
            renamed,
        })
    }
}

/// Per-city totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitySummary {
    pub city: String,
    pub photos: usize,
    pub id_width: usize,
}

/// RenamePlan - Renames in input order plus a summary sorted by city
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamePlan {
    pub renames: Vec<PlannedRename>,
    pub cities: Vec<CitySummary>,
}

// ============================================================================
// BUILD & EXPORT
// ============================================================================

impl RenamePlan {
    /// Build from named entries already in arrival order
    pub fn from_entries(entries: &[PhotoEntry]) -> Result<Self, ClassifyError> {
        let renames = entries
            .iter()
            .map(PlannedRename::from_entry)
            .collect::<Result<Vec<_>, _>>()?;

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for entry in entries {
            *counts.entry(entry.city.as_str()).or_insert(0) += 1;
        }

        let cities = counts
            .into_iter()
            .map(|(city, photos)| CitySummary {
                city: city.to_string(),
                photos,
                id_width: id_width(photos),
            })
            .collect();

        Ok(RenamePlan { renames, cities })
    }

    pub fn len(&self) -> usize {
        self.renames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }

    /// Same text `classify` returns
    pub fn render(&self) -> String {
        let mut output = String::new();
        for rename in &self.renames {
            output.push_str(&rename.renamed);
            output.push(RECORD_DELIMITER);
        }
        output
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize rename plan as JSON")
    }

    /// CSV with header `sequence,original,city,captured_at,assigned_id,renamed`
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(true)
            .from_writer(Vec::new());

        if self.renames.is_empty() {
            writer.write_record([
                "sequence",
                "original",
                "city",
                "captured_at",
                "assigned_id",
                "renamed",
            ])?;
        }
        for rename in &self.renames {
            writer
                .serialize(rename)
                .with_context(|| format!("Failed to write CSV row {}", rename.sequence))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e))?;
        String::from_utf8(bytes).context("CSV output is not valid UTF-8")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn create_named_entry(name: &str, city: &str, id: &str, sequence: usize) -> PhotoEntry {
        let captured_at = NaiveDate::from_ymd_opt(2013, 9, 5)
            .unwrap()
            .and_hms_opt(14, 8, 15)
            .unwrap();
        PhotoEntry::new(
            name.to_string(),
            "jpg".to_string(),
            city.to_string(),
            captured_at,
            sequence,
        )
        .with_assigned_id(id.to_string())
    }

    fn sample_plan() -> RenamePlan {
        RenamePlan::from_entries(&[
            create_named_entry("photo", "Warsaw", "2", 0),
            create_named_entry("john", "London", "1", 1),
            create_named_entry("photo2", "Warsaw", "1", 2),
        ])
        .unwrap()
    }

    #[test]
    fn test_plan_keeps_original_filenames() {
        let plan = sample_plan();
        assert_eq!(plan.len(), 3);
        assert_eq!(plan.renames[0].original, "photo.jpg");
        assert_eq!(plan.renames[0].renamed, "Warsaw2.jpg");
        assert_eq!(plan.renames[1].original, "john.jpg");
    }

    #[test]
    fn test_city_summary_sorted_by_name() {
        let plan = sample_plan();
        assert_eq!(
            plan.cities,
            vec![
                CitySummary {
                    city: "London".to_string(),
                    photos: 1,
                    id_width: 1
                },
                CitySummary {
                    city: "Warsaw".to_string(),
                    photos: 2,
                    id_width: 1
                },
            ]
        );
    }

    #[test]
    fn test_render() {
        assert_eq!(sample_plan().render(), "Warsaw2.jpg\nLondon1.jpg\nWarsaw1.jpg\n");
    }

    #[test]
    fn test_unnamed_entry_is_rejected() {
        let entry = create_named_entry("a", "X", "1", 5);
        let unnamed = PhotoEntry {
            assigned_id: None,
            ..entry
        };
        assert_eq!(
            RenamePlan::from_entries(&[unnamed]).unwrap_err(),
            ClassifyError::MissingId { sequence: 5 }
        );
    }

    #[test]
    fn test_to_json() {
        let json = sample_plan().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["renames"][2]["renamed"], "Warsaw1.jpg");
        assert_eq!(value["renames"][0]["captured_at"], "2013-09-05T14:08:15");
        assert_eq!(value["cities"][1]["photos"], 2);
    }

    #[test]
    fn test_to_csv() {
        let csv = sample_plan().to_csv().unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "sequence,original,city,captured_at,assigned_id,renamed"
        );
        assert_eq!(
            lines[1],
            "0,photo.jpg,Warsaw,2013-09-05T14:08:15,2,Warsaw2.jpg"
        );
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_to_csv_empty_plan_has_header() {
        let csv = RenamePlan::default().to_csv().unwrap();
        assert_eq!(
            csv,
            "sequence,original,city,captured_at,assigned_id,renamed\n"
        );
    }
}
