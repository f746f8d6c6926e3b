// Photo Classifier - Core Library
// Exposes the rename pipeline for the CLI, the API server, and tests

pub mod classifier;
pub mod emitter;
pub mod error;
pub mod grouper;
pub mod logging;
pub mod namer;
pub mod parser;
pub mod plan;

// Re-export commonly used types
pub use classifier::{build_plan, classify};
pub use emitter::{collect_in_arrival_order, emit, render};
pub use error::ClassifyError;
pub use grouper::{group_by_city, CityGroups};
pub use namer::{assign_ids, format_id, id_width};
pub use parser::{parse_record, parse_records, parse_timestamp, split_filename, PhotoEntry};
pub use plan::{CitySummary, PlannedRename, RenamePlan};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
