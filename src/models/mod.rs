//! Data models for Mega Zap

pub mod enums;
pub mod process;
pub mod record;

// Re-export commonly used types
pub use enums::{AssociationType, IsbnFormat, PipelineVariant, RecordRole};
pub use process::{ContactOrdering, OutputDocument, ProcessOptions};
pub use record::{
    Aggregation, AggregationIdentifier, BoundingBox, Contact, Distribution, Extent,
    GraphicOverview, Identification, Identifier, Metadata, Record,
};
