//! Shared vocabularies used when processing a map record set

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// RecordRole
// ---------------------------------------------------------------------------

/// Position of a record within a two-sided paper map set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecordRole {
    Series,
    SideA,
    SideB,
}

impl RecordRole {
    /// Suffix appended to the sheet number for this record
    pub fn sheet_suffix(&self) -> &'static str {
        match self {
            RecordRole::Series => "",
            RecordRole::SideA => "A",
            RecordRole::SideB => "B",
        }
    }
}

impl std::fmt::Display for RecordRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RecordRole::Series => "series",
            RecordRole::SideA => "side A",
            RecordRole::SideB => "side B",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// IsbnFormat
// ---------------------------------------------------------------------------

/// Physical format an ISBN was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IsbnFormat {
    Flat,
    Folded,
}

impl IsbnFormat {
    pub fn label(&self) -> &'static str {
        match self {
            IsbnFormat::Flat => "Flat",
            IsbnFormat::Folded => "Folded",
        }
    }
}

// ---------------------------------------------------------------------------
// AssociationType
// ---------------------------------------------------------------------------

/// Aggregation association types (ISO 19115 DS_AssociationTypeCode subset)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssociationType {
    IsComposedOf,
    LargerWorkCitation,
    PhysicalReverseOf,
}

impl AssociationType {
    pub fn as_code(&self) -> &'static str {
        match self {
            AssociationType::IsComposedOf => "isComposedOf",
            AssociationType::LargerWorkCitation => "largerWorkCitation",
            AssociationType::PhysicalReverseOf => "physicalReverseOf",
        }
    }
}

impl From<AssociationType> for String {
    fn from(t: AssociationType) -> Self {
        t.as_code().to_string()
    }
}

// ---------------------------------------------------------------------------
// PipelineVariant
// ---------------------------------------------------------------------------

/// Record revision the pipeline is configured for
///
/// `Legacy` records carry graphic overviews, which are cross-linked across the
/// set, and give the series three extents. `Standard` records carry sheet
/// numbers in their supplemental information and a single combined extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PipelineVariant {
    Legacy,
    #[default]
    Standard,
}

impl std::str::FromStr for PipelineVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(PipelineVariant::Legacy),
            "standard" | "" => Ok(PipelineVariant::Standard),
            other => Err(format!("Unknown pipeline variant '{}'", other)),
        }
    }
}

impl std::fmt::Display for PipelineVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineVariant::Legacy => write!(f, "legacy"),
            PipelineVariant::Standard => write!(f, "standard"),
        }
    }
}
