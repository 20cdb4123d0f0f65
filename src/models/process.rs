//! Processing options and output documents

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use utoipa::ToSchema;

use super::enums::RecordRole;

/// User-supplied options for one processing run.
/// Empty strings are treated the same as absent values.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProcessOptions {
    /// ISBN of the flat edition
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub isbn_flat: Option<String>,
    /// ISBN of the folded edition
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub isbn_folded: Option<String>,
    /// Sheet number of the map (side records get an `A`/`B` suffix)
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub sheet_number: Option<String>,
    /// Desired contact order
    #[serde(default)]
    pub contact_order: Option<ContactOrdering>,
}

/// Desired final contact order.
///
/// Either one permutation of original contact indices per record, or a list of
/// contact display names applied to every record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ContactOrdering {
    Indices {
        series: Vec<usize>,
        side_a: Vec<usize>,
        side_b: Vec<usize>,
    },
    Names(Vec<String>),
}

/// Serialized record ready to be handed back for download
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OutputDocument {
    pub role: RecordRole,
    /// `<file_identifier>.json`
    pub file_name: String,
    /// Pretty-printed JSON (2-space indent)
    pub content: String,
}
