//! Metadata record model.
//!
//! Only the fields the processing pipeline reads or writes are typed. Every
//! other field is kept in a flattened `extra` map so a record passes through
//! processing without losing anything the cataloguing tool put in it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Catch-all for fields not modelled explicitly
pub type ExtraFields = Map<String, Value>;

/// One metadata record (series, side A or side B)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub file_identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hierarchy_level: Option<String>,
    pub metadata: Metadata,
    pub identification: Identification,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub distribution: Vec<Distribution>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_stamp: Option<NaiveDate>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identification {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifiers: Vec<Identifier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contacts: Vec<Contact>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub graphic_overviews: Vec<GraphicOverview>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aggregations: Vec<Aggregation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extents: Vec<Extent>,
    /// JSON-encoded mapping, kept as a string in the record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplemental_information: Option<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Resource identifier (ISBN, DOI, catalogue alias...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    pub identifier: String,
    pub namespace: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Named party (person or organisation) within a contact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub individual: Option<Party>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organisation: Option<Party>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub role: Vec<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Contact {
    /// Name shown for this contact: the individual if there is one, otherwise the organisation
    pub fn display_name(&self) -> Option<&str> {
        self.individual
            .as_ref()
            .or(self.organisation.as_ref())
            .map(|party| party.name.as_str())
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.role.iter().any(|r| r == role)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphicOverview {
    pub identifier: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationIdentifier {
    pub identifier: String,
    pub href: String,
    pub namespace: String,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Relationship from this record to another one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    pub identifier: AggregationIdentifier,
    pub association_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initiative_type: Option<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Coordinates keep their JSON number form, so `-75` is written back as `-75`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub west_longitude: Number,
    pub east_longitude: Number,
    pub south_latitude: Number,
    pub north_latitude: Number,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl BoundingBox {
    /// `[west, east, south, north]` in degrees
    pub fn degrees(&self) -> [f64; 4] {
        [
            &self.west_longitude,
            &self.east_longitude,
            &self.south_latitude,
            &self.north_latitude,
        ]
        .map(|n| n.as_f64().unwrap_or(f64::NAN))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeographicExtent {
    pub bounding_box: BoundingBox,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub identifier: String,
    pub geographic: GeographicExtent,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Extent {
    /// Extent with only a geographic bounding box
    pub fn bounding(identifier: impl Into<String>, bounding_box: BoundingBox) -> Self {
        Self {
            identifier: identifier.into(),
            geographic: GeographicExtent {
                bounding_box,
                extra: ExtraFields::new(),
            },
            extra: ExtraFields::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnlineResource {
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub online_resource: Option<OnlineResource>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Distributor and how to obtain the resource from them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distributor: Option<Contact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_option: Option<TransferOption>,
    #[serde(flatten)]
    pub extra: ExtraFields,
}
