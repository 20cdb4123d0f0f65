//! Sheet number propagation into supplemental information

use serde_json::Value;

use crate::{
    error::{PipelineError, PipelineResult},
    models::RecordRole,
};

use super::{embedded_json, RecordSet};

pub const SHEET_NUMBER_KEY: &str = "sheet_number";

/// Set `sheet_number` inside an encoded supplemental information mapping
pub fn embed_sheet_number(role: RecordRole, encoded: &str, sheet_number: &str) -> PipelineResult<String> {
    let value: Value = serde_json::from_str(encoded)
        .map_err(|source| PipelineError::MalformedSupplementalInformation { role, source })?;

    let Value::Object(mut info) = value else {
        return Err(PipelineError::SupplementalInformationNotObject { role });
    };
    info.insert(SHEET_NUMBER_KEY.to_string(), Value::String(sheet_number.to_string()));

    embedded_json::to_string(&info).map_err(|source| PipelineError::Serialization { role, source })
}

/// Write the sheet number to every record that has supplemental information.
///
/// The series gets the number as given, sides get it suffixed with `A`/`B`.
/// Records without supplemental information are left alone.
pub fn apply(mut set: RecordSet, sheet_number: Option<&str>) -> PipelineResult<RecordSet> {
    let Some(sheet_number) = sheet_number.filter(|s| !s.is_empty()) else {
        return Ok(set);
    };

    for (role, record) in set.records_mut() {
        if let Some(encoded) = record.identification.supplemental_information.as_deref() {
            let value = format!("{}{}", sheet_number, role.sheet_suffix());
            let updated = embed_sheet_number(role, encoded, &value)?;
            record.identification.supplemental_information = Some(updated);
        }
    }
    Ok(set)
}
