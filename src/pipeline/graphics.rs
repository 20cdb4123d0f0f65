//! Graphic overview cross-linking (legacy records)

use crate::{
    error::{PipelineError, PipelineResult},
    models::{GraphicOverview, Record, RecordRole},
};

use super::RecordSet;

fn first_overview(role: RecordRole, record: &Record) -> PipelineResult<GraphicOverview> {
    record
        .identification
        .graphic_overviews
        .first()
        .cloned()
        .ok_or(PipelineError::MissingField {
            role,
            field: "identification.graphic_overviews",
        })
}

fn relabel(overview: &GraphicOverview, identifier: &str) -> GraphicOverview {
    GraphicOverview {
        identifier: identifier.to_string(),
        ..overview.clone()
    }
}

/// Share overviews across the set.
///
/// The series keeps its own overview followed by copies of each side's
/// (`side_a`, `side_b`); each side keeps its own followed by a copy of the
/// series overview (`covers`).
pub fn apply(mut set: RecordSet) -> PipelineResult<RecordSet> {
    let series = first_overview(RecordRole::Series, &set.series)?;
    let side_a = first_overview(RecordRole::SideA, &set.side_a)?;
    let side_b = first_overview(RecordRole::SideB, &set.side_b)?;

    let covers = relabel(&series, "covers");
    set.series.identification.graphic_overviews = vec![
        series,
        relabel(&side_a, "side_a"),
        relabel(&side_b, "side_b"),
    ];
    set.side_a.identification.graphic_overviews = vec![side_a, covers.clone()];
    set.side_b.identification.graphic_overviews = vec![side_b, covers];
    Ok(set)
}
