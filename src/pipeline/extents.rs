//! Geographic extent resolution

use serde_json::Number;

use crate::{
    error::{PipelineError, PipelineResult},
    models::{record::ExtraFields, BoundingBox, Extent, PipelineVariant, Record, RecordRole},
};

use super::RecordSet;

pub const BOUNDING_EXTENT: &str = "bounding";

/// Smallest box covering all `boxes`: min west, max east, min south, max north.
///
/// No antimeridian handling. An empty input is an error. Each coordinate is
/// taken as written from the box it came from, so integers stay integers.
pub fn resolve_bboxes(boxes: &[BoundingBox]) -> PipelineResult<BoundingBox> {
    let (first, rest) = boxes.split_first().ok_or(PipelineError::EmptyBoundingBoxes)?;
    let start = BoundingBox {
        extra: ExtraFields::new(),
        ..first.clone()
    };

    Ok(rest.iter().fold(start, |acc, b| BoundingBox {
        west_longitude: lesser(acc.west_longitude, &b.west_longitude),
        east_longitude: greater(acc.east_longitude, &b.east_longitude),
        south_latitude: lesser(acc.south_latitude, &b.south_latitude),
        north_latitude: greater(acc.north_latitude, &b.north_latitude),
        extra: acc.extra,
    }))
}

fn degrees(n: &Number) -> f64 {
    n.as_f64().unwrap_or(f64::NAN)
}

fn lesser(current: Number, candidate: &Number) -> Number {
    if degrees(candidate) < degrees(&current) {
        candidate.clone()
    } else {
        current
    }
}

fn greater(current: Number, candidate: &Number) -> Number {
    if degrees(candidate) > degrees(&current) {
        candidate.clone()
    } else {
        current
    }
}

/// Extent tagged `bounding` in a record
pub fn bounding_extent(role: RecordRole, record: &Record) -> PipelineResult<&Extent> {
    record
        .identification
        .extents
        .iter()
        .find(|e| e.identifier == BOUNDING_EXTENT)
        .ok_or(PipelineError::MissingField {
            role,
            field: "identification.extents[bounding]",
        })
}

fn first_extent(role: RecordRole, record: &Record) -> PipelineResult<&Extent> {
    record
        .identification
        .extents
        .first()
        .ok_or(PipelineError::MissingField {
            role,
            field: "identification.extents",
        })
}

/// Replace the series extents with one derived from both sides.
///
/// Legacy records take each side's first extent and give the series
/// `[bounding, side-a, side-b]`. Standard records look up each side's
/// `bounding` extent and give the series only the combined `bounding` extent.
/// Side records are not modified.
pub fn apply(mut set: RecordSet, variant: PipelineVariant) -> PipelineResult<RecordSet> {
    let extents = match variant {
        PipelineVariant::Legacy => {
            let mut side_a = first_extent(RecordRole::SideA, &set.side_a)?.clone();
            let mut side_b = first_extent(RecordRole::SideB, &set.side_b)?.clone();
            side_a.identifier = "side-a".to_string();
            side_b.identifier = "side-b".to_string();

            let bbox = resolve_bboxes(&[
                side_a.geographic.bounding_box.clone(),
                side_b.geographic.bounding_box.clone(),
            ])?;
            vec![Extent::bounding(BOUNDING_EXTENT, bbox), side_a, side_b]
        }
        PipelineVariant::Standard => {
            let side_a = bounding_extent(RecordRole::SideA, &set.side_a)?;
            let side_b = bounding_extent(RecordRole::SideB, &set.side_b)?;

            let bbox = resolve_bboxes(&[
                side_a.geographic.bounding_box.clone(),
                side_b.geographic.bounding_box.clone(),
            ])?;
            vec![Extent::bounding(BOUNDING_EXTENT, bbox)]
        }
    };

    set.series.identification.extents = extents;
    Ok(set)
}
