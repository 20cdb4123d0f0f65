//! Record set processing pipeline
//!
//! Turns the three records exported for a two-sided paper map (the overall
//! series record and one record per side) into a consistent, publishable set:
//! shared ISBNs, author roles, cross-links between the records, a combined
//! extent, sheet numbers, the publisher distribution and a common date stamp.
//!
//! Each step is a function taking the record set by value and returning the
//! updated set. [`Pipeline::run`] validates the input, clones it once, and
//! threads the copy through the steps configured for the selected
//! [`PipelineVariant`]. The caller's records are never modified; the first
//! failing step aborts the run.

pub mod clock;
pub mod contacts;
pub mod date_stamp;
pub mod distribution;
pub mod embedded_json;
pub mod extents;
pub mod graphics;
pub mod hierarchy;
pub mod identifiers;
pub mod sheet_number;

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    config::PipelineConfig,
    error::{PipelineError, PipelineResult},
    models::{OutputDocument, PipelineVariant, ProcessOptions, Record, RecordRole},
};

pub use clock::{Clock, FixedClock, SystemClock};
pub use extents::resolve_bboxes;

/// The three records of a two-sided map
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet {
    pub series: Record,
    pub side_a: Record,
    pub side_b: Record,
}

impl RecordSet {
    pub fn new(series: Record, side_a: Record, side_b: Record) -> Self {
        Self {
            series,
            side_a,
            side_b,
        }
    }

    pub fn get(&self, role: RecordRole) -> &Record {
        match role {
            RecordRole::Series => &self.series,
            RecordRole::SideA => &self.side_a,
            RecordRole::SideB => &self.side_b,
        }
    }

    pub fn records(&self) -> [(RecordRole, &Record); 3] {
        [
            (RecordRole::Series, &self.series),
            (RecordRole::SideA, &self.side_a),
            (RecordRole::SideB, &self.side_b),
        ]
    }

    pub fn records_mut(&mut self) -> [(RecordRole, &mut Record); 3] {
        [
            (RecordRole::Series, &mut self.series),
            (RecordRole::SideA, &mut self.side_a),
            (RecordRole::SideB, &mut self.side_b),
        ]
    }

    /// Serialize each record as pretty-printed JSON named `<file_identifier>.json`
    pub fn to_documents(&self) -> PipelineResult<Vec<OutputDocument>> {
        self.records()
            .into_iter()
            .map(|(role, record)| {
                let content = serde_json::to_string_pretty(record)
                    .map_err(|source| PipelineError::Serialization { role, source })?;
                Ok(OutputDocument {
                    role,
                    file_name: format!("{}.json", record.file_identifier),
                    content,
                })
            })
            .collect()
    }
}

/// A single transformation applied to the record set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Identifiers,
    ContactRoles,
    ContactOrder,
    GraphicOverviews,
    HierarchyLevel,
    Aggregations,
    Extents,
    SheetNumber,
    Distribution,
    DateStamp,
}

const LEGACY_STEPS: &[Step] = &[
    Step::Identifiers,
    Step::ContactRoles,
    Step::GraphicOverviews,
    Step::Aggregations,
    Step::Extents,
    Step::Distribution,
    Step::DateStamp,
];

const STANDARD_STEPS: &[Step] = &[
    Step::Identifiers,
    Step::ContactRoles,
    Step::ContactOrder,
    Step::HierarchyLevel,
    Step::Aggregations,
    Step::Extents,
    Step::SheetNumber,
    Step::Distribution,
    Step::DateStamp,
];

/// Steps run for a variant, in order
pub fn steps(variant: PipelineVariant) -> &'static [Step] {
    match variant {
        PipelineVariant::Legacy => LEGACY_STEPS,
        PipelineVariant::Standard => STANDARD_STEPS,
    }
}

/// Inputs shared by all steps of one run
pub struct StepContext<'a> {
    pub config: &'a PipelineConfig,
    pub options: &'a ProcessOptions,
    pub variant: PipelineVariant,
    pub today: NaiveDate,
}

impl Step {
    pub fn label(&self) -> &'static str {
        match self {
            Step::Identifiers => "identifiers",
            Step::ContactRoles => "contact roles",
            Step::ContactOrder => "contact order",
            Step::GraphicOverviews => "graphic overviews",
            Step::HierarchyLevel => "hierarchy level",
            Step::Aggregations => "aggregations",
            Step::Extents => "extents",
            Step::SheetNumber => "sheet number",
            Step::Distribution => "distribution options",
            Step::DateStamp => "metadata date stamp",
        }
    }

    pub fn apply(self, set: RecordSet, ctx: &StepContext<'_>) -> PipelineResult<RecordSet> {
        match self {
            Step::Identifiers => Ok(identifiers::apply(set, ctx.options)),
            Step::ContactRoles => Ok(contacts::normalize_roles(set, &ctx.config.maintainer_email)),
            Step::ContactOrder => match &ctx.options.contact_order {
                Some(ordering) => contacts::reorder(set, ordering),
                None => Ok(set),
            },
            Step::GraphicOverviews => graphics::apply(set),
            Step::HierarchyLevel => Ok(hierarchy::set_hierarchy_level(set, &ctx.config.hierarchy_level)),
            Step::Aggregations => Ok(hierarchy::link_aggregations(set, ctx.config)),
            Step::Extents => extents::apply(set, ctx.variant),
            Step::SheetNumber => sheet_number::apply(set, ctx.options.sheet_number.as_deref()),
            Step::Distribution => Ok(distribution::apply(set, &ctx.config.publisher)),
            Step::DateStamp => Ok(date_stamp::apply(set, ctx.today)),
        }
    }
}

/// Check the structure every step of `variant` relies on before anything runs
pub fn validate(set: &RecordSet, variant: PipelineVariant) -> PipelineResult<()> {
    let mut identifiers = HashSet::new();
    for (role, record) in set.records() {
        if record.file_identifier.trim().is_empty() {
            return Err(PipelineError::MissingField {
                role,
                field: "file_identifier",
            });
        }
        if !identifiers.insert(record.file_identifier.as_str()) {
            return Err(PipelineError::DuplicateFileIdentifier(
                record.file_identifier.clone(),
            ));
        }
    }

    for role in [RecordRole::SideA, RecordRole::SideB] {
        let record = set.get(role);
        match variant {
            PipelineVariant::Legacy => {
                if record.identification.extents.is_empty() {
                    return Err(PipelineError::MissingField {
                        role,
                        field: "identification.extents",
                    });
                }
            }
            PipelineVariant::Standard => {
                extents::bounding_extent(role, record)?;
            }
        }
    }

    if variant == PipelineVariant::Legacy {
        for (role, record) in set.records() {
            if record.identification.graphic_overviews.is_empty() {
                return Err(PipelineError::MissingField {
                    role,
                    field: "identification.graphic_overviews",
                });
            }
        }
    }

    Ok(())
}

/// Configured record set processor
#[derive(Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    clock: Arc<dyn Clock>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: PipelineConfig, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process a copy of `input`, leaving `input` untouched
    pub fn run(
        &self,
        variant: PipelineVariant,
        input: &RecordSet,
        options: &ProcessOptions,
    ) -> PipelineResult<RecordSet> {
        validate(input, variant)?;

        let ctx = StepContext {
            config: &self.config,
            options,
            variant,
            today: self.clock.today(),
        };

        let mut set = input.clone();
        for step in steps(variant) {
            tracing::debug!("Setting {}...", step.label());
            set = step.apply(set, &ctx)?;
        }

        tracing::info!(
            "Processed {} record set: series={}, side_a={}, side_b={}",
            variant,
            set.series.file_identifier,
            set.side_a.file_identifier,
            set.side_b.file_identifier
        );
        Ok(set)
    }
}
