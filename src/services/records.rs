//! Record set processing service

use crate::{
    error::{AppError, AppResult},
    models::{OutputDocument, PipelineVariant, ProcessOptions, Record, RecordRole},
    pipeline::{contacts, Pipeline, RecordSet},
};

/// Contact names of each record in a set
#[derive(Debug, Clone)]
pub struct ContactNames {
    pub series: Vec<String>,
    pub side_a: Vec<String>,
    pub side_b: Vec<String>,
    /// Present when all three records have the same names
    pub shared: Option<Vec<String>>,
}

#[derive(Clone)]
pub struct RecordsService {
    pipeline: Pipeline,
}

impl RecordsService {
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    /// Variant used when a request doesn't name one
    pub fn default_variant(&self) -> PipelineVariant {
        self.pipeline.config().variant
    }

    /// Process a record set and serialize the results
    pub fn process(
        &self,
        variant: Option<PipelineVariant>,
        input: &RecordSet,
        options: &ProcessOptions,
    ) -> AppResult<Vec<OutputDocument>> {
        let variant = variant.unwrap_or_else(|| self.default_variant());
        if variant == PipelineVariant::Legacy && options.contact_order.is_some() {
            return Err(AppError::Validation(
                "Contact ordering is not supported for legacy records".to_string(),
            ));
        }
        let output = self.pipeline.run(variant, input, options)?;
        Ok(output.to_documents()?)
    }

    /// Process records uploaded as raw JSON documents
    pub fn process_documents(
        &self,
        variant: Option<PipelineVariant>,
        series: &[u8],
        side_a: &[u8],
        side_b: &[u8],
        options: &ProcessOptions,
    ) -> AppResult<Vec<OutputDocument>> {
        let input = RecordSet::new(
            parse_record(RecordRole::Series, series)?,
            parse_record(RecordRole::SideA, side_a)?,
            parse_record(RecordRole::SideB, side_b)?,
        );
        self.process(variant, &input, options)
    }

    pub fn contact_names(&self, input: &RecordSet) -> ContactNames {
        ContactNames {
            series: contacts::display_names(&input.series.identification.contacts),
            side_a: contacts::display_names(&input.side_a.identification.contacts),
            side_b: contacts::display_names(&input.side_b.identification.contacts),
            shared: contacts::shared_contact_names(input),
        }
    }
}

/// Parse an uploaded record document
pub fn parse_record(role: RecordRole, document: &[u8]) -> AppResult<Record> {
    serde_json::from_slice(document)
        .map_err(|e| AppError::BadRequest(format!("Invalid {} record: {}", role, e)))
}
