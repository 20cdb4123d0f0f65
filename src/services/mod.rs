//! Business logic services

pub mod records;

use std::sync::Arc;

use crate::{
    config::PipelineConfig,
    pipeline::{Clock, Pipeline, SystemClock},
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub records: records::RecordsService,
}

impl Services {
    /// Create all services using the host clock
    pub fn new(pipeline_config: PipelineConfig) -> Self {
        Self::with_clock(pipeline_config, Arc::new(SystemClock))
    }

    pub fn with_clock(pipeline_config: PipelineConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            records: records::RecordsService::new(Pipeline::with_clock(pipeline_config, clock)),
        }
    }
}
