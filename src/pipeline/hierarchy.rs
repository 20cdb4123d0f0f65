//! Product hierarchy: series hierarchy level and aggregation links between records

use crate::{
    config::PipelineConfig,
    models::{Aggregation, AggregationIdentifier, AssociationType},
};

use super::RecordSet;

/// Builds aggregation entries pointing at catalogue items
pub struct AggregationBuilder<'a> {
    config: &'a PipelineConfig,
}

impl<'a> AggregationBuilder<'a> {
    pub fn new(config: &'a PipelineConfig) -> Self {
        Self { config }
    }

    /// Landing page of an item, `<base>/<file_identifier>`
    pub fn item_href(&self, file_identifier: &str) -> String {
        format!(
            "{}/{}",
            self.config.item_base_url.trim_end_matches('/'),
            file_identifier
        )
    }

    pub fn link(&self, file_identifier: &str, association: AssociationType) -> Aggregation {
        Aggregation {
            identifier: AggregationIdentifier {
                identifier: file_identifier.to_string(),
                href: self.item_href(file_identifier),
                namespace: self.config.item_namespace.clone(),
                extra: Default::default(),
            },
            association_type: association.into(),
            initiative_type: Some(self.config.initiative_type.clone()),
            extra: Default::default(),
        }
    }
}

/// Mark the series record as the overall product
pub fn set_hierarchy_level(mut set: RecordSet, hierarchy_level: &str) -> RecordSet {
    set.series.hierarchy_level = Some(hierarchy_level.to_string());
    set
}

/// Link the set together.
///
/// Existing series aggregations are kept and both sides appended as
/// `isComposedOf`. Each side's aggregations are replaced by the series
/// (`largerWorkCitation`) followed by the other side (`physicalReverseOf`).
pub fn link_aggregations(mut set: RecordSet, config: &PipelineConfig) -> RecordSet {
    let builder = AggregationBuilder::new(config);
    let id_series = set.series.file_identifier.clone();
    let id_a = set.side_a.file_identifier.clone();
    let id_b = set.side_b.file_identifier.clone();

    set.series.identification.aggregations.extend([
        builder.link(&id_a, AssociationType::IsComposedOf),
        builder.link(&id_b, AssociationType::IsComposedOf),
    ]);
    set.side_a.identification.aggregations = vec![
        builder.link(&id_series, AssociationType::LargerWorkCitation),
        builder.link(&id_b, AssociationType::PhysicalReverseOf),
    ];
    set.side_b.identification.aggregations = vec![
        builder.link(&id_series, AssociationType::LargerWorkCitation),
        builder.link(&id_a, AssociationType::PhysicalReverseOf),
    ];
    set
}
