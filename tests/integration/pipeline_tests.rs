//! End-to-end processing of exported record sets

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value;

use megazap_server::{
    config::PipelineConfig,
    models::{ContactOrdering, PipelineVariant, ProcessOptions, Record},
    pipeline::{FixedClock, Pipeline, RecordSet},
    PipelineError,
};

const SERIES_ID: &str = "8a9c3e0d-9c79-4a51-a3b1-d6ab2e7ee0c1";
const SIDE_A_ID: &str = "0be5339c-9d35-44c9-a10f-da4b5356840b";
const SIDE_B_ID: &str = "d9a58a9e-c6c5-4d14-bd5c-24d11f3e4a0f";

fn load(document: &str) -> Record {
    serde_json::from_str(document).expect("Failed to parse fixture")
}

fn input() -> RecordSet {
    RecordSet::new(
        load(include_str!("../fixtures/series.json")),
        load(include_str!("../fixtures/side_a.json")),
        load(include_str!("../fixtures/side_b.json")),
    )
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, 5).unwrap()
}

fn pipeline() -> Pipeline {
    Pipeline::with_clock(PipelineConfig::default(), Arc::new(FixedClock(today())))
}

fn full_options() -> ProcessOptions {
    ProcessOptions {
        isbn_flat: Some("978-0-85665-000-1".to_string()),
        isbn_folded: Some("978-0-85665-000-2".to_string()),
        sheet_number: Some("123".to_string()),
        contact_order: None,
    }
}

fn sheet_number(record: &Record) -> String {
    let info: Value = serde_json::from_str(
        record
            .identification
            .supplemental_information
            .as_deref()
            .expect("supplemental information"),
    )
    .expect("supplemental information is JSON");
    info["sheet_number"].as_str().expect("sheet number").to_string()
}

fn links(record: &Record, association: &str) -> Vec<String> {
    record
        .identification
        .aggregations
        .iter()
        .filter(|a| a.association_type == association)
        .map(|a| a.identifier.identifier.clone())
        .collect()
}

#[test]
fn test_standard_pipeline() {
    let output = pipeline()
        .run(PipelineVariant::Standard, &input(), &full_options())
        .expect("Processing failed");

    for record in [&output.series, &output.side_a, &output.side_b] {
        let isbns: Vec<_> = record
            .identification
            .identifiers
            .iter()
            .filter(|i| i.namespace == "isbn")
            .map(|i| i.identifier.as_str())
            .collect();
        assert_eq!(isbns, vec!["978-0-85665-000-1 (Flat)", "978-0-85665-000-2 (Folded)"]);

        let magic = &record.identification.contacts[0];
        assert_eq!(magic.role, vec!["pointOfContact", "publisher", "author"]);

        assert_eq!(record.metadata.date_stamp, Some(today()));
        assert_eq!(record.distribution.len(), 1);
    }

    assert_eq!(output.series.hierarchy_level.as_deref(), Some("paperMapProduct"));
    assert_eq!(output.side_a.hierarchy_level.as_deref(), Some("product"));

    assert_eq!(sheet_number(&output.series), "123");
    assert_eq!(sheet_number(&output.side_a), "123A");
    assert_eq!(sheet_number(&output.side_b), "123B");

    let extents = &output.series.identification.extents;
    assert_eq!(extents.len(), 1);
    assert_eq!(extents[0].identifier, "bounding");
    assert_eq!(
        extents[0].geographic.bounding_box.degrees(),
        [-70.5, -66.0, -68.5, -66.5]
    );
    assert_eq!(output.side_a.identification.extents, input().side_a.identification.extents);
}

#[test]
fn test_aggregations_are_symmetric() {
    let output = pipeline()
        .run(PipelineVariant::Standard, &input(), &ProcessOptions::default())
        .unwrap();

    assert_eq!(links(&output.series, "isComposedOf"), vec![SIDE_A_ID, SIDE_B_ID]);
    // the collection link already on the series survives
    assert_eq!(links(&output.series, "largerWorkCitation").len(), 1);

    assert_eq!(links(&output.side_a, "largerWorkCitation"), vec![SERIES_ID]);
    assert_eq!(links(&output.side_b, "largerWorkCitation"), vec![SERIES_ID]);
    assert_eq!(links(&output.side_a, "physicalReverseOf"), vec![SIDE_B_ID]);
    assert_eq!(links(&output.side_b, "physicalReverseOf"), vec![SIDE_A_ID]);
}

#[test]
fn test_legacy_pipeline() {
    let output = pipeline()
        .run(PipelineVariant::Legacy, &input(), &full_options())
        .expect("Processing failed");

    let overview_ids: Vec<_> = output
        .series
        .identification
        .graphic_overviews
        .iter()
        .map(|g| g.identifier.as_str())
        .collect();
    assert_eq!(overview_ids, vec!["overview", "side_a", "side_b"]);
    assert_eq!(output.side_b.identification.graphic_overviews[1].identifier, "covers");

    let extent_ids: Vec<_> = output
        .series
        .identification
        .extents
        .iter()
        .map(|e| e.identifier.as_str())
        .collect();
    assert_eq!(extent_ids, vec!["bounding", "side-a", "side-b"]);

    // legacy records carry no sheet number
    assert_eq!(
        output.series.identification.supplemental_information,
        input().series.identification.supplemental_information
    );
    assert_eq!(output.series.hierarchy_level.as_deref(), Some("product"));
}

#[test]
fn test_input_is_not_modified() {
    let original = input();
    let snapshot = original.clone();

    let first = pipeline()
        .run(PipelineVariant::Standard, &original, &full_options())
        .unwrap();
    assert_eq!(original, snapshot);

    // reprocessing the same input gives the same result
    let second = pipeline()
        .run(PipelineVariant::Standard, &original, &full_options())
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_unknown_fields_preserved() {
    let output = pipeline()
        .run(PipelineVariant::Standard, &input(), &full_options())
        .unwrap();
    let documents = output.to_documents().unwrap();

    let series: Value = serde_json::from_str(&documents[0].content).unwrap();
    assert_eq!(series["reference_system_info"]["code"]["value"], "urn:ogc:def:crs:EPSG::3031");
    assert_eq!(series["identification"]["title"]["value"], "Adelaide Island");
    assert_eq!(series["metadata"]["contacts"][0]["email"], "magic@bas.ac.uk");
    assert_eq!(series["metadata"]["date_stamp"], "2024-11-05");
    assert!(series["$schema"].is_string());
}

#[test]
fn test_nested_unknown_fields_preserved() {
    let mut records = input();
    for (_, record) in records.records_mut() {
        record.identification.identifiers[0]
            .extra
            .insert("title".to_string(), "catalogue alias".into());
        record.identification.aggregations[0]
            .identifier
            .extra
            .insert("title".to_string(), "Collection".into());
    }

    let output = pipeline()
        .run(PipelineVariant::Standard, &records, &full_options())
        .unwrap();
    let documents = output.to_documents().unwrap();

    for document in &documents {
        let record: Value = serde_json::from_str(&document.content).unwrap();
        let identification = &record["identification"];
        assert_eq!(identification["identifiers"][0]["title"], "catalogue alias");
        // ISBN entries are appended after the existing identifier
        assert!(identification["identifiers"][1].get("title").is_none());
    }

    let series: Value = serde_json::from_str(&documents[0].content).unwrap();
    assert_eq!(
        series["identification"]["aggregations"][0]["identifier"]["title"],
        "Collection"
    );
}

#[test]
fn test_documents_named_by_file_identifier() {
    let output = pipeline()
        .run(PipelineVariant::Standard, &input(), &ProcessOptions::default())
        .unwrap();
    let documents = output.to_documents().unwrap();

    let names: Vec<_> = documents.iter().map(|d| d.file_name.clone()).collect();
    assert_eq!(
        names,
        vec![
            format!("{}.json", SERIES_ID),
            format!("{}.json", SIDE_A_ID),
            format!("{}.json", SIDE_B_ID)
        ]
    );
    assert!(documents[2].content.contains("\n  \"file_identifier\": "));
}

#[test]
fn test_contact_order_by_indices() {
    let options = ProcessOptions {
        contact_order: Some(ContactOrdering::Indices {
            series: vec![1, 0, 2],
            side_a: vec![0, 1, 2],
            side_b: vec![2, 1, 0],
        }),
        ..Default::default()
    };
    let output = pipeline()
        .run(PipelineVariant::Standard, &input(), &options)
        .unwrap();

    let names = |record: &Record| -> Vec<String> {
        record
            .identification
            .contacts
            .iter()
            .filter_map(|c| c.display_name().map(String::from))
            .collect()
    };
    let magic = "Mapping and Geographic Information Centre, British Antarctic Survey";
    let apc = "UK Antarctic Place-names Committee";
    assert_eq!(names(&output.series), vec!["Watson, Connie", magic, apc]);
    assert_eq!(names(&output.side_a), vec![magic, "Watson, Connie", apc]);
    assert_eq!(names(&output.side_b), vec![apc, "Watson, Connie", magic]);

    // author role still applied to the maintainer after moving it
    let moved = &output.series.identification.contacts[1];
    assert!(moved.has_role("author"));
}

#[test]
fn test_malformed_supplemental_information_aborts() {
    let mut bad = input();
    bad.side_a.identification.supplemental_information = Some("not json".to_string());

    let result = pipeline().run(PipelineVariant::Standard, &bad, &full_options());
    assert!(matches!(
        result,
        Err(PipelineError::MalformedSupplementalInformation { .. })
    ));

    // without a sheet number the field is never read
    let options = ProcessOptions {
        sheet_number: None,
        ..full_options()
    };
    assert!(pipeline().run(PipelineVariant::Standard, &bad, &options).is_ok());
}

#[test]
fn test_missing_side_extent_rejected() {
    let mut bad = input();
    bad.side_b.identification.extents.clear();

    let result = pipeline().run(PipelineVariant::Standard, &bad, &ProcessOptions::default());
    assert!(matches!(result, Err(PipelineError::MissingField { .. })));
}

#[test]
fn test_record_without_required_sections_does_not_parse() {
    let result: Result<Record, _> = serde_json::from_str(r#"{"file_identifier": "x"}"#);
    assert!(result.is_err());
}
