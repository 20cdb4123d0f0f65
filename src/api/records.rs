//! Record set processing endpoints

use axum::{extract::State, Json};
use axum_extra::extract::Multipart;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{OutputDocument, PipelineVariant, ProcessOptions, Record},
    pipeline::RecordSet,
};

/// Records and options for one processing run
#[derive(Deserialize, ToSchema)]
pub struct ProcessRecordsRequest {
    /// Record revision; defaults to the configured variant
    #[serde(default)]
    pub variant: Option<PipelineVariant>,
    /// Record for the overall map
    #[schema(value_type = Object)]
    pub series: Record,
    /// Record for side A
    #[schema(value_type = Object)]
    pub side_a: Record,
    /// Record for side B
    #[schema(value_type = Object)]
    pub side_b: Record,
    #[serde(default)]
    pub options: ProcessOptions,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ProcessRecordsResponse {
    /// Processed series, side A and side B records
    pub documents: Vec<OutputDocument>,
}

/// Multipart form accepted by the upload endpoint
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadRecordsForm {
    /// Record file for the overall map
    #[schema(format = Binary)]
    series: String,
    /// Record file for side A
    #[schema(format = Binary)]
    side_a: String,
    /// Record file for side B
    #[schema(format = Binary)]
    side_b: String,
    variant: Option<PipelineVariant>,
    isbn_flat: Option<String>,
    isbn_folded: Option<String>,
    sheet_number: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct ContactNamesRequest {
    #[schema(value_type = Object)]
    pub series: Record,
    #[schema(value_type = Object)]
    pub side_a: Record,
    #[schema(value_type = Object)]
    pub side_b: Record,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ContactNamesResponse {
    pub series: Vec<String>,
    pub side_a: Vec<String>,
    pub side_b: Vec<String>,
    /// Names in series order when all three records have the same contacts
    pub shared: Option<Vec<String>>,
}

/// Process a record set
#[utoipa::path(
    post,
    path = "/records/process",
    tag = "records",
    request_body = ProcessRecordsRequest,
    responses(
        (status = 200, description = "Processed records", body = ProcessRecordsResponse),
        (status = 400, description = "Invalid input"),
        (status = 422, description = "Records cannot be processed", body = crate::error::ErrorResponse)
    )
)]
pub async fn process_records(
    State(state): State<crate::AppState>,
    Json(request): Json<ProcessRecordsRequest>,
) -> AppResult<Json<ProcessRecordsResponse>> {
    let input = RecordSet::new(request.series, request.side_a, request.side_b);
    let documents = state
        .services
        .records
        .process(request.variant, &input, &request.options)?;

    Ok(Json(ProcessRecordsResponse { documents }))
}

/// Process a record set uploaded as files
#[utoipa::path(
    post,
    path = "/records/upload",
    tag = "records",
    request_body(content = UploadRecordsForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Processed records", body = ProcessRecordsResponse),
        (status = 400, description = "Missing or invalid upload"),
        (status = 422, description = "Records cannot be processed", body = crate::error::ErrorResponse)
    )
)]
pub async fn upload_records(
    State(state): State<crate::AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<ProcessRecordsResponse>> {
    let mut series = None;
    let mut side_a = None;
    let mut side_b = None;
    let mut variant = None;
    let mut options = ProcessOptions::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        match name.as_str() {
            "series" => series = Some(data),
            "side_a" => side_a = Some(data),
            "side_b" => side_b = Some(data),
            "variant" => {
                let text = String::from_utf8_lossy(&data);
                variant = Some(text.parse::<PipelineVariant>().map_err(AppError::Validation)?);
            }
            "isbn_flat" => options.isbn_flat = non_empty_text(&data),
            "isbn_folded" => options.isbn_folded = non_empty_text(&data),
            "sheet_number" => options.sheet_number = non_empty_text(&data),
            other => tracing::debug!("Ignoring unexpected upload field '{}'", other),
        }
    }

    let missing = |field: &str| AppError::BadRequest(format!("Missing '{}' record upload", field));
    let series = series.ok_or_else(|| missing("series"))?;
    let side_a = side_a.ok_or_else(|| missing("side_a"))?;
    let side_b = side_b.ok_or_else(|| missing("side_b"))?;

    let documents = state
        .services
        .records
        .process_documents(variant, &series, &side_a, &side_b, &options)?;

    Ok(Json(ProcessRecordsResponse { documents }))
}

/// List contact display names of each record
#[utoipa::path(
    post,
    path = "/records/contacts",
    tag = "records",
    request_body = ContactNamesRequest,
    responses(
        (status = 200, description = "Contact names", body = ContactNamesResponse)
    )
)]
pub async fn contact_names(
    State(state): State<crate::AppState>,
    Json(request): Json<ContactNamesRequest>,
) -> Json<ContactNamesResponse> {
    let input = RecordSet::new(request.series, request.side_a, request.side_b);
    let names = state.services.records.contact_names(&input);

    Json(ContactNamesResponse {
        series: names.series,
        side_a: names.side_a,
        side_b: names.side_b,
        shared: names.shared,
    })
}

fn non_empty_text(data: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(data).trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
