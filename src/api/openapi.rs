//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, records};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mega Zap API",
        version = "1.0.0",
        description = "Paper map record processing REST API",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
        contact(name = "MAGIC Team", email = "magic@bas.ac.uk")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        // Records
        records::process_records,
        records::upload_records,
        records::contact_names,
    ),
    components(
        schemas(
            // Records
            records::ProcessRecordsRequest,
            records::ProcessRecordsResponse,
            records::UploadRecordsForm,
            records::ContactNamesRequest,
            records::ContactNamesResponse,
            crate::models::ProcessOptions,
            crate::models::ContactOrdering,
            crate::models::OutputDocument,
            crate::models::PipelineVariant,
            crate::models::RecordRole,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "records", description = "Record set processing")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
