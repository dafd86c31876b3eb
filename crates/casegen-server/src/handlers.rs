//! HTTP request handlers.
//!
//! Thin glue between axum and the pipeline: decode the request, hand the
//! story or the stored upload to the pipeline, and map failures to statuses.

use crate::upload::UploadStore;
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use casegen_domain::source::extension_of;
use casegen_domain::{DocumentFormat, StoryWithTestCases, TestCase};
use casegen_extractor::{GenerationError, Pipeline};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// Name of the multipart field carrying the document
pub const UPLOAD_FIELD: &str = "file";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Generation pipeline, shared by all requests
    pub pipeline: Pipeline,
    /// Where uploaded documents are written
    pub uploads: UploadStore,
}

/// Body of `POST /testcases`
#[derive(Debug, Deserialize)]
pub struct GenerateTestCasesRequest {
    /// User story to generate test cases for
    #[serde(rename = "userStory")]
    pub user_story: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Always "ok" when the server answers
    pub status: String,
    /// Model the pipeline talks to
    pub model: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Machine-readable error kind
    pub kind: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Pipeline failure
    Generation(GenerationError),
    /// Malformed multipart body
    Multipart(MultipartError),
    /// Request is missing something the handler needs
    BadRequest(String),
    /// Upload could not be stored
    Storage(std::io::Error),
}

/// HTTP status for each pipeline error kind
pub fn status_for(e: &GenerationError) -> StatusCode {
    match e {
        GenerationError::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        GenerationError::EmptyStory => StatusCode::BAD_REQUEST,
        GenerationError::DocumentRead { .. }
        | GenerationError::InvalidEncoding(_)
        | GenerationError::EmptyDocument(_) => StatusCode::UNPROCESSABLE_ENTITY,
        GenerationError::InputTooLong(_, _) => StatusCode::PAYLOAD_TOO_LARGE,
        GenerationError::AiProvider(_)
        | GenerationError::EmptyAiResponse
        | GenerationError::EmptyAiContent
        | GenerationError::MalformedAiResponse { .. }
        | GenerationError::SchemaViolation(_) => StatusCode::BAD_GATEWAY,
        GenerationError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        GenerationError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            AppError::Generation(e) => (status_for(&e), e.kind(), e.to_string()),
            AppError::Multipart(e) => (e.status(), "invalid_request", e.body_text()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "invalid_request", msg),
            AppError::Storage(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "storage_error",
                format!("Failed to store upload: {}", e),
            ),
        };

        if status.is_server_error() {
            error!(status = status.as_u16(), kind, "{}", message);
        } else {
            warn!(status = status.as_u16(), kind, "{}", message);
        }

        let body = Json(ErrorResponse {
            error: message,
            kind: kind.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<GenerationError> for AppError {
    fn from(e: GenerationError) -> Self {
        AppError::Generation(e)
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::Multipart(e)
    }
}

/// POST /testcases - Generate test cases from a user story
async fn generate_test_cases(
    State(state): State<AppState>,
    Json(request): Json<GenerateTestCasesRequest>,
) -> Result<Json<Vec<TestCase>>, AppError> {
    let cases = state.pipeline.generate_test_cases(&request.user_story).await?;
    Ok(Json(cases))
}

/// POST /upload - Extract user stories from a document and generate test cases
///
/// The extension is checked before anything is written to disk.
async fn upload_and_extract(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Vec<StoryWithTestCases>>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let original_name = field.file_name().unwrap_or_default().to_string();
        let extension = extension_of(&original_name);
        if DocumentFormat::from_extension(&extension).is_none() {
            return Err(GenerationError::UnsupportedFormat(extension).into());
        }

        let bytes = field.bytes().await?;
        let path = state
            .uploads
            .persist(&original_name, &bytes)
            .await
            .map_err(AppError::Storage)?;

        info!("Received upload '{}' ({} bytes)", original_name, bytes.len());

        let stories = state
            .pipeline
            .extract_user_stories_as(&path, &extension)
            .await?;
        return Ok(Json(stories));
    }

    Err(AppError::BadRequest(format!(
        "No '{}' field in multipart body",
        UPLOAD_FIELD
    )))
}

/// GET /health - Liveness check
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "ok".to_string(),
        model: state.pipeline.model_name().to_string(),
    })
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    AxumRouter::new()
        .route("/testcases", post(generate_test_cases))
        .route("/upload", post(upload_and_extract))
        .route("/health", get(health_check))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use casegen_extractor::PipelineConfig;
    use casegen_llm::{LlmError, MockProvider};
    use tower::ServiceExt; // for oneshot

    fn create_test_state(llm: MockProvider) -> AppState {
        AppState {
            pipeline: Pipeline::with_provider(llm, PipelineConfig::default()),
            uploads: UploadStore::new(std::env::temp_dir().join("casegen-handler-tests")),
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = create_router(create_test_state(MockProvider::default()));

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_generate_test_cases() {
        let llm = MockProvider::new(
            r#"[{"id": 1, "title": "t", "description": "d", "expectedResult": "e"}]"#,
        );
        let app = create_router(create_test_state(llm));

        let request = Request::builder()
            .method("POST")
            .uri("/testcases")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"userStory": "As a user, I want to log in."}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_user_story_is_rejected() {
        let llm = MockProvider::default();
        let app = create_router(create_test_state(llm.clone()));

        let request = Request::builder()
            .method("POST")
            .uri("/testcases")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"story": "wrong field"}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert!(response.status().is_client_error());
        assert_eq!(llm.call_count(), 0);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&GenerationError::UnsupportedFormat(".xyz".to_string())),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(status_for(&GenerationError::EmptyStory), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(&GenerationError::InputTooLong(10, 5)),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            status_for(&GenerationError::AiProvider(LlmError::RateLimitExceeded)),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(status_for(&GenerationError::EmptyAiContent), StatusCode::BAD_GATEWAY);
        assert_eq!(status_for(&GenerationError::Timeout(5)), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            status_for(&GenerationError::Configuration("missing key".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
