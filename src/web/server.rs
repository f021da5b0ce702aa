use axum::{
    extract::{DefaultBodyLimit, Multipart, Query, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::cli::ServeArgs;
use crate::core::sample::SampleRecord;
use crate::core::types::SampleId;
use crate::parsing::csv::parse_csv_text;
use crate::provider::{insights, GeminiClient, ProviderError};
use crate::query::{QueryError, QueryFacade, SequenceCache};
use crate::store::SampleStore;
use crate::synth::SynthError;
use crate::utils::validation::{validate_upload_filename, ValidationError};

/// Security configuration constants to prevent `DoS` attacks
pub const MAX_MULTIPART_FIELDS: usize = 10;
pub const MAX_CSV_FIELD_SIZE: usize = 8 * 1024 * 1024; // 8MB
pub const MAX_QUESTION_SIZE: usize = 16 * 1024; // 16KB

/// Shared application state
pub struct AppState {
    /// Mutated only by the ingestion endpoints; all query paths read
    pub store: RwLock<SampleStore>,
    pub cache: SequenceCache,
    pub gemini: Option<GeminiClient>,
}

/// Enhanced error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None, // Never expose internal details to prevent information disclosure
    }
}

fn error_response(status: StatusCode, error_type: &str, user_message: &str) -> Response {
    (
        status,
        Json(create_safe_error_response(error_type, user_message, None)),
    )
        .into_response()
}

/// Map a query failure to its HTTP shape: 404 for unknown ids,
/// 422 for records whose seed cannot be derived.
fn query_error_response(err: &QueryError) -> Response {
    match err {
        QueryError::NotFound(store_err) => error_response(
            StatusCode::NOT_FOUND,
            "sample_not_found",
            &format!("Sample '{}' not found", store_err.sample_id()),
        ),
        QueryError::Synthesis(SynthError::InvalidSeed(id)) => error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "invalid_seed",
            &format!("Sample '{id}' has no usable seed tag"),
        ),
    }
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    // Build tokio runtime
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args).await })
}

/// Create the application router with all routes and middleware configured.
///
/// # Errors
///
/// Currently infallible; kept fallible for parity with server startup.
#[allow(clippy::missing_panics_doc)] // Panics only on invalid governor config (constants are valid)
pub fn create_router() -> anyhow::Result<Router> {
    let gemini = GeminiClient::from_env();
    if gemini.is_none() {
        tracing::warn!(
            "GEMINI_API_KEY not set; /api/ask will answer aggregate questions only"
        );
    }

    let state = Arc::new(AppState {
        store: RwLock::new(SampleStore::new()),
        cache: SequenceCache::new(),
        gemini,
    });

    // Configure IP-based rate limiting
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10) // 10 requests per second per IP
        .burst_size(50) // Allow bursts of 50 requests
        .finish()
        .unwrap();

    // Build router with comprehensive security layers
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/api/upload-csv", post(upload_csv_handler))
        .route("/api/samples", get(list_samples_handler).post(upload_json_handler))
        .route("/api/sample", post(add_sample_handler))
        .route("/api/sequence", get(sequence_handler))
        .route("/api/compare", get(compare_handler))
        .route("/api/ask", post(ask_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                // Security headers for browser protection
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-xss-protection"),
                    HeaderValue::from_static("1; mode=block"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                ))
                // Browser clients live on other origins
                .layer(CorsLayer::permissive())
                // IP-based rate limiting to prevent abuse
                .layer(GovernorLayer {
                    config: Arc::new(governor_conf),
                })
                // Request timeout to prevent slow client attacks
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(30),
                ))
                // Limit concurrent requests to prevent DOS
                .layer(ConcurrencyLimitLayer::new(100))
                // Limit request body size (largest CSV + multipart overhead)
                .layer(DefaultBodyLimit::max(10 * 1024 * 1024)), // 10MB limit
        );

    Ok(app)
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let app = create_router()?;

    let addr = format!("{}:{}", args.address, args.port);
    println!("Starting paleoseq web server at http://{addr}");

    if args.open {
        let _ = open::that(format!("http://{addr}"));
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Main page handler
async fn index_handler() -> Html<&'static str> {
    Html(include_str!("templates/index.html"))
}

/// Ingest a sample metadata CSV uploaded as a multipart form
async fn upload_csv_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Response {
    let mut csv_content: Option<String> = None;
    let mut fields_received = 0usize;

    loop {
        if fields_received >= MAX_MULTIPART_FIELDS {
            return error_response(
                StatusCode::BAD_REQUEST,
                "field_limit_exceeded",
                "Too many form fields",
            );
        }

        match multipart.next_field().await {
            Ok(Some(field)) => {
                fields_received += 1;
                if field.name() != Some("file") {
                    continue; // Ignore unknown fields
                }

                if let Some(filename) = field.file_name().map(std::string::ToString::to_string) {
                    match validate_upload_filename(&filename) {
                        Ok(_) => {}
                        Err(ValidationError::NotCsv) => {
                            return error_response(
                                StatusCode::BAD_REQUEST,
                                "invalid_file_type",
                                "Invalid file type. Please upload a CSV file.",
                            );
                        }
                        Err(_) => {
                            return error_response(
                                StatusCode::BAD_REQUEST,
                                "invalid_filename",
                                "Filename contains invalid or dangerous characters",
                            );
                        }
                    }
                }

                match field.bytes().await {
                    Ok(bytes) => {
                        if bytes.len() > MAX_CSV_FIELD_SIZE {
                            return error_response(
                                StatusCode::PAYLOAD_TOO_LARGE,
                                "file_too_large",
                                "File size exceeds limit",
                            );
                        }
                        csv_content = Some(String::from_utf8_lossy(&bytes).to_string());
                    }
                    Err(_) => {
                        return error_response(
                            StatusCode::BAD_REQUEST,
                            "upload_failed",
                            "Failed to read uploaded file",
                        );
                    }
                }
            }
            Ok(None) => break, // No more fields
            Err(_) => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    "multipart_error",
                    "Failed to parse upload",
                );
            }
        }
    }

    let Some(content) = csv_content else {
        return error_response(StatusCode::BAD_REQUEST, "missing_input", "No file provided");
    };

    let report = match parse_csv_text(&content) {
        Ok(report) => report,
        Err(err) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "csv_parse_failed",
                &format!("Failed to process CSV: {err}"),
            );
        }
    };

    let ingested = report.records.len();
    let skipped = report.skipped;
    let mut replaced = 0usize;
    {
        let mut store = state.store.write().expect("store lock poisoned");
        for record in report.records {
            if store.insert(record) {
                replaced += 1;
            }
        }
    }

    tracing::info!("CSV upload: {ingested} records ingested, {skipped} rows skipped");

    Json(serde_json::json!({
        "message": format!("{ingested} records successfully uploaded."),
        "ingested": ingested,
        "skipped": skipped,
        "replaced": replaced,
        "uploaded_at": chrono::Utc::now().to_rfc3339(),
    }))
    .into_response()
}

/// Ingest samples posted as a JSON array
async fn upload_json_handler(
    State(state): State<Arc<AppState>>,
    Json(samples): Json<Vec<SampleRecord>>,
) -> Response {
    let count = samples.len();
    {
        let mut store = state.store.write().expect("store lock poisoned");
        for record in samples {
            store.insert(record);
        }
    }

    Json(serde_json::json!({
        "message": format!("{count} records successfully uploaded."),
        "ingested": count,
    }))
    .into_response()
}

/// Ingest one sample
async fn add_sample_handler(
    State(state): State<Arc<AppState>>,
    Json(sample): Json<SampleRecord>,
) -> Response {
    let id = sample.id.clone();
    let replaced = {
        let mut store = state.store.write().expect("store lock poisoned");
        store.insert(sample)
    };

    tracing::info!("Added sample '{id}' (replaced existing: {replaced})");

    Json(serde_json::json!({
        "message": "Sample successfully added.",
        "replaced": replaced,
    }))
    .into_response()
}

/// List all ingested samples
async fn list_samples_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let store = state.store.read().expect("store lock poisoned");

    Json(serde_json::json!({
        "count": store.len(),
        "last_ingest": store.last_ingest().map(|t| t.to_rfc3339()),
        "samples": store.records(),
    }))
}

#[derive(Deserialize)]
struct SequenceParams {
    sample_id: String,
}

/// Synthesized sequence for one sample
async fn sequence_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SequenceParams>,
) -> Response {
    let id = SampleId::new(params.sample_id);

    let store = state.store.read().expect("store lock poisoned");
    let facade = QueryFacade::new(&store, &state.cache);

    match facade.sequence_for(&id) {
        Ok(sequence) => Json(serde_json::json!({
            "sample_id": id,
            "length": sequence.len(),
            "sequence": sequence,
        }))
        .into_response(),
        Err(err) => query_error_response(&err),
    }
}

#[derive(Deserialize)]
struct CompareParams {
    id1: String,
    id2: String,
}

/// Pairwise similarity between two samples' sequences
async fn compare_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CompareParams>,
) -> Response {
    let id1 = SampleId::new(params.id1);
    let id2 = SampleId::new(params.id2);

    let store = state.store.read().expect("store lock poisoned");
    let facade = QueryFacade::new(&store, &state.cache);

    match facade.compare(&id1, &id2) {
        Ok(result) => Json(serde_json::json!({
            "id1": result.id1,
            "id2": result.id2,
            "similarity": result.similarity,
            "similarity_percentage": format!("{:.2}%", result.similarity),
            "compared_length": result.compared_length,
            "matches": result.matches,
        }))
        .into_response(),
        Err(err) => query_error_response(&err),
    }
}

#[derive(Deserialize)]
struct AskRequest {
    question: String,
}

/// Question answering: local aggregates first, Gemini for the rest
async fn ask_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AskRequest>,
) -> Response {
    if request.question.len() > MAX_QUESTION_SIZE {
        return error_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            "question_too_large",
            "Question exceeds size limit",
        );
    }

    tracing::info!("Received question: {}", request.question);

    // Resolve everything needed from the store before the upstream await;
    // the lock must not be held across it.
    let (local, context) = {
        let store = state.store.read().expect("store lock poisoned");
        let local = insights::local_answer(&request.question, &store);
        let context = store.records().to_vec();
        (local, context)
    };

    if let Some(answer) = local {
        return Json(serde_json::json!({ "answer": answer })).into_response();
    }

    let Some(gemini) = &state.gemini else {
        return Json(serde_json::json!({
            "answer": "I'm sorry, I don't have enough information to answer that question. \
                       Please try asking about the age, region, or number of records in the uploaded data."
        }))
        .into_response();
    };

    match gemini.ask(&request.question, &context).await {
        Ok(answer) => Json(serde_json::json!({ "answer": answer })).into_response(),
        Err(err @ (ProviderError::Http(_) | ProviderError::Api(_))) => {
            tracing::error!("Provider error: {err}");
            error_response(
                StatusCode::BAD_GATEWAY,
                "provider_error",
                "The question-answering provider could not process the request",
            )
        }
        Err(err) => {
            tracing::error!("Provider error: {err}");
            error_response(
                StatusCode::BAD_GATEWAY,
                "provider_error",
                "Received an unusable response from the question-answering provider",
            )
        }
    }
}
