//! # API REST
//!
//! REST API for the lung catalog.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (query-string parsing, status codes, CORS)
//!
//! Uses `api-shared` for response types. Querying lives in `lung-catalog` and the placeholder
//! X-ray analysis in `lung-inference`.

#![warn(rust_2018_idioms)]

mod config;

pub use config::{AppConfig, DEFAULT_REST_ADDR, REST_ADDR_ENV};

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use utoipa::{IntoParams, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    facet_rows, AnalysisRes, AnalysisStepRes, DiseaseFacetsRes, DiseaseListRes, DiseaseRes,
    FacetCountRes, HealthRes, HealthService, RemedyFacetsRes, RemedyListRes, RemedyRes,
};
use lung_catalog::{
    Catalog, CatalogError, Category, DiseaseQuery, Effectiveness, Filter, RemedyQuery, Severity,
};
use lung_inference::{
    analyse_blocking, AnalysisReport, InferenceError, InferenceStub, XrayImage, ANALYSIS_STEPS,
};

/// Largest accepted X-ray upload.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Shared state for the REST handlers.
///
/// The catalog is immutable after load, so handlers only ever borrow it.
#[derive(Clone)]
pub struct AppState {
    catalog: Arc<Catalog>,
    stub: Arc<dyn InferenceStub>,
    step_delay: Duration,
}

impl AppState {
    pub fn new(catalog: Arc<Catalog>, stub: Arc<dyn InferenceStub>, step_delay: Duration) -> Self {
        Self {
            catalog,
            stub,
            step_delay,
        }
    }

    /// Load the catalog and build the stub described by `cfg`.
    pub fn from_config(cfg: &AppConfig) -> anyhow::Result<Self> {
        let catalog = Catalog::load(cfg.catalog())?;
        let stub = cfg.inference().build_stub();
        Ok(Self::new(
            Arc::new(catalog),
            Arc::new(stub),
            cfg.inference().step_delay(),
        ))
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_diseases,
        disease_facets,
        get_disease,
        list_remedies,
        remedy_facets,
        get_remedy,
        create_analysis,
    ),
    components(schemas(
        HealthRes,
        DiseaseRes,
        DiseaseListRes,
        RemedyRes,
        RemedyListRes,
        FacetCountRes,
        DiseaseFacetsRes,
        RemedyFacetsRes,
        AnalysisStepRes,
        AnalysisRes,
    ))
)]
pub struct ApiDoc;

/// Build the application router with Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/diseases", get(list_diseases))
        .route("/diseases/facets", get(disease_facets))
        .route("/diseases/:id", get(get_disease))
        .route("/remedies", get(list_remedies))
        .route("/remedies/facets", get(remedy_facets))
        .route("/remedies/:id", get(get_remedy))
        .route("/analyses", post(create_analysis))
        .merge(
            SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .with_state(state)
}

/// Bind `cfg.rest_addr()` and serve until the process is stopped.
pub async fn serve(cfg: &AppConfig) -> anyhow::Result<()> {
    let state = AppState::from_config(cfg)?;
    let app = router(state);

    tracing::info!("-- Starting lung catalog REST API on {}", cfg.rest_addr());
    let listener = tokio::net::TcpListener::bind(cfg.rest_addr()).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Debug, Default, serde::Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DiseaseParams {
    /// Case-insensitive substring matched against name and description.
    term: Option<String>,
    /// `all`, `healthy`, `warning` or `critical`.
    severity: Option<String>,
}

#[derive(Debug, Default, serde::Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RemedyParams {
    /// Case-insensitive substring matched against name and benefits.
    term: Option<String>,
    /// `all`, `herbs`, `essential-oils`, `lifestyle`, `diet` or `breathing`.
    category: Option<String>,
    /// `all`, `high`, `medium` or `low`.
    effectiveness: Option<String>,
}

#[derive(Debug, Default, serde::Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AnalysisParams {
    /// Name of the uploaded file, used in the report.
    file_name: Option<String>,
}

type ApiError = (StatusCode, &'static str);

fn catalog_error(e: CatalogError) -> ApiError {
    match &e {
        CatalogError::InvalidFilterValue { .. } => {
            tracing::warn!("Rejected query: {e}");
            (StatusCode::BAD_REQUEST, "Invalid filter value")
        }
        _ => {
            tracing::error!("Catalog error: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
        }
    }
}

fn inference_error(e: InferenceError) -> ApiError {
    match e {
        InferenceError::UnsupportedMediaType(_) => (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Please upload a valid image file (.jpg, .png, .jpeg)",
        ),
        InferenceError::EmptyImage => (StatusCode::BAD_REQUEST, "Uploaded image is empty"),
        other => {
            tracing::error!("Analysis error: {:?}", other);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/diseases",
    params(DiseaseParams),
    responses(
        (status = 200, description = "Matching diseases in catalog order", body = DiseaseListRes),
        (status = 400, description = "Invalid filter value")
    )
)]
/// Search and filter the disease catalog.
///
/// An empty result is a `200` with no diseases, never an error.
#[axum::debug_handler]
async fn list_diseases(
    State(state): State<AppState>,
    Query(params): Query<DiseaseParams>,
) -> Result<Json<DiseaseListRes>, ApiError> {
    let severity =
        Filter::<Severity>::parse_optional(params.severity.as_deref()).map_err(catalog_error)?;
    let query = DiseaseQuery::new(params.term.unwrap_or_default()).with_severity(severity);

    let matches = state.catalog.query_diseases(&query);
    Ok(Json(DiseaseListRes::new(
        &query,
        &matches,
        state.catalog.diseases().len(),
    )))
}

#[utoipa::path(
    get,
    path = "/diseases/facets",
    responses(
        (status = 200, description = "Severity counts over the whole catalog", body = DiseaseFacetsRes)
    )
)]
#[axum::debug_handler]
async fn disease_facets(State(state): State<AppState>) -> Json<DiseaseFacetsRes> {
    Json(DiseaseFacetsRes {
        severity: facet_rows(&state.catalog.severity_facets()),
    })
}

#[utoipa::path(
    get,
    path = "/diseases/{id}",
    params(("id" = String, Path, description = "Disease slug, e.g. `tuberculosis`")),
    responses(
        (status = 200, description = "Disease found", body = DiseaseRes),
        (status = 404, description = "Unknown disease")
    )
)]
#[axum::debug_handler]
async fn get_disease(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DiseaseRes>, ApiError> {
    match state.catalog.disease(&id) {
        Some(disease) => Ok(Json(DiseaseRes::from(disease))),
        None => Err((StatusCode::NOT_FOUND, "Disease not found")),
    }
}

#[utoipa::path(
    get,
    path = "/remedies",
    params(RemedyParams),
    responses(
        (status = 200, description = "Matching remedies in catalog order", body = RemedyListRes),
        (status = 400, description = "Invalid filter value")
    )
)]
/// Search and filter the remedy catalog. Category and effectiveness combine with AND.
#[axum::debug_handler]
async fn list_remedies(
    State(state): State<AppState>,
    Query(params): Query<RemedyParams>,
) -> Result<Json<RemedyListRes>, ApiError> {
    let category =
        Filter::<Category>::parse_optional(params.category.as_deref()).map_err(catalog_error)?;
    let effectiveness = Filter::<Effectiveness>::parse_optional(params.effectiveness.as_deref())
        .map_err(catalog_error)?;
    let query = RemedyQuery::new(params.term.unwrap_or_default())
        .with_category(category)
        .with_effectiveness(effectiveness);

    let matches = state.catalog.query_remedies(&query);
    Ok(Json(RemedyListRes::new(
        &query,
        &matches,
        state.catalog.remedies().len(),
    )))
}

#[utoipa::path(
    get,
    path = "/remedies/facets",
    responses(
        (status = 200, description = "Category and effectiveness counts over the whole catalog", body = RemedyFacetsRes)
    )
)]
#[axum::debug_handler]
async fn remedy_facets(State(state): State<AppState>) -> Json<RemedyFacetsRes> {
    Json(RemedyFacetsRes {
        category: facet_rows(&state.catalog.category_facets()),
        effectiveness: facet_rows(&state.catalog.effectiveness_facets()),
    })
}

#[utoipa::path(
    get,
    path = "/remedies/{id}",
    params(("id" = String, Path, description = "Remedy id")),
    responses(
        (status = 200, description = "Remedy found", body = RemedyRes),
        (status = 404, description = "Unknown remedy")
    )
)]
#[axum::debug_handler]
async fn get_remedy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RemedyRes>, ApiError> {
    match state.catalog.remedy(&id) {
        Some(remedy) => Ok(Json(RemedyRes::from(remedy))),
        None => Err((StatusCode::NOT_FOUND, "Remedy not found")),
    }
}

#[utoipa::path(
    post,
    path = "/analyses",
    params(AnalysisParams),
    request_body(content = Vec<u8>, description = "Raw image bytes", content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Placeholder prediction and text report", body = AnalysisRes),
        (status = 400, description = "Empty upload"),
        (status = 415, description = "Upload is not an image"),
        (status = 500, description = "Internal server error")
    )
)]
/// Run the mock X-ray analysis on an uploaded image.
///
/// The prediction is picked at random from a canned set; no model is run. The progress steps
/// are walked on the blocking pool, each one waiting the configured delay before it is reached.
#[axum::debug_handler]
async fn create_analysis(
    State(state): State<AppState>,
    Query(params): Query<AnalysisParams>,
    body: Bytes,
) -> Result<Json<AnalysisRes>, ApiError> {
    let image = XrayImage::from_bytes(params.file_name.unwrap_or_default(), body.to_vec())
        .map_err(inference_error)?;

    tracing::info!(
        image = image.file_name(),
        media_type = image.media_type(),
        "analysis requested"
    );

    let stub = Arc::clone(&state.stub);
    let step_delay = state.step_delay;
    let (image, prediction) = tokio::task::spawn_blocking(move || {
        let prediction = analyse_blocking(&*stub, &image, step_delay, |_| {});
        (image, prediction)
    })
    .await
    .map_err(|e| {
        tracing::error!("Analysis task failed: {:?}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
    })?;
    let prediction = prediction.map_err(inference_error)?;
    let report = AnalysisReport::new(image.file_name(), prediction);

    Ok(Json(AnalysisRes::new(&image, &ANALYSIS_STEPS, &report)))
}
