//! API handlers for the review server
//!
//! - `GET /health`
//! - `GET /api/template` - required sections and scoring weights in use
//! - `POST /api/review` - review document text
//! - `POST /api/review/pdf` - review an uploaded PDF
//! - `POST /api/normalize` - cleaned text and its section outline

use axum::{body::Bytes, extract::State, Json};
use review_engine::Heading;
use serde::{Deserialize, Serialize};
use shared_pdf::PdfExtractor;
use shared_types::{AnalysisResult, ScoringWeights};
use tracing::{debug, info};

use crate::error::ServerError;
use crate::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    /// Whether a live language-model advisor is configured
    pub llm: bool,
    pub advisor: String,
}

/// Handler: GET /health
pub async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "review-server",
        version: env!("CARGO_PKG_VERSION"),
        llm: state.reviewer.advisor_is_live(),
        advisor: state.reviewer.advisor_name().to_string(),
    })
}

#[derive(Serialize)]
pub struct TemplateResponse {
    pub success: bool,
    pub required_sections: Vec<String>,
    pub count: usize,
    pub weights: ScoringWeights,
}

/// Handler: GET /api/template
pub async fn handle_template(State(state): State<AppState>) -> Json<TemplateResponse> {
    let engine = state.reviewer.engine();
    let required_sections = engine.template().required_sections().to_vec();
    Json(TemplateResponse {
        success: true,
        count: required_sections.len(),
        required_sections,
        weights: engine.weights(),
    })
}

/// Review request body
#[derive(Deserialize)]
pub struct ReviewRequest {
    /// Document text; form feeds mark page breaks
    pub text: String,

    /// Set false to skip the language-model advisory for this request
    #[serde(default = "default_llm")]
    pub llm: bool,
}

fn default_llm() -> bool {
    true
}

#[derive(Serialize)]
pub struct ReviewResponse {
    pub success: bool,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

/// Handler: POST /api/review
pub async fn handle_review(
    State(state): State<AppState>,
    Json(req): Json<ReviewRequest>,
) -> Result<Json<ReviewResponse>, ServerError> {
    if req.text.len() > state.max_text_bytes {
        return Err(ServerError::InvalidRequest(format!(
            "Document text exceeds {} bytes",
            state.max_text_bytes
        )));
    }
    info!(chars = req.text.len(), llm = req.llm, "Review request");

    let result = state.reviewer.review_with(&req.text, req.llm).await;
    Ok(Json(ReviewResponse {
        success: true,
        result,
    }))
}

/// Handler: POST /api/review/pdf (raw PDF bytes as the body)
pub async fn handle_review_pdf(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ReviewResponse>, ServerError> {
    if body.is_empty() {
        return Err(ServerError::InvalidRequest("Empty request body".into()));
    }
    info!(bytes = body.len(), "PDF review request");

    let document = tokio::task::spawn_blocking(move || PdfExtractor::extract_text(&body))
        .await
        .map_err(|e| ServerError::Internal(format!("Extraction task failed: {}", e)))??;
    debug!(pages = document.metadata.page_count, "PDF extracted");

    let result = state.reviewer.review(&document.raw_text).await;
    Ok(Json(ReviewResponse {
        success: true,
        result,
    }))
}

#[derive(Deserialize)]
pub struct NormalizeRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct NormalizeResponse {
    pub success: bool,
    pub text: String,
    pub sections: Vec<Heading>,
}

/// Handler: POST /api/normalize
pub async fn handle_normalize(
    State(state): State<AppState>,
    Json(req): Json<NormalizeRequest>,
) -> Result<Json<NormalizeResponse>, ServerError> {
    if req.text.len() > state.max_text_bytes {
        return Err(ServerError::InvalidRequest(format!(
            "Document text exceeds {} bytes",
            state.max_text_bytes
        )));
    }

    let document = state.reviewer.engine().prepare(&req.text);
    Ok(Json(NormalizeResponse {
        success: true,
        sections: document.outline().headings().to_vec(),
        text: document.text().to_string(),
    }))
}
