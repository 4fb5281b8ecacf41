//! HTTP endpoints
//!
//! REST API mirroring the chat frontend's contract: every chat or
//! submission response is a 200 with a `status` field, so the frontend
//! can always render the payload.

use axum::{
    extract::{Json, State},
    http::{HeaderValue, Method},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use scholarbot_agent::{AgentError, ChatOutcome};
use scholarbot_core::StudentProfile;
use scholarbot_engine::dataset_statistics;
use scholarbot_llm::LlmError;

use crate::state::AppState;
use crate::submissions::StudentSubmission;

/// Fields the frontend must supply with a student submission.
const REQUIRED_FIELDS: [&str; 10] = [
    "fullName",
    "age",
    "educationLevel",
    "course",
    "income",
    "category",
    "state",
    "percentage",
    "aadhar",
    "email",
];

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors_layer = build_cors_layer(
        &state.settings.server.cors_origins,
        state.settings.server.cors_enabled,
    );

    Router::new()
        .route("/chat", post(chat))
        .route("/submit-info", post(submit_info))
        .route("/api/statistics", get(statistics))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - If cors_enabled is false, returns a permissive layer (dev only)
/// - If cors_origins is empty, defaults to localhost:3000
/// - Otherwise, uses the configured origins
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins (NOT FOR PRODUCTION)");
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::info!("No valid CORS origins configured, defaulting to localhost:3000");
        return CorsLayer::new()
            .allow_origin(HeaderValue::from_static("http://localhost:3000"))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .allow_credentials(true)
}

/// Chat request
#[derive(Debug, Deserialize)]
struct ChatRequest {
    #[serde(default)]
    message: String,
    #[serde(rename = "studentInfo", default)]
    student_info: StudentProfile,
}

/// Chat response
#[derive(Debug, Serialize)]
struct ChatResponse {
    status: &'static str,
    response: String,
}

impl ChatResponse {
    fn success(response: String) -> Json<Self> {
        Json(Self {
            status: "success",
            response,
        })
    }

    fn error(response: impl Into<String>) -> Json<Self> {
        Json(Self {
            status: "error",
            response: response.into(),
        })
    }
}

/// Chat endpoint
async fn chat(State(state): State<AppState>, Json(request): Json<ChatRequest>) -> Json<ChatResponse> {
    let message = request.message.trim();
    if message.is_empty() {
        return ChatResponse::error("Please provide a message.");
    }

    match state.agent.process(&request.student_info, message).await {
        Ok(ChatOutcome::Answered(response)) => ChatResponse::success(response),
        Ok(ChatOutcome::Rejected(guidance)) => ChatResponse::error(guidance),
        Err(AgentError::IncompleteResponse(_)) => ChatResponse::error(
            "I apologize, but I could not generate a complete response. \
             Please try asking your question again.",
        ),
        Err(AgentError::Llm(LlmError::Generation(e))) => {
            tracing::error!("Error generating response: {}", e);
            ChatResponse::error(
                "I apologize, but I could not generate a helpful response. \
                 Please try rephrasing your question.",
            )
        }
        Err(e) => {
            tracing::error!("Chat error: {}", e);
            ChatResponse::error(
                "I encountered an error while processing your question. Please try again.",
            )
        }
    }
}

/// Student info submission endpoint
async fn submit_info(
    State(state): State<AppState>,
    Json(data): Json<serde_json::Value>,
) -> Json<serde_json::Value> {
    let fields = match data.as_object() {
        Some(fields) => fields.clone(),
        None => {
            return Json(serde_json::json!({
                "status": "error",
                "message": "Expected a JSON object",
            }))
        }
    };

    if let Some(missing) = missing_required_field(&fields) {
        return Json(serde_json::json!({
            "status": "error",
            "message": format!("Missing required field: {missing}"),
        }));
    }

    match state.submissions.store(StudentSubmission::new(fields)).await {
        Ok(doc_id) => {
            tracing::info!("Successfully stored submission with ID: {}", doc_id);
            Json(serde_json::json!({
                "status": "success",
                "message": "Information submitted successfully",
                "doc_id": doc_id,
            }))
        }
        Err(e) => {
            tracing::error!("Submission store error: {}", e);
            Json(serde_json::json!({
                "status": "error",
                "message": format!("Database error: {e}"),
            }))
        }
    }
}

/// First required field that is absent or blank, if any.
fn missing_required_field(fields: &serde_json::Map<String, serde_json::Value>) -> Option<&'static str> {
    REQUIRED_FIELDS.into_iter().find(|field| {
        match fields.get(*field) {
            None | Some(serde_json::Value::Null) => true,
            Some(serde_json::Value::String(s)) => s.trim().is_empty(),
            Some(_) => false,
        }
    })
}

/// Dataset statistics endpoint
async fn statistics(State(state): State<AppState>) -> impl IntoResponse {
    Json(dataset_statistics(state.engine.store()))
}

/// Health check
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Readiness check
async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ready",
        "scholarships": state.engine.store().len(),
        "submissions": state.submissions.count().await,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholarbot_config::Settings;
    use scholarbot_core::ScholarshipRecord;
    use scholarbot_engine::{MatchEngine, ScholarshipStore};
    use scholarbot_llm::{GenerationResult, LlmBackend, Message};
    use std::sync::Arc;

    struct MockLlm;

    #[async_trait::async_trait]
    impl LlmBackend for MockLlm {
        async fn generate(&self, _messages: &[Message]) -> Result<GenerationResult, LlmError> {
            Ok(GenerationResult {
                text: "### 🏆 Merit Scholarship: a long enough reply".to_string(),
                tokens: 0,
                total_time_ms: 0,
            })
        }

        async fn is_available(&self) -> bool {
            true
        }

        fn model_name(&self) -> &str {
            "mock-llm"
        }
    }

    fn test_state() -> AppState {
        let store = Arc::new(ScholarshipStore::new(vec![ScholarshipRecord::new(
            "Merit Scholarship",
            "UG",
            "General",
        )]));
        AppState::new(Settings::default(), store, Arc::new(MockLlm))
    }

    #[test]
    fn test_router_creation() {
        let _ = create_router(test_state());
    }

    #[tokio::test]
    async fn test_chat_empty_message() {
        let response = chat(
            State(test_state()),
            Json(ChatRequest {
                message: "  ".to_string(),
                student_info: StudentProfile::default(),
            }),
        )
        .await;

        assert_eq!(response.0.status, "error");
        assert_eq!(response.0.response, "Please provide a message.");
    }

    #[tokio::test]
    async fn test_chat_off_topic() {
        let response = chat(
            State(test_state()),
            Json(ChatRequest {
                message: "What is the weather today?".to_string(),
                student_info: StudentProfile::default(),
            }),
        )
        .await;

        assert_eq!(response.0.status, "error");
        assert!(response.0.response.contains("education, scholarships"));
    }

    #[tokio::test]
    async fn test_chat_success() {
        let response = chat(
            State(test_state()),
            Json(ChatRequest {
                message: "Which scholarship fits my eligibility?".to_string(),
                student_info: StudentProfile::default(),
            }),
        )
        .await;

        assert_eq!(response.0.status, "success");
        assert!(response.0.response.contains("Merit Scholarship"));
    }

    #[test]
    fn test_missing_required_field() {
        let full: serde_json::Map<String, serde_json::Value> =
            REQUIRED_FIELDS.iter().map(|f| (f.to_string(), serde_json::json!("x"))).collect();
        assert_eq!(missing_required_field(&full), None);

        let mut blank_income = full.clone();
        blank_income.insert("income".to_string(), serde_json::json!(""));
        assert_eq!(missing_required_field(&blank_income), Some("income"));

        let mut absent = full;
        absent.remove("aadhar");
        assert_eq!(missing_required_field(&absent), Some("aadhar"));
    }

    #[tokio::test]
    async fn test_submit_info_round_trip() {
        let state = test_state();
        let data: serde_json::Value = serde_json::json!({
            "fullName": "Asha Kumari", "age": 19, "educationLevel": "Undergraduate",
            "course": "B.Sc.", "income": 250000, "category": "OBC", "state": "Bihar",
            "percentage": 82, "aadhar": "1234", "email": "asha@example.com",
        });

        let response = submit_info(State(state.clone()), Json(data)).await;
        assert_eq!(response.0["status"], "success");
        assert!(response.0["doc_id"].is_string());
        assert_eq!(state.submissions.count().await, 1);
    }
}
