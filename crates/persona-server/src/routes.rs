//! JSON API over the session store. One handler per session operation.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use persona_ai::{render_transcript, Session, SessionState, Turn};
use persona_common::SessionId;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiError;
use crate::page;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(page::index))
        .route("/health", get(health))
        .route("/api/sessions", post(create_session))
        .route(
            "/api/sessions/{id}",
            get(get_session).delete(delete_session),
        )
        .route("/api/sessions/{id}/prompt", put(set_prompt))
        .route("/api/sessions/{id}/messages", post(submit_message))
        .route("/api/sessions/{id}/clear", post(clear_session))
        .with_state(state)
}

// ============================================================================
// Request / response bodies
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub sessions: usize,
}

/// What the page needs to redraw itself.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub state: SessionState,
    pub system_prompt: String,
    pub transcript: Vec<Turn>,
    /// Transcript as `You:` / `AI:` lines, ready to display.
    pub rendered: String,
    pub prompt_words: usize,
    pub max_prompt_words: u32,
}

impl SessionView {
    fn new(id: SessionId, session: &Session, max_prompt_words: u32) -> Self {
        Self {
            session_id: id,
            state: session.state(),
            system_prompt: session.system_prompt().to_string(),
            transcript: session.transcript().to_vec(),
            rendered: render_transcript(session.transcript()),
            prompt_words: word_count(session.system_prompt()),
            max_prompt_words,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PromptRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct PromptResponse {
    /// Whether a new conversation was started.
    pub started: bool,
    pub session: SessionView,
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// `None` when the message was blank or no prompt is set.
    pub reply: Option<String>,
    pub session: SessionView,
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        sessions: state.store.count().await,
    })
}

/// POST /api/sessions - open a session for a new tab
async fn create_session(State(state): State<AppState>) -> (StatusCode, Json<SessionView>) {
    let id = state.store.create().await;
    info!(session = %id, "Session created");
    let view = SessionView::new(id, &Session::new(), state.max_prompt_words);
    (StatusCode::CREATED, Json(view))
}

/// GET /api/sessions/{id}
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Json<SessionView>, ApiError> {
    let handle = state
        .store
        .get(&id)
        .await
        .ok_or_else(|| ApiError::SessionNotFound(id.clone()))?;
    let session = handle.lock().await;
    Ok(Json(SessionView::new(id, &session, state.max_prompt_words)))
}

/// PUT /api/sessions/{id}/prompt
async fn set_prompt(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
    request: Result<Json<PromptRequest>, JsonRejection>,
) -> Result<Json<PromptResponse>, ApiError> {
    let handle = state
        .store
        .get(&id)
        .await
        .ok_or_else(|| ApiError::SessionNotFound(id.clone()))?;
    let Json(request) = request?;
    let mut session = handle.lock().await;

    let started = session
        .set_prompt(state.gateway.as_ref(), &state.setup, &request.prompt)
        .await?;
    if started {
        info!(session = %id, "Conversation started");
    }

    Ok(Json(PromptResponse {
        started,
        session: SessionView::new(id, &session, state.max_prompt_words),
    }))
}

/// POST /api/sessions/{id}/messages
async fn submit_message(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
    request: Result<Json<MessageRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let handle = state
        .store
        .get(&id)
        .await
        .ok_or_else(|| ApiError::SessionNotFound(id.clone()))?;
    let Json(request) = request?;
    let mut session = handle.lock().await;

    let reply = session
        .submit(state.gateway.as_ref(), &request.message)
        .await?;

    Ok(Json(MessageResponse {
        reply,
        session: SessionView::new(id, &session, state.max_prompt_words),
    }))
}

/// POST /api/sessions/{id}/clear
async fn clear_session(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Json<SessionView>, ApiError> {
    let handle = state
        .store
        .get(&id)
        .await
        .ok_or_else(|| ApiError::SessionNotFound(id.clone()))?;
    let mut session = handle.lock().await;
    session.clear();
    info!(session = %id, "Session cleared");
    Ok(Json(SessionView::new(id, &session, state.max_prompt_words)))
}

/// DELETE /api/sessions/{id} - tab closed
async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<StatusCode, ApiError> {
    if state.store.remove(&id).await {
        info!(session = %id, "Session removed");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::SessionNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use persona_ai::testing::ScriptedGateway;
    use persona_ai::{CharacterSetup, GatewayError, GenerationConfig};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::store::SessionStore;

    const ZEUS: &str = "You are Zeus, speak in thunderous proclamations.";

    fn test_app() -> (Router, Arc<ScriptedGateway>) {
        let gateway = Arc::new(ScriptedGateway::new());
        let state = AppState {
            store: SessionStore::new(),
            gateway: gateway.clone(),
            setup: Arc::new(CharacterSetup::new("PREAMBLE", GenerationConfig::default())),
            max_prompt_words: 250,
        };
        (router(state), gateway)
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().uri(uri).method(method);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_string(&json).unwrap())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    async fn create(app: &Router) -> String {
        let (status, json) = call(app, Method::POST, "/api/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        json["session_id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn health_reports_session_count() {
        let (app, _) = test_app();
        create(&app).await;

        let (status, json) = call(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["sessions"], 1);
    }

    #[tokio::test]
    async fn index_serves_page() {
        let (app, _) = test_app();
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
    }

    #[tokio::test]
    async fn new_session_is_uninitialized() {
        let (app, _) = test_app();
        let id = create(&app).await;

        let (status, json) = call(&app, Method::GET, &format!("/api/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["state"], "uninitialized");
        assert_eq!(json["system_prompt"], "");
        assert_eq!(json["transcript"], json!([]));
        assert_eq!(json["rendered"], "");
        assert_eq!(json["max_prompt_words"], 250);
    }

    #[tokio::test]
    async fn prompt_then_message_builds_transcript() {
        let (app, gateway) = test_app();
        gateway.push_reply("I AM ZEUS!");
        let id = create(&app).await;

        let (status, json) = call(
            &app,
            Method::PUT,
            &format!("/api/sessions/{id}/prompt"),
            Some(json!({ "prompt": ZEUS })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["started"], true);
        assert_eq!(json["session"]["state"], "ready");
        assert_eq!(json["session"]["prompt_words"], 7);

        let (status, json) = call(
            &app,
            Method::POST,
            &format!("/api/sessions/{id}/messages"),
            Some(json!({ "message": "Who are you?" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["reply"], "I AM ZEUS!");
        assert_eq!(
            json["session"]["transcript"],
            json!([
                { "speaker": "user", "text": "Who are you?" },
                { "speaker": "model", "text": "I AM ZEUS!" }
            ])
        );
        assert_eq!(json["session"]["rendered"], "You: Who are you?\nAI: I AM ZEUS!");
    }

    #[tokio::test]
    async fn malformed_body_is_json_error() {
        let (app, gateway) = test_app();
        let id = create(&app).await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/sessions/{id}/prompt"))
                    .method(Method::PUT)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("not json"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["code"], "INVALID_BODY");
        assert!(json["error"].as_str().unwrap().starts_with("invalid request body"));
        assert_eq!(gateway.start_count(), 0);
    }

    #[tokio::test]
    async fn missing_field_is_json_error() {
        let (app, gateway) = test_app();
        let id = create(&app).await;

        let (status, json) = call(
            &app,
            Method::POST,
            &format!("/api/sessions/{id}/messages"),
            Some(json!({ "text": "Who are you?" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["code"], "INVALID_BODY");
        assert_eq!(gateway.send_count(), 0);
    }

    #[tokio::test]
    async fn repeated_prompt_does_not_restart() {
        let (app, gateway) = test_app();
        let id = create(&app).await;
        let uri = format!("/api/sessions/{id}/prompt");

        call(&app, Method::PUT, &uri, Some(json!({ "prompt": ZEUS }))).await;
        let (_, json) = call(&app, Method::PUT, &uri, Some(json!({ "prompt": ZEUS }))).await;

        assert_eq!(json["started"], false);
        assert_eq!(gateway.start_count(), 1);
    }

    #[tokio::test]
    async fn message_without_prompt_is_ignored() {
        let (app, gateway) = test_app();
        let id = create(&app).await;

        let (status, json) = call(
            &app,
            Method::POST,
            &format!("/api/sessions/{id}/messages"),
            Some(json!({ "message": "hello" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["reply"], Value::Null);
        assert_eq!(json["session"]["transcript"], json!([]));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn unknown_session_is_404() {
        let (app, _) = test_app();
        let (status, json) = call(&app, Method::GET, "/api/sessions/no-such-id", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["code"], "SESSION_NOT_FOUND");
    }

    #[tokio::test]
    async fn provider_rejection_is_reported_and_state_kept() {
        let (app, gateway) = test_app();
        gateway.push_error(GatewayError::Rejected("quota exceeded".into()));
        let id = create(&app).await;
        call(
            &app,
            Method::PUT,
            &format!("/api/sessions/{id}/prompt"),
            Some(json!({ "prompt": ZEUS })),
        )
        .await;

        let (status, json) = call(
            &app,
            Method::POST,
            &format!("/api/sessions/{id}/messages"),
            Some(json!({ "message": "Who are you?" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["code"], "PROVIDER_REJECTED");
        assert!(json["error"].as_str().unwrap().contains("quota exceeded"));

        let (_, json) = call(&app, Method::GET, &format!("/api/sessions/{id}"), None).await;
        assert_eq!(json["state"], "ready");
        assert_eq!(json["transcript"], json!([]));
    }

    #[tokio::test]
    async fn unavailable_gateway_is_502() {
        let (app, gateway) = test_app();
        gateway.fail_next_start(GatewayError::Unavailable("connection refused".into()));
        let id = create(&app).await;

        let (status, json) = call(
            &app,
            Method::PUT,
            &format!("/api/sessions/{id}/prompt"),
            Some(json!({ "prompt": ZEUS })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(json["code"], "GATEWAY_UNAVAILABLE");

        let (_, json) = call(&app, Method::GET, &format!("/api/sessions/{id}"), None).await;
        assert_eq!(json["state"], "uninitialized");
    }

    #[tokio::test]
    async fn clear_resets_session() {
        let (app, _) = test_app();
        let id = create(&app).await;
        call(
            &app,
            Method::PUT,
            &format!("/api/sessions/{id}/prompt"),
            Some(json!({ "prompt": ZEUS })),
        )
        .await;
        call(
            &app,
            Method::POST,
            &format!("/api/sessions/{id}/messages"),
            Some(json!({ "message": "Who are you?" })),
        )
        .await;

        let (status, json) =
            call(&app, Method::POST, &format!("/api/sessions/{id}/clear"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["state"], "uninitialized");
        assert_eq!(json["system_prompt"], "");
        assert_eq!(json["transcript"], json!([]));
    }

    #[tokio::test]
    async fn delete_removes_session() {
        let (app, _) = test_app();
        let id = create(&app).await;
        let uri = format!("/api/sessions/{id}");

        let (status, _) = call(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = call(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn concurrent_messages_keep_exchanges_paired() {
        let (app, _) = test_app();
        let id = create(&app).await;
        call(
            &app,
            Method::PUT,
            &format!("/api/sessions/{id}/prompt"),
            Some(json!({ "prompt": ZEUS })),
        )
        .await;

        let uri = format!("/api/sessions/{id}/messages");
        let (a, b) = tokio::join!(
            call(&app, Method::POST, &uri, Some(json!({ "message": "first" }))),
            call(&app, Method::POST, &uri, Some(json!({ "message": "second" }))),
        );
        assert_eq!(a.0, StatusCode::OK);
        assert_eq!(b.0, StatusCode::OK);

        let (_, json) = call(&app, Method::GET, &format!("/api/sessions/{id}"), None).await;
        let transcript = json["transcript"].as_array().unwrap();
        assert_eq!(transcript.len(), 4);
        for pair in transcript.chunks(2) {
            assert_eq!(pair[0]["speaker"], "user");
            assert_eq!(pair[1]["speaker"], "model");
            let expected = format!("reply to: {}", pair[0]["text"].as_str().unwrap());
            assert_eq!(pair[1]["text"], expected.as_str());
        }
    }
}
