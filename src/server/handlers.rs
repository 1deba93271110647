use super::types::{ApiError, FulfillmentResponse, SessionRequest};
use crate::{
    config::Config,
    dialogflow::{DetectIntentRequest, SessionsConnector, session_path},
    fallback::{self, Reply},
    llm::{ChatCompletionRequest, ChatMessage, LlmClient},
};
use axum::{body::Bytes, extract::State, response::Json};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: Arc<dyn SessionsConnector>,
    pub llm: Arc<dyn LlmClient>,
}

impl AppState {
    pub fn new(
        config: Config,
        sessions: Arc<dyn SessionsConnector>,
        llm: Arc<dyn LlmClient>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            sessions,
            llm,
        }
    }
}

/// `POST /dialogflow/session/`. The body is parsed by hand so that any
/// malformed payload, whatever its content type, is reported as `error1`.
pub async fn dialogflow_session(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<FulfillmentResponse>, ApiError> {
    let request = SessionRequest::from_body(&body).inspect_err(|e| {
        error!("Error binding JSON: {}", e);
    })?;

    let session_id = request.session_id();
    let text = request.text();
    info!("Received session request for session: {}", session_id);

    let session = session_path(&state.config.dialogflow.project_id, session_id);

    let client = state.sessions.connect().await.map_err(|e| {
        error!("Failed to create Dialogflow session client: {}", e);
        ApiError::ClientSetup(e.to_string())
    })?;

    let detect_request =
        DetectIntentRequest::text(session, text, &state.config.dialogflow.language_code);
    let response = client.detect_intent(detect_request).await.map_err(|e| {
        error!("Failed to detect intent for session {}: {}", session_id, e);
        ApiError::Detection(e.to_string())
    })?;

    match fallback::decide(response.query_result.as_ref(), text) {
        Reply::MatchedIntent { text } => {
            info!("Matched intent for session: {}", session_id);
            Ok(Json(FulfillmentResponse {
                fulfillment_text: text,
            }))
        }
        Reply::Fallback { prompt } => {
            info!("No specific intent for session {}, asking the LLM", session_id);
            let completion = complete(&state, prompt).await?;
            Ok(Json(FulfillmentResponse {
                fulfillment_text: completion,
            }))
        }
    }
}

/// Runs the completion on its own task so it is not cancelled if the caller
/// disconnects mid-request.
async fn complete(state: &AppState, prompt: String) -> Result<String, ApiError> {
    let llm = Arc::clone(&state.llm);
    let request = ChatCompletionRequest {
        messages: vec![ChatMessage::user(prompt)],
        max_tokens: Some(state.config.llm.max_tokens),
        temperature: Some(state.config.llm.temperature),
    };

    let response = tokio::spawn(async move { llm.create_chat_completion(request).await })
        .await
        .map_err(|e| ApiError::Completion(format!("Completion task failed: {}", e)))?
        .map_err(|e| {
            error!("ChatCompletion error: {}", e);
            ApiError::Completion(e.to_string())
        })?;

    response
        .first_content()
        .map(str::to_owned)
        .ok_or_else(|| {
            error!("ChatCompletion returned no choices");
            ApiError::Completion("Completion returned no choices".to_string())
        })
}
