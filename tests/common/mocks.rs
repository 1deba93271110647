use async_trait::async_trait;
use dialogflow_bridge::{
    Error, Result,
    dialogflow::{DetectIntentRequest, DetectIntentResponse, SessionsClient, SessionsConnector},
    llm::{ChatCompletionRequest, ChatCompletionResponse, LlmClient},
};
use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};
use tokio::sync::Notify;

/// Mock LLM client for testing
#[derive(Debug, Default)]
pub struct MockLlmClient {
    pub response: Option<ChatCompletionResponse>,
    pub requests: Arc<Mutex<Vec<ChatCompletionRequest>>>,
    pub error: Option<String>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, response: ChatCompletionResponse) -> Self {
        self.response = Some(response);
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn get_requests(&self) -> Vec<ChatCompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        self.requests.lock().unwrap().push(request);

        if let Some(ref error) = self.error {
            return Err(Error::llm(error.clone()));
        }

        self.response
            .clone()
            .ok_or_else(|| Error::llm("No mock response configured"))
    }
}

/// LLM client that holds every call until `release` is notified
#[derive(Debug)]
pub struct GatedLlmClient {
    pub response: ChatCompletionResponse,
    pub started: Notify,
    pub release: Notify,
    pub finished: Notify,
    pub completed: AtomicBool,
}

impl GatedLlmClient {
    pub fn new(response: ChatCompletionResponse) -> Self {
        Self {
            response,
            started: Notify::new(),
            release: Notify::new(),
            finished: Notify::new(),
            completed: AtomicBool::new(false),
        }
    }

    pub fn completed(&self) -> bool {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmClient for GatedLlmClient {
    async fn create_chat_completion(
        &self,
        _request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        self.started.notify_one();
        self.release.notified().await;

        self.completed.store(true, Ordering::SeqCst);
        self.finished.notify_one();
        Ok(self.response.clone())
    }
}

/// Counters shared between a mock connector and every client it hands out.
#[derive(Debug, Default)]
pub struct SessionStats {
    pub opened: AtomicUsize,
    pub released: AtomicUsize,
    pub requests: Mutex<Vec<DetectIntentRequest>>,
}

impl SessionStats {
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<DetectIntentRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Mock Dialogflow connector for testing
#[derive(Debug, Default)]
pub struct MockSessionsConnector {
    pub response: DetectIntentResponse,
    pub connect_error: Option<String>,
    pub detect_error: Option<String>,
    pub stats: Arc<SessionStats>,
}

impl MockSessionsConnector {
    pub fn new(response: DetectIntentResponse) -> Self {
        Self {
            response,
            ..Default::default()
        }
    }

    pub fn with_connect_error(mut self, error: impl Into<String>) -> Self {
        self.connect_error = Some(error.into());
        self
    }

    pub fn with_detect_error(mut self, error: impl Into<String>) -> Self {
        self.detect_error = Some(error.into());
        self
    }
}

#[async_trait]
impl SessionsConnector for MockSessionsConnector {
    async fn connect(&self) -> Result<Box<dyn SessionsClient>> {
        if let Some(ref error) = self.connect_error {
            return Err(Error::credentials(error.clone()));
        }

        self.stats.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockSessionsClient {
            response: self.response.clone(),
            error: self.detect_error.clone(),
            stats: Arc::clone(&self.stats),
        }))
    }
}

struct MockSessionsClient {
    response: DetectIntentResponse,
    error: Option<String>,
    stats: Arc<SessionStats>,
}

#[async_trait]
impl SessionsClient for MockSessionsClient {
    async fn detect_intent(&self, request: DetectIntentRequest) -> Result<DetectIntentResponse> {
        self.stats.requests.lock().unwrap().push(request);

        if let Some(ref error) = self.error {
            return Err(Error::dialogflow(error.clone()));
        }

        Ok(self.response.clone())
    }
}

impl Drop for MockSessionsClient {
    fn drop(&mut self) {
        self.stats.released.fetch_add(1, Ordering::SeqCst);
    }
}
