use super::auth::{ServiceAccountKey, fetch_access_token};
use super::types::{DetectIntentRequest, DetectIntentResponse};
use crate::{Error, Result, config::DialogflowConfig};
use async_trait::async_trait;
use tracing::debug;

/// Hands out one session client per request. The client is released when
/// the returned box is dropped.
#[async_trait]
pub trait SessionsConnector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn SessionsClient>>;
}

#[async_trait]
pub trait SessionsClient: Send + Sync {
    async fn detect_intent(&self, request: DetectIntentRequest) -> Result<DetectIntentResponse>;
}

pub struct RestSessionsConnector {
    http: reqwest::Client,
    endpoint: String,
    credentials_json: String,
}

impl RestSessionsConnector {
    pub fn new(config: &DialogflowConfig) -> Self {
        Self::with_http(reqwest::Client::new(), config)
    }

    pub fn with_http(http: reqwest::Client, config: &DialogflowConfig) -> Self {
        Self {
            http,
            endpoint: config.endpoint.clone(),
            credentials_json: config.credentials_json.clone(),
        }
    }
}

#[async_trait]
impl SessionsConnector for RestSessionsConnector {
    async fn connect(&self) -> Result<Box<dyn SessionsClient>> {
        let key = ServiceAccountKey::from_json(&self.credentials_json)?;
        let token = fetch_access_token(&self.http, &key).await.map_err(|e| match e {
            err @ Error::Credentials(_) => err,
            other => Error::credentials(format!("Token exchange failed: {}", other)),
        })?;

        debug!(
            "Opened Dialogflow session client (token expires in {}s)",
            token.expires_in
        );

        Ok(Box::new(RestSessionsClient::new(
            self.http.clone(),
            self.endpoint.clone(),
            token.access_token,
        )))
    }
}

pub struct RestSessionsClient {
    http: reqwest::Client,
    endpoint: String,
    access_token: String,
}

impl RestSessionsClient {
    pub fn new(
        http: reqwest::Client,
        endpoint: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            access_token: access_token.into(),
        }
    }

    fn detect_intent_url(&self, session: &str) -> String {
        format!(
            "{}/v2/{}:detectIntent",
            self.endpoint.trim_end_matches('/'),
            session
        )
    }
}

#[async_trait]
impl SessionsClient for RestSessionsClient {
    async fn detect_intent(&self, request: DetectIntentRequest) -> Result<DetectIntentResponse> {
        let url = self.detect_intent_url(&request.session);
        debug!("Detecting intent for session {}", request.session);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::dialogflow(format!(
                "detectIntent failed with status {}: {}",
                status, body
            )));
        }

        let response: DetectIntentResponse = response.json().await?;
        Ok(response)
    }
}

impl Drop for RestSessionsClient {
    fn drop(&mut self) {
        debug!("Released Dialogflow session client");
    }
}
