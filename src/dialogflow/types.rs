use serde::{Deserialize, Serialize};

/// Body of `projects.agent.sessions.detectIntent`. The session path travels in
/// the URL, not the JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectIntentRequest {
    #[serde(skip)]
    pub session: String,
    pub query_input: QueryInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryInput {
    pub text: TextInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextInput {
    pub text: String,
    pub language_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectIntentResponse {
    #[serde(default)]
    pub response_id: String,
    #[serde(default)]
    pub query_result: Option<QueryResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    #[serde(default)]
    pub query_text: String,
    #[serde(default)]
    pub fulfillment_text: String,
    #[serde(default)]
    pub intent: Option<Intent>,
    #[serde(default)]
    pub intent_detection_confidence: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
}

pub fn session_path(project_id: &str, session_id: &str) -> String {
    format!("projects/{}/agent/sessions/{}", project_id, session_id)
}

impl DetectIntentRequest {
    pub fn text(
        session: impl Into<String>,
        text: impl Into<String>,
        language_code: impl Into<String>,
    ) -> Self {
        Self {
            session: session.into(),
            query_input: QueryInput {
                text: TextInput {
                    text: text.into(),
                    language_code: language_code.into(),
                },
            },
        }
    }
}

impl QueryResult {
    /// Display name of the matched intent; empty when nothing matched.
    pub fn intent_display_name(&self) -> &str {
        self.intent
            .as_ref()
            .map(|intent| intent.display_name.as_str())
            .unwrap_or_default()
    }
}
