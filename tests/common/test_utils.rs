use dialogflow_bridge::{
    config::{Config, DialogflowConfig, LlmConfig, LogsConfig, ServerConfig},
    dialogflow::{DetectIntentResponse, Intent, QueryResult},
    llm::{ChatCompletionResponse, ChatMessage, Choice, Usage},
};

pub const TEST_PRIVATE_KEY: &str = include_str!("../fixtures/test_service_account_key.pem");

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
            logs: LogsConfig {
                level: "debug".to_string(),
            },
        },
        dialogflow: DialogflowConfig {
            project_id: "test-project".to_string(),
            credentials_json: String::new(),
            language_code: "en-US".to_string(),
            endpoint: "https://dialogflow.googleapis.com".to_string(),
        },
        llm: LlmConfig {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: "test-api-key".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 150,
            temperature: 0.7,
        },
    }
}

/// Service account key JSON whose token endpoint is `token_uri`
pub fn create_service_account_json(token_uri: &str) -> String {
    serde_json::json!({
        "type": "service_account",
        "project_id": "test-project",
        "private_key_id": "test-key-id",
        "private_key": TEST_PRIVATE_KEY,
        "client_email": "bridge@test-project.iam.gserviceaccount.com",
        "token_uri": token_uri,
    })
    .to_string()
}

pub fn create_intent_response(display_name: &str, fulfillment_text: &str) -> DetectIntentResponse {
    DetectIntentResponse {
        response_id: "response-1".to_string(),
        query_result: Some(QueryResult {
            query_text: String::new(),
            fulfillment_text: fulfillment_text.to_string(),
            intent: Some(Intent {
                name: "projects/test-project/agent/intents/1".to_string(),
                display_name: display_name.to_string(),
            }),
            intent_detection_confidence: 1.0,
        }),
    }
}

pub fn create_mock_chat_response(content: &str) -> ChatCompletionResponse {
    ChatCompletionResponse {
        id: "chatcmpl-test".to_string(),
        model: "gpt-3.5-turbo".to_string(),
        choices: vec![Choice {
            index: 0,
            message: ChatMessage {
                role: "assistant".to_string(),
                content: content.to_string(),
            },
            finish_reason: Some("stop".to_string()),
        }],
        usage: Some(Usage {
            prompt_tokens: 20,
            completion_tokens: 10,
            total_tokens: 30,
        }),
    }
}
