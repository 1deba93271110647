//! Chooses between the intent service's own fulfillment and a language-model
//! completion. Pure: no I/O happens here.

use crate::dialogflow::QueryResult;

pub const FALLBACK_INTENT: &str = "Default Fallback Intent";

const FALLBACK_PROMPT_PREFIX: &str =
    "Please provide general information or engage in a casual conversation about: ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A specific intent matched; answer with its fulfillment text.
    MatchedIntent { text: String },
    /// Nothing specific matched; ask the language model with this prompt.
    Fallback { prompt: String },
}

pub fn is_fallback_intent(display_name: &str) -> bool {
    display_name.is_empty() || display_name == FALLBACK_INTENT
}

pub fn fallback_prompt(utterance: &str) -> String {
    format!("{}{}", FALLBACK_PROMPT_PREFIX, utterance)
}

pub fn decide(result: Option<&QueryResult>, utterance: &str) -> Reply {
    match result {
        Some(result) if !is_fallback_intent(result.intent_display_name()) => Reply::MatchedIntent {
            text: result.fulfillment_text.clone(),
        },
        _ => Reply::Fallback {
            prompt: fallback_prompt(utterance),
        },
    }
}
