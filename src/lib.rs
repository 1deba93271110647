pub mod config;
pub mod dialogflow;
pub mod error;
pub mod fallback;
pub mod llm;
pub mod server;

pub use error::{Error, Result};
