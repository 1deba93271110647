mod auth;
mod client;
mod types;

pub use auth::{AccessToken, ServiceAccountKey, fetch_access_token};
pub use client::{RestSessionsClient, RestSessionsConnector, SessionsClient, SessionsConnector};
pub use types::*;
