pub mod handlers;
pub mod types;

use crate::{
    Result, config::Config, dialogflow::RestSessionsConnector, llm::OpenAiClient,
};
use axum::{Router, routing::post};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/dialogflow/session/", post(handlers::dialogflow_session))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    let sessions = RestSessionsConnector::new(&config.dialogflow);
    let llm = OpenAiClient::new(config.llm.clone());
    let app_state = AppState::new(config, Arc::new(sessions), Arc::new(llm));

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(app_state)).await?;

    Ok(())
}
