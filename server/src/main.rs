#![recursion_limit = "256"]

mod config;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env().expect("invalid server configuration");
    if config.gateway.is_none() {
        tracing::warn!("IPFS gateway not configured; /api/ipfs will answer 500");
    }

    let state = state::AppState::from_config(&config);
    let app = match routes::leptos_app(state.clone()) {
        Ok(app) => app,
        Err(e) => {
            tracing::warn!(error = %e, "leptos app unavailable, serving API routes only");
            routes::api_routes(state)
        }
    };

    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "desci-admin listening");
    axum::serve(listener, app).await.expect("server failed");
}
