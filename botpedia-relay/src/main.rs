/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 *
 * Unless you explicitly state otherwise, any contribution intentionally
 * submitted for inclusion in the work by you, as defined in the Apache-2.0
 * license, shall be dual licensed as above, without any additional terms or
 * conditions.
 */

//! BotPedia relay server entry point.
//!
//! A standalone Axum service that proxies session negotiation between the
//! browser client and the vendor realtime endpoint, attaching the
//! server-held API key on the way out.

use botpedia_relay::config::Config;
use botpedia_relay::routes;
use botpedia_relay::state::AppState;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env().expect("failed to load configuration");

    if config.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; /session requests will fail with 500");
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let listen_addr = config.listen_addr.clone();
    let model = config.model.clone();

    let state = AppState::new(config);
    let app = routes::router().layer(cors).with_state(state);

    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .expect("failed to bind listener");

    tracing::info!("BotPedia relay listening on {listen_addr} (model: {model})");

    axum::serve(listener, app).await.expect("server error");
}
