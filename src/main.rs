use axum::http::header::{ACCEPT, CONTENT_TYPE, HeaderName};
use std::path::PathBuf;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sondage_api::{AppState, build_router, db, identity};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // initialize tracing; RUST_LOG directives override the info default
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    info!("Starting sondage-api v{}", env!("CARGO_PKG_VERSION"));

    let db_path =
        PathBuf::from(std::env::var("SONDAGE_DB").unwrap_or_else(|_| "sondage.db".to_string()));
    let pool = db::init_db(&db_path)
        .await
        .expect("Unable to initialize database");
    info!("Database ready at {}", db_path.display());

    let app_state = AppState::new(pool);

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            CONTENT_TYPE,
            ACCEPT,
            HeaderName::from_static(identity::API_KEY_HEADER),
        ]);

    let app = build_router(app_state).layer(cors);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Unable to spawn tcp listener");
    info!("listening on {bind_addr}");

    axum::serve(listener, app)
        .await
        .expect("server stopped unexpectedly");
}
