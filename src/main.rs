use std::sync::Arc;

use axum::http::{HeaderValue, Method, header};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};

use kodbank::core::ai::{ChatApiState, ChatClient, ChatConfig, chat_api_router};
use kodbank::core::auth::{AuthApiState, AuthService, JwtService, auth_api_router};
use kodbank::core::balance::{BalanceApiState, balance_api_router};
use kodbank::core::config::AppConfig;
use kodbank::core::db::repositories::{SessionRepository, UserRepository};
use kodbank::core::db::{DbConfig, create_pool, health_check, init_schema};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file (if exists)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();

    // A missing JWT_SECRET aborts startup; every issued token would be
    // unverifiable otherwise.
    let jwt_service = JwtService::from_env()?;

    let db_config = DbConfig::from_env()?;
    let pool = create_pool(&db_config).await?;
    // Fail fast before binding if the database is unreachable.
    health_check(&pool).await?;
    init_schema(&pool).await?;
    tracing::info!(database = %db_config.database, "database ready");

    let chat_config = ChatConfig::from_env();
    if !chat_config.has_api_key() {
        tracing::warn!("HF_API_KEY not set; chat endpoint will report unavailable");
    }

    let user_repo = UserRepository::new(pool.clone());
    let session_repo = SessionRepository::new(pool.clone());

    let auth_state = AuthApiState {
        auth_service: AuthService::new(user_repo.clone(), session_repo, jwt_service.clone()),
        production: config.is_production(),
        cookie_max_age_secs: jwt_service.expiration_secs(),
    };
    let balance_state = BalanceApiState { user_repo };
    let chat_state = ChatApiState {
        chat: Arc::new(ChatClient::new(chat_config)),
    };

    let app = Router::new()
        .route("/", get(service_info))
        .route("/health", get(health))
        .merge(auth_api_router(auth_state))
        .merge(balance_api_router(balance_state, jwt_service))
        .merge(chat_api_router(chat_state))
        .layer(cors_layer(&config));

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("shutdown complete");
    Ok(())
}

/// Browsers only send the session cookie cross-origin when the exact
/// origin is allowed and credentials are enabled, so no wildcards here.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origin = if config.is_production() {
        match config
            .frontend_url
            .as_deref()
            .and_then(|url| url.parse::<HeaderValue>().ok())
        {
            Some(value) => AllowOrigin::list([value]),
            None => {
                // Fail closed: no allowed origin at all, so browsers block
                // every credentialed cross-site request.
                tracing::warn!("FRONTEND_URL not set in production; cross-origin requests denied");
                AllowOrigin::list([])
            }
        }
    } else {
        AllowOrigin::mirror_request()
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

async fn service_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Kodbank API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": ["/api/register", "/api/login", "/api/logout", "/api/balance", "/api/ai/chat"],
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
