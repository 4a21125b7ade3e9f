//! CodeArena - Application Entry Point

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use codearena::{
    config::CONFIG,
    constants::{API_BASE_PATH, MAX_TEST_CASE_INPUT_SIZE},
    db::{self, repositories::RoleRepository},
    handlers,
    identity::FirebaseIdentity,
    middleware::logging_middleware,
    state::AppState,
    storage::ObjectContentStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| CONFIG.server.rust_log.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting CodeArena server...");

    // Initialize database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&CONFIG.database).await?;
    db::test_connection(&db_pool).await?;

    // Run database migrations
    tracing::info!("Running database migrations...");
    db::run_migrations(&db_pool).await?;

    // Seed the well-known roles
    RoleRepository::seed(&db_pool).await?;

    // Load the identity provider's signing keys
    tracing::info!("Loading identity provider keys...");
    let identity = FirebaseIdentity::from_config(&CONFIG.firebase)?;

    // Connect to the content store
    tracing::info!("Connecting to content store...");
    let content_store =
        ObjectContentStore::new(&CONFIG.storage, MAX_TEST_CASE_INPUT_SIZE as u64)?;

    // Create application state
    let state = AppState::new(
        db_pool,
        Arc::new(identity),
        Arc::new(content_store),
        CONFIG.clone(),
    );

    // Build the router
    let app = Router::new()
        .nest(API_BASE_PATH, handlers::routes(state.clone()))
        .layer(axum::middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start the server
    let addr = SocketAddr::new(CONFIG.server.host.parse()?, CONFIG.server.port);
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
