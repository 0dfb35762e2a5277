use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use learnlab::account::InMemoryAccountRepository;
use learnlab::auth::{self, token::TokenConfig};
use learnlab::shared::AppState;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "learnlab=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting LearnLab auth server");

    // Two signing secrets and the token TTLs come from the environment
    let token_config = TokenConfig::from_env();

    // Create shared application state with dependency injection
    // Easy to switch between implementations:
    let account_repository = Arc::new(InMemoryAccountRepository::new());

    // For production with PostgreSQL:
    // let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    // let pool = sqlx::PgPool::connect(&database_url).await.expect("Failed to connect to database");
    // let account_repository = Arc::new(learnlab::account::PostgresAccountRepository::new(pool));

    let app_state = AppState::new(account_repository, token_config);

    // Cookie credentials require a concrete origin, so mirror the caller's
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    // build our application: a connection probe plus the auth routes
    let app = Router::new()
        .route("/", get(|| async { "Connected" }))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/verify", get(auth::verify_login))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(4500);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .unwrap();
    info!("Server running on http://localhost:{}", port);
    axum::serve(listener, app).await.unwrap();
}
