use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tenisu::player::repository::InMemoryPlayerRepository;
// use tenisu::player::repository::PostgresPlayerRepository; // For production
use tenisu::player::{find_player, get_statistics, list_players};
use tenisu::shared::AppState;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tenisu=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting tennis player catalog server");

    // Create shared application state with dependency injection
    // Easy to switch between implementations:
    let player_repository =
        Arc::new(InMemoryPlayerRepository::seeded().expect("bundled player catalog must parse"));

    // For production with PostgreSQL:
    // let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    // let pool = sqlx::PgPool::connect(&database_url).await.expect("Failed to connect to database");
    // let player_repository = Arc::new(PostgresPlayerRepository::new(pool));

    let app_state = AppState::new(player_repository);

    // build our application with the player routes
    let app = Router::new()
        .route("/players", post(list_players))
        .route("/players/statistics", get(get_statistics))
        .route("/players/:id", get(find_player))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    // run our app with hyper, listening globally on port 3000
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    info!("Server running on http://localhost:3000");
    axum::serve(listener, app).await.unwrap();
}
