//! Simulation manager library - exports modules for testing.

pub mod config;
pub mod error;
pub mod flash;
pub mod handlers;
pub mod helpers;
pub mod seeder;
pub mod state;
pub mod store;
pub mod views;

use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Re-export for convenience
pub use config::AppConfig;
pub use state::AppState;
pub use store::SimulationStore;

/// Installs the global tracing subscriber. `RUST_LOG` overrides the default filter.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sim_manager=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Builds the full route table over `state`.
pub fn router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();

    Router::new()
        .route("/", get(handlers::home))
        .route("/play", get(handlers::play))
        .route("/create_sim", post(handlers::create_sim))
        .route("/delete_sim/:sim_name", get(handlers::delete_sim))
        .route("/play_sim/:sim_name", get(handlers::sim_home))
        .route("/play_sim/:sim_name/simulate", get(handlers::sim_simulate))
        .route("/play_sim/:sim_name/news", get(handlers::sim_news))
        .route("/play_sim/:sim_name/stats", get(handlers::sim_stats))
        .route("/play_sim/:sim_name/rosters", get(handlers::sim_rosters))
        .route("/about", get(handlers::about))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
