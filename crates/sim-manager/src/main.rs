use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use sim_manager::config::INSTALL_DIR;
use sim_manager::{AppConfig, AppState};
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "sim-manager")]
#[command(about = "Web front-end for managing simulation folders")]
struct Cli {
    /// TCP address to bind the web server
    #[arg(long, env = "SIM_MANAGER_BIND", default_value = "127.0.0.1:5000")]
    bind: SocketAddr,

    /// Base directory for `sims/`, `templates/Stats_Templates/` and `static/`
    #[arg(long, env = "SIM_MANAGER_ROOT", default_value = INSTALL_DIR)]
    root: PathBuf,

    /// Directory holding the simulations (default: <root>/sims)
    #[arg(long, env = "SIM_MANAGER_SIMS_DIR")]
    sims_dir: Option<PathBuf>,

    /// CSV templates seeded into each new simulation (default: <root>/templates/Stats_Templates)
    #[arg(long, env = "SIM_MANAGER_STATS_TEMPLATES")]
    stats_templates: Option<PathBuf>,

    /// Directory containing frontend assets (default: <root>/static)
    #[arg(long, env = "SIM_MANAGER_STATIC_DIR")]
    static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    sim_manager::init_logging();

    let cli = Cli::parse();

    let config = AppConfig::from_root(&cli.root)
        .with_store_root(cli.sims_dir)
        .with_stats_templates(cli.stats_templates)
        .with_static_dir(cli.static_dir);

    let state = match AppState::new(config) {
        Ok(state) => state,
        Err(err) => {
            error!("Failed to open simulation store: {err}");
            std::process::exit(1);
        }
    };

    info!("Simulations stored in: {}", state.config.store_root.display());
    info!("Stats templates from: {}", state.config.stats_templates.display());
    info!("Serving static files from: {}", state.config.static_dir.display());

    let app = sim_manager::router(state);

    let listener = match TcpListener::bind(cli.bind).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind {}: {err}", cli.bind);
            std::process::exit(1);
        }
    };

    info!("Simulation manager: http://{}", cli.bind);

    if let Err(err) = axum::serve(listener, app).await {
        error!("Server error: {err}");
    }
}
