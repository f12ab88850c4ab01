use std::io;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bus_router::config::AppConfig;
use bus_router::interactive::run_interactive;
use bus_router::loader::load_graph;
use bus_router::stops::StopNames;
use bus_router::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    info!(
        stops = %config.stops_file.display(),
        routes = %config.routes_file.display(),
        "loading network"
    );
    let graph = match load_graph(&config.stops_file, &config.routes_file) {
        Ok(graph) => graph,
        Err(e) => {
            error!("failed to load network: {e}");
            return ExitCode::FAILURE;
        }
    };

    if std::env::args().nth(1).as_deref() == Some("interactive") {
        let names = StopNames::new(&graph);
        let stdin = io::stdin();
        return match run_interactive(&graph, &names, &config.search, stdin.lock(), io::stdout()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("terminal I/O failed: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let app = create_router(AppState::new(graph, config.search));

    let listener = match tokio::net::TcpListener::bind(config.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.addr, "failed to bind: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!(addr = %config.addr, "bus router listening");
    info!("  GET  /health             - Health check");
    info!("  GET  /api/stops/search   - Search stops by name");
    info!("  POST /route/plan         - Plan a route");

    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
