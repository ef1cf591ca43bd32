use std::net::SocketAddr;
use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

use metro_server::network::{self, config::CitiesConfig};
use metro_server::traffic::TrafficRegistry;
use metro_server::web::{AppState, create_router};

/// Default configuration file, next to the working directory.
const DEFAULT_CONFIG: &str = "config/cities.json";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

    // A corrupt or missing network must stop the process before it
    // serves a single request for that city.
    let config = CitiesConfig::load(&config_path).expect("failed to load city configuration");
    let networks = network::load_all(&config).expect("failed to load a city network");
    let registry = TrafficRegistry::new(networks);

    let state = AppState::new(registry);
    let app = create_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 8080));
    tracing::info!(%addr, "metro planner listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");
    axum::serve(listener, app).await.expect("server error");
}
