use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pacer::{config::ServerConfig, db, handlers, state::AppState};

#[tokio::main]
async fn main() {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pacer=debug,tower_http=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let config = ServerConfig::load();
  tracing::debug!("Loaded configuration: {:?}", config);

  let pool = db::init_db(&config.db_path).expect("Failed to initialize database");
  let app = handlers::router(AppState::new(pool));

  let bind_addr = config.bind_addr();
  let listener = tokio::net::TcpListener::bind(&bind_addr)
    .await
    .unwrap_or_else(|_| panic!("Failed to bind to {}", bind_addr));

  tracing::info!("Server running on http://localhost:{}", config.port);

  axum::serve(listener, app)
    .await
    .expect("Server failed to start");
}
