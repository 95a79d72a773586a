use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use what2eat::config::AppConfig;

#[tokio::main]
async fn main() {
    // .env has to be read before the subscriber so DEBUG, RUST_LOG and
    // LOG_FORMAT from the file are honoured.
    dotenvy::dotenv().ok();
    init_tracing();

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> what2eat::error::Result<()> {
    let app_config = AppConfig::load()?;
    what2eat::start_service(app_config).await
}

/// Filter comes from `RUST_LOG`, falling back to `debug` when `DEBUG` is set
/// and `info` otherwise. `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let debug = std::env::var("DEBUG")
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "info" }));

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
