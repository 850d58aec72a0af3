//! Binary entrypoint for the Codebench API server.
use codebench_api::{run, ApiConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "codebench_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env();
    if let Err(e) = run(config).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
