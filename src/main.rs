use std::process::exit;

use dotenv::dotenv;
use rolodex_api::prelude::run_app;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("rolodex_api=info,tower_http=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run_app().await {
        eprintln!("Error: {e}");
        exit(1);
    }
}
