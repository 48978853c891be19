use std::sync::Arc;

use rentals_web::config::{load_config, print_schema};
use rentals_web::startup;
use rentals_web::utils::logger::init_logging;
use tracing::error;

#[tokio::main]
async fn main() {
    if std::env::args().skip(1).any(|arg| arg == "--schema") {
        if let Err(e) = print_schema() {
            eprintln!("Failed to render config schema: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let config = Arc::new(load_config());
    if let Err(e) = init_logging(&config.logging) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    if let Err(e) = startup::run(config).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
