//! imcredit Server Binary
//!
//! Standalone server for the imcredit author list API.

use imcredit_core::CreditConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("imcredit=info,tower_http=info")),
        )
        .init();

    let config = CreditConfig::load()?;
    imcredit_server::run(&config).await
}
