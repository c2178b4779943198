//! volsvc binary

use clap::{Arg, Command};
use gate_core::GateConfig;
use gate_http::GateServer;
use std::process;
use std::sync::Arc;
use tracing::{error, info};
use volsvc::EwmaVolatility;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "volsvc=info,gate_http=info,tower_http=warn".into()),
        )
        .init();

    // Parse command line arguments
    let matches = Command::new("volsvc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Exponentially-weighted volatility service on the infergate contract")
        .arg(
            Arg::new("bind")
                .short('b')
                .long("bind")
                .value_name("ADDRESS")
                .help("Bind address")
                .default_value("0.0.0.0"),
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .help("HTTP server port")
                .value_parser(clap::value_parser!(u16))
                .default_value("8080"),
        )
        .get_matches();

    // Service defaults; the environment layer overrides them.
    let defaults = GateConfig {
        model_name: "garch".to_string(),
        model_version: "1.0.0".to_string(),
        trained_weights: Some("/app/models/model.pt".to_string()),
        weights_format: ".pt".to_string(),
        ..GateConfig::default()
    };

    let config = match GateConfig::load_with_defaults(defaults) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    info!(
        model = %config.model_name,
        version = %config.model_version,
        rate_limit_per_min = config.rate_limit_per_min,
        "Starting volsvc"
    );

    let predictor = Arc::new(EwmaVolatility::default());
    let server = match GateServer::new(config, predictor) {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to build server: {}", e);
            process::exit(1);
        }
    };

    let bind = matches
        .get_one::<String>("bind")
        .map(String::as_str)
        .unwrap_or("0.0.0.0");
    let port = matches.get_one::<u16>("port").copied().unwrap_or(8080);

    if let Err(e) = server.serve(&format!("{}:{}", bind, port)).await {
        error!("Server failed: {}", e);
        process::exit(1);
    }
}
