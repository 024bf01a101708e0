use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use flower_server::backend::{BackendFactory, FlowerBackend};
use flower_server::config::AppConfig;
use flower_server::resource::build_router;

#[derive(Parser, Debug)]
#[command(name = "flower-server")]
#[command(about = "A CRUD service for a collection of flower specimens")]
struct Args {
    /// Configuration file path (default: config.yaml)
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Port to listen on (overrides config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to (overrides config file)
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt::init();

    // Load configuration from the specified file, or fall back to an
    // in-memory store when no config exists yet.
    let mut app_config = if args.config == "config.yaml" && !std::path::Path::new("config.yaml").exists() {
        println!("No config.yaml found, using default configuration (in-memory SQLite)");
        AppConfig::default_config()
    } else {
        AppConfig::load_from_file(&args.config)
            .map_err(|e| format!("Failed to load configuration: {}", e))?
    };

    // Override with command line arguments if provided
    if let Some(port) = args.port {
        app_config.server.port = port;
    }
    if let Some(host) = args.host {
        app_config.server.host = host;
    }

    println!("Connecting to store at {}", app_config.database.url);
    let backend = BackendFactory::create(&app_config.database).await?;
    backend.health_check().await?;
    println!("Connected to the flower database!");

    let host: std::net::IpAddr = app_config.server.host.parse().unwrap_or_else(|_| {
        eprintln!(
            "Invalid host address: {}, using 127.0.0.1",
            app_config.server.host
        );
        [127, 0, 0, 1].into()
    });
    let addr = SocketAddr::from((host, app_config.server.port));

    let app = build_router(backend, Arc::new(app_config));

    println!("flower-server listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
