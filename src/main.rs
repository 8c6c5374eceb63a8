//! REST + Swagger UI sample app entry point.

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rest_swagger_demo::api::docs::openapi_json;
use rest_swagger_demo::api::routes::{OPENAPI_JSON_PATH, SWAGGER_UI_PATH};
use rest_swagger_demo::api::{create_router, AppState};
use rest_swagger_demo::config::Config;
use rest_swagger_demo::metrics;
use rest_swagger_demo::utils::shutdown_signal;
use rest_swagger_demo::AppError;

/// REST + Swagger UI sample app.
#[derive(Parser, Debug)]
#[command(name = "rest-swagger-demo")]
#[command(about = "Static REST endpoints with Swagger UI, health and Prometheus metrics")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long, global = true)]
    port: Option<u16>,

    /// HTTP bind address (overrides HOST).
    #[arg(long, global = true)]
    host: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve,

    /// Check configuration validity.
    CheckConfig,

    /// Print the OpenAPI document as JSON.
    Openapi,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration; a broken environment still gets logging below
    let config = Config::load();
    let fallback_level = config
        .as_ref()
        .map(|c| c.rust_log.clone())
        .unwrap_or_else(|_| "info".to_string());
    let verbose = args.verbose || config.as_ref().map(|c| c.verbose).unwrap_or(false);

    // Initialize logging
    let filter = if verbose {
        EnvFilter::new("rest_swagger_demo=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback_level))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Handle subcommands
    match args.command {
        Some(Command::Openapi) => cmd_openapi(),
        Some(Command::CheckConfig) => cmd_check_config(config, args.host, args.port),
        Some(Command::Serve) | None => cmd_serve(config, args.host, args.port).await,
    }
}

/// Apply CLI overrides and validate.
fn resolve_config(
    config: Result<Config, envy::Error>,
    host: Option<String>,
    port: Option<u16>,
) -> Result<Config, AppError> {
    config?.with_overrides(host, port)
}

/// Print the OpenAPI document.
fn cmd_openapi() -> anyhow::Result<()> {
    println!("{}", openapi_json()?);
    Ok(())
}

/// Check configuration validity.
fn cmd_check_config(
    config: Result<Config, envy::Error>,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("REST + SWAGGER UI - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match resolve_config(config, host, port) {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration check failed"));
        }
    };

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Bind Address: {}:{}", config.host, config.port);
    println!("  Log Level: {}", config.rust_log);
    println!("  Metrics: {}", if config.metrics_enabled { "Enabled" } else { "Disabled" });
    println!("  Swagger UI: {}", if config.swagger_enabled { "Enabled" } else { "Disabled" });
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(
    config: Result<Config, envy::Error>,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    let config = match resolve_config(config, host, port) {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };
    info!("Configuration loaded successfully");

    // Create app state
    let mut app_state = AppState::new().with_swagger(config.swagger_enabled);
    if config.metrics_enabled {
        app_state = app_state.with_metrics(metrics::init_metrics()?);
        info!("Prometheus metrics enabled at /actuator/prometheus");
    }

    let router = create_router(app_state.clone());

    // Start HTTP server
    let addr = config.socket_addr().map_err(AppError::InvalidConfig)?;
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", listener.local_addr()?);
    info!("OpenAPI document at {}", OPENAPI_JSON_PATH);
    if config.swagger_enabled {
        info!("Swagger UI at {}/", SWAGGER_UI_PATH);
    }

    app_state.set_ready(true);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    app_state.set_ready(false);
    info!("Server stopped");
    Ok(())
}
