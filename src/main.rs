use cloudsearch_gateway::{
    api::{build_router, AppState},
    config::Config,
    domain::DomainRegistry,
    engine::{MemoryEngine, SearchEngine},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        eprintln!("Using default configuration");
        default_config()
    });

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "cloudsearch_gateway={},tower_http=info",
            config.observability.log_level
        ))
    });
    if config.observability.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!(
        "Starting {} v{}",
        config.observability.service_name,
        env!("CARGO_PKG_VERSION")
    );

    // Seed the domain registry from configuration
    let registry = Arc::new(DomainRegistry::new());
    for domain_config in &config.domains {
        match domain_config.build() {
            Ok(domain) => {
                tracing::info!(
                    domain = %domain.name(),
                    id = %domain.id(),
                    fields = domain.field_names().len(),
                    "domain configured"
                );
                registry.insert(domain);
            }
            Err(e) => {
                tracing::error!(
                    domain = %domain_config.name,
                    error = %e,
                    "skipping invalid domain configuration"
                );
            }
        }
    }
    if registry.is_empty() {
        tracing::warn!("no domains configured; every request will be rejected");
    }

    let engine: Arc<dyn SearchEngine> = Arc::new(MemoryEngine::new());
    let app_state = AppState::new(registry, engine, config.search.clone());
    let app = build_router(app_state);

    // Start HTTP server
    let http_addr = format!("{}:{}", config.server.host, config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_addr).await?;

    tracing::info!("HTTP API server listening on http://{}", http_addr);
    tracing::info!("   Search service: http://{}/2011-02-01/search", http_addr);
    tracing::info!(
        "   Document service: http://{}/2011-02-01/documents/batch",
        http_addr
    );
    tracing::info!("   Health check: http://{}/health", http_addr);

    let http_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(http_listener, app).await {
            tracing::error!("HTTP server error: {}", e);
        }
    });

    tokio::select! {
        _ = http_handle => {
            tracing::warn!("HTTP server stopped");
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    tracing::info!("Shutting down gracefully...");
    Ok(())
}

fn default_config() -> Config {
    use cloudsearch_gateway::config::*;

    Config {
        server: ServerConfig {
            host: "0.0.0.0".to_string(),
            http_port: 8080,
        },
        observability: ObservabilityConfig {
            log_level: "info".to_string(),
            json_logs: false,
            service_name: "cloudsearch-gateway".to_string(),
        },
        search: SearchConfig {
            fallback_search_field: "label".to_string(),
            default_size: 10,
        },
        domains: vec![],
    }
}
