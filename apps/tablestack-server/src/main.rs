//! TableStack Server - DynamoDB-compatible table metadata service.
//!
//! Serves `DescribeTable` for tables whose schemas are seeded from a JSON
//! document at startup.
//!
//! # Usage
//!
//! ```text
//! TABLESTACK_SCHEMA_FILE=schemas.json tablestack-server
//! curl http://localhost:8480/v1/my-project/data/tables/users
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GATEWAY_LISTEN` | `0.0.0.0:8480` | Bind address |
//! | `TABLESTACK_SCHEMA_FILE` | *(unset)* | JSON seed of table schemas per project |
//! | `TABLESTACK_PUBLIC_SCHEME` | `http` | Scheme of the URLs placed in `Links` |
//! | `TABLESTACK_PUBLIC_HOST` | *(request `Host`)* | Host of the URLs placed in `Links` |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use tablestack_core::TableStackConfig;
use tablestack_dynamodb_core::config::DescribeTableConfig;
use tablestack_dynamodb_core::handler::TableStackHandler;
use tablestack_dynamodb_core::provider::TableStackProvider;
use tablestack_dynamodb_core::storage::MemorySchemaStore;
use tablestack_dynamodb_http::service::{TableHttpConfig, TableHttpService};

/// Server version reported in health check responses.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

/// Build the [`TableHttpConfig`] from the application [`DescribeTableConfig`].
fn build_http_config(config: &DescribeTableConfig) -> TableHttpConfig {
    TableHttpConfig {
        public_scheme: config.public_scheme.clone(),
        public_host: config.public_host.clone(),
        version: VERSION.to_owned(),
    }
}

/// Build the schema store, seeding it when a seed file is configured.
fn build_store(config: &DescribeTableConfig) -> Result<MemorySchemaStore> {
    let store = MemorySchemaStore::new();
    match &config.schema_file {
        Some(path) => {
            store
                .load_seed_file(path)
                .with_context(|| format!("failed to seed schemas from {}", path.display()))?;
        }
        None => warn!("TABLESTACK_SCHEMA_FILE is not set, serving an empty catalog"),
    }
    Ok(store)
}

/// Accept connections until ctrl-c, then drain in-flight requests.
async fn serve(listener: TcpListener, service: TableHttpService<TableStackHandler>) -> Result<()> {
    let graceful = hyper_util::server::graceful::GracefulShutdown::new();
    let http = HttpConnBuilder::new(TokioExecutor::new());

    let shutdown = async {
        tokio::signal::ctrl_c().await.ok();
        info!("received shutdown signal, draining connections");
    };

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = listener.accept() => {
                let (stream, peer_addr) = match result {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "failed to accept connection");
                        continue;
                    }
                };

                let svc = service.clone();
                let conn = http.serve_connection(TokioIo::new(stream), svc);
                let conn = graceful.watch(conn.into_owned());

                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        error!(peer_addr = %peer_addr, error = %e, "connection error");
                    }
                });
            }

            () = &mut shutdown => {
                info!("shutting down gracefully");
                break;
            }
        }
    }

    graceful.shutdown().await;
    info!("all connections drained, exiting");

    Ok(())
}

/// Query the health endpoint of a running server.
async fn run_health_check(addr: &str) -> Result<()> {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    let stream = TcpStream::connect(addr)
        .await
        .with_context(|| format!("cannot connect to {addr}"))?;

    let (mut reader, mut writer) = stream.into_split();

    let request = format!("GET /health HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    writer.write_all(request.as_bytes()).await?;
    writer.shutdown().await?;

    let mut response = String::new();
    reader.read_to_string(&mut response).await?;

    if response.contains("200 OK") && response.contains("\"running\"") {
        Ok(())
    } else {
        anyhow::bail!("unhealthy response from {addr}")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = TableStackConfig::from_env();

    // Handle --health-check flag for Docker HEALTHCHECK.
    if std::env::args().any(|a| a == "--health-check") {
        let addr = config.gateway_listen.replace("0.0.0.0", "127.0.0.1");
        let healthy = run_health_check(&addr).await.is_ok();
        std::process::exit(i32::from(!healthy));
    }

    init_tracing(&config.log_level)?;

    let table_config = DescribeTableConfig::from_env().context("invalid configuration")?;
    info!(
        schema_file = ?table_config.schema_file,
        public_scheme = %table_config.public_scheme,
        public_host = ?table_config.public_host,
        "initializing DescribeTable service",
    );

    let store = build_store(&table_config)?;
    let provider = TableStackProvider::new(Arc::new(store));
    let handler = TableStackHandler::new(Arc::new(provider));
    let service = TableHttpService::new(Arc::new(handler), build_http_config(&table_config));

    let addr: SocketAddr = config
        .gateway_listen
        .parse()
        .with_context(|| format!("invalid bind address: {}", config.gateway_listen))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(%addr, version = VERSION, "starting TableStack Server");

    serve(listener, service).await
}
