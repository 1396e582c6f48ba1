//! Integration tests for TableStack server.
//!
//! Each test starts an in-process server on an ephemeral port of
//! `127.0.0.1` and talks to it over real HTTP with `reqwest`.
//!
//! ```text
//! cargo test -p tablestack-integration
//! ```

use std::sync::{Arc, Once};

use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use tokio::net::TcpListener;

use tablestack_dynamodb_core::handler::TableStackHandler;
use tablestack_dynamodb_core::provider::TableStackProvider;
use tablestack_dynamodb_core::storage::MemorySchemaStore;
use tablestack_dynamodb_http::service::{TableHttpConfig, TableHttpService};

mod test_describe_table;
mod test_error;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Schemas seeded into every test server.
pub const SEED: &str = r#"{
    "p1": [
        {
            "table_name": "t1",
            "attribute_type_map": {"id": "S", "val": "N"},
            "key_attributes": ["id"]
        },
        {
            "table_name": "events",
            "attribute_type_map": {"id": "S", "ts": "N", "score": "N", "title": "S"},
            "key_attributes": ["id", "ts"],
            "index_def_map": {
                "by_score": {"range_key": "score", "projected_attributes": ["title"]},
                "by_title": {"range_key": "title"}
            }
        },
        {
            "table_name": "order.v2",
            "attribute_type_map": {"order_id": "S"},
            "key_attributes": ["order_id"]
        }
    ],
    "p2": [
        {
            "table_name": "other",
            "attribute_type_map": {"pk": "B"},
            "key_attributes": ["pk"]
        }
    ]
}"#;

/// Start a server seeded with [`SEED`] and return its base URL.
pub async fn start_server() -> anyhow::Result<String> {
    start_server_with(TableHttpConfig::default()).await
}

/// Start a server seeded with [`SEED`] using the given HTTP configuration.
pub async fn start_server_with(config: TableHttpConfig) -> anyhow::Result<String> {
    init_tracing();

    let store = MemorySchemaStore::new();
    store.load_json(SEED)?;
    let provider = TableStackProvider::new(Arc::new(store));
    let handler = TableStackHandler::new(Arc::new(provider));
    let service = TableHttpService::new(Arc::new(handler), config);

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let http = HttpConnBuilder::new(TokioExecutor::new());
        loop {
            let (stream, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(e) => {
                    tracing::warn!(error = %e, "test server stopped accepting");
                    break;
                }
            };
            let conn = http
                .serve_connection(TokioIo::new(stream), service.clone())
                .into_owned();
            tokio::spawn(async move {
                if let Err(e) = conn.await {
                    tracing::debug!(error = %e, "test connection closed with error");
                }
            });
        }
    });

    Ok(format!("http://{addr}"))
}
