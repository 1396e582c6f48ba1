//! HTTP service implementing the hyper `Service` trait.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::dispatch::{OperationRequest, TableHandler, dispatch_describe_table};
use crate::response::{CONTENT_TYPE, TableResponseBody, error_to_response, health_response};
use crate::router::{Route, canonical_url, resolve_route};

/// Configuration for the HTTP service.
#[derive(Debug, Clone)]
pub struct TableHttpConfig {
    /// Scheme used when building canonical request URLs.
    pub public_scheme: String,
    /// Host used when building canonical request URLs. Falls back to the
    /// request's `Host` header when unset.
    pub public_host: Option<String>,
    /// Version reported by the health endpoint.
    pub version: String,
}

impl Default for TableHttpConfig {
    fn default() -> Self {
        Self {
            public_scheme: "http".to_owned(),
            public_host: None,
            version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}

/// Hyper `Service` implementation for the table API.
///
/// Wraps a [`TableHandler`] implementation and routes incoming HTTP requests
/// to it. Requests carry no body, so the service accepts any body type.
#[derive(Debug)]
pub struct TableHttpService<H: TableHandler> {
    handler: Arc<H>,
    config: Arc<TableHttpConfig>,
}

impl<H: TableHandler> TableHttpService<H> {
    /// Create a new `TableHttpService`.
    pub fn new(handler: Arc<H>, config: TableHttpConfig) -> Self {
        Self {
            handler,
            config: Arc::new(config),
        }
    }
}

impl<H: TableHandler> Clone for TableHttpService<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            config: Arc::clone(&self.config),
        }
    }
}

impl<H: TableHandler, B: Send + 'static> hyper::service::Service<http::Request<B>>
    for TableHttpService<H>
{
    type Response = http::Response<TableResponseBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: http::Request<B>) -> Self::Future {
        let handler = Arc::clone(&self.handler);
        let config = Arc::clone(&self.config);
        let request_id = uuid::Uuid::new_v4().to_string();
        let cancel = CancellationToken::new();

        Box::pin(async move {
            // Hyper drops this future when the connection closes mid-request.
            let _guard = cancel.clone().drop_guard();
            let (parts, _body) = req.into_parts();
            let response =
                process_request(&parts, handler.as_ref(), &config, &request_id, cancel).await;
            Ok(add_common_headers(response, &request_id))
        })
    }
}

/// Process a single HTTP request through the full pipeline.
async fn process_request<H: TableHandler>(
    parts: &http::request::Parts,
    handler: &H,
    config: &TableHttpConfig,
    request_id: &str,
    cancel: CancellationToken,
) -> http::Response<TableResponseBody> {
    // 1. Route: method + path.
    let route = match resolve_route(&parts.method, parts.uri.path()) {
        Ok(route) => route,
        Err(err) => {
            tracing::debug!(path = %parts.uri.path(), error = %err, "request did not route");
            return error_to_response(&err, request_id);
        }
    };

    // 2. Dispatch.
    match route {
        Route::Health => health_response(&config.version, request_id),
        Route::DescribeTable(input) => {
            let request = OperationRequest {
                input,
                path_url: canonical_url(
                    parts,
                    &config.public_scheme,
                    config.public_host.as_deref(),
                ),
                request_id: request_id.to_owned(),
                cancel,
            };
            match dispatch_describe_table(handler, request).await {
                Ok(response) => response,
                Err(err) => error_to_response(&err, request_id),
            }
        }
    }
}

/// Add common response headers to every response.
fn add_common_headers(
    mut response: http::Response<TableResponseBody>,
    request_id: &str,
) -> http::Response<TableResponseBody> {
    let headers = response.headers_mut();

    if let Ok(hv) = http::HeaderValue::from_str(request_id) {
        headers.entry("x-amzn-requestid").or_insert(hv);
    }

    headers
        .entry("content-type")
        .or_insert(http::HeaderValue::from_static(CONTENT_TYPE));

    headers.insert("server", http::HeaderValue::from_static("TableStack"));

    response
}
