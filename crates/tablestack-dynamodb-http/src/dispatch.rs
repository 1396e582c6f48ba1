//! Table handler trait and operation dispatch.

use std::future::Future;
use std::pin::Pin;

use tablestack_dynamodb_model::error::DynamoDBError;
use tablestack_dynamodb_model::input::DescribeTableInput;
use tokio_util::sync::CancellationToken;

use crate::response::TableResponseBody;

/// Boxed future returned by handler methods.
pub type HandlerFuture = Pin<
    Box<dyn Future<Output = Result<http::Response<TableResponseBody>, DynamoDBError>> + Send>,
>;

/// Everything the business logic needs from a routed request.
#[derive(Debug, Clone)]
pub struct OperationRequest {
    /// Inputs extracted from the request path.
    pub input: DescribeTableInput,
    /// Canonical URL of the request (scheme, host and path; no query string).
    pub path_url: String,
    /// Request ID echoed in `x-amzn-requestid`.
    pub request_id: String,
    /// Cancelled by the transport when the client goes away before the
    /// response is produced.
    pub cancel: CancellationToken,
}

/// Trait that the table business logic provider must implement.
///
/// This trait is the boundary between the HTTP transport layer and the
/// business logic layer. Implementations return a complete HTTP response or
/// an error already in the external vocabulary; the transport renders the
/// latter with [`crate::response::error_to_response`].
pub trait TableHandler: Send + Sync + 'static {
    /// Describe a single table.
    fn describe_table(&self, request: OperationRequest) -> HandlerFuture;
}

/// Dispatch a `DescribeTable` request to the handler.
pub async fn dispatch_describe_table<H: TableHandler>(
    handler: &H,
    request: OperationRequest,
) -> Result<http::Response<TableResponseBody>, DynamoDBError> {
    tracing::debug!(
        project_id = %request.input.project_id,
        table_name = %request.input.table_name,
        request_id = %request.request_id,
        "dispatching DescribeTable",
    );
    handler.describe_table(request).await
}
