//! Handler bridging the HTTP layer to the DescribeTable provider.

use std::sync::Arc;

use tablestack_dynamodb_http::dispatch::{HandlerFuture, OperationRequest, TableHandler};
use tablestack_dynamodb_http::response::{TableResponseBody, json_response};
use tablestack_dynamodb_model::error::DynamoDBError;

use crate::context::RequestContext;
use crate::provider::TableStackProvider;

/// Handler that bridges the HTTP layer to the provider.
#[derive(Debug)]
pub struct TableStackHandler {
    provider: Arc<TableStackProvider>,
}

impl TableStackHandler {
    /// Create a new handler wrapping a provider.
    #[must_use]
    pub fn new(provider: Arc<TableStackProvider>) -> Self {
        Self { provider }
    }
}

impl TableHandler for TableStackHandler {
    fn describe_table(&self, request: OperationRequest) -> HandlerFuture {
        let provider = Arc::clone(&self.provider);
        Box::pin(async move {
            let mut ctx = RequestContext::new(request.request_id, request.path_url)
                .with_cancellation(request.cancel);
            let output = provider
                .handle_describe_table(&mut ctx, request.input)
                .await
                .map_err(DynamoDBError::from)?;
            serialize(&output, ctx.request_id())
        })
    }
}

fn serialize<T: serde::Serialize>(
    output: &T,
    request_id: &str,
) -> Result<http::Response<TableResponseBody>, DynamoDBError> {
    let json = serde_json::to_vec(output).map_err(|e| {
        tracing::warn!(request_id, error = %e, "failed to serialize response");
        DynamoDBError::internal_failure()
    })?;
    Ok(json_response(json, request_id))
}
