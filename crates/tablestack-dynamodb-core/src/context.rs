//! Per-request context passed to the schema store.

use tablestack_core::ProjectId;
use tokio_util::sync::CancellationToken;

/// Ambient state of one request.
///
/// The cancellation token is normally the transport's, so a client that goes
/// away cancels a fetch in flight. Clones share the token.
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: String,
    path_url: String,
    tenant: Option<ProjectId>,
    cancellation: CancellationToken,
}

impl RequestContext {
    /// Create a context for a request addressed by `path_url`.
    #[must_use]
    pub fn new(request_id: impl Into<String>, path_url: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            path_url: path_url.into(),
            tenant: None,
            cancellation: CancellationToken::new(),
        }
    }

    /// Replace the context's own token with `token`.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Request ID.
    #[must_use]
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Canonical URL of the request.
    #[must_use]
    pub fn path_url(&self) -> &str {
        &self.path_url
    }

    /// Tenant scope, once bound.
    #[must_use]
    pub fn tenant(&self) -> Option<&ProjectId> {
        self.tenant.as_ref()
    }

    /// Bind the tenant scope. Must happen before any storage access.
    pub fn set_tenant(&mut self, tenant: ProjectId) {
        self.tenant = Some(tenant);
    }

    /// Token cancelled when the request is abandoned.
    #[must_use]
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }
}
