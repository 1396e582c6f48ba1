//! Request router.
//!
//! Tables are REST resources nested under their owning project:
//!
//! ```text
//! GET /v1/{project_id}/data/tables/{table_name}
//! ```
//!
//! Path segments are percent-decoded before they reach the business logic.

use percent_encoding::percent_decode_str;

use tablestack_dynamodb_model::error::DynamoDBError;
use tablestack_dynamodb_model::input::DescribeTableInput;

/// API version prefix.
const API_VERSION: &str = "v1";

/// Path of the liveness endpoint.
pub const HEALTH_PATH: &str = "/health";

/// A resolved route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Describe a single table.
    DescribeTable(DescribeTableInput),
    /// Liveness check.
    Health,
}

/// Resolve a route from the request method and path.
///
/// Unknown paths yield `UnknownOperationException`; known paths requested
/// with the wrong method yield `MethodNotAllowed`.
pub fn resolve_route(method: &http::Method, path: &str) -> Result<Route, DynamoDBError> {
    if path == HEALTH_PATH {
        return require_get(method).map(|()| Route::Health);
    }

    let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
    match segments.as_slice() {
        [API_VERSION, project_id, "data", "tables", table_name]
            if !project_id.is_empty() && !table_name.is_empty() =>
        {
            require_get(method)?;
            Ok(Route::DescribeTable(DescribeTableInput::new(
                decode_segment(project_id)?,
                decode_segment(table_name)?,
            )))
        }
        _ => Err(DynamoDBError::unknown_operation(path)),
    }
}

/// Build the canonical URL of a request: scheme, host and path, no query.
///
/// `public_host` takes precedence over the `Host` header, which in turn takes
/// precedence over the request URI's authority.
#[must_use]
pub fn canonical_url(
    parts: &http::request::Parts,
    scheme: &str,
    public_host: Option<&str>,
) -> String {
    let host = public_host
        .map(ToOwned::to_owned)
        .or_else(|| {
            parts
                .headers
                .get(http::header::HOST)
                .and_then(|v| v.to_str().ok())
                .map(ToOwned::to_owned)
        })
        .or_else(|| parts.uri.authority().map(|a| a.as_str().to_owned()))
        .unwrap_or_else(|| "localhost".to_owned());

    format!("{scheme}://{host}{}", parts.uri.path())
}

fn require_get(method: &http::Method) -> Result<(), DynamoDBError> {
    if method == http::Method::GET {
        Ok(())
    } else {
        Err(DynamoDBError::method_not_allowed(method))
    }
}

fn decode_segment(segment: &str) -> Result<String, DynamoDBError> {
    percent_decode_str(segment)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .map_err(|_| {
            DynamoDBError::validation(format!("Path segment is not valid UTF-8: {segment}"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablestack_dynamodb_model::error::DynamoDBErrorCode;

    #[test]
    fn test_should_resolve_describe_table() {
        let route = resolve_route(&http::Method::GET, "/v1/p1/data/tables/users").unwrap();
        assert_eq!(
            route,
            Route::DescribeTable(DescribeTableInput::new("p1", "users"))
        );
    }

    #[test]
    fn test_should_percent_decode_segments() {
        let route =
            resolve_route(&http::Method::GET, "/v1/p%201/data/tables/my%2Etable").unwrap();
        assert_eq!(
            route,
            Route::DescribeTable(DescribeTableInput::new("p 1", "my.table"))
        );
    }

    #[test]
    fn test_should_resolve_health() {
        let route = resolve_route(&http::Method::GET, "/health").unwrap();
        assert_eq!(route, Route::Health);
    }

    #[test]
    fn test_should_reject_wrong_method() {
        let err = resolve_route(&http::Method::DELETE, "/v1/p1/data/tables/users").unwrap_err();
        assert_eq!(err.code, DynamoDBErrorCode::MethodNotAllowed);
        assert_eq!(err.status_code, http::StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn test_should_reject_unknown_paths() {
        for path in [
            "/",
            "/v1/p1/data/tables",
            "/v1/p1/data/tables/",
            "/v2/p1/data/tables/users",
            "/v1/p1/data/tables/users/extra",
            "/v1//data/tables/users",
        ] {
            let err = resolve_route(&http::Method::GET, path).unwrap_err();
            assert_eq!(
                err.code,
                DynamoDBErrorCode::UnknownOperationException,
                "failed for path: {path}"
            );
        }
    }

    #[test]
    fn test_should_reject_invalid_utf8_segment() {
        let err = resolve_route(&http::Method::GET, "/v1/p1/data/tables/%FF").unwrap_err();
        assert_eq!(err.code, DynamoDBErrorCode::ValidationException);
    }

    #[test]
    fn test_should_build_canonical_url_from_host_header() {
        let (parts, ()) = http::Request::builder()
            .uri("/v1/p1/data/tables/users?verbose=1")
            .header("host", "db.example.com:8480")
            .body(())
            .unwrap()
            .into_parts();
        assert_eq!(
            canonical_url(&parts, "http", None),
            "http://db.example.com:8480/v1/p1/data/tables/users"
        );
    }

    #[test]
    fn test_should_prefer_public_host() {
        let (parts, ()) = http::Request::builder()
            .uri("/v1/p1/data/tables/users")
            .header("host", "internal:8480")
            .body(())
            .unwrap()
            .into_parts();
        assert_eq!(
            canonical_url(&parts, "https", Some("api.example.com")),
            "https://api.example.com/v1/p1/data/tables/users"
        );
    }
}
