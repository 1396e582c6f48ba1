//! Response serialization and error formatting.

use bytes::Bytes;
use http_body_util::Full;

use tablestack_dynamodb_model::error::DynamoDBError;

/// Content type for JSON responses.
pub const CONTENT_TYPE: &str = "application/json";

/// Response body type. All responses are buffered JSON.
pub type TableResponseBody = Full<Bytes>;

/// Serialize an error into a JSON response body.
///
/// ```json
/// {
///   "__type": "com.amazonaws.dynamodb.v20120810#ResourceNotFoundException",
///   "Message": "Table 't1' does not exist"
/// }
/// ```
#[must_use]
pub fn error_to_json(error: &DynamoDBError) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({
        "__type": error.error_type(),
        "Message": error.message,
    }))
    .expect("JSON serialization of error cannot fail")
}

/// Convert a `DynamoDBError` into a complete HTTP error response.
#[must_use]
pub fn error_to_response(
    error: &DynamoDBError,
    request_id: &str,
) -> http::Response<TableResponseBody> {
    build_response(error.status_code, error_to_json(error), request_id)
}

/// Build a `200 OK` response from JSON bytes.
#[must_use]
pub fn json_response(json: Vec<u8>, request_id: &str) -> http::Response<TableResponseBody> {
    build_response(http::StatusCode::OK, json, request_id)
}

/// Build the health check response.
#[must_use]
pub fn health_response(version: &str, request_id: &str) -> http::Response<TableResponseBody> {
    let json = serde_json::to_vec(&serde_json::json!({
        "status": "running",
        "version": version,
    }))
    .expect("JSON serialization of health status cannot fail");
    json_response(json, request_id)
}

fn build_response(
    status: http::StatusCode,
    json: Vec<u8>,
    request_id: &str,
) -> http::Response<TableResponseBody> {
    let crc = crc32fast::hash(&json);

    let mut response = http::Response::builder()
        .status(status)
        .header("content-type", CONTENT_TYPE)
        .body(Full::new(Bytes::from(json)))
        .expect("valid JSON response");

    let headers = response.headers_mut();
    if let Ok(hv) = http::HeaderValue::from_str(request_id) {
        headers.insert("x-amzn-requestid", hv);
    }
    if let Ok(hv) = http::HeaderValue::from_str(&crc.to_string()) {
        headers.insert("x-amz-crc32", hv);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablestack_dynamodb_model::error::DynamoDBErrorCode;

    #[test]
    fn test_should_format_error_json() {
        let err = DynamoDBError::with_message(
            DynamoDBErrorCode::ResourceNotFoundException,
            "Table 'users' does not exist",
        );
        let json = error_to_json(&err);
        let parsed: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(
            parsed["__type"],
            "com.amazonaws.dynamodb.v20120810#ResourceNotFoundException"
        );
        assert_eq!(parsed["Message"], "Table 'users' does not exist");
    }

    #[test]
    fn test_should_build_error_response_with_correct_status() {
        let err = DynamoDBError::resource_not_found("missing");
        let resp = error_to_response(&err, "test-req-123");
        assert_eq!(resp.status(), http::StatusCode::NOT_FOUND);
        assert_eq!(resp.headers().get("content-type").unwrap(), CONTENT_TYPE);
        assert_eq!(
            resp.headers().get("x-amzn-requestid").unwrap(),
            "test-req-123",
        );
        assert!(resp.headers().get("x-amz-crc32").is_some());
    }

    #[test]
    fn test_should_build_json_success_response() {
        let json = serde_json::to_vec(&serde_json::json!({"Table": {}})).unwrap();
        let expected_crc = crc32fast::hash(&json).to_string();
        let resp = json_response(json, "req-456");
        assert_eq!(resp.status(), http::StatusCode::OK);
        assert_eq!(resp.headers().get("x-amz-crc32").unwrap(), expected_crc.as_str());
    }
}
