//! DynamoDB-compatible error types.
//!
//! Errors are rendered as JSON with a `__type` field naming the error code
//! and a `Message` field carrying the human-readable text.

use std::fmt;

/// Well-known error codes in the externally visible vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum DynamoDBErrorCode {
    /// Table (or other resource) not found.
    ResourceNotFoundException,
    /// Validation error.
    #[default]
    ValidationException,
    /// Request body could not be parsed.
    SerializationException,
    /// Caller is not allowed to access the resource.
    AccessDeniedException,
    /// Request rate too high.
    ThrottlingException,
    /// Generic failure; carries no internal detail.
    InternalFailure,
    /// Backend temporarily unavailable.
    ServiceUnavailable,
    /// No operation is bound to the requested path.
    UnknownOperationException,
    /// The path exists but not for this HTTP method.
    MethodNotAllowed,
}

impl DynamoDBErrorCode {
    /// Returns the error type string for the JSON `__type` field.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::ResourceNotFoundException => {
                "com.amazonaws.dynamodb.v20120810#ResourceNotFoundException"
            }
            Self::ValidationException => "com.amazon.coral.validate#ValidationException",
            Self::SerializationException => {
                "com.amazonaws.dynamodb.v20120810#SerializationException"
            }
            Self::AccessDeniedException => "com.amazonaws.dynamodb.v20120810#AccessDeniedException",
            Self::ThrottlingException => "com.amazonaws.dynamodb.v20120810#ThrottlingException",
            Self::InternalFailure => "com.amazonaws.dynamodb.v20120810#InternalFailure",
            Self::ServiceUnavailable => "com.amazonaws.dynamodb.v20120810#ServiceUnavailable",
            Self::UnknownOperationException => {
                "com.amazonaws.dynamodb.v20120810#UnknownOperationException"
            }
            Self::MethodNotAllowed => "com.amazonaws.dynamodb.v20120810#MethodNotAllowed",
        }
    }

    /// Returns the short error code string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ResourceNotFoundException => "ResourceNotFoundException",
            Self::ValidationException => "ValidationException",
            Self::SerializationException => "SerializationException",
            Self::AccessDeniedException => "AccessDeniedException",
            Self::ThrottlingException => "ThrottlingException",
            Self::InternalFailure => "InternalFailure",
            Self::ServiceUnavailable => "ServiceUnavailable",
            Self::UnknownOperationException => "UnknownOperationException",
            Self::MethodNotAllowed => "MethodNotAllowed",
        }
    }

    /// Returns the default HTTP status code for this error.
    #[must_use]
    pub fn default_status_code(&self) -> http::StatusCode {
        match self {
            Self::ResourceNotFoundException | Self::UnknownOperationException => {
                http::StatusCode::NOT_FOUND
            }
            Self::AccessDeniedException => http::StatusCode::FORBIDDEN,
            Self::MethodNotAllowed => http::StatusCode::METHOD_NOT_ALLOWED,
            Self::InternalFailure => http::StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable => http::StatusCode::SERVICE_UNAVAILABLE,
            Self::ValidationException
            | Self::SerializationException
            | Self::ThrottlingException => http::StatusCode::BAD_REQUEST,
        }
    }

    /// Returns the default message used when none is supplied.
    #[must_use]
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::InternalFailure => {
                "The request processing has failed because of an unknown error, exception or \
                 failure."
            }
            Self::ServiceUnavailable => "The service is currently unavailable.",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for DynamoDBErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error in the externally visible vocabulary.
#[derive(Debug)]
pub struct DynamoDBError {
    /// The error code.
    pub code: DynamoDBErrorCode,
    /// A human-readable error message.
    pub message: String,
    /// The HTTP status code.
    pub status_code: http::StatusCode,
}

impl fmt::Display for DynamoDBError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DynamoDBError({}): {}", self.code, self.message)
    }
}

impl std::error::Error for DynamoDBError {}

impl DynamoDBError {
    /// Create a new `DynamoDBError` from an error code with its default message.
    #[must_use]
    pub fn new(code: DynamoDBErrorCode) -> Self {
        Self {
            status_code: code.default_status_code(),
            message: code.default_message().to_owned(),
            code,
        }
    }

    /// Create a new `DynamoDBError` with a custom message.
    #[must_use]
    pub fn with_message(code: DynamoDBErrorCode, message: impl Into<String>) -> Self {
        Self {
            status_code: code.default_status_code(),
            message: message.into(),
            code,
        }
    }

    /// Returns the `__type` string for the JSON error response.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        self.code.error_type()
    }

    // -- Convenience constructors --

    /// Table or resource not found.
    #[must_use]
    pub fn resource_not_found(message: impl Into<String>) -> Self {
        Self::with_message(DynamoDBErrorCode::ResourceNotFoundException, message)
    }

    /// Validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::with_message(DynamoDBErrorCode::ValidationException, message)
    }

    /// Generic failure with the fixed, detail-free message.
    #[must_use]
    pub fn internal_failure() -> Self {
        Self::new(DynamoDBErrorCode::InternalFailure)
    }

    /// No route matches the request path.
    #[must_use]
    pub fn unknown_operation(path: &str) -> Self {
        Self::with_message(
            DynamoDBErrorCode::UnknownOperationException,
            format!("No operation is bound to path: {path}"),
        )
    }

    /// The route exists but does not accept the method.
    #[must_use]
    pub fn method_not_allowed(method: &http::Method) -> Self {
        Self::with_message(
            DynamoDBErrorCode::MethodNotAllowed,
            format!("Method {method} is not allowed for this resource"),
        )
    }
}

/// Create a `DynamoDBError` from an error code.
///
/// # Examples
///
/// ```
/// use tablestack_dynamodb_model::dynamodb_error;
/// use tablestack_dynamodb_model::error::DynamoDBErrorCode;
///
/// let err = dynamodb_error!(ValidationException);
/// assert_eq!(err.code, DynamoDBErrorCode::ValidationException);
///
/// let err = dynamodb_error!(ResourceNotFoundException, "Table not found");
/// assert_eq!(err.message, "Table not found");
/// ```
#[macro_export]
macro_rules! dynamodb_error {
    ($code:ident) => {
        $crate::error::DynamoDBError::new($crate::error::DynamoDBErrorCode::$code)
    };
    ($code:ident, $msg:expr) => {
        $crate::error::DynamoDBError::with_message($crate::error::DynamoDBErrorCode::$code, $msg)
    };
}
