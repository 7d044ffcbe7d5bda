//! The JSON envelope returned by every API endpoint.
//!
//! Successful calls return `{"success": true, "data": ...}` and failed calls
//! return `{"success": false, "error": {"kind": ..., "message": ...}}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// The category of a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// No or invalid caller identity.
    Unauthorized,
    /// The referenced account or transaction is missing or not owned by the caller.
    NotFound,
    /// Malformed request.
    Invalid,
    /// The caller made too many requests.
    RateLimited,
    /// The caller was blocked by the abuse-protection gate.
    Blocked,
    /// The store could not complete the operation.
    StoreFailure,
    /// The receipt scanner failed.
    ReceiptScan,
}

/// A successful response carrying `data`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Success<T> {
    success: bool,
    /// The operation's result.
    pub data: T,
}

/// Wrap `data` in a success envelope with the status code 200 OK.
pub fn success<T: Serialize>(data: T) -> Response {
    success_with_status(StatusCode::OK, data)
}

/// Wrap `data` in a success envelope with the given status code.
pub fn success_with_status<T: Serialize>(status_code: StatusCode, data: T) -> Response {
    (
        status_code,
        Json(Success {
            success: true,
            data,
        }),
    )
        .into_response()
}

/// The body of a failed response.
#[derive(Debug, Serialize, Deserialize)]
pub struct Failure {
    success: bool,
    /// What went wrong.
    pub error: FailureDetail,
}

/// The kind and message of a failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct FailureDetail {
    /// The category of the error.
    pub kind: ErrorKind,
    /// A human readable description of the error.
    pub message: String,
}

impl Failure {
    pub(crate) fn new(kind: ErrorKind, message: String) -> Self {
        Self {
            success: false,
            error: FailureDetail { kind, message },
        }
    }
}
