use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::DomainError;
use sea_orm::DbErr;
use serde::Serialize;

/// Envelope shape for responses that carry no data: every error, plus
/// the message-only successes (sign-out, activate, deletes). `status`
/// repeats the application status code inside the body because the
/// frontends read the envelope, not the transport line.
#[derive(Serialize, utoipa::ToSchema)]
pub struct StatusBody {
    /// Application status code, mirrored onto the transport status.
    #[schema(example = 401)]
    pub status: u16,
    /// Human-readable description.
    #[schema(example = "XSRF token missing or mismatched")]
    pub message: String,
}

impl StatusBody {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
        }
    }
}

impl IntoResponse for StatusBody {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

/// Application-level error type.
///
/// The token-gate errors deliberately spread across 400/401/402/403:
/// the status code itself tells the client which verification step
/// failed, which is the contract the frontends were written against.
#[derive(Debug)]
pub enum AppError {
    /// Malformed input shape (bad email, non-hex token, bad date string).
    Format(String),
    /// Well-formed input violating a bound (141-char tweet, 33-char handle).
    Range(String),
    /// Cross-field business rule (password confirmation mismatch).
    Validation(String),
    /// No `X-JWT-TOKEN` header on an authenticated endpoint.
    TokenMissing,
    /// The presented token is not structurally a JWT.
    TokenMalformed,
    /// No session-side counterpart token, or it differs from the one presented.
    TokenMismatch,
    /// Signature did not verify against the session's signing secret.
    TokenSignature,
    /// Token expired, issuer/audience wrong, or bound to another session.
    TokenExpired,
    /// Missing or mismatched `X-XSRF-TOKEN` on a mutating request.
    XsrfDenied,
    InvalidCredentials,
    /// Sign-in attempted before the profile was activated.
    NotActivated,
    /// Acting on another profile's resource.
    PermissionDenied,
    NotFound(String),
    /// Duplicate identity on insert.
    Conflict(String),
    /// At-handle or email unique constraint hit on sign-up.
    HandleTaken,
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, StatusBody) {
        let (status, message): (StatusCode, String) = match self {
            AppError::Format(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Range(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::TokenMissing => (
                StatusCode::UNAUTHORIZED,
                "Authentication token required".into(),
            ),
            AppError::TokenMalformed => (
                StatusCode::BAD_REQUEST,
                "Authentication token is not a valid JWT".into(),
            ),
            AppError::TokenMismatch => (
                StatusCode::UNAUTHORIZED,
                "Authentication token does not match this session".into(),
            ),
            AppError::TokenSignature => (
                StatusCode::PAYMENT_REQUIRED,
                "Authentication token signature is invalid".into(),
            ),
            AppError::TokenExpired => (
                StatusCode::FORBIDDEN,
                "Authentication token is expired or bound to another session".into(),
            ),
            AppError::XsrfDenied => (
                StatusCode::UNAUTHORIZED,
                "XSRF token missing or mismatched".into(),
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid email or password".into(),
            ),
            AppError::NotActivated => (
                StatusCode::FORBIDDEN,
                "Profile has not been activated".into(),
            ),
            AppError::PermissionDenied => (
                StatusCode::FORBIDDEN,
                "You may only modify your own resources".into(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::HandleTaken => (
                StatusCode::CONFLICT,
                "At-handle or email is already registered".into(),
            ),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".into(),
                )
            }
        };

        (
            status,
            StatusBody {
                status: status.as_u16(),
                message,
            },
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Format(msg) => AppError::Format(msg),
            DomainError::Range(msg) => AppError::Range(msg),
        }
    }
}

impl From<tower_sessions::session::Error> for AppError {
    fn from(err: tower_sessions::session::Error) -> Self {
        AppError::Internal(format!("Session store error: {err}"))
    }
}
