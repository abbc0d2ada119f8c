/// Domain-specific error types for the advice service.
/// The engine never swallows or logs a failure: it returns one of these
/// and lets the caller decide how to surface it.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Failures of the pure bet-advice computation.
#[derive(Debug, thiserror::Error)]
pub enum AdviceError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("degenerate odds: {0}")]
    DegenerateOdds(String),

    #[error("numeric anomaly: {0}")]
    NumericAnomaly(String),
}

/// Service-layer failures (config, data files, lookups).
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("config error: {0}")]
    Config(String),

    #[error("data error: {0}")]
    Data(String),

    #[error("unknown championship: {0}")]
    UnknownChampionship(String),

    #[error("unknown fixture: {0}")]
    UnknownFixture(String),

    #[error("unknown user: {0}")]
    UnknownUser(String),

    #[error(transparent)]
    Advice(#[from] AdviceError),
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self {
        ServiceError::Data(e.to_string())
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(e: std::io::Error) -> Self {
        ServiceError::Data(e.to_string())
    }
}

impl ServiceError {
    fn status(&self) -> StatusCode {
        match self {
            ServiceError::Config(_) | ServiceError::Data(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::UnknownChampionship(_) => StatusCode::BAD_REQUEST,
            ServiceError::UnknownFixture(_) | ServiceError::UnknownUser(_) => StatusCode::NOT_FOUND,
            ServiceError::Advice(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

pub type AdviceResult<T> = Result<T, AdviceError>;
pub type ServiceResult<T> = Result<T, ServiceError>;
