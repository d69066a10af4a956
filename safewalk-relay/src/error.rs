use crate::config::Environment;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("출발지와 도착지 좌표가 필요합니다.")]
    MissingCoordinates,

    #[error("유효하지 않은 좌표값입니다.")]
    InvalidCoordinates,

    #[error("TMAP API 키가 설정되지 않았습니다.")]
    MissingApiKey,

    /// Upstream answered with a non-success status, e.g. `"502 Bad Gateway"`
    #[error("TMAP API 오류: {0}")]
    Upstream(String),

    #[error("유효하지 않은 응답 데이터입니다.")]
    InvalidResponse,

    #[error("경로 검색 중 오류가 발생했습니다.")]
    Transport(#[from] reqwest::Error),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MissingCoordinates | RelayError::InvalidCoordinates => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON error response; `details` is filled only when `environment` allows it
    pub fn respond(self, environment: Environment) -> Response {
        let details = environment
            .exposes_details()
            .then(|| format!("{:?}", self));
        let body = ErrorBody {
            success: false,
            error: self.to_string(),
            details,
        };
        (self.status(), Json(body)).into_response()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}
