//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//! Rust에서는 예외(exception) 대신 `Result<T, E>` 타입으로 에러를 처리합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 HTTP 응답으로 자동 변환
//!
//! 에러 분류:
//! - 검증 에러(`BadRequest`) → 400: 필수 필드 누락/잘못된 값, 부분 저장 없음
//! - 찾을 수 없음(`NotFound`) → 404: 대상 기록/계획이 존재하지 않음, 부작용 없음
//! - 저장 실패(`Io`/`Persistence`/`Internal`) → 500: 저장이 성공도 실패도
//!   확인되지 않은 상태임을 호출자에게 명시적으로 알립니다
//! - 외부 서비스 실패(`ExternalService`) → 502: "로컬에는 저장됐지만 동기화
//!   실패"를 저장 실패와 구분할 수 있도록 별도 variant로 둡니다

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청한 리소스를 찾을 수 없음 (HTTP 404)
    #[error("Resource not found")]
    NotFound,

    /// 잘못된 요청 (HTTP 400)
    /// String을 포함하여 구체적인 에러 메시지를 전달합니다.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// JSON 직렬화/역직렬화 오류 (HTTP 500)
    /// #[from]: serde_json::Error → AppError::Persistence 자동 변환.
    /// 저장 파일이 깨졌거나 쓰기 직전 직렬화에 실패한 경우입니다.
    #[error("Persistence error: {0}")]
    Persistence(#[from] serde_json::Error),

    /// 파일 입출력 오류 (HTTP 500)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 외부 동기화 서비스(Bitable) 실패 (HTTP 502)
    /// 저장 에러(500)와 구분해야 UI가 "저장은 됐지만 동기화 안 됨"을
    /// 표시할 수 있습니다.
    #[error("External service error: {0}")]
    ExternalService(String),
}

// 핸들러가 Err(AppError)를 반환하면 Axum이 이 메서드를 호출하여
// 적절한 HTTP 응답을 생성합니다.
impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 내부 에러(Io, Persistence, Internal)는 실제 에러 내용을 로그에만
    /// 기록하고, 클라이언트에는 일반적인 메시지만 반환합니다 (보안을 위해).
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found", self.to_string()),
            AppError::BadRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", msg.clone())
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Persistence(ref e) => {
                tracing::error!("Persistence error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "persistence_error",
                    "A persistence error occurred".to_string(),
                )
            }
            AppError::Io(ref e) => {
                tracing::error!("IO error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "io_error",
                    "An IO error occurred".to_string(),
                )
            }
            AppError::ExternalService(ref msg) => {
                tracing::error!("External service error: {}", msg);
                (StatusCode::BAD_GATEWAY, "external_service_error", msg.clone())
            }
        };

        // 결과: { "error": { "code": "not_found", "message": "..." } }
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
