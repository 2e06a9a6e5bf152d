//! # 헬스체크(Health Check) 핸들러
//!
//! 서버가 정상적으로 동작하는지 확인하는 엔드포인트입니다.
//!
//! ## 엔드포인트
//! - `GET /api/health` → `{ "status": "ok" }`

use axum::Json;
use serde_json::{json, Value};

/// `GET /health` — 서버 상태를 확인합니다.
///
/// Extractor도 Result도 없는 가장 단순한 핸들러입니다.
/// 저장소를 건드리지 않으므로 data 디렉토리가 깨져도 응답합니다.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok"
    }))
}
