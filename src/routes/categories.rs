//! # 활동 카테고리 설정 핸들러
//!
//! 활동명 → 카테고리 매핑 설정을 읽고 교체합니다.
//! 매칭 규칙(완전 일치 우선, 다음 부분 문자열, 목록 순서가 우선순위)은
//! `services::normalizer`에 있습니다.
//!
//! ## 엔드포인트
//! - `GET /api/activity-categories` → 현재 설정 (없으면 기본 목록)
//! - `PUT /api/activity-categories` → 설정 전체 교체

use crate::{
    error::AppError,
    models::ActivityCategory,
    store,
};
use axum::{extract::State, Json};

use super::records::AppState;

/// `GET /activity-categories` — 카테고리 설정을 조회합니다.
pub async fn get_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<ActivityCategory>>, AppError> {
    let categories = store::categories::load(&state.store).await?;
    Ok(Json(categories))
}

/// `PUT /activity-categories` — 카테고리 설정을 통째로 교체합니다.
///
/// 부분 수정이 아니라 전체 교체입니다. 빈 목록을 저장하면
/// 다음 조회부터 기본 목록으로 되돌아갑니다.
pub async fn put_categories(
    State(state): State<AppState>,
    Json(categories): Json<Vec<ActivityCategory>>,
) -> Result<Json<Vec<ActivityCategory>>, AppError> {
    store::categories::save(&state.store, &categories).await?;
    Ok(Json(categories))
}
