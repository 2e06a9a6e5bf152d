//! # 무드월(Mood Wall) 핸들러
//!
//! 최근 7일 창에 대한 감정 벽 / 활동 벽 / 키워드 클라우드를
//! 한 응답으로 반환합니다. 집계 자체는 `services::wall`에 있고,
//! 여기서는 저장소에서 입력을 모아 넘기기만 합니다.
//!
//! ## 엔드포인트
//! - `GET /api/mood-wall` → `{ moodData, activityData, keywordData, moodLegend, activityLegend }`

use crate::{
    error::AppError,
    services::{segments, wall},
    store,
};
use axum::{extract::State, Json};

use super::records::AppState;

/// `GET /mood-wall` — 오늘을 끝으로 하는 최근 7일 집계 보고서입니다.
pub async fn get_mood_wall(
    State(state): State<AppState>,
) -> Result<Json<wall::WallReport>, AppError> {
    let records = store::records::load(&state.store).await?;
    let categories = store::categories::load(&state.store).await?;
    let report = wall::build_wall(&records, &categories, segments::today_civil());
    Ok(Json(report))
}
