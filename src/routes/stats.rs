//! # 통계(Stats) 핸들러
//!
//! 오늘 하루의 요약 수치를 반환합니다.
//!
//! ## 엔드포인트
//! - `GET /api/stats` → `{ totalTime, totalHours, totalMinutes, activityCount, creationTime }`

use crate::{
    error::AppError,
    models::CREATION_CATEGORY,
    services::segments,
    store,
};
use axum::{extract::State, Json};
use serde_json::{json, Value};

use super::records::AppState;

/// `GET /stats` — 오늘(UTC+8 달력) 기록의 요약 통계입니다.
///
/// 시간 합계는 구간에서 재계산한 값을 씁니다 (Record::accurate_duration).
/// `creationTime`은 창작 산출 카테고리로 제한한 부분합입니다.
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let today = segments::format_civil(segments::today_civil());
    let records = store::records::load(&state.store).await?;

    let mut total_time: i64 = 0;
    let mut creation_time: i64 = 0;
    let mut activity_count = 0;
    for record in &records {
        if record.civil_day().as_deref() != Some(today.as_str()) {
            continue;
        }
        let duration = record.accurate_duration();
        total_time += duration;
        if record.activity_category == CREATION_CATEGORY {
            creation_time += duration;
        }
        activity_count += 1;
    }

    Ok(Json(json!({
        "totalTime": total_time,
        "totalHours": total_time / 3_600_000,
        "totalMinutes": (total_time % 3_600_000) / 60_000,
        "activityCount": activity_count,
        "creationTime": creation_time
    })))
}
