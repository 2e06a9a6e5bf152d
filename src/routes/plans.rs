//! # 일일 계획(Daily Plan) 핸들러
//!
//! 날짜당 하나인 일일 계획의 조회/수정과 외부 동기화를 처리합니다.
//!
//! ## 엔드포인트
//! - `GET  /api/daily-plan/{date}`      → 조회 (없으면 빈 계획을 만들어 저장)
//! - `PUT  /api/daily-plan/{date}`      → 자유 입력 필드 upsert
//! - `POST /api/daily-plan/{date}/sync` → 계획 + 그날 기록을 Bitable로 전송
//!
//! 경로의 날짜는 URL 친화적인 "YYYY-MM-DD"입니다.
//! 통계 필드는 저장된 값을 믿지 않고 **읽을 때마다** 그날 기록에서
//! 다시 계산합니다 — 기록이 바뀌어도 계획을 따로 갱신할 필요가 없습니다.

use crate::{
    error::AppError,
    models::{DailyPlan, Record, UpsertDailyPlanRequest},
    services::{bitable::BitableClient, plan_stats},
    store,
};
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{NaiveDate, SecondsFormat, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use super::records::AppState;

/// "YYYY-MM-DD" 형식 검증. 실패하면 400.
fn parse_plan_date(date: &str) -> Result<(), AppError> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| AppError::BadRequest(format!("invalid plan date: {}", date)))
}

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// 새 빈 계획. id/date/createdAt은 여기서 한 번 정해지고 불변입니다.
fn new_plan(date: &str) -> DailyPlan {
    let now = now_iso();
    DailyPlan {
        id: Uuid::now_v7().to_string(),
        date: date.to_string(),
        important_things: Vec::new(),
        try_things: Vec::new(),
        other_matters: String::new(),
        reading: String::new(),
        score: String::new(),
        score_reason: String::new(),
        activities: Vec::new(),
        emotions: Vec::new(),
        activity_categories: Vec::new(),
        total_duration: 0,
        creation_duration: 0,
        synced: false,
        last_synced_at: None,
        created_at: now.clone(),
        updated_at: now,
    }
}

/// `GET /daily-plan/{date}` — 해당 날짜의 계획을 조회합니다.
///
/// 계획이 아직 없으면 빈 계획을 만들어 저장한 뒤 반환합니다
/// (첫 접근이 곧 생성). 통계 필드는 반환 직전에 다시 계산합니다.
pub async fn get_daily_plan(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DailyPlan>, AppError> {
    parse_plan_date(&date)?;

    let records = store::records::load(&state.store).await?;
    match store::plans::find_by_date(&state.store, &date).await? {
        Some(mut plan) => {
            plan_stats::recompute(&mut plan, &records);
            Ok(Json(plan))
        }
        None => {
            let mut plan = new_plan(&date);
            plan_stats::recompute(&mut plan, &records);
            store::plans::upsert(&state.store, plan.clone()).await?;
            tracing::info!("일일 계획 생성: {}", date);
            Ok(Json(plan))
        }
    }
}

/// `PUT /daily-plan/{date}` — 자유 입력 필드를 upsert합니다.
///
/// 본문에 포함된 필드만 바꿉니다. `id`/`date`/`createdAt`과 통계 필드는
/// 요청으로 덮어쓸 수 없고, `updatedAt`은 저장할 때마다 갱신됩니다.
pub async fn upsert_daily_plan(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(req): Json<UpsertDailyPlanRequest>,
) -> Result<Json<DailyPlan>, AppError> {
    parse_plan_date(&date)?;

    let mut plan = store::plans::find_by_date(&state.store, &date)
        .await?
        .unwrap_or_else(|| new_plan(&date));

    if let Some(things) = req.important_things {
        plan.important_things = things;
    }
    if let Some(things) = req.try_things {
        plan.try_things = things;
    }
    if let Some(matters) = req.other_matters {
        plan.other_matters = matters;
    }
    if let Some(reading) = req.reading {
        plan.reading = reading;
    }
    if let Some(score) = req.score {
        plan.score = score;
    }
    if let Some(reason) = req.score_reason {
        plan.score_reason = reason;
    }
    plan.updated_at = now_iso();

    let records = store::records::load(&state.store).await?;
    plan_stats::recompute(&mut plan, &records);
    store::plans::upsert(&state.store, plan.clone()).await?;
    Ok(Json(plan))
}

/// `POST /daily-plan/{date}/sync` — 계획과 그날 기록을 Bitable로 전송합니다.
///
/// 전송 성공 시에만 `synced`/`lastSyncedAt`을 갱신해서 저장합니다.
/// 외부 호출이 실패하면 502가 반환되고 로컬 상태는 바뀌지 않습니다
/// ("로컬엔 있지만 동기화 안 됨" 상태가 그대로 보입니다).
pub async fn sync_daily_plan(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<Value>, AppError> {
    parse_plan_date(&date)?;

    let mut plan = store::plans::find_by_date(&state.store, &date)
        .await?
        .ok_or(AppError::NotFound)?;

    let records = store::records::load(&state.store).await?;
    plan_stats::recompute(&mut plan, &records);

    // 기록은 계획 날짜와 같은 달력 날짜의 것만 보냅니다.
    let target = date.replace('-', "/");
    let day_records: Vec<Record> = records
        .into_iter()
        .filter(|r| r.civil_day().as_deref() == Some(target.as_str()))
        .collect();

    let config = store::bitable::load(&state.store).await?;
    let client = BitableClient::new(config)?;
    let pushed = client.push_records(&day_records).await?;
    client.push_plan(&plan).await?;

    plan.synced = true;
    plan.last_synced_at = Some(now_iso());
    store::plans::upsert(&state.store, plan.clone()).await?;

    Ok(Json(json!({
        "synced": true,
        "syncedRecords": pushed,
        "lastSyncedAt": plan.last_synced_at
    })))
}
