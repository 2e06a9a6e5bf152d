//! # 외부 동기화(Bitable) 핸들러
//!
//! Bitable 동기화 설정 관리와 기록 일괄 전송을 처리합니다.
//!
//! ## 엔드포인트
//! - `GET  /api/bitable/config`         → 설정 조회 (secret 제외)
//! - `PUT  /api/bitable/config`         → 설정 저장
//! - `POST /api/bitable/import-records` → 기록들을 Bitable로 일괄 전송
//!
//! `app_secret`은 쓰기 전용입니다: GET 응답에 절대 포함하지 않고,
//! PUT에서 생략하면 기존 값을 유지합니다. 프론트가 조회한 설정을
//! 그대로 되돌려 저장해도 secret이 빈 값으로 덮이지 않습니다.

use crate::{
    error::AppError,
    models::{Record, UpdateBitableConfigRequest},
    services::bitable::BitableClient,
    store,
};
use axum::{extract::State, Json};
use serde_json::{json, Value};

use super::records::AppState;

/// `GET /bitable/config` — 동기화 설정을 조회합니다.
///
/// 응답에는 secret 대신 설정 여부(`hasSecret`)만 담습니다.
pub async fn get_bitable_config(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let config = store::bitable::load(&state.store).await?;
    Ok(Json(json!({
        "appId": config.app_id,
        "hasSecret": !config.app_secret.is_empty(),
        "appToken": config.app_token,
        "tableId": config.table_id,
        "planTableId": config.plan_table_id,
        "configured": config.is_configured()
    })))
}

/// `PUT /bitable/config` — 동기화 설정을 저장합니다.
///
/// 요청에서 생략한 필드는 기존 값을 유지합니다 (app_secret 포함).
pub async fn put_bitable_config(
    State(state): State<AppState>,
    Json(req): Json<UpdateBitableConfigRequest>,
) -> Result<Json<Value>, AppError> {
    let mut config = store::bitable::load(&state.store).await?;
    config.apply(req);
    store::bitable::save(&state.store, &config).await?;
    Ok(Json(json!({ "configured": config.is_configured() })))
}

/// `POST /bitable/import-records` — 요청 본문의 기록들을 Bitable로 보냅니다.
///
/// 본문이 비어 있으면 저장소의 전체 기록을 보냅니다 (최초 일괄 이전용).
/// 전송은 100건 단위 배치로 나뉩니다.
pub async fn push_records_to_bitable(
    State(state): State<AppState>,
    Json(incoming): Json<Vec<Record>>,
) -> Result<Json<Value>, AppError> {
    let records = if incoming.is_empty() {
        store::records::load(&state.store).await?
    } else {
        incoming
    };

    let config = store::bitable::load(&state.store).await?;
    let client = BitableClient::new(config)?;
    let pushed = client.push_records(&records).await?;
    Ok(Json(json!({ "pushed": pushed })))
}
