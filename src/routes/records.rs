//! # 기록(Record) 라우트 핸들러
//!
//! 기록의 CRUD와 목록/검색, 백업용 내보내기/가져오기를 처리하는
//! HTTP 핸들러 함수들입니다.
//!
//! ## 엔드포인트
//! - `GET    /api/records`        → 오늘 기록 목록 (최신순)
//! - `POST   /api/records`        → 새 기록 생성
//! - `GET    /api/records/{id}`   → 단일 기록 조회
//! - `PUT    /api/records/{id}`   → 기록 수정 (부분 패치)
//! - `DELETE /api/records/{id}`   → 기록 삭제
//! - `GET    /api/all-records`    → 전체 기록 필터/페이지네이션
//! - `GET    /api/export-records` → 전체 기록 그대로 내보내기
//! - `POST   /api/import-records` → 대량 가져오기 (id 중복은 건너뜀)
//!
//! ## Axum 핸들러 패턴
//! Axum 핸들러는 **Extractor(추출기)**를 매개변수로 받습니다:
//! - `State(state)`: 앱 전역 상태 (저장소 핸들, 설정)
//! - `Path(id)`: URL 경로 파라미터 (예: /records/{id}에서 id)
//! - `Query(query)`: 쿼리 문자열을 구조체로 파싱
//! - `Json(body)`: 요청 본문을 JSON으로 파싱하여 구조체로 변환
//!
//! 반환 타입이 `Result<T, AppError>`이면, Axum이 자동으로:
//! - `Ok(T)` → T를 HTTP 응답으로 변환 (IntoResponse 트레이트 사용)
//! - `Err(AppError)` → AppError를 에러 JSON 응답으로 변환

use crate::{
    error::AppError,
    models::*,
    services::{normalizer, segments},
    store::{self, JsonStore},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// JsonStore는 디렉토리 경로만 들고 있으므로 clone 비용이 거의 없습니다.
#[derive(Clone)]
pub struct AppState {
    /// JSON 파일 저장소 핸들
    pub store: JsonStore,
}

/// `GET /records` — 오늘(UTC+8 달력) 기록을 최신순으로 조회합니다.
pub async fn list_records(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let today = segments::format_civil(segments::today_civil());
    let mut records: Vec<Record> = store::records::load(&state.store)
        .await?
        .into_iter()
        .filter(|r| r.civil_day().as_deref() == Some(today.as_str()))
        .collect();
    // ISO-8601 UTC 문자열은 사전순 비교가 곧 시간순 비교입니다.
    records.sort_by(|a, b| b.start_time.cmp(&a.start_time));
    Ok(Json(json!({ "records": records })))
}

/// `POST /records` — 새 기록을 생성합니다.
///
/// `activity`만 필수입니다. 카테고리를 명시하지 않으면 설정에서
/// 해석을 시도하고, 해석이 불가능하면 400을 반환합니다 (부분 저장 없음).
pub async fn create_record(
    State(state): State<AppState>,
    Json(req): Json<CreateRecordRequest>,
) -> Result<Json<Record>, AppError> {
    let categories = store::categories::load(&state.store).await?;
    // 검증/표준화가 전부 성공한 뒤에만 저장소를 건드립니다.
    let record = normalizer::create_record(req, &categories)?;

    let mut records = store::records::load(&state.store).await?;
    records.push(record.clone());
    store::records::save(&state.store, &records).await?;

    tracing::info!("기록 생성: {} ({})", record.activity, record.id);
    Ok(Json(record))
}

/// `GET /records/{id}` — 단일 기록을 조회합니다.
pub async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Record>, AppError> {
    let record = store::records::find_by_id(&state.store, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(record))
}

/// `PUT /records/{id}` — 기록을 부분 수정합니다.
///
/// 본문에 포함된 필드만 바꿉니다. `segments`는 배열(전체 교체)
/// 또는 객체(추가/제자리 수정) 두 형태를 받습니다.
pub async fn update_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateRecordRequest>,
) -> Result<Json<Record>, AppError> {
    let mut records = store::records::load(&state.store).await?;
    let record = records
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or(AppError::NotFound)?;

    normalizer::apply_update(record, req);
    let updated = record.clone();
    store::records::save(&state.store, &records).await?;
    Ok(Json(updated))
}

/// `DELETE /records/{id}` — 기록을 삭제합니다.
///
/// 성공 시 HTTP 204 No Content를 반환합니다 (본문 없음).
pub async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut records = store::records::load(&state.store).await?;
    let before = records.len();
    records.retain(|r| r.id != id);
    if records.len() == before {
        return Err(AppError::NotFound);
    }
    store::records::save(&state.store, &records).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /all-records` — 전체 기록을 필터링/페이지네이션해서 조회합니다.
///
/// 필터는 전부 AND로 결합됩니다:
/// - `search`: 활동명/메모에 대한 대소문자 무시 부분 일치
/// - `date_from`/`date_to`: date 필드 기준, 둘 다 포함(inclusive)
/// - `activity`: 활동명 완전 일치
/// - `emotion`: emotion 문자열 부분 포함
pub async fn list_all_records(
    State(state): State<AppState>,
    Query(query): Query<RecordQuery>,
) -> Result<Json<Value>, AppError> {
    let mut records = store::records::load(&state.store).await?;

    if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
        let needle = search.to_lowercase();
        records.retain(|r| {
            r.activity.to_lowercase().contains(&needle)
                || r.remark.to_lowercase().contains(&needle)
        });
    }
    // "YYYY/MM/DD"는 사전순 == 날짜순이므로 문자열 비교로 충분합니다.
    if let Some(from) = query.date_from.as_deref().filter(|s| !s.is_empty()) {
        records.retain(|r| r.date.as_str() >= from);
    }
    if let Some(to) = query.date_to.as_deref().filter(|s| !s.is_empty()) {
        records.retain(|r| r.date.as_str() <= to);
    }
    if let Some(activity) = query.activity.as_deref().filter(|s| !s.is_empty()) {
        records.retain(|r| r.activity == activity);
    }
    if let Some(emotion) = query.emotion.as_deref().filter(|s| !s.is_empty()) {
        records.retain(|r| r.emotion.contains(emotion));
    }

    records.sort_by(|a, b| b.start_time.cmp(&a.start_time));

    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).max(1);
    let total = records.len();
    let pages = total.div_ceil(per_page);
    let paginated: Vec<Record> = records
        .into_iter()
        .skip(page_offset(page, per_page))
        .take(per_page)
        .collect();

    Ok(Json(json!({
        "records": paginated,
        "pagination": {
            "page": page,
            "perPage": per_page,
            "total": total,
            "pages": pages
        }
    })))
}

/// 페이지 번호 → 건너뛸 항목 수.
/// 쿼리 값은 호출자 마음대로이므로 곱셈이 넘쳐도 패닉하지 않아야 합니다
/// (포화 연산으로 처리 — 터무니없는 페이지는 그냥 빈 목록이 됩니다).
fn page_offset(page: usize, per_page: usize) -> usize {
    page.saturating_sub(1).saturating_mul(per_page)
}

/// `GET /export-records` — 전체 기록 컬렉션을 그대로 내보냅니다.
///
/// 응답 본문이 곧 백업 파일입니다. 가공 없이 저장된 형태 그대로라서
/// `POST /import-records`에 다시 넣으면 손실 없이 복원됩니다.
pub async fn export_records(State(state): State<AppState>) -> Result<Json<Vec<Record>>, AppError> {
    let records = store::records::load(&state.store).await?;
    Ok(Json(records))
}

/// `POST /import-records` — 기록을 대량으로 가져옵니다.
///
/// 이미 존재하는 id는 건너뛰므로 같은 백업을 두 번 넣어도 안전합니다.
/// 응답: `{ "imported": n, "skipped": m }`
pub async fn import_records(
    State(state): State<AppState>,
    Json(incoming): Json<Vec<Record>>,
) -> Result<Json<Value>, AppError> {
    let mut records = store::records::load(&state.store).await?;
    let (imported, skipped) = store::records::merge_imported(&mut records, incoming);
    if imported > 0 {
        store::records::save(&state.store, &records).await?;
    }
    tracing::info!("기록 가져오기: {}건 추가, {}건 건너뜀", imported, skipped);
    Ok(Json(json!({ "imported": imported, "skipped": skipped })))
}
