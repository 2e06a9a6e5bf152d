//! # Bitable 동기화 어댑터 (외부 협력자)
//!
//! 로컬 기록/일일 계획을 외부 다차원 스프레드시트 서비스의 필드 스키마로
//! 변환해 밀어 넣습니다. 인증은 tenant 토큰 발급 한 번이 전부이고,
//! 재시도/타임아웃 정책 없이 동기(blocking await) 호출입니다 —
//! 실패는 `AppError::ExternalService` 하나로 호출자에게 올라가며,
//! 저장 에러(500)와 구분되므로 UI가 "로컬 저장됨, 동기화 실패"를
//! 표시할 수 있습니다.
//!
//! 필드명은 대상 테이블의 실제 컬럼명과 일치해야 하므로
//! 원래 테이블 스키마의 한자 라벨을 그대로 사용합니다.

use serde_json::{json, Value};

use crate::error::AppError;
use crate::models::{BitableConfig, DailyPlan, Record};

const BASE_URL: &str = "https://open.feishu.cn/open-apis";

/// API가 한 번에 받아주는 최대 레코드 수
const BATCH_SIZE: usize = 100;

pub struct BitableClient {
    http: reqwest::Client,
    config: BitableConfig,
}

impl BitableClient {
    pub fn new(config: BitableConfig) -> Result<Self, AppError> {
        if !config.is_configured() {
            return Err(AppError::ExternalService(
                "bitable sync is not configured".to_string(),
            ));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            config,
        })
    }

    /// tenant 액세스 토큰 발급 (요청마다 새로 받습니다 — 캐시 없음)
    async fn tenant_token(&self) -> Result<String, AppError> {
        let resp: Value = self
            .http
            .post(format!("{}/auth/v3/tenant_access_token/internal", BASE_URL))
            .json(&json!({
                "app_id": self.config.app_id,
                "app_secret": self.config.app_secret,
            }))
            .send()
            .await
            .map_err(external)?
            .json()
            .await
            .map_err(external)?;

        if resp["code"].as_i64() != Some(0) {
            return Err(AppError::ExternalService(format!(
                "token request rejected: {}",
                resp["msg"].as_str().unwrap_or("unknown error")
            )));
        }
        resp["tenant_access_token"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| AppError::ExternalService("token missing in response".to_string()))
    }

    /// 기록들을 배치(최대 100건)로 나눠 밀어 넣습니다.
    /// 반환값: 전송한 기록 수
    pub async fn push_records(&self, records: &[Record]) -> Result<usize, AppError> {
        if records.is_empty() {
            return Ok(0);
        }
        let token = self.tenant_token().await?;
        let url = format!(
            "{}/bitable/v1/apps/{}/tables/{}/records/batch_create",
            BASE_URL, self.config.app_token, self.config.table_id
        );

        let mut pushed = 0;
        for batch in records.chunks(BATCH_SIZE) {
            let rows: Vec<Value> = batch
                .iter()
                .map(|r| json!({ "fields": record_fields(r) }))
                .collect();
            let resp: Value = self
                .http
                .post(&url)
                .bearer_auth(&token)
                .json(&json!({ "records": rows }))
                .send()
                .await
                .map_err(external)?
                .json()
                .await
                .map_err(external)?;
            if resp["code"].as_i64() != Some(0) {
                return Err(AppError::ExternalService(format!(
                    "batch create rejected: {}",
                    resp["msg"].as_str().unwrap_or("unknown error")
                )));
            }
            pushed += batch.len();
        }
        tracing::info!("Bitable로 기록 {}건 동기화 완료", pushed);
        Ok(pushed)
    }

    /// 일일 계획 한 건을 계획 테이블에 밀어 넣습니다.
    pub async fn push_plan(&self, plan: &DailyPlan) -> Result<(), AppError> {
        let token = self.tenant_token().await?;
        let url = format!(
            "{}/bitable/v1/apps/{}/tables/{}/records",
            BASE_URL, self.config.app_token, self.config.plan_table_id
        );
        let resp: Value = self
            .http
            .post(&url)
            .bearer_auth(&token)
            .json(&json!({ "fields": plan_fields(plan) }))
            .send()
            .await
            .map_err(external)?
            .json()
            .await
            .map_err(external)?;
        if resp["code"].as_i64() != Some(0) {
            return Err(AppError::ExternalService(format!(
                "plan create rejected: {}",
                resp["msg"].as_str().unwrap_or("unknown error")
            )));
        }
        tracing::info!("Bitable로 일일 계획 동기화 완료: {}", plan.date);
        Ok(())
    }
}

fn external(e: reqwest::Error) -> AppError {
    AppError::ExternalService(e.to_string())
}

/// 기록 → Bitable 필드 매핑. 필드명은 대상 테이블 컬럼명 그대로입니다.
fn record_fields(record: &Record) -> Value {
    // 감정은 쉼표 문자열 → 다중 선택 필드용 배열
    let emotions: Vec<&str> = crate::services::normalizer::split_emotions(&record.emotion);
    // 날짜 필드는 타임스탬프(ms)를 기대합니다
    let date_ms = crate::services::segments::parse_instant(&record.start_time)
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(0);
    let segments_json = if record.segments.is_empty() {
        String::new()
    } else {
        serde_json::to_string_pretty(&record.segments).unwrap_or_default()
    };

    json!({
        "activity(活动名称)": record.activity,
        "activityCategory(活动类型)": record.activity_category,
        "startTime(开始时间)": record.start_time,
        "endTime(结束时间)": record.end_time,
        "duration(总计专注时长)": format!("{}秒", record.duration / 1000),
        "timeSpan(时间跨度)": if record.time_span > 0 {
            format!("{}秒", record.time_span / 1000)
        } else {
            String::new()
        },
        "remark(感想&记录)": record.remark,
        "emotion(情绪记录)": emotions,
        "pauseCount(暂停次数)": record.pause_count,
        "活动日期": date_ms,
        "id(活动唯一标识)": record.id,
        "segments(专注段落)": segments_json,
    })
}

/// 일일 계획 → Bitable 필드 매핑
fn plan_fields(plan: &DailyPlan) -> Value {
    json!({
        "date(日期)": plan.date,
        "importantThings(重要的事)": plan.important_things.join("\n"),
        "tryThings(想尝试的事)": plan.try_things.join("\n"),
        "otherMatters(其他事项)": plan.other_matters,
        "reading(阅读)": plan.reading,
        "score(评分)": plan.score,
        "scoreReason(评分理由)": plan.score_reason,
        "totalDuration(总专注时长)": plan.total_duration,
        "creationDuration(创作时长)": plan.creation_duration,
        "emotions(情绪)": plan.emotions,
        "activityCategories(活动类型)": plan.activity_categories,
        "id(计划唯一标识)": plan.id,
    })
}
