use serde::{Deserialize, Serialize};

use super::record::Segment;

/// 일일 계획. 하루(달력 날짜)당 하나이며,
/// 자유 입력 필드 + 그날 기록에서 재계산되는 통계 필드로 구성됩니다.
///
/// `id` / `date` / `createdAt`은 생성 시 한 번 정해지고 불변,
/// `updatedAt`은 저장할 때마다 갱신됩니다.
/// 통계 필드(activities, emotions, activityCategories, totalDuration,
/// creationDuration)는 읽을 때마다 기록 저장소에서 다시 계산합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPlan {
    pub id: String,
    /// URL 친화적인 "YYYY-MM-DD" (UTC+8 달력).
    /// 기록의 date("YYYY/MM/DD")와 구분자가 다르므로 비교 시 변환합니다.
    pub date: String,
    #[serde(default)]
    pub important_things: Vec<String>,
    #[serde(default)]
    pub try_things: Vec<String>,
    #[serde(default)]
    pub other_matters: String,
    #[serde(default)]
    pub reading: String,
    #[serde(default)]
    pub score: String,
    #[serde(default)]
    pub score_reason: String,

    // ── 이하 통계 필드: 읽기 시점에 재계산 ──
    #[serde(default)]
    pub activities: Vec<PlanActivity>,
    #[serde(default)]
    pub emotions: Vec<String>,
    #[serde(default)]
    pub activity_categories: Vec<String>,
    /// 구간에서 재계산한 집중 시간 합계 (밀리초).
    /// 기록의 (오래됐을 수 있는) duration 필드가 아니라
    /// segments에서 다시 계산한 값입니다.
    #[serde(default)]
    pub total_duration: i64,
    /// 창작 산출 카테고리로 제한한 합계 (밀리초)
    #[serde(default)]
    pub creation_duration: i64,

    // ── 외부 동기화 상태 ──
    #[serde(default)]
    pub synced: bool,
    #[serde(default)]
    pub last_synced_at: Option<String>,

    pub created_at: String,
    pub updated_at: String,
}

/// 일일 계획 통계에 포함되는 활동 요약 한 건
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanActivity {
    pub activity: String,
    pub activity_category: String,
    /// segments에서 재계산한 시간 (밀리초)
    pub duration: i64,
    pub start_time: String,
    #[serde(default)]
    pub segments: Vec<Segment>,
}

/// 일일 계획 upsert 요청.
/// 자유 입력 필드만 받습니다 — `id`/`date`/`createdAt`과 통계 필드는
/// 요청으로 덮어쓸 수 없습니다.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertDailyPlanRequest {
    pub important_things: Option<Vec<String>>,
    pub try_things: Option<Vec<String>>,
    pub other_matters: Option<String>,
    pub reading: Option<String>,
    pub score: Option<String>,
    pub score_reason: Option<String>,
}
