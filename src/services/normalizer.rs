//! # 기록 정규화(Record Normalizer) 모듈
//!
//! 쓰기 페이로드(생성/수정)를 받아 기록의 표준 저장 형태를 만듭니다.
//!
//! 핵심 규칙:
//! - 카테고리: 호출자가 명시하면 그대로 신뢰. 아니면 설정된 카테고리
//!   목록에서 느슨한 부분 문자열 매칭으로 해석하고, 해석 실패는
//!   **검증 에러(400)** 입니다. "其他"로 조용히 떨어뜨리지 않습니다.
//! - 생성: segments가 있으면 정렬 후 시간 필드 5개(startTime/endTime/
//!   duration/pauseCount/timeSpan)를 구간에서 **덮어씁니다**.
//!   호출자가 보낸 충돌 값은 무시됩니다. segments가 비어 있으면
//!   호출자 값을 그대로 사용합니다.
//! - 수정: 구간 패치(추가/인덱스 수정/전체 교체) 후 재정렬하되,
//!   파생 필드 5개는 기록에 startTime이 **아직 없을 때만** 다시
//!   계산합니다. startTime이 이미 정해진 기록은 첫 구간의 시작 시각을
//!   불변으로 취급하므로, duration/pauseCount/timeSpan이 segments보다
//!   오래된 값이 될 수 있습니다. 이 비대칭은 의도된 동작이며, 정확한
//!   값이 필요한 읽기 경로(일일 계획 통계)는 구간에서 재계산합니다.

use uuid::Uuid;

use crate::error::AppError;
use crate::models::{
    ActivityCategory, CreateRecordRequest, Record, Segment, SegmentsPatch, UpdateRecordRequest,
};
use crate::services::segments;

/// 활동명 → 카테고리명 해석.
///
/// 1차: 설정된 활동명 조각과의 완전 일치
/// 2차: 조각이 활동명에 부분 문자열로 포함되는지 (느슨한 매칭)
/// 여러 조각이 매칭되면 설정 순서상 먼저 나오는 카테고리가 이깁니다.
pub fn resolve_category(activity: &str, categories: &[ActivityCategory]) -> Option<String> {
    for category in categories {
        if category.activities.iter().any(|frag| frag == activity) {
            return Some(category.name.clone());
        }
    }
    for category in categories {
        if category
            .activities
            .iter()
            .any(|frag| !frag.is_empty() && activity.contains(frag.as_str()))
        {
            return Some(category.name.clone());
        }
    }
    None
}

/// 생성 페이로드로부터 표준 형태의 새 기록을 만듭니다.
///
/// # 에러
/// - `activity`가 비어 있음 → BadRequest
/// - 카테고리를 명시하지도 않았고 해석도 실패 → BadRequest (엄격 정책)
pub fn create_record(
    req: CreateRecordRequest,
    categories: &[ActivityCategory],
) -> Result<Record, AppError> {
    if req.activity.trim().is_empty() {
        return Err(AppError::BadRequest(
            "missing required field: activity".to_string(),
        ));
    }

    // 명시된 카테고리는 그대로 신뢰, 아니면 느슨한 매칭으로 해석
    let activity_category = match req.activity_category.filter(|c| !c.is_empty()) {
        Some(c) => c,
        None => resolve_category(&req.activity, categories).ok_or_else(|| {
            AppError::BadRequest(format!(
                "cannot resolve activity category for: {}",
                req.activity
            ))
        })?,
    };

    let mut record = Record {
        id: Uuid::now_v7().to_string(),
        activity: req.activity,
        activity_category,
        start_time: req.start_time.unwrap_or_default(),
        end_time: req.end_time.unwrap_or_default(),
        date: req.date.clone().unwrap_or_default(),
        duration: req.duration.unwrap_or(0),
        pause_count: req.pause_count.unwrap_or(0),
        time_span: req.time_span.unwrap_or(0),
        remark: req.remark.unwrap_or_default(),
        emotion: req.emotion.unwrap_or_default(),
        segments: req.segments.unwrap_or_default(),
    };

    if !record.segments.is_empty() {
        // 파생 계산은 start 오름차순 정렬을 전제합니다.
        segments::sort_by_start(&mut record.segments);
        derive_time_fields(&mut record);
    }

    // date는 호출자가 명시하지 않은 한 startTime에서 재계산
    if req.date.is_none() && !record.start_time.is_empty() {
        if let Some(date) = segments::civil_date(&record.start_time) {
            record.date = date;
        }
    }

    Ok(record)
}

/// 구간 목록에서 시간 필드 5개를 덮어씁니다.
/// timeSpan은 양끝을 계산할 수 없으면 기존 값을 유지합니다.
fn derive_time_fields(record: &mut Record) {
    if let Some(start) = segments::first_start(&record.segments) {
        record.start_time = start.to_string();
    }
    if let Some(end) = segments::last_end(&record.segments) {
        record.end_time = end.to_string();
    }
    record.duration = segments::total_duration(&record.segments);
    record.pause_count = segments::count(&record.segments) as i64;
    if let Some(span) = segments::time_span(&record.segments) {
        record.time_span = span;
    }
}

/// 기존 기록에 부분 패치를 적용합니다 (in-place).
///
/// 구간 패치 계약:
/// - 리스트 → 전체 교체
/// - 객체 → 추가, `index`가 있으면 해당 위치 제자리 수정
///   (인덱스가 범위를 벗어나면 조용히 무시)
///
/// 구간이 바뀐 뒤 startTime이 비어 있으면 시간 필드 5개 + date를
/// 다시 계산하고, 이미 있으면 건드리지 않습니다 (모듈 문서 참고).
/// 명시적 필드 패치는 그 다음에 적용되며 `id`는 패치 대상이 아닙니다.
pub fn apply_update(record: &mut Record, req: UpdateRecordRequest) {
    let mut segments_mutated = false;

    match req.segments {
        Some(SegmentsPatch::Replace(list)) => {
            record.segments = list;
            segments_mutated = true;
        }
        Some(SegmentsPatch::One(patch)) => match patch.index {
            Some(index) => {
                // 범위 밖 인덱스는 no-op (에러 아님)
                if let Some(segment) = record.segments.get_mut(index) {
                    if patch.start.is_some() {
                        segment.start = patch.start;
                    }
                    if patch.end.is_some() {
                        segment.end = patch.end;
                    }
                    segments_mutated = true;
                }
            }
            None => {
                record.segments.push(Segment {
                    start: patch.start,
                    end: patch.end,
                });
                segments_mutated = true;
            }
        },
        None => {}
    }

    if segments_mutated {
        segments::sort_by_start(&mut record.segments);
        if record.start_time.is_empty() {
            derive_time_fields(record);
            if let Some(date) = segments::civil_date(&record.start_time) {
                record.date = date;
            }
        }
        // startTime이 이미 있으면 파생 필드는 의도적으로 그대로 둡니다.
    }

    // ── 명시적 필드 패치 ──
    if let Some(activity) = req.activity {
        record.activity = activity;
    }
    if let Some(category) = req.activity_category {
        record.activity_category = category;
    }
    let start_time_patched = req.start_time.is_some();
    if let Some(start_time) = req.start_time {
        record.start_time = start_time;
    }
    if let Some(end_time) = req.end_time {
        record.end_time = end_time;
    }
    if let Some(duration) = req.duration {
        record.duration = duration;
    }
    if let Some(pause_count) = req.pause_count {
        record.pause_count = pause_count;
    }
    if let Some(time_span) = req.time_span {
        record.time_span = time_span;
    }
    if let Some(remark) = req.remark {
        record.remark = remark;
    }
    if let Some(emotion) = req.emotion {
        record.emotion = emotion;
    }
    match req.date {
        Some(date) => record.date = date,
        // date를 명시하지 않고 startTime만 바꿨다면 date를 재계산
        None if start_time_patched => {
            if let Some(date) = segments::civil_date(&record.start_time) {
                record.date = date;
            }
        }
        None => {}
    }
}

/// emotion 문자열("开心, 平静") → 태그 목록.
/// ", "로 join하면 원래 문자열이 그대로 복원됩니다.
pub fn split_emotions(emotion: &str) -> Vec<&str> {
    emotion
        .split(", ")
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_categories() -> Vec<ActivityCategory> {
        vec![
            ActivityCategory {
                name: "工作输出".to_string(),
                color: "blue".to_string(),
                activities: vec!["执行工作".to_string(), "开会".to_string()],
            },
            ActivityCategory {
                name: "输出创作".to_string(),
                color: "orange".to_string(),
                activities: vec!["创作".to_string(), "写作".to_string()],
            },
            // 겹치는 조각 픽스처: "作"은 위 "创作"/"写作"과도 겹칩니다
            ActivityCategory {
                name: "保持学习".to_string(),
                color: "green".to_string(),
                activities: vec!["学习".to_string(), "作".to_string()],
            },
        ]
    }

    fn create_req(activity: &str) -> CreateRecordRequest {
        CreateRecordRequest {
            activity: activity.to_string(),
            activity_category: None,
            start_time: None,
            end_time: None,
            date: None,
            duration: None,
            pause_count: None,
            time_span: None,
            remark: None,
            emotion: None,
            segments: None,
        }
    }

    fn seg(start: &str, end: &str) -> Segment {
        Segment {
            start: Some(start.to_string()),
            end: Some(end.to_string()),
        }
    }

    #[test]
    fn substring_match_resolves_category() {
        let cats = test_categories();
        // "执行工作-리팩터링"은 "执行工作"을 부분 문자열로 포함
        assert_eq!(
            resolve_category("执行工作-리팩터링", &cats),
            Some("工作输出".to_string())
        );
    }

    #[test]
    fn exact_match_wins_over_substring() {
        let cats = test_categories();
        // "写作"은 "作" 조각(保持学习)과도 부분 매칭되지만,
        // 완전 일치 패스에서 输出创作이 먼저 잡힙니다.
        assert_eq!(resolve_category("写作", &cats), Some("输出创作".to_string()));
    }

    #[test]
    fn overlapping_substrings_first_match_wins() {
        let cats = test_categories();
        // "创作中"은 "创作"(输出创作)과 "作"(保持学习) 둘 다 부분 매칭.
        // 설정 순서상 먼저 나오는 输出创作이 이깁니다.
        assert_eq!(
            resolve_category("创作中", &cats),
            Some("输出创作".to_string())
        );
    }

    #[test]
    fn unresolved_category_is_validation_error() {
        let err = create_record(create_req("听播客"), &test_categories()).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn explicit_category_is_trusted() {
        let mut req = create_req("听播客");
        req.activity_category = Some("纯属娱乐".to_string());
        let record = create_record(req, &test_categories()).unwrap();
        assert_eq!(record.activity_category, "纯属娱乐");
    }

    #[test]
    fn missing_activity_is_validation_error() {
        let err = create_record(create_req("  "), &test_categories()).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn create_derives_time_fields_from_segments() {
        // T0 < T1 <= T2 < T3인 구간 두 개
        let mut req = create_req("执行工作");
        req.segments = Some(vec![
            seg("2025-08-01T01:00:00Z", "2025-08-01T01:10:00Z"),
            seg("2025-08-01T01:20:00Z", "2025-08-01T01:25:00Z"),
        ]);
        // 충돌하는 호출자 값은 덮어써야 합니다
        req.duration = Some(1);
        req.start_time = Some("2025-08-01T09:00:00Z".to_string());

        let record = create_record(req, &test_categories()).unwrap();
        assert_eq!(record.start_time, "2025-08-01T01:00:00Z");
        assert_eq!(record.end_time, "2025-08-01T01:25:00Z");
        assert_eq!(record.duration, 600_000 + 300_000);
        assert_eq!(record.pause_count, 2);
        assert_eq!(record.time_span, 1_500_000);
        // date는 UTC+8 달력으로 재계산됨
        assert_eq!(record.date, "2025/08/01");
    }

    #[test]
    fn create_sorts_unsorted_segments_before_deriving() {
        let mut req = create_req("执行工作");
        req.segments = Some(vec![
            seg("2025-08-01T01:20:00Z", "2025-08-01T01:25:00Z"),
            seg("2025-08-01T01:00:00Z", "2025-08-01T01:10:00Z"),
        ]);
        let record = create_record(req, &test_categories()).unwrap();
        assert_eq!(record.start_time, "2025-08-01T01:00:00Z");
        assert_eq!(record.end_time, "2025-08-01T01:25:00Z");
    }

    #[test]
    fn create_without_segments_uses_caller_fields() {
        let mut req = create_req("执行工作");
        req.start_time = Some("2025-08-01T23:30:00Z".to_string());
        req.end_time = Some("2025-08-02T00:30:00Z".to_string());
        req.duration = Some(3_600_000);
        let record = create_record(req, &test_categories()).unwrap();
        assert_eq!(record.duration, 3_600_000);
        assert_eq!(record.pause_count, 0);
        // UTC 23:30 → UTC+8 다음날
        assert_eq!(record.date, "2025/08/02");
    }

    fn base_record() -> Record {
        let mut req = create_req("执行工作");
        req.segments = Some(vec![seg("2025-08-01T01:00:00Z", "2025-08-01T01:10:00Z")]);
        create_record(req, &test_categories()).unwrap()
    }

    fn update_req() -> UpdateRecordRequest {
        UpdateRecordRequest {
            activity: None,
            activity_category: None,
            start_time: None,
            end_time: None,
            date: None,
            duration: None,
            pause_count: None,
            time_span: None,
            remark: None,
            emotion: None,
            segments: None,
        }
    }

    #[test]
    fn update_appends_single_segment_object() {
        let mut record = base_record();
        let mut req = update_req();
        req.segments = Some(SegmentsPatch::One(crate::models::SegmentPatch {
            index: None,
            start: Some("2025-08-01T01:20:00Z".to_string()),
            end: Some("2025-08-01T01:25:00Z".to_string()),
        }));
        apply_update(&mut record, req);
        assert_eq!(record.segments.len(), 2);
        // startTime이 이미 있으므로 파생 필드는 그대로 (의도된 staleness)
        assert_eq!(record.duration, 600_000);
        assert_eq!(record.pause_count, 1);
    }

    #[test]
    fn update_patches_segment_by_index() {
        let mut record = base_record();
        let mut req = update_req();
        req.segments = Some(SegmentsPatch::One(crate::models::SegmentPatch {
            index: Some(0),
            start: None,
            end: Some("2025-08-01T01:15:00Z".to_string()),
        }));
        apply_update(&mut record, req);
        assert_eq!(
            record.segments[0].end.as_deref(),
            Some("2025-08-01T01:15:00Z")
        );
    }

    #[test]
    fn out_of_range_index_is_silent_noop() {
        let mut record = base_record();
        let before = record.segments.clone();
        let mut req = update_req();
        req.segments = Some(SegmentsPatch::One(crate::models::SegmentPatch {
            index: Some(99),
            start: None,
            end: Some("2025-08-01T09:00:00Z".to_string()),
        }));
        apply_update(&mut record, req);
        assert_eq!(record.segments, before);
    }

    #[test]
    fn update_replaces_whole_list() {
        let mut record = base_record();
        let mut req = update_req();
        req.segments = Some(SegmentsPatch::Replace(vec![seg(
            "2025-08-02T01:00:00Z",
            "2025-08-02T02:00:00Z",
        )]));
        apply_update(&mut record, req);
        assert_eq!(record.segments.len(), 1);
        // 교체 후에도 startTime은 불변 (파생 필드 재계산 없음)
        assert_eq!(record.start_time, "2025-08-01T01:00:00Z");
    }

    #[test]
    fn update_derives_fields_when_start_time_absent() {
        let mut record = base_record();
        record.start_time.clear();
        record.duration = 0;
        let mut req = update_req();
        req.segments = Some(SegmentsPatch::One(crate::models::SegmentPatch {
            index: None,
            start: Some("2025-08-01T01:20:00Z".to_string()),
            end: Some("2025-08-01T01:25:00Z".to_string()),
        }));
        apply_update(&mut record, req);
        assert_eq!(record.start_time, "2025-08-01T01:00:00Z");
        assert_eq!(record.duration, 900_000);
        assert_eq!(record.pause_count, 2);
        assert_eq!(record.date, "2025/08/01");
    }

    #[test]
    fn explicit_start_time_patch_recomputes_date() {
        let mut record = base_record();
        let mut req = update_req();
        req.start_time = Some("2025-08-05T23:00:00Z".to_string());
        apply_update(&mut record, req);
        assert_eq!(record.date, "2025/08/06");
    }

    #[test]
    fn emotion_split_round_trips() {
        let tags = split_emotions("开心, 平静");
        assert_eq!(tags, vec!["开心", "平静"]);
        assert_eq!(tags.join(", "), "开心, 平静");
        assert!(split_emotions("").is_empty());
    }
}
