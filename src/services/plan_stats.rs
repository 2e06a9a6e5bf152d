//! # 일일 계획 통계 재계산
//!
//! 주어진 달력 날짜의 기록들로부터 일일 계획의 통계 필드를 다시 만듭니다.
//! 저장소에 대해 부작용이 없고 멱등입니다 — 메모리 안의 DailyPlan만
//! 수정하며, 저장 여부는 호출자가 결정합니다.
//!
//! 시간 합계는 기록의 저장된 `duration` 필드가 아니라 **구간에서
//! 재계산한 값**을 씁니다. startTime이 정해진 뒤 구간이 수정된 기록은
//! duration이 오래된 값일 수 있기 때문입니다 (normalizer 모듈 참고).

use crate::models::{DailyPlan, PlanActivity, Record, CREATION_CATEGORY, OTHER_CATEGORY};
use crate::services::normalizer;

/// plan.date에 해당하는 기록들로 통계 필드를 덮어씁니다.
///
/// 계획 날짜는 URL 친화적인 "YYYY-MM-DD"이고 기록의 달력 날짜는
/// "YYYY/MM/DD"이므로 비교 전에 구분자를 맞춥니다.
pub fn recompute(plan: &mut DailyPlan, records: &[Record]) {
    let target = plan.date.replace('-', "/");
    let mut activities = Vec::new();
    let mut emotions: Vec<String> = Vec::new();
    let mut categories: Vec<String> = Vec::new();
    let mut total_duration = 0;
    let mut creation_duration = 0;

    for record in records {
        if record.civil_day().as_deref() != Some(target.as_str()) {
            continue;
        }

        let duration = record.accurate_duration();
        total_duration += duration;
        if record.activity_category == CREATION_CATEGORY {
            creation_duration += duration;
        }

        activities.push(PlanActivity {
            activity: record.activity.clone(),
            activity_category: record.activity_category.clone(),
            duration,
            start_time: record.start_time.clone(),
            segments: record.segments.clone(),
        });

        // 감정/카테고리 집합: 처음 본 순서를 유지하는 중복 제거
        for tag in normalizer::split_emotions(&record.emotion) {
            if !emotions.iter().any(|e| e == tag) {
                emotions.push(tag.to_string());
            }
        }
        let category = &record.activity_category;
        if !category.is_empty()
            && category != OTHER_CATEGORY
            && !categories.iter().any(|c| c == category)
        {
            categories.push(category.clone());
        }
    }

    plan.activities = activities;
    plan.emotions = emotions;
    plan.activity_categories = categories;
    plan.total_duration = total_duration;
    plan.creation_duration = creation_duration;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Segment;

    fn seg(start: &str, end: &str) -> Segment {
        Segment {
            start: Some(start.to_string()),
            end: Some(end.to_string()),
        }
    }

    fn record(id: &str, start: &str, category: &str, segments: Vec<Segment>) -> Record {
        Record {
            id: id.to_string(),
            activity: "执行工作".to_string(),
            activity_category: category.to_string(),
            start_time: start.to_string(),
            end_time: String::new(),
            date: String::new(),
            // 일부러 오래된 값: 통계는 이 값을 믿으면 안 됩니다
            duration: 1,
            pause_count: 0,
            time_span: 0,
            remark: String::new(),
            emotion: "开心, 平静".to_string(),
            segments,
        }
    }

    fn empty_plan(date: &str) -> DailyPlan {
        DailyPlan {
            id: "plan-1".to_string(),
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
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn total_duration_sums_segment_recomputed_values() {
        // 구간 기준 600000ms + 300000ms → 900000
        let records = vec![
            record(
                "a",
                "2025-08-01T01:00:00Z",
                "工作输出",
                vec![seg("2025-08-01T01:00:00Z", "2025-08-01T01:10:00Z")],
            ),
            record(
                "b",
                "2025-08-01T02:00:00Z",
                "输出创作",
                vec![seg("2025-08-01T02:00:00Z", "2025-08-01T02:05:00Z")],
            ),
        ];
        let mut plan = empty_plan("2025-08-01");
        recompute(&mut plan, &records);
        assert_eq!(plan.total_duration, 900_000);
        // 창작 시간은 输出创作 기록만
        assert_eq!(plan.creation_duration, 300_000);
        assert_eq!(plan.activities.len(), 2);
        assert_eq!(plan.activities[0].duration, 600_000);
    }

    #[test]
    fn other_day_records_are_ignored() {
        let records = vec![record(
            "a",
            "2025-08-02T01:00:00Z",
            "工作输出",
            vec![seg("2025-08-02T01:00:00Z", "2025-08-02T01:10:00Z")],
        )];
        let mut plan = empty_plan("2025-08-01");
        recompute(&mut plan, &records);
        assert!(plan.activities.is_empty());
        assert_eq!(plan.total_duration, 0);
    }

    #[test]
    fn emotion_and_category_sets_are_deduplicated() {
        let records = vec![
            record(
                "a",
                "2025-08-01T01:00:00Z",
                "工作输出",
                vec![seg("2025-08-01T01:00:00Z", "2025-08-01T01:10:00Z")],
            ),
            record(
                "b",
                "2025-08-01T02:00:00Z",
                "工作输出",
                vec![seg("2025-08-01T02:00:00Z", "2025-08-01T02:10:00Z")],
            ),
        ];
        let mut plan = empty_plan("2025-08-01");
        recompute(&mut plan, &records);
        assert_eq!(plan.emotions, vec!["开心", "平静"]);
        assert_eq!(plan.activity_categories, vec!["工作输出"]);
    }

    #[test]
    fn empty_and_other_categories_are_excluded_from_set() {
        let mut anon = record(
            "a",
            "2025-08-01T01:00:00Z",
            "",
            vec![seg("2025-08-01T01:00:00Z", "2025-08-01T01:10:00Z")],
        );
        anon.emotion = String::new();
        let mut other = record(
            "b",
            "2025-08-01T02:00:00Z",
            OTHER_CATEGORY,
            vec![seg("2025-08-01T02:00:00Z", "2025-08-01T02:10:00Z")],
        );
        other.emotion = String::new();
        let mut plan = empty_plan("2025-08-01");
        recompute(&mut plan, &[anon, other]);
        assert!(plan.activity_categories.is_empty());
        // 집합에서만 빠질 뿐 시간 합계에는 들어갑니다
        assert_eq!(plan.total_duration, 1_200_000);
    }

    #[test]
    fn recompute_is_idempotent() {
        let records = vec![record(
            "a",
            "2025-08-01T01:00:00Z",
            "工作输出",
            vec![seg("2025-08-01T01:00:00Z", "2025-08-01T01:10:00Z")],
        )];
        let mut plan = empty_plan("2025-08-01");
        recompute(&mut plan, &records);
        let first_total = plan.total_duration;
        let first_len = plan.activities.len();
        recompute(&mut plan, &records);
        assert_eq!(plan.total_duration, first_total);
        assert_eq!(plan.activities.len(), first_len);
    }

    #[test]
    fn records_without_segments_fall_back_to_stored_duration() {
        let mut r = record("a", "2025-08-01T01:00:00Z", "工作输出", Vec::new());
        r.duration = 3_600_000;
        let mut plan = empty_plan("2025-08-01");
        recompute(&mut plan, &[r]);
        assert_eq!(plan.total_duration, 3_600_000);
    }
}
