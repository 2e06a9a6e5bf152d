//! # 집계 엔진: 감정 벽 / 활동 벽 / 키워드 클라우드
//!
//! 오늘을 끝으로 하는 최근 7일(UTC+8 달력) 창에 대한 보고서 세 개를
//! 한 번에 만듭니다. 응답 형태는 프론트엔드 계약을 그대로 따릅니다:
//! 상위 키는 camelCase(moodData, activityData, ...), 날짜 버킷 안의
//! 필드는 snake_case(record_ids, activity_categories)입니다.
//!
//! 날짜 버킷은 희소(sparse) 표현입니다 — 해당 감정/카테고리의 기록이
//! 없는 날은 days 목록에 아예 나타나지 않습니다 (7칸 고정 배열 아님).
//!
//! 날짜 버킷팅은 기록의 `startTime`을 UTC+8로 변환해 정합니다.
//! 어느 시간대로 기록됐든 창은 항상 [오늘-6, 오늘]을 정확히 덮습니다.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use crate::models::{color_hex, ActivityCategory, Record};
use crate::services::{normalizer, segments};

/// /api/mood-wall 응답 전체
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WallReport {
    pub mood_data: Vec<EmotionWall>,
    pub activity_data: Vec<CategoryWall>,
    pub keyword_data: Vec<Keyword>,
    pub mood_legend: Vec<Legend>,
    pub activity_legend: Vec<Legend>,
}

/// 감정 하나의 7일치 버킷 (기록이 있는 날만)
#[derive(Debug, Serialize)]
pub struct EmotionWall {
    pub name: String,
    pub color: String,
    pub days: Vec<MoodDay>,
}

/// 감정 벽의 하루 버킷. durations/activities/record_ids는
/// 같은 인덱스끼리 한 기록을 가리키는 평행 배열입니다.
#[derive(Debug, Serialize)]
pub struct MoodDay {
    pub date: String,
    pub count: usize,
    pub durations: Vec<i64>,
    pub activities: Vec<String>,
    pub record_ids: Vec<String>,
}

/// 카테고리 하나의 7일치 버킷
#[derive(Debug, Serialize)]
pub struct CategoryWall {
    pub name: String,
    pub color: String,
    pub days: Vec<CategoryDay>,
}

#[derive(Debug, Serialize)]
pub struct CategoryDay {
    pub date: String,
    pub count: usize,
    /// 이 날 이 카테고리의 시간 합계 (밀리초)
    pub total_duration: i64,
    pub durations: Vec<i64>,
    pub activities: Vec<String>,
    pub activity_categories: Vec<String>,
    pub record_ids: Vec<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Keyword {
    pub keyword: String,
    pub count: usize,
    pub color: String,
}

#[derive(Debug, Serialize)]
pub struct Legend {
    pub name: String,
    pub color: String,
}

/// 고정 감정 → 표시 색 테이블. 목록에 없는 감정은 기본 회색.
const EMOTION_COLORS: &[(&str, &str)] = &[
    ("开心", "#4CAF50"),
    ("专注", "#2196F3"),
    ("疲惫", "#9E9E9E"),
    ("焦虑", "#FF9800"),
    ("兴奋", "#E91E63"),
    ("平静", "#00BCD4"),
    ("沮丧", "#F44336"),
    ("满足", "#8BC34A"),
    ("无聊", "#795548"),
];

const DEFAULT_EMOTION_COLOR: &str = "#607D8B";

/// 키워드 순위별로 순환 적용하는 팔레트
const KEYWORD_PALETTE: &[&str] = &[
    "#4CAF50", "#2196F3", "#FF9800", "#E91E63", "#9C27B0", "#00BCD4", "#F44336", "#8BC34A",
    "#795548", "#607D8B",
];

const KEYWORD_LIMIT: usize = 20;

pub fn emotion_color(name: &str) -> &'static str {
    EMOTION_COLORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, c)| *c)
        .unwrap_or(DEFAULT_EMOTION_COLOR)
}

/// [today-6, today] 창의 날짜 목록 (오름차순, "YYYY/MM/DD")
fn window_dates(today: NaiveDate, days: i64) -> Vec<String> {
    (0..days)
        .rev()
        .filter_map(|back| today.checked_sub_days(chrono::Days::new(back as u64)))
        .map(segments::format_civil)
        .collect()
}

/// 세 보고서를 한 번에 만듭니다.
pub fn build_wall(
    records: &[Record],
    categories: &[ActivityCategory],
    today: NaiveDate,
) -> WallReport {
    let window = window_dates(today, 7);
    let in_window = |date: &str| window.iter().any(|d| d == date);

    // ── 감정 벽 ──
    // 감정명 → (날짜 → 버킷). 감정 등장 순서를 보존하기 위해 Vec을 같이 듭니다.
    let mut emotion_order: Vec<String> = Vec::new();
    let mut emotion_days: BTreeMap<String, BTreeMap<String, MoodDay>> = BTreeMap::new();

    // ── 활동 벽 ──
    let mut category_order: Vec<String> = Vec::new();
    let mut category_days: BTreeMap<String, BTreeMap<String, CategoryDay>> = BTreeMap::new();

    for record in records {
        let Some(date) = record.civil_day() else {
            continue;
        };
        if !in_window(&date) {
            continue;
        }
        let duration = record.accurate_duration();

        for tag in normalizer::split_emotions(&record.emotion) {
            if !emotion_order.iter().any(|e| e == tag) {
                emotion_order.push(tag.to_string());
            }
            let day = emotion_days
                .entry(tag.to_string())
                .or_default()
                .entry(date.clone())
                .or_insert_with(|| MoodDay {
                    date: date.clone(),
                    count: 0,
                    durations: Vec::new(),
                    activities: Vec::new(),
                    record_ids: Vec::new(),
                });
            day.count += 1;
            day.durations.push(duration);
            day.activities.push(record.activity.clone());
            day.record_ids.push(record.id.clone());
        }

        // 카테고리: 기록에 저장된 값 우선, 없으면 느슨한 매칭으로 해석.
        // 해석까지 실패한 기록은 활동 벽에서 완전히 제외됩니다
        // ("其他" 버킷으로 모으지 않습니다).
        let category_name = if record.activity_category.is_empty() {
            match normalizer::resolve_category(&record.activity, categories) {
                Some(name) => name,
                None => continue,
            }
        } else {
            record.activity_category.clone()
        };

        if !category_order.iter().any(|c| c == &category_name) {
            category_order.push(category_name.clone());
        }
        let day = category_days
            .entry(category_name.clone())
            .or_default()
            .entry(date.clone())
            .or_insert_with(|| CategoryDay {
                date: date.clone(),
                count: 0,
                total_duration: 0,
                durations: Vec::new(),
                activities: Vec::new(),
                activity_categories: Vec::new(),
                record_ids: Vec::new(),
            });
        day.count += 1;
        day.total_duration += duration;
        day.durations.push(duration);
        day.activities.push(record.activity.clone());
        day.activity_categories.push(category_name.clone());
        day.record_ids.push(record.id.clone());
    }

    let mood_data = emotion_order
        .into_iter()
        .map(|name| {
            let days = emotion_days
                .remove(&name)
                .map(|by_date| by_date.into_values().collect())
                .unwrap_or_default();
            EmotionWall {
                color: emotion_color(&name).to_string(),
                name,
                days,
            }
        })
        .collect();

    let activity_data = category_order
        .into_iter()
        .map(|name| {
            let color = categories
                .iter()
                .find(|c| c.name == name)
                .map(|c| color_hex(&c.color))
                .unwrap_or(color_hex(""));
            let days = category_days
                .remove(&name)
                .map(|by_date| by_date.into_values().collect())
                .unwrap_or_default();
            CategoryWall {
                name,
                color: color.to_string(),
                days,
            }
        })
        .collect();

    let keyword_data = keyword_cloud(records, today, 7);

    let mood_legend = EMOTION_COLORS
        .iter()
        .map(|(name, color)| Legend {
            name: name.to_string(),
            color: color.to_string(),
        })
        .collect();

    let activity_legend = categories
        .iter()
        .map(|c| Legend {
            name: c.name.clone(),
            color: color_hex(&c.color).to_string(),
        })
        .collect();

    WallReport {
        mood_data,
        activity_data,
        keyword_data,
        mood_legend,
        activity_legend,
    }
}

/// 메모 토큰 패턴: CJK 문자 연속 구간 또는 라틴 문자 연속 구간.
/// "学习Rust很开心" → ["学习", "Rust", "很开心"]
static REMARK_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{Han}+|[A-Za-z]+").expect("valid token pattern"));

/// 최근 N일 창에서 키워드 빈도 상위 20개.
///
/// - 활동명은 공백으로, 메모는 스크립트 연속 구간으로 토큰화
/// - 한 글자짜리 토큰은 버립니다
/// - 빈도 내림차순 **안정 정렬**: 빈도가 같으면 먼저 나타난 토큰이 앞
/// - 색은 순위에 따라 팔레트를 순환 적용
pub fn keyword_cloud(records: &[Record], today: NaiveDate, window_days: i64) -> Vec<Keyword> {
    let window = window_dates(today, window_days);
    let in_window = |date: &str| window.iter().any(|d| d == date);

    // 등장 순서 보존을 위해 Vec + 위치 맵을 함께 사용
    let mut order: Vec<String> = Vec::new();
    let mut counts: std::collections::HashMap<String, usize> = std::collections::HashMap::new();
    let mut bump = |token: &str| {
        if token.chars().count() <= 1 {
            return;
        }
        if !counts.contains_key(token) {
            order.push(token.to_string());
        }
        *counts.entry(token.to_string()).or_insert(0) += 1;
    };

    for record in records {
        let Some(date) = record.civil_day() else {
            continue;
        };
        if !in_window(&date) {
            continue;
        }
        for token in record.activity.split_whitespace() {
            bump(token);
        }
        for token in REMARK_TOKEN.find_iter(&record.remark) {
            bump(token.as_str());
        }
    }

    let mut ranked: Vec<(String, usize)> = order
        .into_iter()
        .map(|token| {
            let count = counts[&token];
            (token, count)
        })
        .collect();
    // sort_by는 안정 정렬이므로 빈도가 같으면 입력 순서가 유지됩니다
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .take(KEYWORD_LIMIT)
        .enumerate()
        .map(|(rank, (keyword, count))| Keyword {
            keyword,
            count,
            color: KEYWORD_PALETTE[rank % KEYWORD_PALETTE.len()].to_string(),
        })
        .collect()
}
