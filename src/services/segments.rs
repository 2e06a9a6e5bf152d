//! # 구간(Segment) 시간 계산 모듈
//!
//! 기록 하나에 속한 구간 목록 `[{start, end}]`에 대한 순수 함수들입니다.
//! 상태도 I/O도 없으므로 async가 아닙니다.
//!
//! 시각 파싱 실패는 요청 에러로 올리지 않고 `None`으로 돌려줍니다.
//! "해당 필드를 계산할 수 없음"이라는 의미이며, 삼키는 대신 warn 로그를
//! 남깁니다.
//!
//! 정렬 주의: `first_start`/`last_end`는 최솟값/최댓값이 아니라
//! **첫 번째/마지막 요소**를 그대로 읽습니다. 호출자는 파생 계산 전에
//! `sort_by_start`로 start 오름차순 정렬을 보장해야 합니다.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use crate::models::Segment;

/// 보고용 고정 로컬 달력 시간대: UTC+8.
/// 저장은 UTC, 날짜 버킷팅은 이 시간대 기준입니다.
pub fn civil_tz() -> FixedOffset {
    // 8 * 3600초는 항상 유효한 오프셋이므로 unwrap이 아닌 expect도 불필요하지만,
    // east_opt이 Option을 돌려주므로 상수 경로로 풀어둡니다.
    FixedOffset::east_opt(8 * 3600).expect("UTC+8 is a valid offset")
}

/// ISO-8601 문자열을 UTC 시각으로 파싱합니다.
/// 실패하면 warn 로그를 남기고 None을 반환합니다 (요청 에러 아님).
pub fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            tracing::warn!("타임스탬프 파싱 실패: {:?} ({})", s, e);
            None
        }
    }
}

/// ISO-8601 문자열 → epoch 밀리초
fn instant_ms(s: &str) -> Option<i64> {
    parse_instant(s).map(|dt| dt.timestamp_millis())
}

/// 구간 길이 합계 (밀리초).
/// start나 end가 없거나 파싱할 수 없는 구간, end < start인 구간은
/// 조용히 건너뜁니다 (비정상 입력 허용, 에러 아님).
pub fn total_duration(segments: &[Segment]) -> i64 {
    segments
        .iter()
        .filter_map(|seg| {
            let start = instant_ms(seg.start.as_deref()?)?;
            let end = instant_ms(seg.end.as_deref()?)?;
            if end >= start {
                Some(end - start)
            } else {
                None
            }
        })
        .sum()
}

/// 첫 번째 구간의 start (목록이 비어 있으면 None).
/// 최솟값이 아니라 첫 요소입니다 — 정렬은 호출자 책임.
pub fn first_start(segments: &[Segment]) -> Option<&str> {
    segments.first()?.start.as_deref()
}

/// 마지막 구간의 end. 역시 마지막 요소를 그대로 읽습니다.
pub fn last_end(segments: &[Segment]) -> Option<&str> {
    segments.last()?.end.as_deref()
}

/// 구간 수 (== 일시정지 횟수)
pub fn count(segments: &[Segment]) -> usize {
    segments.len()
}

/// 첫 구간 시작 ~ 마지막 구간 끝 (밀리초, 일시정지 공백 포함).
/// 양끝 중 하나라도 계산할 수 없으면 None — 호출자는 기존 값을 유지합니다.
pub fn time_span(segments: &[Segment]) -> Option<i64> {
    let start = instant_ms(first_start(segments)?)?;
    let end = instant_ms(last_end(segments)?)?;
    Some(end - start)
}

/// start 오름차순 안정 정렬. 파싱할 수 없는 start는 뒤로 보냅니다.
pub fn sort_by_start(segments: &mut [Segment]) {
    segments.sort_by_key(|seg| {
        seg.start
            .as_deref()
            .and_then(instant_ms)
            .unwrap_or(i64::MAX)
    });
}

/// UTC 시각 문자열 → UTC+8 달력 날짜 "YYYY/MM/DD".
/// 기록의 `date` 필드는 항상 이 함수로 재계산 가능해야 합니다.
pub fn civil_date(start_time: &str) -> Option<String> {
    let dt = parse_instant(start_time)?;
    Some(dt.with_timezone(&civil_tz()).format("%Y/%m/%d").to_string())
}

/// 오늘 날짜 (UTC+8 달력)
pub fn today_civil() -> NaiveDate {
    Utc::now().with_timezone(&civil_tz()).date_naive()
}

/// NaiveDate → "YYYY/MM/DD"
pub fn format_civil(date: NaiveDate) -> String {
    date.format("%Y/%m/%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(start: &str, end: &str) -> Segment {
        Segment {
            start: Some(start.to_string()),
            end: Some(end.to_string()),
        }
    }

    #[test]
    fn total_duration_sums_all_segments() {
        // 10분 + 5분
        let segments = vec![
            seg("2025-08-01T01:00:00Z", "2025-08-01T01:10:00Z"),
            seg("2025-08-01T01:20:00Z", "2025-08-01T01:25:00Z"),
        ];
        assert_eq!(total_duration(&segments), 600_000 + 300_000);
    }

    #[test]
    fn malformed_or_partial_segments_are_skipped() {
        let segments = vec![
            seg("2025-08-01T01:00:00Z", "2025-08-01T01:10:00Z"),
            Segment {
                start: Some("2025-08-01T02:00:00Z".to_string()),
                end: None,
            },
            Segment {
                start: Some("not-a-timestamp".to_string()),
                end: Some("2025-08-01T03:00:00Z".to_string()),
            },
        ];
        assert_eq!(total_duration(&segments), 600_000);
    }

    #[test]
    fn time_span_includes_pause_gaps() {
        let segments = vec![
            seg("2025-08-01T01:00:00Z", "2025-08-01T01:10:00Z"),
            seg("2025-08-01T01:20:00Z", "2025-08-01T01:25:00Z"),
        ];
        // 01:00 ~ 01:25 = 25분
        assert_eq!(time_span(&segments), Some(1_500_000));
        // 일시정지 공백이 있으므로 duration < timeSpan
        assert!(total_duration(&segments) < time_span(&segments).unwrap());
    }

    #[test]
    fn duration_equals_span_when_contiguous() {
        let segments = vec![
            seg("2025-08-01T01:00:00Z", "2025-08-01T01:10:00Z"),
            seg("2025-08-01T01:10:00Z", "2025-08-01T01:25:00Z"),
        ];
        assert_eq!(total_duration(&segments), time_span(&segments).unwrap());
    }

    #[test]
    fn time_span_is_none_when_bounds_unresolvable() {
        assert_eq!(time_span(&[]), None);
        let segments = vec![Segment {
            start: Some("bad".to_string()),
            end: Some("2025-08-01T01:10:00Z".to_string()),
        }];
        assert_eq!(time_span(&segments), None);
    }

    #[test]
    fn first_and_last_are_positional_not_extremal() {
        // 일부러 역순으로 둔 목록: first_start는 "더 늦은" 쪽을 돌려줍니다.
        let mut segments = vec![
            seg("2025-08-01T02:00:00Z", "2025-08-01T02:30:00Z"),
            seg("2025-08-01T01:00:00Z", "2025-08-01T01:10:00Z"),
        ];
        assert_eq!(first_start(&segments), Some("2025-08-01T02:00:00Z"));

        sort_by_start(&mut segments);
        assert_eq!(first_start(&segments), Some("2025-08-01T01:00:00Z"));
        assert_eq!(last_end(&segments), Some("2025-08-01T02:30:00Z"));
    }

    #[test]
    fn civil_date_converts_utc_to_utc8() {
        // UTC 23시는 UTC+8에서 다음날 07시
        assert_eq!(
            civil_date("2025-08-01T23:30:00Z"),
            Some("2025/08/02".to_string())
        );
        assert_eq!(
            civil_date("2025-08-01T02:00:00Z"),
            Some("2025/08/01".to_string())
        );
        assert_eq!(civil_date("nonsense"), None);
    }
}
