use serde::{Deserialize, Serialize};

/// 하나의 기록 안에서 실제로 집중한 연속 구간.
/// 일시정지/재개를 반복하면 구간이 누적됩니다.
/// start/end는 ISO-8601 UTC 문자열이며, 둘 중 하나가 비어 있는
/// 비정상 입력도 저장은 허용합니다 (시간 계산에서만 건너뜀).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Segment {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

/// 하나의 활동 기록. 저장 파일(records.json)과 API 응답의 공통 형태입니다.
///
/// 시간 필드 불변식:
/// - `date`는 `startTime`을 UTC+8 달력으로 변환해 항상 재계산 가능 (캐시일 뿐)
/// - `segments`가 있으면 `duration` == 구간 길이 합, `pauseCount` == 구간 수,
///   `timeSpan` == 마지막 end - 첫 start (일시정지 공백 포함, timeSpan >= duration)
/// - 단, `startTime`이 이미 정해진 기록은 구간 수정 후 파생 필드를 다시 계산하지
///   않으므로 `segments`에 비해 오래된 값일 수 있습니다 (normalizer 참고)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    pub activity: String,
    #[serde(default)]
    pub activity_category: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    /// UTC+8 달력 기준 "YYYY/MM/DD"
    #[serde(default)]
    pub date: String,
    /// 집중 시간 합계 (밀리초)
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub pause_count: i64,
    /// 첫 구간 시작 ~ 마지막 구간 끝 (밀리초, 일시정지 공백 포함)
    #[serde(default)]
    pub time_span: i64,
    #[serde(default)]
    pub remark: String,
    /// 감정 태그를 ", "로 연결한 문자열 (예: "开心, 平静").
    /// ", "로 split하면 태그 목록이 그대로 복원됩니다.
    #[serde(default)]
    pub emotion: String,
    /// start 오름차순으로 정렬된 구간 목록 (비어 있을 수 있음)
    #[serde(default)]
    pub segments: Vec<Segment>,
}

impl Record {
    /// 기록이 속한 UTC+8 달력 날짜.
    /// `startTime`에서 변환하는 것이 원칙이고, 파싱할 수 없으면
    /// 캐시된 `date` 필드로 물러납니다.
    pub fn civil_day(&self) -> Option<String> {
        if !self.start_time.is_empty() {
            if let Some(date) = crate::services::segments::civil_date(&self.start_time) {
                return Some(date);
            }
        }
        if self.date.is_empty() {
            None
        } else {
            Some(self.date.clone())
        }
    }

    /// 정확한 집중 시간: 구간이 있으면 구간 합계를 재계산하고,
    /// 없으면 저장된 `duration`을 씁니다.
    /// (startTime이 정해진 뒤 구간이 수정된 기록은 저장된 duration이
    /// 오래된 값일 수 있으므로, 통계 읽기 경로는 이 함수를 씁니다.)
    pub fn accurate_duration(&self) -> i64 {
        if self.segments.is_empty() {
            self.duration
        } else {
            crate::services::segments::total_duration(&self.segments)
        }
    }
}

/// 기록 생성 요청. `activity`만 필수입니다.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordRequest {
    pub activity: String,
    pub activity_category: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub date: Option<String>,
    pub duration: Option<i64>,
    pub pause_count: Option<i64>,
    pub time_span: Option<i64>,
    pub remark: Option<String>,
    pub emotion: Option<String>,
    pub segments: Option<Vec<Segment>>,
}

/// 기록 수정 요청 (부분 패치). None인 필드는 변경하지 않습니다.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRecordRequest {
    pub activity: Option<String>,
    pub activity_category: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub date: Option<String>,
    pub duration: Option<i64>,
    pub pause_count: Option<i64>,
    pub time_span: Option<i64>,
    pub remark: Option<String>,
    pub emotion: Option<String>,
    pub segments: Option<SegmentsPatch>,
}

/// `segments` 필드의 패치 형태.
///
/// 프론트엔드 계약(원래부터 이런 모양입니다):
/// - 리스트를 보내면 → 구간 목록 전체 교체
/// - 객체 하나를 보내면 → 구간 하나 추가
/// - 객체에 `index`가 있으면 → 해당 위치 구간을 제자리 수정
///   (범위를 벗어나면 조용히 무시, 에러 아님)
///
/// #[serde(untagged)]: JSON 형태(배열 vs 객체)로 variant를 구분합니다.
/// 배열 매칭(Replace)을 먼저 시도하므로 variant 순서가 중요합니다.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SegmentsPatch {
    Replace(Vec<Segment>),
    One(SegmentPatch),
}

/// 구간 하나에 대한 추가/수정 페이로드
#[derive(Debug, Deserialize)]
pub struct SegmentPatch {
    /// Some이면 해당 인덱스의 구간을 수정, None이면 끝에 추가
    pub index: Option<usize>,
    pub start: Option<String>,
    pub end: Option<String>,
}

/// GET /api/all-records 의 쿼리 파라미터
/// (쿼리 문자열은 원래 계약대로 snake_case를 유지합니다)
#[derive(Debug, Deserialize, Default)]
pub struct RecordQuery {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
    /// 활동명/메모에 대한 대소문자 무시 부분 검색
    pub search: Option<String>,
    /// "YYYY/MM/DD", date 필드 기준 이상/이하 (둘 다 포함)
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    /// 활동명 완전 일치
    pub activity: Option<String>,
    /// emotion 문자열 부분 포함
    pub emotion: Option<String>,
}
