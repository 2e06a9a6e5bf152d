use serde::{Deserialize, Serialize};

/// 활동 카테고리 설정 항목 (사용자 데이터가 아닌 설정 엔티티).
///
/// `activities`는 이 카테고리로 매핑되는 활동명 조각 목록입니다.
/// 매칭 규칙은 완전 일치가 아니라 **부분 문자열 포함**이며,
/// 완전 일치를 먼저 시도하고, 여러 조각이 겹치면 설정 순서상
/// 먼저 나오는 것이 이깁니다 (first-match-wins).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityCategory {
    pub name: String,
    /// 심볼릭 색상 키 ("blue", "green", "purple", "orange", "cyan", "gray")
    pub color: String,
    #[serde(default)]
    pub activities: Vec<String>,
}

/// 색상 키 → 표시용 hex 색상 고정 테이블.
/// 알 수 없는 키는 회색으로 처리합니다.
pub fn color_hex(key: &str) -> &'static str {
    match key {
        "blue" => "#2196F3",
        "green" => "#4CAF50",
        "purple" => "#9C27B0",
        "orange" => "#FF9800",
        "cyan" => "#00BCD4",
        "gray" => "#9E9E9E",
        _ => "#9E9E9E",
    }
}

/// "창작 산출" 카테고리명. 일일 계획의 창작 시간 합계가 이 카테고리로 제한됩니다.
pub const CREATION_CATEGORY: &str = "输出创作";

/// 집계 집합에서 제외하는 "기타" 카테고리명 (저장 데이터에 남아 있을 수 있음)
pub const OTHER_CATEGORY: &str = "其他";
