//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//! Axum에서 핸들러는 HTTP 요청을 받아 응답을 반환하는 async 함수입니다.
//!
//! 각 하위 모듈:
//! - `records`: 기록 CRUD / 목록·검색 / 내보내기·가져오기 (AppState 정의 포함)
//! - `stats`: 오늘 요약 통계
//! - `wall`: 최근 7일 집계 (감정 벽 / 활동 벽 / 키워드)
//! - `plans`: 일일 계획 조회/수정/동기화
//! - `categories`: 활동 카테고리 설정
//! - `sync`: Bitable 동기화 설정 및 일괄 전송
//! - `health`: 서버 상태 확인 (헬스체크)

pub mod categories;
pub mod health;
pub mod plans;
pub mod records;
pub mod stats;
pub mod sync;
pub mod wall;

// 각 모듈의 핸들러 함수들을 재공개하여
// main.rs에서 `routes::list_records`처럼 바로 접근 가능하게 합니다.
pub use categories::*;
pub use health::*;
pub use plans::*;
pub use records::*;
pub use stats::*;
pub use sync::*;
pub use wall::*;
