//! # 서비스(도메인 로직) 모듈
//!
//! 라우트 핸들러에서 분리한 핵심 로직:
//! - `segments`: 구간 시간 계산 (순수 함수)
//! - `normalizer`: 쓰기 페이로드 → 표준 기록 형태
//! - `wall`: 7일 집계 (감정 벽 / 활동 벽 / 키워드 클라우드)
//! - `plan_stats`: 일일 계획 통계 재계산
//! - `bitable`: 외부 스프레드시트 동기화 어댑터

pub mod bitable;
pub mod normalizer;
pub mod plan_stats;
pub mod segments;
pub mod wall;
