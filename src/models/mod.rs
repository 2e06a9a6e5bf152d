//! # 데이터 모델 모듈
//!
//! API 요청/응답과 JSON 저장 파일에서 사용하는 구조체들을 모아둡니다.
//! `pub use ... ::*`로 재노출하여 `crate::models::Record`처럼
//! 하위 모듈 경로 없이 바로 사용할 수 있게 합니다.

pub mod bitable;
pub mod category;
pub mod plan;
pub mod record;

pub use bitable::*;
pub use category::*;
pub use plan::*;
pub use record::*;
