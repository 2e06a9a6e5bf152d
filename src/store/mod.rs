//! # JSON 파일 저장소 모듈
//!
//! 데이터베이스 대신 data 디렉토리의 JSON 파일을 사용하는 저장 계층입니다.
//! 저장 단위(unit)별로 파일 하나씩:
//! - `records.json` — 전체 기록 컬렉션
//! - `activity_categories.json` — 활동 카테고리 설정
//! - `daily_plans.json` — 일일 계획 컬렉션
//! - `bitable.json` — 외부 동기화 설정
//!
//! 계약:
//! - `load`는 파일이 없으면 기본값을 돌려줍니다 (첫 실행 허용).
//!   파일이 있는데 깨져 있으면 PersistenceError로 올립니다.
//! - `save`는 임시 파일에 쓴 뒤 rename하는 "충분히 원자적인" 쓰기입니다.
//! - 마지막으로 쓴 쪽이 이깁니다(last-writer-wins). 동시 쓰기가 경합하면
//!   한쪽 변경이 조용히 사라질 수 있습니다 — 단일 사용자/단일 프로세스
//!   전제의 알려진 한계이며, 병합이나 낙관적 잠금은 하지 않습니다.
//!
//! 각 단위별 함수는 하위 모듈에 있습니다. 라우트 핸들러는
//! `store::records::load(&store)`처럼 `&JsonStore`를 빌려서 호출합니다.

pub mod bitable;
pub mod categories;
pub mod plans;
pub mod records;

use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;

use crate::error::AppError;

/// data 디렉토리 핸들. Clone해도 같은 디렉토리를 가리킵니다.
#[derive(Debug, Clone)]
pub struct JsonStore {
    data_dir: PathBuf,
}

impl JsonStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// data 디렉토리가 없으면 생성합니다 (서버 시작 시 호출).
    pub async fn ensure_dir(&self) -> Result<(), AppError> {
        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir).await?;
            tracing::info!("Created data directory: {}", self.data_dir.display());
        }
        Ok(())
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }

    /// 저장 단위 하나를 통째로 읽습니다. 파일이 없으면 Default.
    pub async fn load_unit<T>(&self, name: &str) -> Result<T, AppError>
    where
        T: DeserializeOwned + Default,
    {
        let path = self.file_path(name);
        if !path.exists() {
            return Ok(T::default());
        }
        let raw = fs::read_to_string(&path).await?;
        // 깨진 파일은 조용히 빈 값으로 대체하지 않고 에러로 올립니다.
        // 빈 값으로 읽히면 다음 save가 기존 데이터를 지워버립니다.
        let value = serde_json::from_str(&raw)?;
        Ok(value)
    }

    /// 저장 단위 하나를 통째로 씁니다 (임시 파일 + rename).
    pub async fn save_unit<T>(&self, name: &str, value: &T) -> Result<(), AppError>
    where
        T: Serialize,
    {
        let path = self.file_path(name);
        let tmp_path = self.file_path(&format!("{}.tmp", name));
        let raw = serde_json::to_string_pretty(value)?;
        fs::write(&tmp_path, raw).await?;
        // rename은 같은 파일시스템 안에서 원자적입니다.
        fs::rename(&tmp_path, &path).await?;
        Ok(())
    }
}
