//! # Bitable 동기화 설정 저장소
//!
//! `bitable.json` 단위의 load/save입니다. 파일이 없으면 빈 설정
//! (`is_configured() == false`)을 돌려줍니다.

use crate::error::AppError;
use crate::models::BitableConfig;

use super::JsonStore;

const FILE: &str = "bitable.json";

pub async fn load(store: &JsonStore) -> Result<BitableConfig, AppError> {
    store.load_unit(FILE).await
}

pub async fn save(store: &JsonStore, config: &BitableConfig) -> Result<(), AppError> {
    store.save_unit(FILE, config).await
}
