//! # 일일 계획 컬렉션 저장소
//!
//! `daily_plans.json` 단위의 load/save/find입니다.
//! 계획은 날짜("YYYY-MM-DD")당 최대 하나입니다.

use crate::error::AppError;
use crate::models::DailyPlan;

use super::JsonStore;

const FILE: &str = "daily_plans.json";

/// 전체 일일 계획을 읽습니다.
pub async fn load(store: &JsonStore) -> Result<Vec<DailyPlan>, AppError> {
    store.load_unit(FILE).await
}

/// 전체 일일 계획을 저장합니다.
pub async fn save(store: &JsonStore, plans: &[DailyPlan]) -> Result<(), AppError> {
    store.save_unit(FILE, &plans).await
}

/// 날짜로 계획 하나를 찾습니다.
pub async fn find_by_date(store: &JsonStore, date: &str) -> Result<Option<DailyPlan>, AppError> {
    let plans = load(store).await?;
    Ok(plans.into_iter().find(|p| p.date == date))
}

/// 계획을 upsert합니다: 같은 날짜가 있으면 교체, 없으면 추가.
pub async fn upsert(store: &JsonStore, plan: DailyPlan) -> Result<(), AppError> {
    let mut plans = load(store).await?;
    match plans.iter_mut().find(|p| p.date == plan.date) {
        Some(existing) => *existing = plan,
        None => plans.push(plan),
    }
    save(store, &plans).await
}
