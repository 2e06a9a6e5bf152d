//! # 활동 카테고리 설정 저장소
//!
//! `activity_categories.json` 단위의 load/save입니다.
//! 설정 파일이 아직 없으면 기본 카테고리 목록을 돌려줍니다
//! (디스크에는 사용자가 처음 저장할 때 기록됩니다).
//!
//! 전역 가변 상태로 들고 있지 않고, 필요한 요청이 그때그때 로드해서
//! normalizer/집계 엔진에 넘깁니다.

use crate::error::AppError;
use crate::models::ActivityCategory;

use super::JsonStore;

const FILE: &str = "activity_categories.json";

/// 카테고리 설정을 읽습니다. 파일이 없으면 기본 목록.
pub async fn load(store: &JsonStore) -> Result<Vec<ActivityCategory>, AppError> {
    let categories: Vec<ActivityCategory> = store.load_unit(FILE).await?;
    if categories.is_empty() {
        return Ok(default_categories());
    }
    Ok(categories)
}

/// 카테고리 설정 전체를 교체 저장합니다.
pub async fn save(store: &JsonStore, categories: &[ActivityCategory]) -> Result<(), AppError> {
    store.save_unit(FILE, &categories).await
}

/// 기본 카테고리 목록.
/// 매칭은 부분 문자열 포함이고 목록 순서가 곧 우선순위입니다.
fn default_categories() -> Vec<ActivityCategory> {
    fn category(name: &str, color: &str, activities: &[&str]) -> ActivityCategory {
        ActivityCategory {
            name: name.to_string(),
            color: color.to_string(),
            activities: activities.iter().map(|s| s.to_string()).collect(),
        }
    }

    vec![
        category(
            "工作输出",
            "blue",
            &["梳理方案", "执行工作", "开会", "复盘", "探索新方法", "进入工作状态"],
        ),
        category("大脑充电", "green", &["和智者对话", "做调研", "学习"]),
        category("输出创作", "orange", &["创作", "写作"]),
        category("修养生息", "purple", &["睡觉仪式", "处理日常", "健身"]),
        category(
            "沟通交流",
            "cyan",
            &["交流心得", "散步", "记录|反思|计划"],
        ),
        category("纯属娱乐", "gray", &["玩玩具"]),
    ]
}
