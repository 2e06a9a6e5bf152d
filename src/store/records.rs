//! # 기록 컬렉션 저장소
//!
//! `records.json` 단위에 대한 load/save/find 함수들입니다.
//! 쓰기 경로는 "전체 로드 → 수정 → 전체 저장" 패턴을 따릅니다.
//! 개인 규모(수백~수천 건)에서는 요청당 O(전체 기록)이 허용됩니다.

use crate::error::AppError;
use crate::models::Record;
use crate::services::segments;

use super::JsonStore;

const FILE: &str = "records.json";

/// 전체 기록을 읽습니다 (저장된 순서 그대로).
///
/// 읽기 시점 보정(repair-on-read): `date`가 비어 있는 오래된 기록은
/// `startTime`에서 날짜를 다시 채워줍니다. 보정 결과는 그 자리에서
/// 저장하지 않습니다 — 이후 save가 우연히 포함할 때만 디스크에 남습니다.
pub async fn load(store: &JsonStore) -> Result<Vec<Record>, AppError> {
    let mut records: Vec<Record> = store.load_unit(FILE).await?;
    for record in &mut records {
        if record.date.is_empty() && !record.start_time.is_empty() {
            if let Some(date) = segments::civil_date(&record.start_time) {
                record.date = date;
            }
        }
    }
    Ok(records)
}

/// 전체 기록을 저장합니다 (마지막으로 쓴 쪽이 이김).
pub async fn save(store: &JsonStore, records: &[Record]) -> Result<(), AppError> {
    store.save_unit(FILE, &records).await
}

/// ID로 기록 하나를 찾습니다.
pub async fn find_by_id(store: &JsonStore, id: &str) -> Result<Option<Record>, AppError> {
    let records = load(store).await?;
    Ok(records.into_iter().find(|r| r.id == id))
}

/// 대량 가져오기(import) 병합: 이미 존재하는 id는 건너뜁니다.
/// 같은 export를 두 번 가져와도 두 번째는 아무것도 추가되지 않습니다.
///
/// 반환값: (추가된 수, 건너뛴 수)
pub fn merge_imported(existing: &mut Vec<Record>, incoming: Vec<Record>) -> (usize, usize) {
    use std::collections::HashSet;

    let known: HashSet<String> = existing.iter().map(|r| r.id.clone()).collect();
    let mut imported = 0;
    let mut skipped = 0;
    for record in incoming {
        if known.contains(&record.id) {
            skipped += 1;
        } else {
            existing.push(record);
            imported += 1;
        }
    }
    (imported, skipped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> Record {
        Record {
            id: id.to_string(),
            activity: "执行工作".to_string(),
            activity_category: "工作输出".to_string(),
            start_time: String::new(),
            end_time: String::new(),
            date: String::new(),
            duration: 0,
            pause_count: 0,
            time_span: 0,
            remark: String::new(),
            emotion: String::new(),
            segments: Vec::new(),
        }
    }

    #[test]
    fn import_skips_existing_ids() {
        let mut existing = vec![record("a"), record("b")];
        let incoming = vec![record("b"), record("c")];
        let (imported, skipped) = merge_imported(&mut existing, incoming);
        assert_eq!((imported, skipped), (1, 1));
        assert_eq!(existing.len(), 3);
    }

    #[test]
    fn reimporting_same_export_adds_nothing() {
        let mut existing = vec![record("a"), record("b")];
        let export = existing.clone();
        let (imported, _) = merge_imported(&mut existing, export.clone());
        assert_eq!(imported, 0);
        let (imported_again, skipped_again) = merge_imported(&mut existing, export);
        assert_eq!((imported_again, skipped_again), (0, 2));
        assert_eq!(existing.len(), 2);
    }
}
