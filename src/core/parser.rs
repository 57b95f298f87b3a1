use crate::domain::model::ClassificationRecord;

/// 將單筆原始回應解析為分類紀錄
///
/// 格式錯誤、欄位缺漏或多出、信心值不在 [0, 1] 的回應一律丟棄（只記錄警告），
/// 不會中斷整批處理。
pub fn parse(raw: &str) -> Option<ClassificationRecord> {
    let record = match serde_json::from_str::<ClassificationRecord>(raw.trim()) {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!("⚠️ Discarding malformed sample: {}", e);
            return None;
        }
    };

    if !(0.0..=1.0).contains(&record.confidence) {
        tracing::warn!(
            "⚠️ Discarding sample with out-of-range confidence: {}",
            record.confidence
        );
        return None;
    }

    Some(record)
}

pub fn parse_all<S: AsRef<str>>(raw_responses: &[S]) -> Vec<ClassificationRecord> {
    let records: Vec<ClassificationRecord> = raw_responses
        .iter()
        .filter_map(|raw| parse(raw.as_ref()))
        .collect();

    tracing::debug!(
        "Parsed {} of {} samples",
        records.len(),
        raw_responses.len()
    );
    records
}
