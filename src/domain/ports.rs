use crate::utils::error::Result;
use async_trait::async_trait;

/// 外部文字分類服務
///
/// 以相同的提示詞獨立呼叫 `count` 次，回傳原始文字回應。
/// 單一呼叫失敗（逾時、非授權類 HTTP 錯誤）只會讓該筆缺席；
/// 服務整體無法連線或授權失敗時回傳 `EstimateError::OracleUnavailable`。
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn sample(&self, prompt: &str, count: usize) -> Result<Vec<String>>;
}
