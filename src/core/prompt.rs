use crate::domain::model::{RequesterType, ServiceCatalog};
use crate::utils::error::Result;

const INSTRUCTIONS: &str = "You are an intake assistant for a law firm. \
Read the situation below and classify it using only the domains and services listed. \
Answer with a single JSON object and nothing else, with exactly these fields:\n\
  \"is_legal\": true if the situation calls for a lawyer, false otherwise,\n\
  \"domain\": one of the listed domains,\n\
  \"service\": one of the services listed under that domain,\n\
  \"confidence\": a number between 0 and 1.";

/// 組合分類提示詞：服務目錄作為選項集合，申請人類型作為背景資訊
pub fn build_prompt(
    catalog: &ServiceCatalog,
    question: &str,
    requester: RequesterType,
) -> Result<String> {
    let options = serde_json::to_string_pretty(&catalog.options())?;

    Ok(format!(
        "{}\n\nAvailable domains and services:\n{}\n\nRequester type: {}\n\nSituation:\n{}",
        INSTRUCTIONS,
        options,
        requester,
        question.trim()
    ))
}
