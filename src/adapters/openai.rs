use crate::config::toml_config::OracleConfig;
use crate::domain::ports::Classifier;
use crate::utils::error::{EstimateError, Result};
use async_trait::async_trait;
use futures::future::join_all;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: Option<String>,
}

/// 單一樣本失敗的原因
#[derive(Debug)]
enum SlotFailure {
    /// 服務整體不可用（授權或連線），整批都會失敗
    Unavailable(String),
    /// 只影響這一筆樣本
    Failed(String),
}

/// 透過 Chat Completions API 取樣的分類器
pub struct OpenAiClassifier {
    client: Client,
    endpoint: String,
    model: String,
    temperature: f64,
    max_tokens: u32,
    api_key: String,
}

impl OpenAiClassifier {
    pub fn new(config: &OracleConfig, api_key: String) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            api_key,
        })
    }

    async fn request_once(&self, slot: usize, prompt: &str) -> std::result::Result<String, SlotFailure> {
        let request_body = serde_json::json!({
            "model": self.model,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ],
            "temperature": self.temperature,
            "max_tokens": self.max_tokens
        });

        tracing::debug!("Sending sample {} to {}", slot, self.endpoint);

        let response = match self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return Err(SlotFailure::Failed(format!("timed out: {}", e)));
            }
            Err(e) => return Err(SlotFailure::Unavailable(e.to_string())),
        };

        let status = response.status();
        tracing::debug!("Sample {} response status: {}", slot, status);

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(SlotFailure::Unavailable(format!(
                    "authentication rejected ({})",
                    status
                )));
            }
            s if !s.is_success() => {
                return Err(SlotFailure::Failed(format!("unexpected status {}", s)));
            }
            _ => {}
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| SlotFailure::Failed(format!("unreadable response body: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| SlotFailure::Failed("no content in response".to_string()))
    }
}

#[async_trait]
impl Classifier for OpenAiClassifier {
    async fn sample(&self, prompt: &str, count: usize) -> Result<Vec<String>> {
        // 各樣本彼此獨立，全部結束後才進入彙整
        let outcomes = join_all((0..count).map(|slot| self.request_once(slot, prompt))).await;

        let mut responses = Vec::with_capacity(count);
        let mut unavailable: Option<String> = None;

        for (slot, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(content) => responses.push(content),
                Err(SlotFailure::Failed(reason)) => {
                    tracing::warn!("⚠️ Sample {} failed: {}", slot, reason);
                }
                Err(SlotFailure::Unavailable(reason)) => {
                    tracing::error!("❌ Sample {} could not reach the oracle: {}", slot, reason);
                    unavailable.get_or_insert(reason);
                }
            }
        }

        if let Some(reason) = unavailable {
            return Err(EstimateError::OracleUnavailable { reason });
        }

        tracing::debug!("Collected {} of {} samples", responses.len(), count);
        Ok(responses)
    }
}
