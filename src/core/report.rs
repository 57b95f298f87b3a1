use crate::domain::model::{Advisory, EstimateResponse};
use crate::utils::error::Result;

const NOT_DETERMINED: &str = "Not determined";

fn or_not_determined(value: &str) -> &str {
    if value.is_empty() {
        NOT_DETERMINED
    } else {
        value
    }
}

pub fn advisory_message(advisory: Advisory) -> &'static str {
    match advisory {
        Advisory::LowConfidence => {
            "Warning: the situation could not be classified with certainty. \
             The estimate above may be inaccurate."
        }
        Advisory::NotRelevant => {
            "We are not sure this is a legal matter. The estimate above is purely indicative."
        }
    }
}

/// 文字版報告：估價區間、分類細節、提醒與替代方案
pub fn render_text(response: &EstimateResponse, consultation_fee: f64) -> String {
    let mut lines = vec![
        "Estimate (excl. tax)".to_string(),
        format!("  Low:  {}", response.low),
        format!("  High: {}", response.high),
        String::new(),
        "Analysis details".to_string(),
        format!("  Domain:     {}", or_not_determined(&response.domain)),
        format!("  Service:    {}", or_not_determined(&response.service)),
        format!("  Confidence: {:.2}%", response.confidence * 100.0),
    ];

    if let Some(advisory) = response.advisory() {
        lines.push(String::new());
        lines.push(advisory_message(advisory).to_string());
    }

    lines.push(String::new());
    lines.push(format!(
        "Recommended alternative: one-hour initial consultation, fixed fee {} (excl. tax)",
        consultation_fee
    ));

    lines.join("\n")
}

pub fn render_json(response: &EstimateResponse) -> Result<String> {
    let mut value = serde_json::to_value(response)?;
    if let serde_json::Value::Object(map) = &mut value {
        map.insert("advisory".to_string(), serde_json::to_value(response.advisory())?);
    }
    Ok(serde_json::to_string_pretty(&value)?)
}
