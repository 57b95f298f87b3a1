use crate::domain::model::ClassificationRecord;

/// 彙整後的暫定分類，`is_legal` 保留給相關性驗證使用
#[derive(Debug, Clone, PartialEq)]
pub struct Consensus {
    pub is_legal: bool,
    pub domain: String,
    pub service: String,
    pub confidence: f64,
    pub samples: usize,
}

impl Consensus {
    pub fn empty() -> Self {
        Self {
            is_legal: false,
            domain: String::new(),
            service: String::new(),
            confidence: 0.0,
            samples: 0,
        }
    }
}

pub fn aggregate(records: &[ClassificationRecord]) -> Consensus {
    if records.is_empty() {
        tracing::warn!("⚠️ No valid samples to aggregate");
        return Consensus::empty();
    }

    let consensus = Consensus {
        is_legal: strict_majority(records.iter().map(|r| r.is_legal)),
        domain: plurality(records.iter().map(|r| r.domain.as_str())),
        service: plurality(records.iter().map(|r| r.service.as_str())),
        confidence: mean(records.iter().map(|r| r.confidence)),
        samples: records.len(),
    };

    tracing::debug!(
        "Consensus over {} samples: domain='{}', service='{}', confidence={:.3}, is_legal={}",
        consensus.samples,
        consensus.domain,
        consensus.service,
        consensus.confidence,
        consensus.is_legal
    );
    consensus
}

/// 超過半數才算成立；平手視為否
fn strict_majority<I: Iterator<Item = bool>>(votes: I) -> bool {
    let (yes, total) = votes.fold((0usize, 0usize), |(yes, total), vote| {
        (yes + usize::from(vote), total + 1)
    });
    yes * 2 > total
}

/// 多數決，平手時取最先出現的值
fn plurality<'a, I: Iterator<Item = &'a str>>(values: I) -> String {
    let mut tally: Vec<(&str, usize)> = Vec::new();
    for value in values {
        match tally.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, count)) => *count += 1,
            None => tally.push((value, 1)),
        }
    }

    let mut winner: Option<(&str, usize)> = None;
    for (value, count) in tally {
        if winner.map_or(true, |(_, best)| count > best) {
            winner = Some((value, count));
        }
    }

    winner.map(|(value, _)| value.to_string()).unwrap_or_default()
}

fn mean<I: Iterator<Item = f64>>(values: I) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
