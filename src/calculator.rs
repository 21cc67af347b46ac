//! # Calculator Module
//!
//! Turns a usage record into context window consumption and a severity level.
//!
//! The "current context" is `input_tokens + cache_read_input_tokens`. Cache
//! writes and output tokens are not counted.

use serde::Serialize;

use crate::limits::resolve_limit;
use crate::models::MessageUsage;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextInfo {
    pub current_tokens: u64,
    pub max_tokens: u64,
    /// Always within `0.0..=100.0`.
    pub percentage: f64,
}

/// Compute context usage against the limit resolved for `model`.
///
/// `None` means no usage data was available at all, which is distinct from a
/// transcript that was read and held only zero usage.
pub fn calculate(usage: Option<&MessageUsage>, model: &str) -> ContextInfo {
    calculate_with_limit(usage, resolve_limit(model))
}

pub fn calculate_with_limit(usage: Option<&MessageUsage>, max_tokens: u64) -> ContextInfo {
    let Some(usage) = usage else {
        return ContextInfo {
            current_tokens: 0,
            max_tokens,
            percentage: 0.0,
        };
    };

    let current_tokens = usage
        .input_tokens
        .saturating_add(usage.cache_read_input_tokens);
    let percentage = if max_tokens == 0 {
        if current_tokens == 0 { 0.0 } else { 100.0 }
    } else {
        (current_tokens as f64 / max_tokens as f64) * 100.0
    };

    ContextInfo {
        current_tokens,
        max_tokens,
        percentage: percentage.min(100.0),
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UsageLevel {
    Low,
    Medium,
    High,
}

impl UsageLevel {
    /// Low below 60%, Medium from 60% up to 80%, High from 80%.
    pub fn classify(percentage: f64) -> Self {
        if percentage < 60.0 {
            UsageLevel::Low
        } else if percentage < 80.0 {
            UsageLevel::Medium
        } else {
            UsageLevel::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UsageLevel::Low => "low",
            UsageLevel::Medium => "medium",
            UsageLevel::High => "high",
        }
    }
}
