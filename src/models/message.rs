use serde::{Deserialize, Serialize};

/// Token accounting attached to a single transcript message.
///
/// Missing counters decode as zero. An all-zero record carries no usage
/// signal and is only ever returned as the "nothing found" result.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageUsage {
    #[serde(default)]
    pub input_tokens: u64,
    #[serde(default)]
    pub cache_read_input_tokens: u64,
    #[serde(default)]
    pub cache_creation_input_tokens: u64,
    #[serde(default)]
    pub output_tokens: u64,
}

impl MessageUsage {
    pub const ZERO: MessageUsage = MessageUsage {
        input_tokens: 0,
        cache_read_input_tokens: 0,
        cache_creation_input_tokens: 0,
        output_tokens: 0,
    };

    /// True when at least one counter is non-zero.
    pub fn is_meaningful(&self) -> bool {
        self.input_tokens > 0
            || self.cache_read_input_tokens > 0
            || self.cache_creation_input_tokens > 0
            || self.output_tokens > 0
    }
}

#[derive(Deserialize, Debug)]
pub struct MessageObj {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub usage: Option<MessageUsage>,
}

/// One line of a JSONL transcript. Only `message.role` and `message.usage`
/// are read; everything else on the line is ignored.
#[derive(Deserialize, Debug)]
pub struct TranscriptLine {
    #[serde(default)]
    pub message: Option<MessageObj>,
}

impl TranscriptLine {
    /// Usage carried by this line, if the line has a role and non-zero counters.
    pub fn contributing_usage(&self) -> Option<MessageUsage> {
        let message = self.message.as_ref()?;
        let has_role = message.role.as_deref().is_some_and(|r| !r.is_empty());
        if !has_role {
            return None;
        }
        message.usage.filter(MessageUsage::is_meaningful)
    }
}
