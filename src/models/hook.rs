use serde::Deserialize;

/// Model name used when the hook does not carry one.
pub const FALLBACK_MODEL_NAME: &str = "claude";

#[derive(Deserialize, Debug, Default)]
pub struct HookModel {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub display_name: String,
}

/// Status descriptor Claude Code writes to the statusline command's stdin.
#[derive(Deserialize, Debug, Default)]
pub struct HookJson {
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub model: HookModel,
    #[serde(default)]
    pub transcript_path: String,
}

impl HookJson {
    /// Model id to resolve limits against and to display.
    pub fn model_name(&self) -> &str {
        if self.model.id.is_empty() {
            FALLBACK_MODEL_NAME
        } else {
            &self.model.id
        }
    }
}
