pub mod hook;
pub mod message;

pub use hook::HookJson;
pub use message::{MessageUsage, TranscriptLine};
