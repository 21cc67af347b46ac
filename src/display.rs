use std::env;
use std::io::IsTerminal;

#[cfg(feature = "colors")]
use owo_colors::OwoColorize;

// Provide a no-op color shim when "colors" feature is disabled
#[cfg(not(feature = "colors"))]
pub mod color_shim {
    use std::fmt::{self, Display, Formatter};

    #[derive(Clone)]
    pub struct Plain(pub String);

    impl Display for Plain {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            f.write_str(&self.0)
        }
    }

    pub trait ColorizeShim {
        fn as_str(&self) -> &str;

        fn red(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn yellow(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn green(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn cyan(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
        fn dimmed(&self) -> Plain {
            Plain(self.as_str().to_string())
        }
    }

    impl ColorizeShim for &str {
        fn as_str(&self) -> &str {
            self
        }
    }
    impl ColorizeShim for String {
        fn as_str(&self) -> &str {
            self.as_str()
        }
    }
}

#[cfg(not(feature = "colors"))]
use color_shim::ColorizeShim as OwoColorize;

use crate::calculator::{ContextInfo, UsageLevel};
use crate::cli::{ColorArg, StyleArg};
use crate::models::MessageUsage;

/// Decide whether to emit ANSI colors for stdout.
pub fn color_enabled(mode: ColorArg) -> bool {
    if !cfg!(feature = "colors") {
        return false;
    }
    match mode {
        ColorArg::Always => true,
        ColorArg::Never => false,
        // Respect NO_COLOR if set
        ColorArg::Auto => env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal(),
    }
}

fn colorize_level(text: &str, level: UsageLevel) -> String {
    match level {
        UsageLevel::Low => text.green().to_string(),
        UsageLevel::Medium => text.yellow().to_string(),
        UsageLevel::High => text.red().to_string(),
    }
}

pub fn format_status(info: &ContextInfo, model: &str, style: StyleArg, color: bool) -> String {
    match style {
        StyleArg::Full => format_full(info, model, color),
        StyleArg::Compact => format_compact(info, color),
    }
}

/// `[ctx: <current>/<max> <pct>%] <model>`
pub fn format_full(info: &ContextInfo, model: &str, color: bool) -> String {
    let ctx = format!(
        "[ctx: {}/{} {:.1}%]",
        info.current_tokens, info.max_tokens, info.percentage
    );
    if !color {
        return format!("{ctx} {model}");
    }
    let level = UsageLevel::classify(info.percentage);
    format!("{} {}", colorize_level(&ctx, level), model.cyan())
}

/// `[<pct>%]`
pub fn format_compact(info: &ContextInfo, color: bool) -> String {
    let ctx = format!("[{:.1}%]", info.percentage);
    if !color {
        return ctx;
    }
    colorize_level(&ctx, UsageLevel::classify(info.percentage))
}

pub fn format_error(message: &str, color: bool) -> String {
    let text = format!("[ERROR: {message}]");
    if color { text.red().to_string() } else { text }
}

pub fn format_waiting(color: bool) -> String {
    let text = "[ctx: waiting for input]";
    if color {
        text.dimmed().to_string()
    } else {
        text.to_string()
    }
}

pub fn build_json_output(
    info: &ContextInfo,
    model: &str,
    usage: &MessageUsage,
    limit_source: &str,
) -> serde_json::Value {
    let level = UsageLevel::classify(info.percentage);
    serde_json::json!({
        "model": model,
        "context": {
            "current_tokens": info.current_tokens,
            "max_tokens": info.max_tokens,
            "percentage": (info.percentage * 10.0).round() / 10.0,
            "level": level,
        },
        "usage": usage,
        "limit_source": limit_source,
    })
}

/// Placeholder emitted before Claude Code has sent a descriptor.
pub fn build_json_waiting() -> serde_json::Value {
    serde_json::json!({ "status": "waiting" })
}

pub fn build_json_error(message: &str) -> serde_json::Value {
    serde_json::json!({ "error": message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn info(current: u64, max: u64, pct: f64) -> ContextInfo {
        ContextInfo {
            current_tokens: current,
            max_tokens: max,
            percentage: pct,
        }
    }

    #[test]
    fn plain_full_line() {
        let got = format_full(&info(59261, 200_000, 29.6305), "claude-sonnet-4-5", false);
        assert_eq!(got, "[ctx: 59261/200000 29.6%] claude-sonnet-4-5");
        assert!(!got.contains('\u{1b}'));
    }

    #[test]
    fn plain_compact_line() {
        assert_eq!(format_compact(&info(140_000, 200_000, 70.0), false), "[70.0%]");
    }

    #[test]
    fn plain_error_line() {
        assert_eq!(
            format_error("parse error: boom", false),
            "[ERROR: parse error: boom]"
        );
    }

    #[cfg(feature = "colors")]
    #[test]
    fn colored_full_line_uses_level_colors() {
        const GREEN: &str = "\u{1b}[32m";
        const YELLOW: &str = "\u{1b}[33m";
        const RED: &str = "\u{1b}[31m";
        const CYAN: &str = "\u{1b}[36m";

        let cases = [(25.0, GREEN), (70.0, YELLOW), (90.0, RED)];
        for (pct, want) in cases {
            let got = format_full(&info(1, 200_000, pct), "claude-sonnet-4-5", true);
            assert!(got.contains(want), "{pct}: {got:?}");
            assert!(got.contains(CYAN), "{got:?}");
            assert!(got.contains("\u{1b}[39m"), "missing reset: {got:?}");
            assert!(got.contains(&format!("{pct:.1}%")));

            let compact = format_compact(&info(1, 200_000, pct), true);
            assert!(compact.contains(want), "{compact:?}");
        }
        assert!(format_error("x", true).contains(RED));
    }

    #[test]
    fn never_mode_disables_color() {
        assert!(!color_enabled(ColorArg::Never));
    }

    #[test]
    #[serial]
    fn auto_mode_respects_no_color() {
        unsafe { env::set_var("NO_COLOR", "1") };
        let enabled = color_enabled(ColorArg::Auto);
        unsafe { env::remove_var("NO_COLOR") };
        assert!(!enabled);
    }

    #[test]
    fn json_shape() {
        let usage = MessageUsage {
            input_tokens: 9,
            cache_read_input_tokens: 58164,
            cache_creation_input_tokens: 1097,
            output_tokens: 2,
        };
        let v = build_json_output(&info(58173, 200_000, 29.0865), "m", &usage, "model");
        assert_eq!(v["model"], "m");
        assert_eq!(v["context"]["current_tokens"], 58173);
        assert_eq!(v["context"]["max_tokens"], 200_000);
        assert_eq!(v["context"]["percentage"], 29.1);
        assert_eq!(v["context"]["level"], "low");
        assert_eq!(v["usage"]["cache_creation_input_tokens"], 1097);
        assert_eq!(v["limit_source"], "model");

        assert_eq!(build_json_error("bad")["error"], "bad");
        let waiting = build_json_waiting();
        assert_eq!(waiting["status"], "waiting");
        assert!(waiting.get("error").is_none());
    }
}
