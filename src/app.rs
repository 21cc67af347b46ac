//! # App Module
//!
//! One statusline invocation: decode the hook JSON, read the transcript,
//! compute context usage and write a single line.

use std::io::Write;

use anyhow::{Context, Result};
use tracing::debug;

use crate::calculator::{UsageLevel, calculate_with_limit};
use crate::cli::Args;
use crate::display::{
    build_json_error, build_json_output, build_json_waiting, format_error, format_status,
    format_waiting,
};
use crate::limits::context_limit_for_model_display;
use crate::models::HookJson;
use crate::transcript::parse_transcript;

/// Run against raw hook bytes, writing the status line to `out`.
///
/// A transcript failure still writes a visible error line before the error is
/// returned.
pub fn run<W: Write>(stdin: &[u8], out: &mut W, args: &Args, color: bool) -> Result<()> {
    if stdin.trim_ascii().is_empty() {
        if args.json {
            writeln!(out, "{}", build_json_waiting())?;
        } else {
            writeln!(out, "{}", format_waiting(color))?;
        }
        return Ok(());
    }
    let hook: HookJson = serde_json::from_slice(stdin).context("failed to decode input")?;
    debug!(session_id = %hook.session_id, transcript = %hook.transcript_path, "hook received");

    let usage = match parse_transcript(&hook.transcript_path) {
        Ok(usage) => usage,
        Err(err) => {
            let message = format!("parse error: {err}");
            if args.json {
                writeln!(out, "{}", build_json_error(&message))?;
            } else {
                writeln!(out, "{}", format_error(&message, color))?;
            }
            return Err(err).context("parse transcript");
        }
    };

    let model = hook.model_name();
    let (max_tokens, limit_source) = match args.context_limit {
        Some(limit) => (limit, "override"),
        None => (
            context_limit_for_model_display(model, &hook.model.display_name),
            "model",
        ),
    };
    let info = calculate_with_limit(Some(&usage), max_tokens);
    debug!(
        model,
        max_tokens,
        limit_source,
        current_tokens = info.current_tokens,
        percentage = info.percentage,
        level = UsageLevel::classify(info.percentage).as_str(),
        "context calculated"
    );

    if args.json {
        let json = build_json_output(&info, model, &usage, limit_source);
        writeln!(out, "{}", serde_json::to_string(&json)?)?;
    } else {
        writeln!(out, "{}", format_status(&info, model, args.style, color))?;
    }
    Ok(())
}
