use std::io::Write;

use ctx_statusline::app::run;
use ctx_statusline::calculator::{UsageLevel, calculate};
use ctx_statusline::cli::Args;
use ctx_statusline::error::TranscriptError;
use ctx_statusline::transcript::parse_transcript;

const TYPICAL: &str = r#"{"message":{"role":"assistant","usage":{"input_tokens":9,"cache_read_input_tokens":58164,"cache_creation_input_tokens":1097,"output_tokens":2}}}"#;

fn plain_args(extra: &[&str]) -> Args {
    let mut argv = vec!["ctx-statusline", "--color", "never"];
    argv.extend_from_slice(extra);
    <Args as clap::Parser>::try_parse_from(argv).unwrap()
}

fn write_transcript(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn hook(model_id: &str, path: &str) -> Vec<u8> {
    serde_json::json!({
        "session_id": "abc",
        "model": { "id": model_id, "display_name": "Claude" },
        "transcript_path": path,
    })
    .to_string()
    .into_bytes()
}

fn render(stdin: &[u8], extra: &[&str]) -> (anyhow::Result<()>, String) {
    let mut out = Vec::new();
    let result = run(stdin, &mut out, &plain_args(extra), false);
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn transcript_to_context_round_trip() {
    let file = write_transcript(&format!("{TYPICAL}\n"));
    let usage = parse_transcript(file.path().to_str().unwrap()).unwrap();
    assert_eq!(usage.input_tokens, 9);
    assert_eq!(usage.cache_read_input_tokens, 58164);
    assert_eq!(usage.cache_creation_input_tokens, 1097);
    assert_eq!(usage.output_tokens, 2);

    let info = calculate(Some(&usage), "claude-sonnet-4-5-20250929");
    assert_eq!(info.current_tokens, 58173);
    assert_eq!(info.max_tokens, 200_000);
    assert!((info.percentage - 29.0865).abs() < 1e-4);
    assert_eq!(UsageLevel::classify(info.percentage), UsageLevel::Low);
}

#[test]
fn full_status_line() {
    let file = write_transcript(&format!("not json\n{TYPICAL}\n"));
    let stdin = hook("claude-sonnet-4-5-20250929", file.path().to_str().unwrap());
    let (result, out) = render(&stdin, &[]);
    result.unwrap();
    assert_eq!(out, "[ctx: 58173/200000 29.1%] claude-sonnet-4-5-20250929\n");
}

#[test]
fn compact_status_line() {
    let file = write_transcript(TYPICAL);
    let stdin = hook("claude-sonnet-4-5-20250929", file.path().to_str().unwrap());
    let (result, out) = render(&stdin, &["--style", "compact"]);
    result.unwrap();
    assert_eq!(out, "[29.1%]\n");
}

#[test]
fn empty_transcript_shows_zero_usage() {
    let file = write_transcript("");
    let stdin = hook("claude-2", file.path().to_str().unwrap());
    let (result, out) = render(&stdin, &[]);
    result.unwrap();
    assert_eq!(out, "[ctx: 0/100000 0.0%] claude-2\n");
}

#[test]
fn missing_model_id_falls_back_to_claude() {
    let file = write_transcript(TYPICAL);
    let stdin = serde_json::json!({ "transcript_path": file.path().to_str().unwrap() })
        .to_string()
        .into_bytes();
    let (result, out) = render(&stdin, &[]);
    result.unwrap();
    assert_eq!(out, "[ctx: 58173/200000 29.1%] claude\n");
}

#[test]
fn clamped_usage_line() {
    let file = write_transcript(
        r#"{"message":{"role":"assistant","usage":{"input_tokens":50000,"cache_read_input_tokens":160000}}}"#,
    );
    let stdin = hook("claude-3-opus", file.path().to_str().unwrap());
    let (result, out) = render(&stdin, &[]);
    result.unwrap();
    assert_eq!(out, "[ctx: 210000/200000 100.0%] claude-3-opus\n");
}

#[test]
fn empty_transcript_path_is_a_visible_error() {
    let stdin = hook("claude-3-opus", "");
    let (result, out) = render(&stdin, &[]);
    let err = result.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<TranscriptError>(),
        Some(TranscriptError::InvalidPath(_))
    ));
    assert!(out.starts_with("[ERROR: parse error: invalid path"), "{out}");
}

#[test]
fn unreadable_transcript_is_a_visible_error() {
    let stdin = hook("claude-3-opus", "/nonexistent/path/file.jsonl");
    let (result, out) = render(&stdin, &[]);
    let err = result.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<TranscriptError>(),
        Some(TranscriptError::Io { .. })
    ));
    assert!(out.starts_with("[ERROR: parse error:"), "{out}");
    assert!(!out.contains("ctx:"));
}

#[test]
fn malformed_hook_json_is_an_error() {
    let (result, out) = render(b"{not json", &[]);
    assert!(result.is_err());
    assert!(out.is_empty());
}

#[test]
fn empty_stdin_prints_placeholder() {
    let (result, out) = render(b"  \n", &[]);
    result.unwrap();
    assert_eq!(out, "[ctx: waiting for input]\n");
}
