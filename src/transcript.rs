//! # Transcript Module
//!
//! Finds the most recent token usage in a Claude Code JSONL transcript.
//!
//! Each line is decoded on its own. Lines that are not valid JSON, have the
//! wrong shape, or exceed [`MAX_LINE_BYTES`] are skipped; only a failure of
//! the underlying reader aborts the scan. The last line with a non-empty role
//! and non-zero usage wins.

use std::env;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Component, Path, PathBuf};

use tracing::{debug, trace};

use crate::error::TranscriptError;
use crate::models::{MessageUsage, TranscriptLine};

/// Largest single transcript line that will be decoded.
pub const MAX_LINE_BYTES: usize = 4 * 1024 * 1024;

const INITIAL_LINE_CAPACITY: usize = 64 * 1024;

/// Validate `transcript_path`, open it and return the last usage record.
///
/// Returns [`MessageUsage::ZERO`] when the transcript has no usage at all.
pub fn parse_transcript(transcript_path: &str) -> Result<MessageUsage, TranscriptError> {
    let path = resolve_transcript_path(transcript_path)?;
    let file = File::open(&path).map_err(|e| TranscriptError::io(&path, e))?;
    parse_transcript_from_reader(BufReader::new(file)).map_err(|e| TranscriptError::io(&path, e))
}

/// Resolve `raw` to an absolute, lexically normalized path.
///
/// `/..` is treated as `/`. Fails on an empty path and on any `..` that
/// survives normalization. Does not touch the file.
pub fn resolve_transcript_path(raw: &str) -> Result<PathBuf, TranscriptError> {
    if raw.is_empty() {
        return Err(TranscriptError::InvalidPath(
            "transcript path is empty".to_string(),
        ));
    }
    let raw_path = Path::new(raw);
    let absolute = if raw_path.is_absolute() {
        raw_path.to_path_buf()
    } else {
        let cwd = env::current_dir().map_err(|e| {
            TranscriptError::InvalidPath(format!("cannot resolve {raw}: {e}"))
        })?;
        cwd.join(raw_path)
    };

    let normalized = normalize_lexically(&absolute);
    if normalized
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(TranscriptError::InvalidPath(format!(
            "{} contains parent directory references",
            normalized.display()
        )));
    }
    Ok(normalized)
}

// Folds `.` and `name/..` pairs and drops `..` directly under the root. Any
// other `..` with nothing left to pop is kept so the caller can reject it.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out.iter().collect()
}

/// Scan JSONL from `reader` and return the last contributing usage record.
pub fn parse_transcript_from_reader<R: BufRead>(reader: R) -> io::Result<MessageUsage> {
    parse_with_line_limit(reader, MAX_LINE_BYTES)
}

pub(crate) fn parse_with_line_limit<R: BufRead>(
    mut reader: R,
    max_line_bytes: usize,
) -> io::Result<MessageUsage> {
    let mut last_usage: Option<MessageUsage> = None;
    let mut buf: Vec<u8> = Vec::with_capacity(INITIAL_LINE_CAPACITY.min(max_line_bytes + 1));
    let mut line_no = 0usize;
    let mut skipped = 0usize;

    loop {
        buf.clear();
        let line = match read_bounded_line(&mut reader, &mut buf, max_line_bytes)? {
            LineRead::Eof => break,
            LineRead::TooLong => {
                line_no += 1;
                skipped += 1;
                trace!(line_no, "skipping oversized transcript line");
                continue;
            }
            LineRead::Line => {
                line_no += 1;
                buf.trim_ascii()
            }
        };
        if line.is_empty() {
            continue;
        }

        match serde_json::from_slice::<TranscriptLine>(line) {
            Ok(parsed) => {
                if let Some(usage) = parsed.contributing_usage() {
                    last_usage = Some(usage);
                }
            }
            Err(err) => {
                skipped += 1;
                trace!(line_no, %err, "skipping undecodable transcript line");
            }
        }
    }

    debug!(
        lines = line_no,
        skipped,
        found = last_usage.is_some(),
        "transcript scanned"
    );
    Ok(last_usage.unwrap_or(MessageUsage::ZERO))
}

enum LineRead {
    Line,
    TooLong,
    Eof,
}

// Reads one line into `buf` (newline stripped) without letting `buf` grow past
// `max + 1` bytes. The remainder of an oversized line is consumed and dropped.
fn read_bounded_line<R: BufRead>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    max: usize,
) -> io::Result<LineRead> {
    let limit = max as u64 + 1;
    let read = Read::take(&mut *reader, limit).read_until(b'\n', buf)?;
    if read == 0 {
        return Ok(LineRead::Eof);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        return Ok(LineRead::Line);
    }
    if buf.len() <= max {
        // final line without a trailing newline
        return Ok(LineRead::Line);
    }
    reader.skip_until(b'\n')?;
    Ok(LineRead::TooLong)
}
