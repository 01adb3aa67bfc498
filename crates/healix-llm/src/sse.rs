//! Server-sent event framing for streamed chat completions.
//!
//! Each event of interest is a single `data: {json}` line; the space after
//! the colon is optional. The stream ends with `data: [DONE]`. Comments,
//! blank lines, unparsable JSON and chunks without text are all skipped.
//! Invalid UTF-8 is replaced, never fatal.

use std::io::BufRead;

use serde::Deserialize;
use tracing::trace;

use healix_contracts::error::{HealixError, HealixResult};

const DATA_PREFIX: &str = "data:";
const DONE_MARKER: &str = "[DONE]";

/// What one SSE line contributes to the reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
    /// New text to append.
    Delta(String),
    /// End of stream.
    Done,
    /// Nothing usable on this line.
    Ignored,
}

#[derive(Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: StreamDelta,
}

#[derive(Deserialize, Default)]
struct StreamDelta {
    #[serde(default)]
    reasoning_content: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

/// Classify a single line of the response body.
///
/// Reasoning text, when a model emits it, comes before content in the
/// returned delta.
pub fn parse_sse_line(line: &str) -> SseEvent {
    let Some(data) = line.trim_end_matches('\r').strip_prefix(DATA_PREFIX) else {
        return SseEvent::Ignored;
    };
    let data = data.strip_prefix(' ').unwrap_or(data).trim();
    if data == DONE_MARKER {
        return SseEvent::Done;
    }

    let chunk: StreamChunk = match serde_json::from_str(data) {
        Ok(chunk) => chunk,
        Err(e) => {
            trace!(error = %e, "skipping unparsable stream chunk");
            return SseEvent::Ignored;
        }
    };

    let Some(choice) = chunk.choices.into_iter().next() else {
        return SseEvent::Ignored;
    };
    let mut text = choice.delta.reasoning_content.unwrap_or_default();
    text.push_str(choice.delta.content.as_deref().unwrap_or_default());

    if text.is_empty() {
        SseEvent::Ignored
    } else {
        SseEvent::Delta(text)
    }
}

/// Read an event stream to the end, calling `on_delta` with the accumulated
/// text each time it grows. Returns the full text.
///
/// A stream that closes without `[DONE]` still returns what arrived. Only
/// transport failures are errors.
pub fn read_stream<R: BufRead>(
    mut reader: R,
    on_delta: &mut dyn FnMut(&str),
) -> HealixResult<String> {
    let mut full = String::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = reader.read_until(b'\n', &mut buf).map_err(|e| HealixError::Backend {
            reason: format!("stream interrupted: {}", e),
        })?;
        if read == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        match parse_sse_line(line.trim_end_matches('\n')) {
            SseEvent::Delta(text) => {
                full.push_str(&text);
                on_delta(&full);
            }
            SseEvent::Done => break,
            SseEvent::Ignored => {}
        }
    }
    Ok(full)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn content_line(text: &str) -> String {
        format!(r#"data: {{"choices":[{{"delta":{{"content":"{text}"}}}}]}}"#)
    }

    #[test]
    fn content_delta_is_extracted() {
        assert_eq!(parse_sse_line(&content_line("Hello")), SseEvent::Delta("Hello".into()));
    }

    #[test]
    fn reasoning_precedes_content() {
        let line = r#"data: {"choices":[{"delta":{"reasoning_content":"Hmm. ","content":"Rest."}}]}"#;
        assert_eq!(parse_sse_line(line), SseEvent::Delta("Hmm. Rest.".into()));
    }

    #[test]
    fn done_marker_ends_stream() {
        assert_eq!(parse_sse_line("data: [DONE]"), SseEvent::Done);
        assert_eq!(parse_sse_line("data: [DONE]\r"), SseEvent::Done);
    }

    #[test]
    fn data_prefix_space_is_optional() {
        let line = r#"data:{"choices":[{"delta":{"content":"Rest."}}]}"#;
        assert_eq!(parse_sse_line(line), SseEvent::Delta("Rest.".into()));
        assert_eq!(parse_sse_line("data:[DONE]"), SseEvent::Done);
    }

    #[test]
    fn noise_is_ignored() {
        assert_eq!(parse_sse_line(""), SseEvent::Ignored);
        assert_eq!(parse_sse_line(": OPENROUTER PROCESSING"), SseEvent::Ignored);
        assert_eq!(parse_sse_line("data: {not json"), SseEvent::Ignored);
        assert_eq!(parse_sse_line(r#"data: {"choices":[]}"#), SseEvent::Ignored);
        assert_eq!(parse_sse_line(r#"data: {"choices":[{"delta":{"role":"assistant"}}]}"#), SseEvent::Ignored);
        assert_eq!(parse_sse_line(r#"data: {"choices":[{"delta":{"content":null}}]}"#), SseEvent::Ignored);
    }

    #[test]
    fn stream_accumulates_until_done() {
        let body = [
            ": keep-alive".to_string(),
            content_line("Drink "),
            String::new(),
            content_line("water."),
            "data: [DONE]".to_string(),
            content_line(" ignored"),
        ]
        .join("\n");

        let mut seen = Vec::new();
        let full = read_stream(Cursor::new(body), &mut |s| seen.push(s.to_string())).unwrap();
        assert_eq!(full, "Drink water.");
        assert_eq!(seen, vec!["Drink ", "Drink water."]);
    }

    #[test]
    fn stream_without_done_returns_partial_text() {
        let body = format!("{}\n{}", content_line("a"), content_line("b"));
        let full = read_stream(Cursor::new(body), &mut |_| {}).unwrap();
        assert_eq!(full, "ab");
    }

    #[test]
    fn invalid_utf8_is_replaced_not_fatal() {
        let mut body = content_line("Rest well.").into_bytes();
        body.push(b'\n');
        body.extend_from_slice(b"data: {\"choices\":[{\"delta\":{\"content\":\" \xff\"}}]}\n");
        body.extend_from_slice(content_line(" Drink water.").as_bytes());

        let mut seen = Vec::new();
        let full = read_stream(Cursor::new(body), &mut |s| seen.push(s.to_string())).unwrap();
        assert_eq!(full, "Rest well. \u{FFFD} Drink water.");
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn io_failure_is_a_backend_error() {
        struct Broken;
        impl std::io::Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset"))
            }
        }

        let result = read_stream(std::io::BufReader::new(Broken), &mut |_| {});
        match result {
            Err(HealixError::Backend { reason }) => assert!(reason.contains("stream interrupted")),
            other => panic!("expected Backend error, got {:?}", other),
        }
    }

    #[test]
    fn empty_stream_returns_empty_text() {
        let full = read_stream(Cursor::new(""), &mut |_| panic!("no deltas expected")).unwrap();
        assert!(full.is_empty());
    }
}
