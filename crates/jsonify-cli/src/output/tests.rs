//! Tests for the output writer

use std::io::Write;
use std::sync::{Arc, Mutex};

use super::*;

/// Shared in-memory sink for capturing writer output
#[derive(Clone, Default)]
struct Sink(Arc<Mutex<Vec<u8>>>);

impl Sink {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn writer(format: OutputFormat, quiet: bool) -> (OutputWriter, Sink) {
    let sink = Sink::default();
    let writer = OutputWriter::with_writer(format, false, quiet, Box::new(sink.clone()));
    (writer, sink)
}

#[test]
fn test_writeln_appends_newline() {
    let (mut out, sink) = writer(OutputFormat::Human, false);
    out.writeln("hello").unwrap();
    assert_eq!(sink.contents(), "hello\n");
}

#[test]
fn test_info_suppressed_when_quiet() {
    let (mut out, sink) = writer(OutputFormat::Human, true);
    out.info("not shown").unwrap();
    assert_eq!(sink.contents(), "");
}

#[test]
fn test_info_suppressed_in_json_mode() {
    let (mut out, sink) = writer(OutputFormat::Json, false);
    out.info("not shown").unwrap();
    out.success("also not shown").unwrap();
    assert_eq!(sink.contents(), "");
}

#[test]
fn test_plain_messages_without_color() {
    let (mut out, sink) = writer(OutputFormat::Human, false);
    out.info("hello").unwrap();
    out.warning("careful").unwrap();
    out.error("broken").unwrap();
    let text = sink.contents();
    assert!(text.contains("INFO: hello"));
    assert!(text.contains("WARNING: careful"));
    assert!(text.contains("ERROR: broken"));
}

#[test]
fn test_value_respects_format() {
    let data = serde_json::json!({ "a": 1 });

    let (mut out, sink) = writer(OutputFormat::Json, false);
    out.value(&data).unwrap();
    assert_eq!(sink.contents(), "{\"a\":1}\n");

    let (mut out, sink) = writer(OutputFormat::Yaml, false);
    out.value(&data).unwrap();
    assert!(sink.contents().contains("a: 1"));

    let (mut out, sink) = writer(OutputFormat::JsonPretty, false);
    out.value(&data).unwrap();
    assert!(sink.contents().contains("  \"a\": 1"));
}

#[test]
fn test_spinner_disabled_with_custom_writer() {
    let (out, _sink) = writer(OutputFormat::Human, false);
    assert!(out.spinner("working...").is_none());
}
