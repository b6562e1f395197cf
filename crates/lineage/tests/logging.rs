//! Tests for logging setup and the events emitted during layout

use lineage::core::logging::{init_logging, resolve_format, LogFormat};
use lineage::prelude::*;
use std::io::Write;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;

/// In-memory log sink
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn capture(level: tracing::Level, run: impl FnOnce()) -> String {
    let sink = Captured::default();
    let _guard = tracing_subscriber::fmt()
        .with_writer(sink.clone())
        .with_max_level(level)
        .with_ansi(false)
        .set_default();
    run();
    sink.contents()
}

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
    assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
    assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
    assert_eq!(LogFormat::from_str("COMPACT").unwrap(), LogFormat::Compact);
    assert!(LogFormat::from_str("invalid").is_err());
}

#[test]
fn test_explicit_format_beats_environment() {
    assert_eq!(resolve_format(Some("pretty")), "pretty");
}

#[test]
fn test_init_logging_invalid_format() {
    let result = init_logging(Some("info"), Some("invalid_format"));
    assert!(result.is_err());
}

#[test]
fn test_init_logging_does_not_panic() {
    // Only the first call can install the global subscriber
    let _ = init_logging(Some("debug"), Some("compact"));
    let _ = init_logging(Some("info"), Some("json"));
    let _ = init_logging(None, None);
}

#[test]
fn test_layout_span_and_summary() {
    let people = vec![Person::new("a", "A"), Person::new("b", "B")];
    let rels = vec![Relationship::parent("r1", "a", "b")];

    let logs = capture(tracing::Level::INFO, || {
        lineage::layout(&people, &rels);
    });

    assert!(logs.contains("layout_family_tree"));
    assert!(logs.contains("Family tree layout completed"));
    assert!(logs.contains("node_count=2"));
}

#[test]
fn test_fallback_is_reported() {
    let people = vec![Person::new("a", "A"), Person::new("b", "B")];
    let rels = vec![
        Relationship::parent("r1", "a", "b"),
        Relationship::parent("r2", "b", "a"),
    ];

    let logs = capture(tracing::Level::WARN, || {
        lineage::layout(&people, &rels);
    });

    assert!(logs.contains("No root person found"));
    assert!(logs.contains("WARN"));
}

#[test]
fn test_dropped_edges_are_logged_at_debug() {
    let people = vec![Person::new("a", "A")];
    let rels = vec![Relationship::parent("r1", "a", "ghost")];

    let logs = capture(tracing::Level::DEBUG, || {
        lineage::layout(&people, &rels);
    });

    assert!(logs.contains("Dropping relationship with unknown endpoint"));
    assert!(logs.contains("style_edges"));
}

#[test]
fn test_quiet_at_warn_for_clean_input() {
    let people = vec![Person::new("a", "A")];
    let logs = capture(tracing::Level::WARN, || {
        lineage::layout(&people, &[]);
    });
    assert!(logs.is_empty());
}
