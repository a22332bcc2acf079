//! Console rendering through the public facade.

use std::sync::Arc;
use std::thread;

use slogger::{attrs, Context, Format, Handler, Logger, Slogger, Sink};

mod common;

use common::{strip_ansi, Capture};

fn console(capture: &Capture) -> Slogger {
    Slogger::new(Context::background(), Format::Console, Sink::new(capture.clone()))
}

#[test]
fn test_plain_info_line() {
    let capture = Capture::default();
    console(&capture).info("boot", attrs![]);

    let chunks = capture.chunks();
    assert_eq!(chunks.len(), 1);
    let line = &chunks[0];

    assert!(line.starts_with('['));
    let close = line.find("] ").expect("bracketed timestamp");
    let stamp = &line[1..close];
    assert_eq!(stamp.len(), "HH:MM:SS.mmm".len());
    assert_eq!(&stamp[2..3], ":");
    assert_eq!(&stamp[8..9], ".");

    let rest = &line[close + 2..];
    assert_eq!(rest, "\x1b[36mINFO:\x1b[0m \x1b[97mboot\x1b[0m ");
    assert!(!line.ends_with('\n'));
}

#[test]
fn test_attributes_always_present() {
    let capture = Capture::default();
    let log = console(&capture);
    for _ in 0..100 {
        log.info("listening", attrs!["port" => 8080, "env" => "prod"]);
    }

    for line in capture.chunks() {
        assert!(line.contains("port=8080 "));
        assert!(line.contains("env=prod "));
    }
    assert_eq!(capture.writes(), 100);
}

#[test]
fn test_level_tokens_are_colored() {
    let capture = Capture::default();
    let log = console(&capture);
    log.set_level("debug");

    log.debug("d", attrs![]);
    log.info("i", attrs![]);
    log.warn("w", attrs![]);
    log.error("e", attrs![]);

    let chunks = capture.chunks();
    assert!(chunks[0].contains("\x1b[37mDEBUG:\x1b[0m"));
    assert!(chunks[1].contains("\x1b[36mINFO:\x1b[0m"));
    assert!(chunks[2].contains("\x1b[94mWARN:\x1b[0m"));
    assert!(chunks[3].contains("\x1b[91mERROR:\x1b[0m"));
}

#[test]
fn test_bound_attrs_and_groups() {
    let capture = Capture::default();
    let log = console(&capture)
        .with_attrs(attrs!["service" => "api"])
        .with_group("req");
    log.info("handled", attrs!["status" => 200]);

    let line = strip_ansi(&capture.text());
    assert!(line.ends_with("handled service=api req.status=200 "));
}

#[test]
fn concurrent_writers_never_interleave() {
    const THREADS: usize = 8;
    const LINES: usize = 200;

    let capture = Capture::default();
    let log = console(&capture);
    let derived = log.with_attrs(attrs!["derived" => true]);

    let handles: Vec<_> = (0..THREADS)
        .map(|worker| {
            let log = if worker % 2 == 0 { log.clone() } else { derived.clone() };
            thread::spawn(move || {
                for seq in 0..LINES {
                    log.info("tick", attrs!["worker" => worker, "seq" => seq]);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(capture.overlaps(), 0);
    let chunks = capture.chunks();
    assert_eq!(chunks.len(), THREADS * LINES);
    for chunk in chunks {
        assert!(chunk.starts_with('['));
        assert_eq!(chunk.matches("INFO:").count(), 1);
        assert_eq!(chunk.matches("worker=").count(), 1);
        assert!(chunk.ends_with(' '));
    }
}

#[test]
fn derived_handlers_share_sink() {
    let capture = Capture::default();
    let log = console(&capture);
    let handler: &Arc<dyn Handler> = log.handler();
    let grouped = handler.with_group("g");

    let record = slogger::Record::new(slogger::Level::INFO, "direct").with_attrs(attrs!["k" => 1]);
    grouped.handle(&Context::background(), &record).unwrap();
    log.info("facade", attrs![]);

    assert_eq!(capture.writes(), 2);
    assert!(strip_ansi(&capture.chunks()[0]).contains("g.k=1"));
}
