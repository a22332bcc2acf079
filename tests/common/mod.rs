//! Shared utilities for integration tests.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Writer recording every `write` call as a separate chunk.
///
/// It also flags overlapping calls, which would mean two threads reached
/// the writer at once.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct Capture {
    chunks: Arc<Mutex<Vec<Vec<u8>>>>,
    busy: Arc<AtomicBool>,
    overlaps: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl Capture {
    pub fn chunks(&self) -> Vec<String> {
        self.chunks
            .lock()
            .unwrap()
            .iter()
            .map(|c| String::from_utf8(c.clone()).unwrap())
            .collect()
    }

    pub fn text(&self) -> String {
        self.chunks().concat()
    }

    pub fn writes(&self) -> usize {
        self.chunks.lock().unwrap().len()
    }

    pub fn overlaps(&self) -> usize {
        self.overlaps.load(Ordering::SeqCst)
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.busy.swap(true, Ordering::SeqCst) {
            self.overlaps.fetch_add(1, Ordering::SeqCst);
        }
        // Widen the window in which an unserialized writer would overlap.
        std::thread::yield_now();
        self.chunks.lock().unwrap().push(buf.to_vec());
        self.busy.store(false, Ordering::SeqCst);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writer that rejects every write.
#[allow(dead_code)]
pub struct Failing;

impl Write for Failing {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Strip ANSI SGR sequences.
#[allow(dead_code)]
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}
