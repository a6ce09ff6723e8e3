//! # Line Buffer Module
//!
//! This module provides the circular (ring) buffer for storing recent lines.
//!
//! ## Plain English Explanation
//!
//! Imagine a circular conveyor belt at a sushi restaurant with exactly N
//! spots. Every time a new plate (line) comes out of the kitchen:
//! 1. It goes on the belt at the next spot
//! 2. If the belt is full, the oldest plate gets removed first
//! 3. The operator (the dump command) can read all current plates at any time
//!
//! This lets us always have the last N log lines without using
//! infinite memory.

mod ring_buffer;

pub use ring_buffer::RingBuffer;

use std::io::{self, Write};

// ============================================
// LINE
// ============================================

/// A single text line read from the data stream.
///
/// ## Plain English
///
/// One record from the pipe: the raw bytes up to and including the
/// newline terminator. Lines are arbitrary bytes, not necessarily valid
/// UTF-8 - whatever a producer writes is what we keep and what we dump.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Line {
    /// The payload, terminator included when one was read
    bytes: Vec<u8>,
}

impl Line {
    /// Creates a line from raw bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Returns the payload bytes, exactly as read.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the byte length of the payload.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the payload is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<&str> for Line {
    fn from(text: &str) -> Self {
        Self::new(text.as_bytes().to_vec())
    }
}

// ============================================
// LINE BUFFER
// ============================================

/// The retention window: a ring buffer of the most recent lines.
///
/// ## Plain English
///
/// Two parts of the app touch this:
/// - The ingestion loop STORES each line arriving on the pipe
/// - The dump command READS the whole window, oldest first
///
/// The whole program is single-threaded, so no lock is needed - the
/// buffer is owned by the ingestion loop and never shared across threads.
pub struct LineBuffer {
    /// The actual ring buffer
    inner: RingBuffer<Line>,
}

impl LineBuffer {
    /// Creates a new line buffer holding at most `capacity` lines.
    ///
    /// ## Panics
    ///
    /// Panics if `capacity` is zero (see [`RingBuffer::new`]).
    pub fn new(capacity: usize) -> Self {
        log::info!("Creating line buffer with capacity {}", capacity);

        Self {
            inner: RingBuffer::new(capacity),
        }
    }

    /// Stores a line, overwriting the oldest one if the buffer is full.
    ///
    /// This is the only mutation the buffer ever sees. It is called for
    /// every line drained from the pipe, so it needs to be FAST - one
    /// slot write and a cursor bump, no allocation.
    pub fn store(&mut self, line: Line) {
        self.inner.push(line);
    }

    /// Writes every retained line to `sink`, oldest first.
    ///
    /// Lines are written exactly as stored - no line-ending normalization,
    /// no separators added. Read-only: dumping does not consume entries,
    /// so dumping twice with no store in between yields identical output.
    /// An empty buffer produces no output at all.
    pub fn dump<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        for line in self.inner.iter() {
            sink.write_all(line.as_bytes())?;
        }
        Ok(())
    }

    /// Returns the number of lines currently retained.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if no lines are retained.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the maximum number of lines we can retain.
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }
}

// ============================================
// TESTS
// ============================================

#[cfg(test)]
mod tests {
    use super::*;

    fn dump_to_string(buffer: &LineBuffer) -> String {
        let mut out = Vec::new();
        buffer.dump(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_buffer_creation() {
        let buffer = LineBuffer::new(10);
        assert_eq!(buffer.capacity(), 10);
        assert_eq!(buffer.len(), 0);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_empty_dump_produces_no_output() {
        let buffer = LineBuffer::new(5);
        assert_eq!(dump_to_string(&buffer), "");
    }

    #[test]
    fn test_store_and_dump_in_order() {
        let mut buffer = LineBuffer::new(5);

        buffer.store(Line::from("first\n"));
        buffer.store(Line::from("second\n"));
        buffer.store(Line::from("third\n"));

        assert_eq!(buffer.len(), 3);
        assert_eq!(dump_to_string(&buffer), "first\nsecond\nthird\n");
    }

    #[test]
    fn test_overwrite_keeps_newest_window() {
        let mut buffer = LineBuffer::new(3);

        for text in ["L1\n", "L2\n", "L3\n", "L4\n"] {
            buffer.store(Line::from(text));
        }

        // Capacity + 1 stores: L1 was evicted, L2..L4 remain in order.
        assert_eq!(dump_to_string(&buffer), "L2\nL3\nL4\n");
    }

    #[test]
    fn test_dump_order_after_many_wraps() {
        let mut buffer = LineBuffer::new(3);

        for i in 0..50 {
            buffer.store(Line::from(format!("line {}\n", i).as_str()));
        }

        assert_eq!(dump_to_string(&buffer), "line 47\nline 48\nline 49\n");
    }

    #[test]
    fn test_dump_is_idempotent() {
        let mut buffer = LineBuffer::new(4);

        buffer.store(Line::from("a\n"));
        buffer.store(Line::from("b\n"));

        let first = dump_to_string(&buffer);
        let second = dump_to_string(&buffer);
        assert_eq!(first, second);
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn test_dump_preserves_bytes_exactly() {
        let mut buffer = LineBuffer::new(2);

        // No terminator on the second line, non-UTF-8 byte in the first.
        buffer.store(Line::new(vec![0xff, b'x', b'\n']));
        buffer.store(Line::new(b"no newline".to_vec()));

        let mut out = Vec::new();
        buffer.dump(&mut out).unwrap();
        assert_eq!(out, b"\xffx\nno newline");
    }

    #[test]
    fn test_line_length_is_byte_length() {
        let line = Line::from("abc\n");
        assert_eq!(line.len(), 4);
        assert!(!line.is_empty());
    }
}
