//! # Line Reader Module
//!
//! Reads complete lines from a non-blocking byte stream.
//!
//! ## Plain English
//!
//! The pipe hands us bytes in whatever chunks the OS feels like: half a
//! line, three lines at once, a line split across two reads. This module
//! reassembles those chunks into complete lines and tells the caller
//! honestly when there is simply nothing to read right now.

use std::io::{ErrorKind, Read};

use crate::buffer::Line;

/// How many bytes we ask the OS for per read call.
const READ_CHUNK_SIZE: usize = 1024;

// ============================================
// READ OUTCOME
// ============================================

/// The result of one line-read attempt.
///
/// Three states, kept apart on purpose: a line, "no data right now", and
/// (through the `Err` channel of [`LineReader::read_line`]) a genuine I/O
/// error. "Would block" is not an error here - it is the normal way a
/// drain loop learns it has caught up with the producer.
#[derive(Debug, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A complete line, terminator included.
    Line(Line),
    /// Nothing available right now; try again after the next readiness
    /// notification. Also returned on a zero-length read - end-of-stream
    /// is treated the same as "no data yet" so the loop keeps waiting for
    /// a producer to (re)open the pipe.
    NoDataNow,
}

// ============================================
// LINE READER
// ============================================

/// Assembles complete lines from a non-blocking reader.
///
/// ## Features
/// - Grows its internal buffer to fit arbitrarily long lines, so line
///   length is the reader's problem, not the caller's
/// - Holds partial lines across calls; a line is never delivered truncated
/// - Absorbs `WouldBlock` into [`ReadOutcome::NoDataNow`] and retries
///   `Interrupted` transparently
pub struct LineReader<R: Read> {
    /// The underlying byte source (the fifo in production)
    source: R,

    /// Bytes received but not yet delivered as a line
    pending: Vec<u8>,

    /// Fixed scratch space for each read call
    scratch: [u8; READ_CHUNK_SIZE],
}

impl<R: Read> LineReader<R> {
    /// Creates a line reader over `source`.
    ///
    /// `source` is expected to be in non-blocking mode; a blocking source
    /// works too but will stall [`read_line`] on a partial line.
    ///
    /// [`read_line`]: LineReader::read_line
    pub fn new(source: R) -> Self {
        Self {
            source,
            pending: Vec::new(),
            scratch: [0u8; READ_CHUNK_SIZE],
        }
    }

    /// Reads one complete line (up to and including `\n`).
    ///
    /// ## Returns
    /// - `Ok(ReadOutcome::Line)`: a full line was assembled
    /// - `Ok(ReadOutcome::NoDataNow)`: the read would block, or the stream
    ///   reported end-of-stream; any partial line stays buffered for later
    /// - `Err`: a genuine I/O failure; the attempt produced no line
    pub fn read_line(&mut self) -> std::io::Result<ReadOutcome> {
        loop {
            if let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
                let rest = self.pending.split_off(pos + 1);
                let bytes = std::mem::replace(&mut self.pending, rest);
                return Ok(ReadOutcome::Line(Line::new(bytes)));
            }

            match self.source.read(&mut self.scratch) {
                Ok(0) => return Ok(ReadOutcome::NoDataNow),
                Ok(n) => self.pending.extend_from_slice(&self.scratch[..n]),
                Err(e) if e.kind() == ErrorKind::WouldBlock => {
                    return Ok(ReadOutcome::NoDataNow);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Returns how many bytes of a partial line are currently held back.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

// ============================================
// TESTS
// ============================================
