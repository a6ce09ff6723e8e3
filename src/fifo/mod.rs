//! # Fifo Setup Module
//!
//! Creates and opens the named pipe that producers write to.
//!
//! ## Plain English
//!
//! Before any data flows we need the mailbox on the wall:
//! 1. If nothing exists at the path, create a fifo there
//! 2. If something exists, make sure it actually IS a fifo
//! 3. Open it and hand back a readable stream

use std::fs::File;
use std::path::Path;

use rustix::fs::{FileType, Mode, OFlags, CWD};
use rustix::io::Errno;

use crate::error::{SetupErrorKind, TailError, TailResult};

/// Ensures a fifo exists at `path` and opens it for reading.
///
/// The fifo is created with owner read/write permission if absent. If the
/// path holds any other kind of object, setup fails - we never clobber an
/// existing file.
///
/// The descriptor is opened read-write even though we only read:
/// holding the write side ourselves keeps the fifo from turning
/// permanently readable-at-EOF whenever the last producer disconnects.
/// Non-blocking, so the drain loop can read until would-block.
pub fn open_fifo(path: &Path) -> TailResult<File> {
    let display = path.display().to_string();

    match rustix::fs::stat(path) {
        Ok(stat) => {
            if FileType::from_raw_mode(stat.st_mode as _) != FileType::Fifo {
                return Err(TailError::Setup(SetupErrorKind::NotAFifo(display)));
            }
            log::debug!("Reusing existing fifo at {}", display);
        }
        Err(e) if e == Errno::NOENT => {
            log::info!("Creating fifo at {}", display);
            rustix::fs::mknodat(
                CWD,
                path,
                FileType::Fifo,
                Mode::RUSR | Mode::WUSR,
                0,
            )
            .map_err(|e| {
                TailError::Setup(SetupErrorKind::CreateFailed {
                    path: display.clone(),
                    reason: e.to_string(),
                })
            })?;
        }
        Err(e) => {
            return Err(TailError::Setup(SetupErrorKind::StatFailed {
                path: display,
                reason: e.to_string(),
            }));
        }
    }

    let fd = rustix::fs::open(
        path,
        OFlags::RDWR | OFlags::NONBLOCK,
        Mode::empty(),
    )
    .map_err(|e| {
        TailError::Setup(SetupErrorKind::OpenFailed {
            path: display,
            reason: e.to_string(),
        })
    })?;

    Ok(File::from(fd))
}

// ============================================
// TESTS
// ============================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::FileTypeExt;
    use tempfile::tempdir;

    #[test]
    fn test_creates_fifo_when_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("debug");

        let file = open_fifo(&path);
        assert!(file.is_ok());

        let meta = std::fs::metadata(&path).unwrap();
        assert!(meta.file_type().is_fifo());
    }

    #[test]
    fn test_reuses_existing_fifo() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("debug");

        open_fifo(&path).unwrap();

        // Second open must succeed against the already-present fifo.
        assert!(open_fifo(&path).is_ok());
    }

    #[test]
    fn test_rejects_regular_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("debug");
        std::fs::write(&path, b"not a fifo").unwrap();

        match open_fifo(&path) {
            Err(TailError::Setup(SetupErrorKind::NotAFifo(_))) => {}
            other => panic!("expected NotAFifo, got {:?}", other.map(|_| ())),
        }

        // The impostor file must be left untouched.
        assert_eq!(std::fs::read(&path).unwrap(), b"not a fifo");
    }

    #[test]
    fn test_open_does_not_block_without_writer() {
        // A read-only blocking open of a fifo with no writer would hang
        // forever; the read-write non-blocking open must return at once.
        let dir = tempdir().unwrap();
        let path = dir.path().join("debug");

        let _file = open_fifo(&path).unwrap();
    }
}
