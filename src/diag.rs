//! Diagnostic and error/warning output streams.
//!
//! The driver reports progress ("* Building vk_typemap_helper.h", elapsed-time
//! lines) on a *diagnostic stream* and validation/generation problems on an
//! *error/warning stream*. Both default to the process's stderr and may each be
//! redirected to a file (`--diagfile` / `--errfile`). They are resolved once per
//! invocation and never shared across runs. `tracing` is a separate, structured
//! channel and does not replace them.

use std::cell::RefCell;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::rc::Rc;

use crate::errors::VkGenError;

enum SinkKind {
    Stderr,
    File(RefCell<File>),
    Buffer(RefCell<Vec<u8>>),
}

/// A cheaply clonable handle to one output stream. Single-threaded by design:
/// the whole run is a sequential pipeline, so `Rc<RefCell<..>>` suffices.
#[derive(Clone)]
pub struct DiagSink {
    inner: Rc<SinkKind>,
}

impl DiagSink {
    /// The default sink: the process's standard error stream.
    pub fn stderr() -> Self {
        DiagSink {
            inner: Rc::new(SinkKind::Stderr),
        }
    }

    /// Open `path` for writing, truncating any previous contents. Failure is
    /// fatal and carries the offending path.
    pub fn file(path: &Path) -> Result<Self, VkGenError> {
        let f = File::create(path).map_err(|source| VkGenError::Stream {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(DiagSink {
            inner: Rc::new(SinkKind::File(RefCell::new(f))),
        })
    }

    /// An in-memory sink for tests.
    pub fn buffer() -> Self {
        DiagSink {
            inner: Rc::new(SinkKind::Buffer(RefCell::new(Vec::new()))),
        }
    }

    /// Write one line, appending a newline.
    pub fn line(&self, msg: &str) -> io::Result<()> {
        match &*self.inner {
            SinkKind::Stderr => {
                let mut err = io::stderr().lock();
                writeln!(err, "{msg}")
            }
            SinkKind::File(f) => writeln!(f.borrow_mut(), "{msg}"),
            SinkKind::Buffer(b) => writeln!(b.borrow_mut(), "{msg}"),
        }
    }

    /// Captured contents of a buffer sink. Empty for the other kinds.
    pub fn contents(&self) -> String {
        match &*self.inner {
            SinkKind::Buffer(b) => String::from_utf8_lossy(&b.borrow()).into_owned(),
            _ => String::new(),
        }
    }
}

/// Resolve a stream argument: explicit file path, or stderr when absent.
pub fn resolve_stream(path: Option<&Path>) -> Result<DiagSink, VkGenError> {
    match path {
        Some(p) => DiagSink::file(p),
        None => Ok(DiagSink::stderr()),
    }
}
