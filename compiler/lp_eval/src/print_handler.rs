//! Output sink for `print`.
//!
//! Output goes to stdout by default, or into a buffer when the caller
//! wants to inspect it (tests, embedding). Dispatch is a plain enum
//! `match`; there are only three destinations.

use std::sync::Arc;

use parking_lot::Mutex;

/// Collects printed lines in memory.
#[derive(Default)]
pub struct BufferPrintHandler {
    buffer: Mutex<String>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        Self::default()
    }

    fn println(&self, line: &str) {
        let mut buf = self.buffer.lock();
        buf.push_str(line);
        buf.push('\n');
    }

    fn output(&self) -> String {
        self.buffer.lock().clone()
    }

    fn clear(&self) {
        self.buffer.lock().clear();
    }
}

/// Where `print` sends its lines.
pub enum PrintHandlerImpl {
    /// Writes to stdout (default).
    Stdout,
    /// Captures to a buffer.
    Buffer(BufferPrintHandler),
    /// Discards everything.
    Silent,
}

impl PrintHandlerImpl {
    /// Emit one line.
    pub fn println(&self, line: &str) {
        match self {
            Self::Stdout => println!("{line}"),
            Self::Buffer(h) => h.println(line),
            Self::Silent => {}
        }
    }

    /// Everything captured so far, one `\n`-terminated line per `print`.
    ///
    /// Empty for handlers that don't capture.
    pub fn output(&self) -> String {
        match self {
            Self::Buffer(h) => h.output(),
            Self::Stdout | Self::Silent => String::new(),
        }
    }

    /// Captured output as individual lines.
    pub fn lines(&self) -> Vec<String> {
        self.output().lines().map(str::to_string).collect()
    }

    /// Discard captured output.
    pub fn clear(&self) {
        if let Self::Buffer(h) = self {
            h.clear();
        }
    }
}

/// Print handler shared between an interpreter and its caller.
pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

/// Handler that writes to stdout.
pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdout)
}

/// Handler that captures output for later inspection.
pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

/// Handler that discards output.
pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Silent)
}
