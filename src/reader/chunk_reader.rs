//! Chunk Reader
//!
//! Reads the input in fixed-size windows and hands out complete logical
//! lines. The only state carried between windows is the leftover: the bytes
//! after the last newline of the previous window, which get prefixed onto
//! the first line of the next one.

use std::io::{self, ErrorKind, Read};
use std::ops::ControlFlow;

use memchr::memchr_iter;

/// Default read window: 1 MiB
pub const DEFAULT_WINDOW_SIZE: usize = 1024 * 1024;

/// Line splitter over any blocking byte source
pub struct ChunkReader<R> {
    source: R,
    window: Vec<u8>,
    leftover: Vec<u8>,
}

impl<R: Read> ChunkReader<R> {
    /// Create a reader with a custom window size (clamped to at least one byte)
    pub fn with_window_size(source: R, window_size: usize) -> Self {
        Self {
            source,
            window: vec![0; window_size.max(1)],
            leftover: Vec::new(),
        }
    }

    /// Feed every complete line, in file order and without its `\n`, to `on_line`.
    ///
    /// A non-empty fragment left at end-of-input is emitted as the last line.
    /// Returning `ControlFlow::Break` from the callback stops reading at once;
    /// the pending leftover is then discarded.
    ///
    /// Read errors other than `Interrupted` are returned as-is. A short read is
    /// not end-of-input; only a zero-byte read is.
    pub fn for_each_line<F>(&mut self, mut on_line: F) -> io::Result<()>
    where
        F: FnMut(&[u8]) -> ControlFlow<()>,
    {
        #[cfg(debug_assertions)]
        let (mut windows, mut bytes) = (0u64, 0u64);

        loop {
            let n = match self.source.read(&mut self.window) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            #[cfg(debug_assertions)]
            {
                windows += 1;
                bytes += n as u64;
            }

            if split_window(&self.window[..n], &mut self.leftover, &mut on_line).is_break() {
                #[cfg(debug_assertions)]
                log::debug!("Stopped early after {} windows ({} bytes)", windows, bytes);
                self.leftover.clear();
                return Ok(());
            }
        }

        #[cfg(debug_assertions)]
        log::debug!(
            "Read {} windows ({} bytes) of up to {} bytes each",
            windows,
            bytes,
            self.window.len()
        );

        if !self.leftover.is_empty() {
            let _ = on_line(&self.leftover);
            self.leftover.clear();
        }

        Ok(())
    }
}

/// Split one window, completing the carried fragment with the window's
/// first line and storing the window's trailing fragment as the new leftover.
fn split_window<F>(chunk: &[u8], leftover: &mut Vec<u8>, on_line: &mut F) -> ControlFlow<()>
where
    F: FnMut(&[u8]) -> ControlFlow<()>,
{
    let mut start = 0;

    for newline in memchr_iter(b'\n', chunk) {
        let flow = if start == 0 && !leftover.is_empty() {
            leftover.extend_from_slice(&chunk[..newline]);
            let flow = on_line(leftover.as_slice());
            leftover.clear();
            flow
        } else {
            on_line(&chunk[start..newline])
        };
        start = newline + 1;

        if flow.is_break() {
            return ControlFlow::Break(());
        }
    }

    leftover.extend_from_slice(&chunk[start..]);
    ControlFlow::Continue(())
}

#[cfg(test)]
#[path = "chunk_reader_tests.rs"]
mod chunk_reader_tests;
