//! A reader that prompts when input is slow to arrive.
//!
//! Programs that fall back to reading stdin when no arguments are given can
//! look hung while they sit in the first blocked read. [`PromptingReader`]
//! wraps the input and prints a one-shot message to a diagnostic stream if
//! no bytes have shown up within a configurable duration; the message is
//! suppressed when data arrives first.

use std::io::{self, Read, Write};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use crate::constants::{DEFAULT_PROMPT_AFTER, STDIN_PROMPT_MSG};

/// Wraps a [`Read`], printing `msg` to the diagnostic writer if the first
/// byte has not arrived within the configured duration.
///
/// The timer is armed on construction and disarmed by the first read that
/// returns any bytes, or by dropping the reader. Reads themselves block
/// exactly as the wrapped reader does; the prompt fires from a watcher
/// thread.
pub struct PromptingReader<R> {
    inner: R,
    // Dropping the sender wakes the watcher without printing.
    cancel: Option<Sender<()>>,
}

impl PromptingReader<io::Stdin> {
    /// A prompting reader for stdin, announcing on stderr after
    /// [`DEFAULT_PROMPT_AFTER`] with [`STDIN_PROMPT_MSG`].
    pub fn stdin() -> Self {
        Self::with_options(io::stdin(), DEFAULT_PROMPT_AFTER, io::stderr(), STDIN_PROMPT_MSG)
    }
}

impl<R: Read> PromptingReader<R> {
    /// A prompting reader over `inner` with an explicit timeout, diagnostic
    /// writer, and message.
    pub fn with_options<W>(inner: R, after: Duration, mut term: W, msg: &str) -> Self
    where
        W: Write + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<()>();
        let msg = msg.to_owned();
        thread::spawn(move || {
            if matches!(rx.recv_timeout(after), Err(RecvTimeoutError::Timeout)) {
                let _ = writeln!(term, "{msg}");
            }
        });
        PromptingReader {
            inner,
            cancel: Some(tx),
        }
    }
}

impl<R: Read> Read for PromptingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n > 0 {
            // Data arrived in time; the prompt stays silent.
            self.cancel.take();
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    const SHORT: Duration = Duration::from_millis(50);

    #[test]
    fn no_prompt_when_data_arrives_first() {
        let cap = Capture::default();
        let data: &[u8] = &[0xA, 0xB, 0xC, 0xD];
        let mut r = PromptingReader::with_options(data, SHORT, cap.clone(), "waiting");

        let mut out = [0u8; 4];
        r.read_exact(&mut out).unwrap();
        assert_eq!(out, [0xA, 0xB, 0xC, 0xD]);

        thread::sleep(SHORT * 3);
        assert_eq!(cap.contents(), "");
    }

    #[test]
    fn prompt_fires_on_idle_input() {
        let cap = Capture::default();
        // A reader that never produces data but never ends either would need
        // a pipe; an empty source works because the prompt only depends on no
        // bytes being read before the timeout.
        let empty: &[u8] = &[];
        let _r = PromptingReader::with_options(empty, SHORT, cap.clone(), "waiting");

        thread::sleep(SHORT * 3);
        assert_eq!(cap.contents(), "waiting\n");
    }

    #[test]
    fn drop_disarms_the_prompt() {
        let cap = Capture::default();
        let empty: &[u8] = &[];
        let r = PromptingReader::with_options(empty, SHORT, cap.clone(), "waiting");
        drop(r);

        thread::sleep(SHORT * 3);
        assert_eq!(cap.contents(), "");
    }
}
