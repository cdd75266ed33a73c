use std::borrow::Cow;
use std::io::{self, BufRead, StdinLock, StdoutLock, Write};
use log::{debug, warn};

use crate::cli::config::ReaderConfig;
use crate::error::{ReadError, Result};
use super::{InputHandler, OverflowPolicy};

const TERMINATOR: u8 = b'\n';

/// One line of user input, owned by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserInput {
    /// Line content, terminator removed.
    pub bytes: Vec<u8>,
    /// The capacity limit was hit before a terminator was seen.
    pub truncated: bool,
    /// Input ended before a terminator was seen.
    pub eof: bool,
}

impl UserInput {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// For display only; invalid UTF-8 is replaced.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    /// Nothing was read and the stream is closed.
    pub fn to_exit(&self) -> bool {
        self.eof && self.bytes.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    Terminated,
    Eof,
    Full,
}

/// Writes prompts to `W` and reads bounded lines from `R`.
///
/// The reader keeps no state between calls: every call gets a fresh scratch
/// buffer and returns a freshly allocated [`UserInput`].
pub struct LineReader<R, W> {
    reader: R,
    writer: W,
    config: ReaderConfig,
}

pub type ConsoleReader = LineReader<StdinLock<'static>, StdoutLock<'static>>;

impl ConsoleReader {
    /// Binds to the process stdin and stdout for as long as the reader lives.
    pub fn console(config: ReaderConfig) -> Result<Self> {
        LineReader::with_config(io::stdin().lock(), io::stdout().lock(), config)
    }
}

impl<R: BufRead, W: Write> LineReader<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            config: ReaderConfig::default(),
        }
    }

    pub fn with_config(reader: R, writer: W, config: ReaderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { reader, writer, config })
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }

    /// Writes `prompt` verbatim, then reads one line.
    ///
    /// At most `capacity - 1` bytes (terminator included) are taken unless the
    /// policy is [`OverflowPolicy::Grow`]. Under [`OverflowPolicy::Truncate`]
    /// anything past the limit stays in the stream for the next read.
    pub fn read_prompted_line(&mut self, prompt: impl AsRef<[u8]>) -> Result<UserInput> {
        self.writer.write_all(prompt.as_ref())?;
        self.writer.flush()?;

        let capacity = self.config.capacity;
        let limit = self.config.overflow.limit(capacity);
        let mut scratch = Vec::new();
        let mut scan = fill_line(&mut self.reader, &mut scratch, limit)?;

        if scan == Scan::Full {
            match self.config.overflow {
                OverflowPolicy::Reject => {
                    scan = match peek_byte(&mut self.reader)? {
                        None => Scan::Eof,
                        Some(TERMINATOR) => {
                            self.reader.consume(1);
                            Scan::Terminated
                        }
                        Some(_) => {
                            let dropped = discard_line(&mut self.reader)?;
                            warn!(
                                "rejected line longer than {} bytes ({} bytes discarded)",
                                capacity - 1,
                                dropped
                            );
                            return Err(ReadError::LineTooLong { capacity });
                        }
                    };
                }
                _ => warn!("line truncated to {} bytes", scratch.len()),
            }
        }

        let content = strip_terminator(&scratch);
        let mut bytes = Vec::new();
        bytes.try_reserve_exact(content.len())?;
        bytes.extend_from_slice(content);
        debug!("read {} bytes ({:?})", bytes.len(), scan);

        Ok(UserInput {
            bytes,
            truncated: scan == Scan::Full,
            eof: scan == Scan::Eof,
        })
    }
}

impl<R: BufRead, W: Write> InputHandler for LineReader<R, W> {
    fn get_user_input(&mut self, prompt: &str) -> Result<UserInput> {
        self.read_prompted_line(prompt)
    }
}

/// Prompts on stdout and reads one line from stdin with the default config.
pub fn read_prompted_line(prompt: impl AsRef<[u8]>) -> Result<Vec<u8>> {
    Ok(read_prompted_line_with(prompt, &ReaderConfig::default())?.into_bytes())
}

pub fn read_prompted_line_with(
    prompt: impl AsRef<[u8]>,
    config: &ReaderConfig,
) -> Result<UserInput> {
    ConsoleReader::console(config.clone())?.read_prompted_line(prompt)
}

/// Moves bytes into `scratch` up to and including the first terminator,
/// stopping early at end of input or once `limit` bytes are held.
fn fill_line<R: BufRead>(
    reader: &mut R,
    scratch: &mut Vec<u8>,
    limit: Option<usize>,
) -> Result<Scan> {
    loop {
        let room = match limit {
            Some(limit) => limit - scratch.len(),
            None => usize::MAX,
        };
        if room == 0 {
            return Ok(Scan::Full);
        }

        let available = match reader.fill_buf() {
            Ok(buf) => buf,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        if available.is_empty() {
            return Ok(Scan::Eof);
        }

        let window = &available[..available.len().min(room)];
        let (taken, done) = match window.iter().position(|&b| b == TERMINATOR) {
            Some(i) => (i + 1, true),
            None => (window.len(), false),
        };
        scratch.try_reserve(taken)?;
        scratch.extend_from_slice(&window[..taken]);
        reader.consume(taken);

        if done {
            return Ok(Scan::Terminated);
        }
    }
}

fn peek_byte<R: BufRead>(reader: &mut R) -> Result<Option<u8>> {
    loop {
        match reader.fill_buf() {
            Ok(buf) => return Ok(buf.first().copied()),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
}

/// Consumes input through the next terminator, returning how many bytes went.
fn discard_line<R: BufRead>(reader: &mut R) -> Result<usize> {
    let mut dropped = 0;
    loop {
        let available = match reader.fill_buf() {
            Ok(buf) => buf,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        if available.is_empty() {
            return Ok(dropped);
        }
        match available.iter().position(|&b| b == TERMINATOR) {
            Some(i) => {
                reader.consume(i + 1);
                return Ok(dropped + i + 1);
            }
            None => {
                let n = available.len();
                reader.consume(n);
                dropped += n;
            }
        }
    }
}

// An empty read has no last byte to inspect.
fn strip_terminator(line: &[u8]) -> &[u8] {
    match line.split_last() {
        Some((&TERMINATOR, content)) => content,
        _ => line,
    }
}
