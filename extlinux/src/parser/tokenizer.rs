//! Line tokenizer for extlinux.conf
//!
//! Produces one `<command> <value>` pair per line, skipping blank lines
//! and `#` comments. The value runs to the end of the line and keeps any
//! embedded whitespace. A malformed line (command without a value) ends
//! the stream the same way end of input does; [`Tokenizer::termination`]
//! tells the two apart for diagnostics only.

use super::cursor::Cursor;
use core::fmt;

/// One `command value` pair, borrowed from the configuration buffer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Directive<'a> {
    /// Command keyword as written in the file
    pub command: &'a str,
    /// Everything after the separating whitespace up to the end of line
    pub value: &'a str,
    /// 1-based line number of the command
    pub line: usize,
}

/// Why a line could not be tokenized
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MalformedReason {
    /// The command is followed by end of line or end of input
    MissingValue,
    /// The command or value is not valid UTF-8
    InvalidUtf8,
}

/// How the token stream ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// All input consumed
    Exhausted,
    /// Stopped at a line that does not form a directive
    Malformed { line: usize, reason: MalformedReason },
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Exhausted => write!(f, "end of input"),
            Termination::Malformed { line, reason: MalformedReason::MissingValue } => {
                write!(f, "line {}: command without a value", line)
            }
            Termination::Malformed { line, reason: MalformedReason::InvalidUtf8 } => {
                write!(f, "line {}: invalid UTF-8", line)
            }
        }
    }
}

/// Iterator over the directives of a configuration buffer
#[derive(Clone, Debug)]
pub struct Tokenizer<'a> {
    cursor: Cursor<'a>,
    line: usize,
    termination: Option<Termination>,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer over the whole of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(data),
            line: 1,
            termination: None,
        }
    }

    /// How the stream ended, once it has ended
    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    fn bump(&mut self) -> Option<u8> {
        let c = self.cursor.next()?;
        if c == b'\n' {
            self.line += 1;
        }
        Some(c)
    }

    /// Skip whitespace runs and whole comment lines.
    fn skip_noise(&mut self) -> Result<(), Termination> {
        loop {
            match self.cursor.peek() {
                None => return Err(Termination::Exhausted),
                Some(b' ' | b'\t' | b'\n') => {
                    self.bump();
                }
                Some(b'#') => loop {
                    match self.bump() {
                        None => return Err(Termination::Exhausted),
                        Some(b'\n') => break,
                        Some(_) => {}
                    }
                },
                Some(_) => return Ok(()),
            }
        }
    }

    fn read_directive(&mut self) -> Result<Directive<'a>, Termination> {
        self.skip_noise()?;

        let line = self.line;
        let malformed = |reason| Termination::Malformed { line, reason };

        let start = self.cursor.position();
        while let Some(c) = self.cursor.peek() {
            if matches!(c, b' ' | b'\t' | b'\n') {
                break;
            }
            self.bump();
        }
        let command = self.cursor.span(start);

        if matches!(self.cursor.peek(), Some(b' ' | b'\t')) {
            self.bump();
        }
        if matches!(self.cursor.peek(), None | Some(b'\n')) {
            return Err(malformed(MalformedReason::MissingValue));
        }

        while let Some(c) = self.cursor.peek() {
            match c {
                b' ' | b'\t' => {
                    self.bump();
                }
                b'\n' => return Err(malformed(MalformedReason::MissingValue)),
                _ => break,
            }
        }
        if self.cursor.is_exhausted() {
            return Err(malformed(MalformedReason::MissingValue));
        }

        let start = self.cursor.position();
        while let Some(c) = self.cursor.peek() {
            if c == b'\n' {
                break;
            }
            self.bump();
        }
        let value = self.cursor.span(start);

        // The last line may not have a newline.
        self.bump();

        let command =
            core::str::from_utf8(command).map_err(|_| malformed(MalformedReason::InvalidUtf8))?;
        let value =
            core::str::from_utf8(value).map_err(|_| malformed(MalformedReason::InvalidUtf8))?;

        Ok(Directive { command, value, line })
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Directive<'a>;

    fn next(&mut self) -> Option<Directive<'a>> {
        if self.termination.is_some() {
            return None;
        }

        match self.read_directive() {
            Ok(directive) => Some(directive),
            Err(termination) => {
                if let Termination::Malformed { .. } = termination {
                    log::warn!("extlinux: stopped parsing at {}", termination);
                }
                self.termination = Some(termination);
                None
            }
        }
    }
}

impl core::iter::FusedIterator for Tokenizer<'_> {}
