//! The move log: an ordered, append-at-tail list of opaque move strings.
//!
//! Loading is forgiving by contract: a missing or unreadable source is an
//! empty log, never an error. Blank lines are skipped, a single trailing
//! `\n` or `\r\n` is stripped per line, and overlong moves are truncated to
//! the configured maximum (counted in characters, never splitting one).

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::errors::MoveLogError;

/// Default maximum move length, in characters.
pub const MOVE_MAX_LEN: usize = 31;

/// A single move in whatever notation the caller uses. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move(String);

impl Move {
    /// Build a move from `text`, truncated to `max_len` characters.
    /// Returns None for empty text.
    pub fn new(text: &str, max_len: usize) -> Option<Self> {
        if text.is_empty() {
            return None;
        }
        let kept = truncate_chars(text, max_len.max(1));
        if kept.len() < text.len() {
            debug!(original = text, kept, max_len, "Truncated overlong move");
        }
        Some(Move(kept.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Move {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[inline]
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Ordered sequence of moves for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveLog {
    moves: Vec<Move>,
    max_len: usize,
}

impl Default for MoveLog {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveLog {
    /// Empty log with the default maximum move length.
    pub fn new() -> Self {
        Self::with_max_len(MOVE_MAX_LEN)
    }

    /// Empty log with a custom maximum move length (0 is treated as 1).
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            moves: Vec::new(),
            max_len: max_len.max(1),
        }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Load from `path` using the default maximum move length.
    pub fn load(path: &Path) -> Self {
        Self::load_with_max_len(path, MOVE_MAX_LEN)
    }

    /// Load from `path`. Any failure to open or read the file yields an
    /// empty log; absence of the file is the normal "no moves yet" state.
    pub fn load_with_max_len(path: &Path, max_len: usize) -> Self {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No move file yet; starting empty");
                return Self::with_max_len(max_len);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Move file unreadable; starting empty");
                return Self::with_max_len(max_len);
            }
        };

        match Self::from_reader(BufReader::new(file), max_len) {
            Ok(log) => {
                debug!(path = %path.display(), moves = log.len(), "Loaded move log");
                log
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Move file unreadable; starting empty");
                Self::with_max_len(max_len)
            }
        }
    }

    /// Parse moves from in-memory text, one per line.
    pub fn parse(text: &str, max_len: usize) -> Self {
        let mut log = Self::with_max_len(max_len);
        for line in text.lines() {
            log.push_line(line);
        }
        log
    }

    /// Read moves line by line from any buffered reader.
    pub fn from_reader<R: BufRead>(mut reader: R, max_len: usize) -> io::Result<Self> {
        let mut log = Self::with_max_len(max_len);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            if buf.last() == Some(&b'\n') {
                buf.pop();
                if buf.last() == Some(&b'\r') {
                    buf.pop();
                }
            }
            log.push_line(&String::from_utf8_lossy(&buf));
        }
        Ok(log)
    }

    // Blank lines never become moves.
    fn push_line(&mut self, line: &str) {
        if let Some(mv) = Move::new(line, self.max_len) {
            self.moves.push(mv);
        }
    }

    /// Append a move at the tail. Existing entries keep their order.
    pub fn append(&mut self, text: &str) -> Result<&Move, MoveLogError> {
        let mv = Move::new(text, self.max_len).ok_or(MoveLogError::MissingMove)?;
        self.moves.push(mv);
        Ok(&self.moves[self.moves.len() - 1])
    }

    /// Remove and return the most recently appended move, if any.
    pub fn remove_last(&mut self) -> Option<Move> {
        self.moves.pop()
    }

    /// Drop every move.
    pub fn clear(&mut self) {
        self.moves.clear();
    }

    pub fn last(&self) -> Option<&Move> {
        self.moves.last()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    /// One line per move, in log order.
    pub fn render(&self) -> impl Iterator<Item = &str> + '_ {
        self.moves.iter().map(Move::as_str)
    }

    /// Write the rendered log, each line terminated by `\n`.
    pub fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        for line in self.render() {
            writeln!(w, "{line}")?;
        }
        Ok(())
    }

    /// Rendered log as a single string (empty for an empty log).
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MoveLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.render() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a MoveLog {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
