//! Dialogue text parsing
//!
//! Header semantics depend on where the header appears:
//!
//! | state           | `<<id>>`        | `<<name: value>>`        | `<<no_fast>>` |
//! |-----------------|-----------------|--------------------------|---------------|
//! | awaiting header | new entry       | new entry                | new entry     |
//! | header run      | new entry       | tag (if `name` is a word)| tag           |
//! | body            | new entry       | new entry, or error for a known tag name | error |
//!
//! Text ids produced by extraction contain `:` (`001:Castle/...`), so a colon
//! alone never makes a header a tag once the body has started.

use std::path::Path;

use super::{DialogueEntry, DialogueTable, KNOWN_TAGS, NO_FAST_TAG};
use crate::error::{Error, Result};
use crate::formats::block::{self, RawLine, TextBuffer};

/// Read and parse a dialogue text asset from disk.
///
/// # Errors
///
/// Returns [`Error::AssetNotFound`] if the file does not exist, or any error
/// from [`parse_dialogues`].
pub fn read_dialogues<P: AsRef<Path>>(path: P) -> Result<DialogueTable> {
    let path = path.as_ref();
    let source = block::read_text_asset(path)?;
    let table = parse_dialogues(&source)?;
    tracing::debug!("Read {} dialogue entries from {}", table.len(), path.display());
    Ok(table)
}

/// Parse dialogue text into a table.
///
/// # Errors
///
/// Returns [`Error::TagAfterText`] if a display tag appears after the text of
/// its block has started.
pub fn parse_dialogues(source: &str) -> Result<DialogueTable> {
    let mut builder = DialogueBuilder::default();
    for token in block::lines(source) {
        match token.line {
            RawLine::BlockHeader(content) => builder.header(content, token.number)?,
            RawLine::TextLine(line) => builder.text(line, token.number),
        }
    }
    Ok(builder.finish())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum State {
    /// No entry open yet.
    #[default]
    AwaitingHeader,
    /// Saw the id (and maybe tags), no text yet.
    InHeaderRun,
    /// Accumulating text lines.
    InBody,
}

#[derive(Debug, Default)]
struct DialogueBuilder {
    table: DialogueTable,
    state: State,
    current: Option<(String, DialogueEntry)>,
    buffer: TextBuffer,
}

impl DialogueBuilder {
    fn header(&mut self, content: &str, line: usize) -> Result<()> {
        match self.state {
            State::AwaitingHeader => self.open(content),
            State::InHeaderRun => match parse_tag(content) {
                Some((name, value)) => {
                    if let Some((_, entry)) = self.current.as_mut() {
                        entry.tags.insert(name.to_string(), value.map(str::to_string));
                    }
                }
                None => self.open(content),
            },
            State::InBody => {
                if let Some(tag) = misplaced_tag(content) {
                    return Err(Error::TagAfterText {
                        tag: tag.to_string(),
                        line,
                    });
                }
                self.open(content);
            }
        }
        Ok(())
    }

    fn text(&mut self, line: &str, number: usize) {
        if self.state == State::AwaitingHeader {
            tracing::trace!("Ignoring text before the first text id (line {number})");
            return;
        }
        self.buffer.push_line(line);
        self.state = State::InBody;
    }

    fn open(&mut self, id: &str) {
        self.flush();
        self.current = Some((id.to_string(), DialogueEntry::default()));
        self.state = State::InHeaderRun;
    }

    fn flush(&mut self) {
        if let Some((id, mut entry)) = self.current.take() {
            entry.text = self.buffer.take();
            if self.table.insert(id.clone(), entry).is_some() {
                tracing::warn!("Duplicate text id '{id}', the later block wins");
            }
        }
    }

    fn finish(mut self) -> DialogueTable {
        self.flush();
        self.table
    }
}

/// Interpret a header in the header run as a tag.
fn parse_tag(content: &str) -> Option<(&str, Option<&str>)> {
    if content.trim() == NO_FAST_TAG {
        return Some((NO_FAST_TAG, None));
    }
    let (name, value) = content.split_once(':')?;
    let name = name.trim();
    if !is_tag_name(name) {
        return None;
    }
    let value = value.trim();
    Some((name, (!value.is_empty()).then_some(value)))
}

/// A known display tag written where only a text id may appear.
fn misplaced_tag(content: &str) -> Option<&str> {
    if content.trim() == NO_FAST_TAG {
        return Some(NO_FAST_TAG);
    }
    let (name, _) = content.split_once(':')?;
    let name = name.trim();
    KNOWN_TAGS.contains(&name).then_some(name)
}

fn is_tag_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
