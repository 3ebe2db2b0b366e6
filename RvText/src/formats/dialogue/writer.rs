//! Dialogue text writing

use std::io::{self, Write};

use super::{DialogueEntry, NO_FAST_TAG};

/// Streams dialogue blocks in the text asset format.
///
/// Each block is preceded by an empty line, which the parser strips again as
/// trailing blank text of the previous block.
#[derive(Debug)]
pub struct DialogueWriter<W: Write> {
    inner: W,
}

impl<W: Write> DialogueWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Start a new block with the given text id.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_id(&mut self, id: &str) -> io::Result<()> {
        write!(self.inner, "\n<<{id}>>\n")
    }

    /// Write a display tag line for the current block.
    ///
    /// A tag without a value is written as `<<name:>>`, except `no_fast`,
    /// which is the one tag read without a colon.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_tag(&mut self, name: &str, value: Option<&str>) -> io::Result<()> {
        match value {
            Some(value) => writeln!(self.inner, "<<{name}: {value}>>"),
            None if name == NO_FAST_TAG => writeln!(self.inner, "<<{name}>>"),
            None => writeln!(self.inner, "<<{name}:>>"),
        }
    }

    /// Write one line of block text. Carriage returns are dropped.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.inner, "{}", line.replace('\r', ""))
    }

    /// Write a whole entry: id, tags and text.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_entry(&mut self, id: &str, entry: &DialogueEntry) -> io::Result<()> {
        self.write_id(id)?;
        for (name, value) in &entry.tags {
            self.write_tag(name, value.as_deref())?;
        }
        if !entry.text.is_empty() {
            self.write_line(&entry.text)?;
        }
        Ok(())
    }

    /// Flush the underlying writer.
    ///
    /// # Errors
    /// Returns an error if flushing fails.
    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}
