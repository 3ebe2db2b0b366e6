//! Database text writing

use std::io::{self, Write};

use super::DatabasePath;

/// Streams database blocks in the text asset format.
#[derive(Debug)]
pub struct DatabaseWriter<W: Write> {
    inner: W,
}

impl<W: Write> DatabaseWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Write one `<<path>>` block. Carriage returns in the value are dropped;
    /// an empty value writes the header only.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_entry(&mut self, path: &DatabasePath, value: &str) -> io::Result<()> {
        self.write_raw(&path.to_string(), value)
    }

    /// Write a block under a header that is already in path syntax.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_raw(&mut self, header: &str, value: &str) -> io::Result<()> {
        write!(self.inner, "\n<<{header}>>\n")?;
        if !value.is_empty() {
            writeln!(self.inner, "{}", value.replace('\r', ""))?;
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
