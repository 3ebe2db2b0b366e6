//! Dialogue text asset (`Dialogues<Language>.rvtext`)
//!
//! A dialogue file is a sequence of text blocks:
//!
//! ```text
//! <<Soldier Greeting>>
//! <<face: People4, 6>>
//! \C[6]Soldier:\C[0]
//! Greetings! Don't make any trouble!
//! ```
//!
//! The first header is the text id, the headers directly after it are
//! display tags, and every following line up to the next block is the text.
//! Trailing blank lines are dropped.

mod options;
mod reader;
mod writer;

pub use options::{Background, Face, MessageOptions, Position, ScrollOptions};
pub use reader::{parse_dialogues, read_dialogues};
pub use writer::DialogueWriter;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Tag names that carry display metadata.
pub const KNOWN_TAGS: [&str; 5] = ["face", "position", "background", "scroll_speed", "no_fast"];

/// The only tag that is written without a `:`.
pub const NO_FAST_TAG: &str = "no_fast";

/// One dialogue or scrolling-text block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueEntry {
    /// Block text, trailing blank lines stripped.
    pub text: String,
    /// Display tags in file order; `None` for value-less tags like `no_fast`.
    pub tags: IndexMap<String, Option<String>>,
}

impl DialogueEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tags: IndexMap::new(),
        }
    }

    /// Add a tag, builder style.
    #[must_use]
    pub fn with_tag(mut self, name: impl Into<String>, value: Option<&str>) -> Self {
        self.tags.insert(name.into(), value.map(str::to_string));
        self
    }

    /// Whether the tag is present (with or without a value).
    #[must_use]
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    /// The tag's value, if present and non-empty.
    #[must_use]
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags.get(name).and_then(Option::as_deref)
    }

    /// Text split on line breaks, as shown in a message window.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    /// First line of the text, which is all a choice option can show.
    #[must_use]
    pub fn first_line(&self) -> &str {
        self.lines().next().unwrap_or_default()
    }
}

/// All dialogue blocks of one language, keyed by text id in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueTable {
    entries: IndexMap<String, DialogueEntry>,
}

impl DialogueTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning the one it replaced.
    ///
    /// A replaced id keeps its original position.
    pub fn insert(&mut self, id: impl Into<String>, entry: DialogueEntry) -> Option<DialogueEntry> {
        self.entries.insert(id.into(), entry)
    }

    /// Look up an entry by text id. Ids are case-sensitive.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&DialogueEntry> {
        self.entries.get(id)
    }

    /// Text of an entry.
    #[must_use]
    pub fn get_text(&self, id: &str) -> Option<&str> {
        self.get(id).map(|e| e.text.as_str())
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DialogueEntry)> {
        self.entries.iter().map(|(id, entry)| (id.as_str(), entry))
    }

    /// Serialize the table back into the dialogue text format.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut writer = DialogueWriter::new(Vec::new());
        for (id, entry) in self.iter() {
            // Writing into a Vec cannot fail
            let _ = writer.write_entry(id, entry);
        }
        String::from_utf8_lossy(&writer.into_inner()).into_owned()
    }
}

impl FromIterator<(String, DialogueEntry)> for DialogueTable {
    fn from_iter<T: IntoIterator<Item = (String, DialogueEntry)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_lines() {
        let entry = DialogueEntry::new("Yes, please\nwith a second line");
        assert_eq!(entry.first_line(), "Yes, please");
        assert_eq!(entry.lines().count(), 2);
    }

    #[test]
    fn test_tags() {
        let entry = DialogueEntry::new("Hi")
            .with_tag("face", Some("Actor1, 0"))
            .with_tag(NO_FAST_TAG, None);
        assert_eq!(entry.tag("face"), Some("Actor1, 0"));
        assert!(entry.has_tag(NO_FAST_TAG));
        assert_eq!(entry.tag(NO_FAST_TAG), None);
        assert!(!entry.has_tag("position"));
    }

    #[test]
    fn test_replacing_keeps_position() {
        let mut table = DialogueTable::new();
        table.insert("a", DialogueEntry::new("1"));
        table.insert("b", DialogueEntry::new("2"));
        let old = table.insert("a", DialogueEntry::new("3"));

        assert_eq!(old.unwrap().text, "1");
        let ids: Vec<_> = table.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(table.get_text("a"), Some("3"));
    }

    #[test]
    fn test_missing_id_on_empty_table() {
        let table = DialogueTable::new();
        assert!(table.get("missing-id").is_none());
        assert!(table.is_empty());
    }
}
