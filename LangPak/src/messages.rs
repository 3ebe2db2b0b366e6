//! In-text references to dialogue blocks and name aliases
//!
//! Game text may embed `\dialogue[<id>]`, replaced by the stored block, and
//! `\name[<key>]`, replaced by a `names:<key>` alias. Unknown references
//! stay as written.

use std::borrow::Cow;

use regex::{Captures, Regex};
use rvtext::formats::{MessageOptions, ScrollOptions};

use crate::state::LanguageState;

lazy_static::lazy_static! {
    pub static ref DIALOGUE_CODE: Regex =
        Regex::new(r"\\dialogue\[([^\]]+)\]").expect("valid dialogue code pattern");
    pub static ref NAME_CODE: Regex =
        Regex::new(r"\\name\[([^\]]+)\]").expect("valid name code pattern");
}

/// `\dialogue[<id>]`
#[must_use]
pub fn dialogue_code(id: &str) -> String {
    format!("\\dialogue[{id}]")
}

/// `\name[<key>]`
#[must_use]
pub fn name_code(key: &str) -> String {
    format!("\\name[{key}]")
}

/// Id of the first `\dialogue[...]` code in the text.
#[must_use]
pub fn dialogue_reference(text: &str) -> Option<&str> {
    DIALOGUE_CODE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Key of the first `\name[...]` code in the text.
#[must_use]
pub fn name_reference(text: &str) -> Option<&str> {
    NAME_CODE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// A dialogue ready for the message window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueView<'a> {
    pub lines: Vec<&'a str>,
    pub options: MessageOptions,
}

/// A dialogue ready for the scrolling text window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollView<'a> {
    pub lines: Vec<&'a str>,
    pub options: ScrollOptions,
}

impl LanguageState {
    /// Lines replacing a message that references a dialogue block.
    ///
    /// `None` if the text holds no `\dialogue[...]` code or the id is
    /// unknown; the message is then shown unchanged.
    #[must_use]
    pub fn expand_message(&self, text: &str) -> Option<Vec<&str>> {
        let id = dialogue_reference(text)?;
        self.resolve_dialogue(id).map(|entry| entry.lines().collect())
    }

    /// A choice option: the first line of the referenced block, or the
    /// choice unchanged.
    #[must_use]
    pub fn expand_choice<'a>(&'a self, choice: &'a str) -> &'a str {
        dialogue_reference(choice)
            .and_then(|id| self.resolve_dialogue(id))
            .map_or(choice, |entry| entry.first_line())
    }

    /// Replace every known `\name[...]` code with its alias.
    #[must_use]
    pub fn expand_names<'a>(&self, text: &'a str) -> Cow<'a, str> {
        NAME_CODE.replace_all(text, |caps: &Captures| {
            self.database()
                .name(&caps[1])
                .map_or_else(|| caps[0].to_string(), str::to_string)
        })
    }

    /// A dialogue block with its message window settings.
    #[must_use]
    pub fn show_dialogue(&self, id: &str) -> Option<DialogueView<'_>> {
        self.resolve_dialogue(id).map(|entry| DialogueView {
            lines: entry.lines().collect(),
            options: MessageOptions::from_entry(entry),
        })
    }

    /// A dialogue block with its scrolling text settings.
    #[must_use]
    pub fn show_scrolling(&self, id: &str) -> Option<ScrollView<'_>> {
        self.resolve_dialogue(id).map(|entry| ScrollView {
            lines: entry.lines().collect(),
            options: ScrollOptions::from_entry(entry),
        })
    }
}
