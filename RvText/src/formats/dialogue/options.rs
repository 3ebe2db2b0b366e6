//! Typed views over dialogue display tags
//!
//! Tags are stored as raw strings; these helpers interpret the ones the
//! message and scrolling-text windows understand. Unknown or malformed
//! values are ignored so the window keeps its own setting.

use serde::{Deserialize, Serialize};

use super::DialogueEntry;

/// Message window position (`<<position: top>>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    Top = 0,
    Middle = 1,
    Bottom = 2,
}

impl Position {
    #[must_use]
    pub fn from_tag(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "top" => Some(Self::Top),
            "middle" => Some(Self::Middle),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }

    /// Engine parameter value.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Top),
            1 => Some(Self::Middle),
            2 => Some(Self::Bottom),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_tag(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Middle => "middle",
            Self::Bottom => "bottom",
        }
    }
}

/// Message window background (`<<background: dim>>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Background {
    Normal = 0,
    Dim = 1,
    Transparent = 2,
}

impl Background {
    #[must_use]
    pub fn from_tag(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "normal" => Some(Self::Normal),
            "dim" => Some(Self::Dim),
            "transparent" => Some(Self::Transparent),
            _ => None,
        }
    }

    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Normal),
            1 => Some(Self::Dim),
            2 => Some(Self::Transparent),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_tag(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Dim => "dim",
            Self::Transparent => "transparent",
        }
    }
}

/// Face graphic: faceset file name and index (0-7).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Face {
    pub name: String,
    pub index: u8,
}

/// Settings for a normal message window.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageOptions {
    pub face: Option<Face>,
    pub position: Option<Position>,
    pub background: Option<Background>,
}

impl MessageOptions {
    #[must_use]
    pub fn from_entry(entry: &DialogueEntry) -> Self {
        Self {
            face: entry.tag("face").and_then(parse_face),
            position: entry.tag("position").and_then(Position::from_tag),
            background: entry.tag("background").and_then(Background::from_tag),
        }
    }
}

/// Settings for a scrolling text window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollOptions {
    /// Scroll speed 1-8.
    pub speed: Option<u8>,
    /// Disable fast-forward with the OK button.
    pub no_fast: bool,
}

impl ScrollOptions {
    #[must_use]
    pub fn from_entry(entry: &DialogueEntry) -> Self {
        Self {
            speed: entry.tag("scroll_speed").and_then(|v| v.trim().parse().ok()),
            no_fast: entry.has_tag("no_fast"),
        }
    }
}

fn parse_face(value: &str) -> Option<Face> {
    let (name, index) = value.split_once(',')?;
    Some(Face {
        name: name.trim().to_string(),
        index: index.trim().parse().ok()?,
    })
}
