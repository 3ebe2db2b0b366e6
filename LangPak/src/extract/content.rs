//! Serializable snapshot of the game's text-bearing content

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::baseline::DatabaseSnapshot;

/// Event command codes that carry text.
pub mod codes {
    pub const SHOW_TEXT: u16 = 101;
    pub const SHOW_TEXT_LINE: u16 = 401;
    pub const SHOW_CHOICES: u16 = 102;
    pub const SHOW_SCROLLING_TEXT: u16 = 105;
    pub const SCROLLING_TEXT_LINE: u16 = 405;
    pub const CHANGE_NAME: u16 = 320;
    pub const CHANGE_NICKNAME: u16 = 324;
    pub const SCRIPT: u16 = 355;
    pub const SCRIPT_LINE: u16 = 655;
}

/// One event command with its engine parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventCommand {
    pub code: u16,
    #[serde(default)]
    pub indent: u32,
    #[serde(default)]
    pub parameters: Vec<Value>,
}

impl EventCommand {
    pub fn new(code: u16, indent: u32, parameters: Vec<Value>) -> Self {
        Self {
            code,
            indent,
            parameters,
        }
    }

    /// String parameter, empty if absent or not a string.
    #[must_use]
    pub fn str_param(&self, index: usize) -> &str {
        self.parameters
            .get(index)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// Integer parameter, 0 if absent or not a number.
    #[must_use]
    pub fn int_param(&self, index: usize) -> i64 {
        self.parameters
            .get(index)
            .and_then(Value::as_i64)
            .unwrap_or_default()
    }

    /// Boolean parameter, `false` if absent or not a boolean.
    #[must_use]
    pub fn bool_param(&self, index: usize) -> bool {
        self.parameters
            .get(index)
            .and_then(Value::as_bool)
            .unwrap_or_default()
    }

    /// String list parameter (the options of Show Choices).
    #[must_use]
    pub fn str_list_param(&self, index: usize) -> Vec<&str> {
        self.parameters
            .get(index)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// A command list, as held by event pages and common events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventPage {
    #[serde(default)]
    pub list: Vec<EventCommand>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapEvent {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub pages: Vec<EventPage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameMap {
    pub id: u32,
    /// Editor name of the map (from the map tree), used in text ids.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub events: Vec<MapEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommonEvent {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub list: Vec<EventCommand>,
}

/// Everything extraction reads and converts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameContent {
    #[serde(default)]
    pub maps: Vec<GameMap>,
    #[serde(default)]
    pub common_events: Vec<CommonEvent>,
    #[serde(default)]
    pub database: DatabaseSnapshot,
}

impl GameContent {
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Self> {
        Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?)
    }

    /// # Errors
    /// Returns an error if serialization or writing fails.
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> crate::Result<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
