//! JSON snapshot of the host's original database
//!
//! Hosts dump the text-bearing part of their database into a JSON file.
//! The snapshot backs class learning overrides, supplies native values to
//! the override facade, and is the database input of extraction.

use std::collections::BTreeMap;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use rvtext::formats::{BaselineDatabase, IndexedSet, ItemGroup, Learning};

use crate::error::Result;
use crate::overrides::ContentEntity;

/// One database object (actor, skill, state, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseItem {
    pub id: u32,
    /// Text fields by name (`name`, `description`, `message1`, ...).
    #[serde(default)]
    pub fields: IndexMap<String, String>,
    /// Only classes have learnings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub learnings: Vec<Learning>,
}

impl DatabaseItem {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSnapshot {
    #[serde(default)]
    pub items: BTreeMap<ItemGroup, Vec<DatabaseItem>>,
    /// `game_title`, `currency_unit`
    #[serde(default)]
    pub system: IndexMap<String, String>,
    /// Type and term name lists, by index.
    #[serde(default)]
    pub indexed: BTreeMap<IndexedSet, Vec<String>>,
    /// Module constants the host exposes, module -> constant -> value.
    #[serde(default)]
    pub constants: IndexMap<String, IndexMap<String, String>>,
}

impl DatabaseSnapshot {
    /// # Errors
    /// Returns an error if the file cannot be read or is not a snapshot.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let snapshot: Self = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        tracing::debug!(
            "Loaded database snapshot with {} groups from {}",
            snapshot.items.len(),
            path.display()
        );
        Ok(snapshot)
    }

    #[must_use]
    pub fn items(&self, group: ItemGroup) -> &[DatabaseItem] {
        self.items.get(&group).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn item(&self, group: ItemGroup, id: u32) -> Option<ItemRef<'_>> {
        self.items(group)
            .iter()
            .find(|item| item.id == id)
            .map(|item| ItemRef { group, item })
    }

    #[must_use]
    pub fn indexed(&self, set: IndexedSet) -> &[String] {
        self.indexed.get(&set).map_or(&[], Vec::as_slice)
    }
}

impl BaselineDatabase for DatabaseSnapshot {
    fn class_learnings(&self, class_id: u32) -> Option<Vec<Learning>> {
        self.item(ItemGroup::Classes, class_id)
            .map(|class| class.item.learnings.clone())
    }
}

/// A database object together with the group it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct ItemRef<'a> {
    pub group: ItemGroup,
    pub item: &'a DatabaseItem,
}

impl ContentEntity for ItemRef<'_> {
    fn group(&self) -> ItemGroup {
        self.group
    }

    fn id(&self) -> u32 {
        self.item.id
    }

    fn native_field(&self, field: &str) -> Option<&str> {
        self.item.field(field)
    }
}
