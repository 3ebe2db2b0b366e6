//! Database text asset (`DatabaseText<Language>.rvtext`)
//!
//! Same block layout as the dialogue file, but every header is a
//! [`DatabasePath`] naming the database field the following text replaces:
//!
//! ```text
//! <<actors:3:name>>
//! Bob
//!
//! <<states:11:message4>>
//!  is no longer confused.
//! ```
//!
//! A field that does not appear in the file keeps its database value.

mod path;
mod reader;
pub mod schema;
mod writer;

pub use path::{DatabasePath, PathError};
pub use reader::{parse_database, read_database};
pub use schema::{Group, IndexedGroup, IndexedSet, ItemGroup};
pub use writer::DatabaseWriter;

use std::collections::{BTreeMap, BTreeSet};
use std::collections::btree_map::Entry;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One skill a class learns, as stored in the class's learning list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Learning {
    pub level: u32,
    pub skill_id: u32,
    pub note: String,
}

/// Read access to the host's original database, needed where an override
/// replaces part of a compound value.
pub trait BaselineDatabase {
    /// The class's learning list as configured in the database, or `None`
    /// if the class does not exist.
    fn class_learnings(&self, class_id: u32) -> Option<Vec<Learning>>;
}

/// A baseline without any data. Class learning overrides fail against it.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBaseline;

impl BaselineDatabase for NoBaseline {
    fn class_learnings(&self, _class_id: u32) -> Option<Vec<Learning>> {
        None
    }
}

/// All database overrides of one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseTable {
    /// group -> field -> id -> value
    items: BTreeMap<ItemGroup, BTreeMap<String, BTreeMap<u32, String>>>,
    /// class id -> full learning list (baseline with overridden notes)
    learnings: BTreeMap<u32, Vec<Learning>>,
    /// (class id, slot) of every note the file replaced
    #[serde(default)]
    learning_overrides: BTreeSet<(u32, usize)>,
    system: IndexMap<String, String>,
    indexed: BTreeMap<IndexedSet, BTreeMap<usize, String>>,
    /// field -> map id -> value
    maps: BTreeMap<String, BTreeMap<u32, String>>,
    names: IndexMap<String, String>,
    /// module -> constant -> value
    constants: IndexMap<String, IndexMap<String, String>>,
}

impl DatabaseTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override stored under an exact path.
    #[must_use]
    pub fn get(&self, path: &DatabasePath) -> Option<&str> {
        match path {
            DatabasePath::BaseItem { group, id, field } => self.item_field(*group, *id, field),
            DatabasePath::ClassLearning { class_id, slot } => self
                .class_learnings(*class_id)
                .and_then(|list| list.get(*slot))
                .map(|l| l.note.as_str()),
            DatabasePath::SystemField { field } => self.system(field),
            DatabasePath::IndexedSet { set, index } => self.indexed(*set, *index),
            DatabasePath::MapField { map_id, field } => self.map_field(*map_id, field),
            DatabasePath::NameAlias { key } => self.name(key),
            DatabasePath::ExternalConstant { module, name } => self.constant(module, name),
        }
    }

    #[must_use]
    pub fn item_field(&self, group: ItemGroup, id: u32, field: &str) -> Option<&str> {
        self.items
            .get(&group)
            .and_then(|fields| fields.get(field))
            .and_then(|ids| ids.get(&id))
            .map(String::as_str)
    }

    /// The overridden learning list of a class, if any slot was overridden.
    #[must_use]
    pub fn class_learnings(&self, class_id: u32) -> Option<&[Learning]> {
        self.learnings.get(&class_id).map(Vec::as_slice)
    }

    #[must_use]
    pub fn system(&self, field: &str) -> Option<&str> {
        self.system.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn indexed(&self, set: IndexedSet, index: usize) -> Option<&str> {
        self.indexed
            .get(&set)
            .and_then(|values| values.get(&index))
            .map(String::as_str)
    }

    /// Overridden indices of one type or term list, ascending.
    pub fn indexed_entries(&self, set: IndexedSet) -> impl Iterator<Item = (usize, &str)> {
        self.indexed
            .get(&set)
            .into_iter()
            .flat_map(|values| values.iter().map(|(index, value)| (*index, value.as_str())))
    }

    #[must_use]
    pub fn map_field(&self, map_id: u32, field: &str) -> Option<&str> {
        self.maps
            .get(field)
            .and_then(|ids| ids.get(&map_id))
            .map(String::as_str)
    }

    #[must_use]
    pub fn name(&self, key: &str) -> Option<&str> {
        self.names.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn constant(&self, module: &str, name: &str) -> Option<&str> {
        self.constants
            .get(module)
            .and_then(|consts| consts.get(name))
            .map(String::as_str)
    }

    /// All module constant overrides as `(module, constant, value)`.
    pub fn constants(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.constants.iter().flat_map(|(module, consts)| {
            consts
                .iter()
                .map(move |(name, value)| (module.as_str(), name.as_str(), value.as_str()))
        })
    }

    /// Every stored override with its canonical path, grouped the way the
    /// extractor writes them.
    #[must_use]
    pub fn entries(&self) -> Vec<(DatabasePath, &str)> {
        let mut entries = Vec::new();

        for (group, fields) in &self.items {
            for (field, ids) in fields {
                for (id, value) in ids {
                    entries.push((
                        DatabasePath::BaseItem {
                            group: *group,
                            id: *id,
                            field: field.clone(),
                        },
                        value.as_str(),
                    ));
                }
            }
        }
        for &(class_id, slot) in &self.learning_overrides {
            if let Some(learning) = self.learnings.get(&class_id).and_then(|list| list.get(slot)) {
                entries.push((DatabasePath::ClassLearning { class_id, slot }, learning.note.as_str()));
            }
        }
        for (field, ids) in &self.maps {
            for (map_id, value) in ids {
                entries.push((
                    DatabasePath::MapField {
                        map_id: *map_id,
                        field: field.clone(),
                    },
                    value.as_str(),
                ));
            }
        }
        for (field, value) in &self.system {
            entries.push((DatabasePath::SystemField { field: field.clone() }, value.as_str()));
        }
        for (set, values) in &self.indexed {
            for (index, value) in values {
                entries.push((
                    DatabasePath::IndexedSet {
                        set: *set,
                        index: *index,
                    },
                    value.as_str(),
                ));
            }
        }
        for (key, value) in &self.names {
            entries.push((DatabasePath::NameAlias { key: key.clone() }, value.as_str()));
        }
        for (module, name, value) in self.constants() {
            entries.push((
                DatabasePath::ExternalConstant {
                    module: module.to_string(),
                    name: name.to_string(),
                },
                value,
            ));
        }

        entries
    }

    /// Number of stored overrides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
            && self.learnings.is_empty()
            && self.system.is_empty()
            && self.indexed.is_empty()
            && self.maps.is_empty()
            && self.names.is_empty()
            && self.constants.is_empty()
    }

    /// Serialize the table back into the database text format.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut writer = DatabaseWriter::new(Vec::new());
        for (path, value) in self.entries() {
            // Writing into a Vec cannot fail
            let _ = writer.write_entry(&path, value);
        }
        String::from_utf8_lossy(&writer.into_inner()).into_owned()
    }

    /// Store a value under its path. Last write wins.
    ///
    /// `line` is the block header's line, reported if a class learning
    /// override cannot be placed.
    pub(crate) fn place(
        &mut self,
        path: DatabasePath,
        value: String,
        baseline: &dyn BaselineDatabase,
        line: usize,
    ) -> Result<()> {
        match path {
            DatabasePath::BaseItem { group, id, field } => {
                self.items
                    .entry(group)
                    .or_default()
                    .entry(field)
                    .or_default()
                    .insert(id, value);
            }
            DatabasePath::ClassLearning { class_id, slot } => {
                let list = match self.learnings.entry(class_id) {
                    Entry::Occupied(entry) => entry.into_mut(),
                    Entry::Vacant(entry) => {
                        let baseline = baseline
                            .class_learnings(class_id)
                            .ok_or(Error::MissingClassBaseline { class_id, line })?;
                        entry.insert(baseline)
                    }
                };
                let learning = list.get_mut(slot).ok_or(Error::LearningSlotOutOfRange {
                    class_id,
                    slot,
                    line,
                })?;
                learning.note = value;
                self.learning_overrides.insert((class_id, slot));
            }
            DatabasePath::SystemField { field } => {
                self.system.insert(field, value);
            }
            DatabasePath::IndexedSet { set, index } => {
                self.indexed.entry(set).or_default().insert(index, value);
            }
            DatabasePath::MapField { map_id, field } => {
                self.maps.entry(field).or_default().insert(map_id, value);
            }
            DatabasePath::NameAlias { key } => {
                self.names.insert(key, value);
            }
            DatabasePath::ExternalConstant { module, name } => {
                self.constants.entry(module).or_default().insert(name, value);
            }
        }
        Ok(())
    }
}
