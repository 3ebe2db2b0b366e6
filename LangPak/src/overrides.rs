//! Override resolution
//!
//! Every lookup either yields the active language's value or falls through,
//! telling the caller to use its native value. An empty override is still
//! an override.

use rvtext::formats::{DialogueEntry, IndexedSet, ItemGroup, Learning};

use crate::messages::name_reference;
use crate::state::LanguageState;

/// Longest list [`LanguageState::merge_indexed`] extends a native list to.
/// Editor lists stay well below this; larger indices are typos.
pub const MAX_INDEXED_LEN: usize = 10_000;

/// Result of a database lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    Override(&'a str),
    FallThrough,
}

impl<'a> Resolution<'a> {
    /// The override, or `native` on fall-through.
    #[must_use]
    pub fn or_native(self, native: &'a str) -> &'a str {
        match self {
            Self::Override(value) => value,
            Self::FallThrough => native,
        }
    }

    #[must_use]
    pub fn is_override(self) -> bool {
        matches!(self, Self::Override(_))
    }

    #[must_use]
    pub fn into_option(self) -> Option<&'a str> {
        match self {
            Self::Override(value) => Some(value),
            Self::FallThrough => None,
        }
    }
}

impl<'a> From<Option<&'a str>> for Resolution<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(Self::FallThrough, Self::Override)
    }
}

impl LanguageState {
    /// The dialogue block stored under `id`, or `None` if there is none.
    #[must_use]
    pub fn resolve_dialogue(&self, id: &str) -> Option<&DialogueEntry> {
        self.dialogues().get(id)
    }

    /// `group:id:field`
    #[must_use]
    pub fn resolve_field(&self, group: ItemGroup, id: u32, field: &str) -> Resolution<'_> {
        self.database().item_field(group, id, field).into()
    }

    /// `maps:id:field`
    #[must_use]
    pub fn resolve_map_field(&self, map_id: u32, field: &str) -> Resolution<'_> {
        self.database().map_field(map_id, field).into()
    }

    /// `system:field`
    #[must_use]
    pub fn resolve_system(&self, field: &str) -> Resolution<'_> {
        self.database().system(field).into()
    }

    /// `types:set:index` / `terms:set:index`
    #[must_use]
    pub fn resolve_indexed(&self, set: IndexedSet, index: usize) -> Resolution<'_> {
        self.database().indexed(set, index).into()
    }

    /// `names:key`
    #[must_use]
    pub fn resolve_name(&self, key: &str) -> Resolution<'_> {
        self.database().name(key).into()
    }

    /// `Module:CONSTANT`
    #[must_use]
    pub fn resolve_constant(&self, module: &str, name: &str) -> Resolution<'_> {
        self.database().constant(module, name).into()
    }

    /// The overridden learning list of a class. `None` means the class's
    /// own list applies.
    #[must_use]
    pub fn class_learnings(&self, class_id: u32) -> Option<&[Learning]> {
        self.database().class_learnings(class_id)
    }

    /// A native type or term list with every overridden index replaced.
    ///
    /// Overrides past the end of the native list extend it, padding the gap
    /// with empty names. Indices at or past [`MAX_INDEXED_LEN`] are skipped
    /// unless the native list already reaches them.
    #[must_use]
    pub fn merge_indexed(&self, set: IndexedSet, native: &[String]) -> Vec<String> {
        let mut merged = native.to_vec();
        for (index, value) in self.database().indexed_entries(set) {
            if index >= merged.len() {
                if index >= MAX_INDEXED_LEN {
                    tracing::warn!("Ignoring {set}:{index}, past the longest supported list");
                    continue;
                }
                merged.resize(index + 1, String::new());
            }
            value.clone_into(&mut merged[index]);
        }
        merged
    }

    /// Name or nickname of an actor as shown in game.
    ///
    /// `changed` is the value set by a name change event, if any. Without
    /// one the (overridable) database value is used. A changed value of the
    /// form `\name[key]` reads the `names` alias; any other changed value is
    /// shown as is.
    #[must_use]
    pub fn actor_text<'a>(
        &'a self,
        actor_id: u32,
        field: &str,
        changed: Option<&'a str>,
        native: &'a str,
    ) -> &'a str {
        match changed {
            None => self.resolve_field(ItemGroup::Actors, actor_id, field).or_native(native),
            Some(changed) => name_reference(changed)
                .and_then(|key| self.resolve_name(key).into_option())
                .unwrap_or(changed),
        }
    }
}

/// A database object whose text fields can be overridden.
pub trait ContentEntity {
    fn group(&self) -> ItemGroup;
    fn id(&self) -> u32;
    /// The object's own value of a field.
    fn native_field(&self, field: &str) -> Option<&str>;
}

/// Reads fields of an entity through the active language.
#[derive(Debug, Clone, Copy)]
pub struct Localized<'a, E> {
    entity: E,
    state: &'a LanguageState,
}

impl<'a, E: ContentEntity> Localized<'a, E> {
    pub fn new(entity: E, state: &'a LanguageState) -> Self {
        Self { entity, state }
    }

    /// Override if present, else the native value.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&str> {
        match self
            .state
            .resolve_field(self.entity.group(), self.entity.id(), field)
        {
            Resolution::Override(value) => Some(value),
            Resolution::FallThrough => self.entity.native_field(field),
        }
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.field("name")
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.field("description")
    }

    pub fn entity(&self) -> &E {
        &self.entity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::{DatabaseItem, ItemRef};
    use rvtext::formats::{DialogueTable, NoBaseline, parse_database};

    fn state(database: &str) -> LanguageState {
        LanguageState::new(
            Some("English".to_string()),
            DialogueTable::new(),
            parse_database(database, &NoBaseline).unwrap(),
        )
    }

    #[test]
    fn test_field_override_and_fall_through() {
        let state = state("<<actors:3:name>>\nBob\n<<actors:3:nickname>>\n");
        assert_eq!(state.resolve_field(ItemGroup::Actors, 3, "name"), Resolution::Override("Bob"));
        assert_eq!(state.resolve_field(ItemGroup::Actors, 3, "description"), Resolution::FallThrough);
        // Present but empty is still an override
        assert_eq!(state.resolve_field(ItemGroup::Actors, 3, "nickname"), Resolution::Override(""));
        assert_eq!(state.resolve_field(ItemGroup::Actors, 3, "nickname").or_native("Hero"), "");
    }

    #[test]
    fn test_missing_dialogue_on_empty_state() {
        let state = LanguageState::default();
        assert!(state.resolve_dialogue("missing-id").is_none());
        assert_eq!(state.resolve_system("game_title"), Resolution::FallThrough);
    }

    #[test]
    fn test_merge_indexed() {
        let state = state("<<types:elements:1>>\nPhysisch\n<<types:elements:4>>\nEis\n");
        let native = vec![String::new(), "Physical".to_string(), "Fire".to_string()];
        assert_eq!(
            state.merge_indexed(IndexedSet::Elements, &native),
            ["", "Physisch", "Fire", "", "Eis"]
        );
        assert_eq!(state.merge_indexed(IndexedSet::Params, &native), native);
    }

    #[test]
    fn test_merge_indexed_skips_runaway_index() {
        let state = state("<<types:elements:2>>\nFeuer\n<<types:elements:4000000000>>\nTypo\n");
        let native = vec![String::new(), "Physical".to_string(), "Fire".to_string()];
        assert_eq!(state.merge_indexed(IndexedSet::Elements, &native), ["", "Physical", "Feuer"]);
    }

    #[test]
    fn test_actor_text() {
        let state = state("<<actors:1:name>>\nErich\n<<names:gandalf_newname>>\nGandalf der Weisse\n");
        assert_eq!(state.actor_text(1, "name", None, "Eric"), "Erich");
        assert_eq!(state.actor_text(2, "name", None, "Natalie"), "Natalie");
        assert_eq!(
            state.actor_text(1, "name", Some("\\name[gandalf_newname]"), "Eric"),
            "Gandalf der Weisse"
        );
        assert_eq!(state.actor_text(1, "name", Some("\\name[unknown]"), "Eric"), "\\name[unknown]");
        assert_eq!(state.actor_text(1, "nickname", Some("Boss"), "Hero"), "Boss");
    }

    #[test]
    fn test_localized_entity() {
        let state = state("<<weapons:2:name>>\nKurzschwert\n");
        let item = DatabaseItem {
            id: 2,
            fields: [
                ("name".to_string(), "Short Sword".to_string()),
                ("description".to_string(), "A short blade.".to_string()),
            ]
            .into_iter()
            .collect(),
            learnings: Vec::new(),
        };
        let weapon = Localized::new(
            ItemRef {
                group: ItemGroup::Weapons,
                item: &item,
            },
            &state,
        );
        assert_eq!(weapon.name(), Some("Kurzschwert"));
        assert_eq!(weapon.description(), Some("A short blade."));
        assert_eq!(weapon.field("note"), None);
    }
}
