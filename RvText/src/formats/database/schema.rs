//! Fixed database schema
//!
//! Group and subgroup names accepted in database paths. Anything starting
//! with an uppercase letter is a module name instead and is not checked.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fields every item group has.
pub const COMMON_FIELDS: [&str; 3] = ["name", "description", "note"];

/// Singleton fields of the `system` group.
pub const SYSTEM_FIELDS: [&str; 2] = ["game_title", "currency_unit"];

/// Fields of the `maps` group.
pub const MAP_FIELDS: [&str; 2] = ["display_name", "note"];

/// The per-class learning list field (`classes:<id>:learnings:<slot>`).
pub const LEARNINGS_FIELD: &str = "learnings";

/// Database object groups whose entries are addressed as `group:id:field`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemGroup {
    Actors,
    Classes,
    Skills,
    Items,
    Weapons,
    Armors,
    Enemies,
    States,
}

impl ItemGroup {
    pub const ALL: [ItemGroup; 8] = [
        Self::Actors,
        Self::Classes,
        Self::Skills,
        Self::Items,
        Self::Weapons,
        Self::Armors,
        Self::Enemies,
        Self::States,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Actors => "actors",
            Self::Classes => "classes",
            Self::Skills => "skills",
            Self::Items => "items",
            Self::Weapons => "weapons",
            Self::Armors => "armors",
            Self::Enemies => "enemies",
            Self::States => "states",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.as_str() == name)
    }

    /// Group-specific text fields beyond [`COMMON_FIELDS`].
    #[must_use]
    pub fn extra_fields(self) -> &'static [&'static str] {
        match self {
            Self::Actors => &["nickname"],
            Self::Skills => &["message1", "message2"],
            Self::States => &["message1", "message2", "message3", "message4"],
            Self::Classes | Self::Items | Self::Weapons | Self::Armors | Self::Enemies => &[],
        }
    }

    /// Every overridable text field of this group, learnings excluded.
    pub fn fields(self) -> impl Iterator<Item = &'static str> {
        COMMON_FIELDS.into_iter().chain(self.extra_fields().iter().copied())
    }

    #[must_use]
    pub fn has_field(self, field: &str) -> bool {
        self.fields().any(|f| f == field)
    }
}

impl fmt::Display for ItemGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `types` or `terms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexedGroup {
    Types,
    Terms,
}

impl IndexedGroup {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Types => "types",
            Self::Terms => "terms",
        }
    }
}

/// Index-addressed name lists of the System and Terms tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexedSet {
    Elements,
    SkillTypes,
    WeaponTypes,
    ArmorTypes,
    Basic,
    Params,
    Etypes,
    Commands,
}

impl IndexedSet {
    pub const ALL: [IndexedSet; 8] = [
        Self::Elements,
        Self::SkillTypes,
        Self::WeaponTypes,
        Self::ArmorTypes,
        Self::Basic,
        Self::Params,
        Self::Etypes,
        Self::Commands,
    ];

    #[must_use]
    pub fn group(self) -> IndexedGroup {
        match self {
            Self::Elements | Self::SkillTypes | Self::WeaponTypes | Self::ArmorTypes => {
                IndexedGroup::Types
            }
            Self::Basic | Self::Params | Self::Etypes | Self::Commands => IndexedGroup::Terms,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Elements => "elements",
            Self::SkillTypes => "skill_types",
            Self::WeaponTypes => "weapon_types",
            Self::ArmorTypes => "armor_types",
            Self::Basic => "basic",
            Self::Params => "params",
            Self::Etypes => "etypes",
            Self::Commands => "commands",
        }
    }

    /// Look up a subgroup name within its group.
    #[must_use]
    pub fn from_parts(group: IndexedGroup, name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.group() == group && s.as_str() == name)
    }
}

impl fmt::Display for IndexedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group().as_str(), self.as_str())
    }
}

/// First token of a lowercase database path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Item(ItemGroup),
    System,
    Indexed(IndexedGroup),
    Maps,
    Names,
}

impl Group {
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "system" => Some(Self::System),
            "types" => Some(Self::Indexed(IndexedGroup::Types)),
            "terms" => Some(Self::Indexed(IndexedGroup::Terms)),
            "maps" => Some(Self::Maps),
            "names" => Some(Self::Names),
            _ => ItemGroup::from_name(name).map(Self::Item),
        }
    }
}
