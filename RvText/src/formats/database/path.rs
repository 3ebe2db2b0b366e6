//! Database path grammar
//!
//! ```text
//! actors:3:name              BaseItem
//! classes:1:learnings:3      ClassLearning
//! system:game_title          SystemField
//! types:elements:2           IndexedSet
//! maps:5:display_name        MapField
//! names:gandalf_newname      NameAlias
//! Vocab:ShopBuy              ExternalConstant
//! ```
//!
//! Only group and subgroup names are validated here. Field names are not:
//! an unknown field is stored and simply never read back.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::schema::{Group, IndexedSet, ItemGroup, LEARNINGS_FIELD};
use crate::error::Error;

/// A parsed database block header.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DatabasePath {
    /// `group:id:field`
    BaseItem {
        group: ItemGroup,
        id: u32,
        field: String,
    },
    /// `classes:id:learnings:slot`
    ClassLearning { class_id: u32, slot: usize },
    /// `system:field`
    SystemField { field: String },
    /// `types:subgroup:index` or `terms:subgroup:index`
    IndexedSet { set: IndexedSet, index: usize },
    /// `maps:id:field`
    MapField { map_id: u32, field: String },
    /// `names:key`
    NameAlias { key: String },
    /// `Module:CONSTANT`
    ExternalConstant { module: String, name: String },
}

/// Why a header could not be resolved. Line numbers are attached by the
/// table builder via [`PathError::at_line`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("unknown group id '{0}'")]
    UnknownGroup(String),

    #[error("group id '{0}' needs more arguments")]
    MissingArgument(String),

    #[error("unknown {group} variable id '{variable}'")]
    UnknownVariable { group: String, variable: String },

    /// An id, slot or index token that is not a number. Checked in
    /// addition to the group, argument and variable checks.
    #[error("'{0}' is not a valid numeric id")]
    InvalidIndex(String),
}

impl PathError {
    /// Attach the 1-based line number of the block header.
    #[must_use]
    pub fn at_line(self, line: usize) -> Error {
        match self {
            Self::UnknownGroup(group) => Error::UnknownGroup { group, line },
            Self::MissingArgument(group) => Error::MissingArgument { group, line },
            Self::UnknownVariable { group, variable } => Error::UnknownVariable {
                group,
                variable,
                line,
            },
            Self::InvalidIndex(value) => Error::InvalidIndex { value, line },
        }
    }
}

impl DatabasePath {
    /// Resolve the content of a `<<...>>` header.
    ///
    /// # Errors
    ///
    /// Returns a [`PathError`] if the group is unknown, the path is too
    /// short for its group, a `types`/`terms` subgroup is unknown, or a
    /// numeric token is not a number.
    pub fn parse(content: &str) -> Result<Self, PathError> {
        let tokens = tokenize(content);
        let first = tokens[0];

        if first.starts_with(|c: char| c.is_ascii_uppercase()) {
            let name = arg(&tokens, 1, first)?;
            return Ok(Self::ExternalConstant {
                module: first.to_string(),
                name: name.to_string(),
            });
        }

        let group = Group::from_name(first).ok_or_else(|| PathError::UnknownGroup(first.to_string()))?;
        let second = arg(&tokens, 1, first)?;

        match group {
            Group::System => Ok(Self::SystemField {
                field: second.to_string(),
            }),
            Group::Names => Ok(Self::NameAlias {
                key: second.to_string(),
            }),
            Group::Indexed(indexed) => {
                let set = IndexedSet::from_parts(indexed, second).ok_or_else(|| {
                    PathError::UnknownVariable {
                        group: indexed.as_str().to_string(),
                        variable: second.to_string(),
                    }
                })?;
                let index = number(arg(&tokens, 2, first)?)?;
                Ok(Self::IndexedSet { set, index })
            }
            Group::Maps => Ok(Self::MapField {
                map_id: number(second)?,
                field: arg(&tokens, 2, first)?.to_string(),
            }),
            Group::Item(item) => {
                let id = number(second)?;
                let field = arg(&tokens, 2, first)?;
                if item == ItemGroup::Classes && field == LEARNINGS_FIELD {
                    let slot = number(arg(&tokens, 3, first)?)?;
                    Ok(Self::ClassLearning { class_id: id, slot })
                } else {
                    Ok(Self::BaseItem {
                        group: item,
                        id,
                        field: field.to_string(),
                    })
                }
            }
        }
    }
}

impl FromStr for DatabasePath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DatabasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BaseItem { group, id, field } => write!(f, "{group}:{id}:{field}"),
            Self::ClassLearning { class_id, slot } => {
                write!(f, "classes:{class_id}:{LEARNINGS_FIELD}:{slot}")
            }
            Self::SystemField { field } => write!(f, "system:{field}"),
            Self::IndexedSet { set, index } => write!(f, "{set}:{index}"),
            Self::MapField { map_id, field } => write!(f, "maps:{map_id}:{field}"),
            Self::NameAlias { key } => write!(f, "names:{key}"),
            Self::ExternalConstant { module, name } => write!(f, "{module}:{name}"),
        }
    }
}

/// Split on `:`, trimming each token and dropping trailing empty ones.
/// Always returns at least one token.
fn tokenize(content: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = content.trim().split(':').map(str::trim).collect();
    while tokens.len() > 1 && tokens.last().is_some_and(|t| t.is_empty()) {
        tokens.pop();
    }
    tokens
}

fn arg<'a>(tokens: &[&'a str], index: usize, group: &str) -> Result<&'a str, PathError> {
    tokens
        .get(index)
        .copied()
        .ok_or_else(|| PathError::MissingArgument(group.to_string()))
}

fn number<T: FromStr>(token: &str) -> Result<T, PathError> {
    token
        .parse()
        .map_err(|_| PathError::InvalidIndex(token.to_string()))
}
