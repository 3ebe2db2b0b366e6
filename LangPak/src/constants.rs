//! Explicitly registered module constants
//!
//! `Module:CONSTANT` database paths name host-side values such as menu
//! vocabulary. The host registers a setter for each value it allows to be
//! translated; overrides for anything unregistered are skipped.

use std::fmt;

use indexmap::IndexMap;
use rvtext::formats::DatabaseTable;

type Setter = Box<dyn FnMut(&str)>;

#[derive(Default)]
pub struct ConstantRegistry {
    setters: IndexMap<(String, String), Setter>,
}

impl ConstantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the setter of `module::name`, replacing any previous one.
    pub fn register<F>(&mut self, module: impl Into<String>, name: impl Into<String>, setter: F)
    where
        F: FnMut(&str) + 'static,
    {
        self.setters
            .insert((module.into(), name.into()), Box::new(setter));
    }

    #[must_use]
    pub fn is_registered(&self, module: &str, name: &str) -> bool {
        self.setters
            .contains_key(&(module.to_string(), name.to_string()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.setters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.setters.is_empty()
    }

    /// Push every constant override of the table to its setter.
    ///
    /// Returns the number of constants set.
    pub fn apply(&mut self, table: &DatabaseTable) -> usize {
        let mut applied = 0;
        for (module, name, value) in table.constants() {
            match self.setters.get_mut(&(module.to_string(), name.to_string())) {
                Some(setter) => {
                    setter(value);
                    applied += 1;
                }
                None => tracing::warn!("No constant {module}::{name} registered, override skipped"),
            }
        }
        applied
    }
}

impl fmt::Debug for ConstantRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.setters.keys().map(|(module, name)| format!("{module}::{name}")))
            .finish()
    }
}
