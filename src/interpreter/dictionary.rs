//! Command dictionary
//!
//! An ordered, fixed-capacity table of command names. Registration order is
//! kept for `words` and `help`; lookups resolve to the most recently
//! registered entry with a matching name, so a later entry shadows an
//! earlier one without removing it.

use crate::interpreter::constants::DICTIONARY_SIZE;
use crate::interpreter::context::{Context, Control};
use crate::interpreter::errors::MonitorError;
use rustc_hash::FxHashMap;

/// A command implementation
pub type Handler = fn(&mut Context<'_>) -> Result<Control, MonitorError>;

/// One registered command
#[derive(Clone)]
pub struct DictEntry {
    pub name: String,
    pub help: String,
    pub handler: Handler,
}

impl std::fmt::Debug for DictEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DictEntry")
            .field("name", &self.name)
            .field("help", &self.help)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct Dictionary {
    entries: Vec<DictEntry>,
    /// Name -> index of the newest entry with that name
    latest: FxHashMap<String, usize>,
    capacity: usize,
}

impl Dictionary {
    pub fn new(capacity: usize) -> Self {
        Dictionary {
            entries: Vec::new(),
            latest: FxHashMap::default(),
            capacity,
        }
    }

    /// Append an entry
    pub fn register(&mut self, name: &str, handler: Handler, help: &str) -> Result<(), MonitorError> {
        if self.entries.len() >= self.capacity {
            tracing::warn!(name, capacity = self.capacity, "dictionary full");
            return Err(MonitorError::DictionaryFull {
                capacity: self.capacity,
            });
        }
        if self.latest.contains_key(name) {
            tracing::debug!(name, "shadowing existing entry");
        }
        self.latest.insert(name.to_string(), self.entries.len());
        self.entries.push(DictEntry {
            name: name.to_string(),
            help: help.to_string(),
            handler,
        });
        Ok(())
    }

    /// The newest entry named `name`
    pub fn find(&self, name: &str) -> Option<&DictEntry> {
        self.latest.get(name).map(|&i| &self.entries[i])
    }

    pub fn lookup(&self, name: &str) -> Option<Handler> {
        self.find(name).map(|entry| entry.handler)
    }

    /// All entries in registration order, shadowed ones included
    pub fn iter(&self) -> impl Iterator<Item = &DictEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new(DICTIONARY_SIZE)
    }
}
