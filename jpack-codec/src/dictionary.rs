//! Key dictionary shared by the encoder and decoder

use std::collections::BTreeMap;

use jpack_format::{JpackError, Result};

/// Mapping from JSON key names to small integer ids
///
/// Entries are kept in lexicographic key order, which is the order the
/// dictionary trailer is written in.
#[derive(Debug, Clone, Default)]
pub struct KeyDictionary {
    keys: BTreeMap<String, i32>,
    current: i32,
}

impl KeyDictionary {
    /// Create an empty dictionary
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id of `name`, assigning the next free id on first sight
    pub fn intern(&mut self, name: &str) -> i32 {
        if let Some(id) = self.keys.get(name) {
            return *id;
        }
        self.current += 1;
        self.keys.insert(name.to_owned(), self.current);
        self.current
    }

    /// Store `name` with an explicit id. The auto-increment counter is not touched.
    pub fn insert_with_id(&mut self, name: &str, id: i32) -> Result<()> {
        if self.keys.contains_key(name) {
            return Err(JpackError::already_exists("dictionary key", name));
        }
        self.keys.insert(name.to_owned(), id);
        Ok(())
    }

    /// Name stored under `id`, or an empty string if there is none
    pub fn lookup(&self, id: i32) -> &str {
        self.keys
            .iter()
            .find(|(_, value)| **value == id)
            .map(|(name, _)| name.as_str())
            .unwrap_or("")
    }

    /// Id of `name`, if present
    pub fn get(&self, name: &str) -> Option<i32> {
        self.keys.get(name).copied()
    }

    /// Remove all entries and restart ids at 1
    pub fn clear(&mut self) {
        self.keys.clear();
        self.current = 0;
    }

    /// Entries in key order
    pub fn entries(&self) -> impl Iterator<Item = (&str, i32)> + '_ {
        self.keys.iter().map(|(name, id)| (name.as_str(), *id))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True if the dictionary has no entries
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
