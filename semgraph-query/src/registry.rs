// Copyright 2025 Semgraph Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The named registry of session semexes.
//!
//! Each entry pairs a compiled semex with its surface text and an active
//! flag; only active entries participate in navigation displays. Iteration
//! is in name order.

use semgraph_core::{Result, SemgraphError};
use semgraph_semex::Semex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A registered semex plus its on/off switch.
#[derive(Debug, Clone)]
pub struct ActiveSemex {
    pub semex: Arc<Semex>,
    /// The text the user typed; shown when listing.
    pub source: String,
    pub active: bool,
}

/// Name → semex mapping owned by the session.
#[derive(Debug, Default)]
pub struct SemexRegistry {
    entries: BTreeMap<String, ActiveSemex>,
}

impl SemexRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. New entries start active.
    pub fn add(&mut self, name: impl Into<String>, semex: Arc<Semex>, source: impl Into<String>) {
        self.entries.insert(
            name.into(),
            ActiveSemex {
                semex,
                source: source.into(),
                active: true,
            },
        );
    }

    /// Remove an entry, returning it. Unknown names are an error the shell
    /// reports and survives.
    pub fn remove(&mut self, name: &str) -> Result<ActiveSemex> {
        self.entries
            .remove(name)
            .ok_or_else(|| SemgraphError::NameNotFound(name.to_string()))
    }

    /// Flip an entry's active flag, returning the previous value.
    pub fn toggle(&mut self, name: &str) -> Result<bool> {
        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| SemgraphError::NameNotFound(name.to_string()))?;
        let previous = entry.active;
        entry.active = !previous;
        Ok(previous)
    }

    pub fn get(&self, name: &str) -> Option<&ActiveSemex> {
        self.entries.get(name)
    }

    /// All entries, name-ordered.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ActiveSemex)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Only the active entries, name-ordered.
    pub fn active(&self) -> impl Iterator<Item = (&str, &ActiveSemex)> {
        self.iter().filter(|(_, entry)| entry.active)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semgraph_semex::TrivialSemex;

    fn trivial() -> Arc<Semex> {
        Arc::new(TrivialSemex::new(4))
    }

    #[test]
    fn toggle_returns_previous_and_flips() {
        let mut reg = SemexRegistry::new();
        reg.add("walks", trivial(), "anything");

        // newly added entries are active
        assert!(reg.get("walks").unwrap().active);
        assert!(reg.toggle("walks").unwrap());
        assert!(!reg.get("walks").unwrap().active);
        assert!(!reg.toggle("walks").unwrap());
        assert!(reg.get("walks").unwrap().active);
    }

    #[test]
    fn unknown_names_error() {
        let mut reg = SemexRegistry::new();
        assert!(matches!(
            reg.toggle("ghost"),
            Err(SemgraphError::NameNotFound(name)) if name == "ghost"
        ));
        assert!(matches!(
            reg.remove("ghost"),
            Err(SemgraphError::NameNotFound(_))
        ));
    }

    #[test]
    fn add_overwrites_and_reactivates() {
        let mut reg = SemexRegistry::new();
        reg.add("q", trivial(), "anything");
        reg.toggle("q").unwrap();
        assert!(!reg.get("q").unwrap().active);
        reg.add("q", trivial(), "tag");
        assert!(reg.get("q").unwrap().active);
        assert_eq!(reg.get("q").unwrap().source, "tag");
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn active_iterates_only_on_entries() {
        let mut reg = SemexRegistry::new();
        reg.add("a", trivial(), "anything");
        reg.add("b", trivial(), "anything");
        reg.toggle("a").unwrap();
        let names: Vec<&str> = reg.active().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b"]);
    }

    #[test]
    fn removed_entries_come_back() {
        let mut reg = SemexRegistry::new();
        reg.add("q", trivial(), "anything");
        let removed = reg.remove("q").unwrap();
        assert_eq!(removed.source, "anything");
        assert!(reg.is_empty());
        assert!(reg.remove("q").is_err());
    }
}
