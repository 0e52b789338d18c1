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

//! The filter function table.
//!
//! Filters are pure, total functions from vertices to non-negative reals,
//! looked up by name when a semex is compiled. The registered names double
//! as surface syntax: a semex prints back using them, so renaming an entry
//! changes the query language.

use semgraph_core::Vertex;
use std::collections::BTreeMap;
use std::sync::Arc;

/// The base filter name that compiles to the identity rather than a
/// diagonal operator.
pub const ANYTHING_FILTER: &str = "anything";

/// A per-vertex weight function.
pub type FilterFn = Arc<dyn Fn(&Vertex) -> f64 + Send + Sync>;

/// Name → filter registry, populated at startup.
#[derive(Clone)]
pub struct FilterTable {
    entries: BTreeMap<String, FilterFn>,
}

impl FilterTable {
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// The built-in filters: the three kind predicates plus a numeric
    /// feature.
    pub fn with_defaults() -> Self {
        let mut table = Self::empty();
        table.register("logline", |v: &Vertex| {
            if v.as_log_line().is_some() {
                1.0
            } else {
                0.0
            }
        });
        table.register("tag", |v: &Vertex| {
            if v.as_tag().is_some() {
                1.0
            } else {
                0.0
            }
        });
        table.register("id", |v: &Vertex| {
            if v.as_unique_id().is_some() {
                1.0
            } else {
                0.0
            }
        });
        table.register("word_count", |v: &Vertex| match v {
            Vertex::LogLine(line) => line.message.split_whitespace().count() as f64,
            Vertex::Tag(_) => 1.0,
            Vertex::UniqueId(_) => 0.0,
        });
        table
    }

    pub fn register<F>(&mut self, name: impl Into<String>, filter: F)
    where
        F: Fn(&Vertex) -> f64 + Send + Sync + 'static,
    {
        self.entries.insert(name.into(), Arc::new(filter));
    }

    pub fn get(&self, name: &str) -> Option<FilterFn> {
        self.entries.get(name).cloned()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl Default for FilterTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}
