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

//! Directed, weighted, kind-tagged edges.

use serde::{Deserialize, Serialize};

/// What an edge connects. Data vertices are log lines; meta vertices are
/// tags and ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    /// Log line to the line before it.
    AdjacentPrev,
    /// Log line to the line after it.
    AdjacentNext,
    /// Log line to a tag/id it mentions.
    DataToMeta,
    /// Tag/id back to a mentioning log line.
    MetaToData,
    /// Consecutive occurrences of the same tag.
    MetaToMeta,
}

/// One outgoing edge. The source is implied by which adjacency row holds
/// the edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub target: usize,
    pub weight: f64,
    pub kind: EdgeKind,
}
