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

//! Configuration for graph construction and querying.
//!
//! All values have defaults; a TOML file can override any subset:
//!
//! ```toml
//! [graph]
//! time_decay = 0.0001
//! scope_tags_by_thread = false
//!
//! [query]
//! star_length = 3.0
//! num_choose = 4
//! ```

use crate::error::{Result, SemgraphError};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default decay rate for tag-chain edge weights (per second of separation).
pub const DEFAULT_TIME_DECAY: f64 = 1.0e-4;

/// Edge-weight and tagging knobs for graph construction. Base weights are
/// relative; rows are normalized after construction, so only ratios matter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Base weight between adjacent log lines.
    pub adjacent_line_weight: f64,
    /// Base weight between a log line and an id vertex it mentions.
    pub line_id_weight: f64,
    /// Base weight between a log line and a tag occurrence.
    pub line_tag_weight: f64,
    /// Decay rate for consecutive-occurrence tag edges, applied as
    /// `exp(-time_decay * |dt| seconds)`.
    pub time_decay: f64,
    /// When set, tag vertices carry their line's thread id, so the same
    /// word on different threads stays separate.
    pub scope_tags_by_thread: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            adjacent_line_weight: 1.0,
            line_id_weight: 1.0,
            line_tag_weight: 1.0,
            time_decay: DEFAULT_TIME_DECAY,
            scope_tags_by_thread: false,
        }
    }
}

impl GraphConfig {
    /// Weight for an edge between consecutive occurrences of a tag.
    pub fn time_weighting(&self, t1: NaiveDateTime, t2: NaiveDateTime) -> f64 {
        let dt_seconds = (t2 - t1).num_milliseconds().abs() as f64 / 1000.0;
        (-self.time_decay * dt_seconds).exp()
    }
}

/// Knobs for semex compilation and ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Expected walk length for star operators; must exceed 1.
    pub star_length: f64,
    /// How many endpoints a ranking returns.
    pub num_choose: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            star_length: 3.0,
            num_choose: 4,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SemgraphConfig {
    pub graph: GraphConfig,
    pub query: QueryConfig,
}

impl SemgraphConfig {
    /// Load configuration from a TOML file, or defaults when no path is
    /// given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| SemgraphError::Config(e.to_string()))
    }
}
