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

//! Node references: how commands name a node relative to the session
//! position.
//!
//! ```text
//! node-ref := 'current' | 'cur'
//!           | ('current' | 'cur') '.' ('neighbors' | 'nbrs') '[' idx ']'
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

/// A parsed node reference; resolution against the session happens in the
/// context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef {
    Current,
    Neighbor(usize),
}

static NODE_REF_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^cur(rent)?(\.(nbrs|neighbors)\[(\d+)\])?$").unwrap());

/// Parse node-ref syntax. Only syntax: a well-formed reference to an
/// out-of-range neighbor parses fine and fails at resolution.
pub fn parse_node_ref(input: &str) -> Option<NodeRef> {
    let caps = NODE_REF_PATTERN.captures(input)?;
    match caps.get(4) {
        Some(idx) => idx.as_str().parse().ok().map(NodeRef::Neighbor),
        None => Some(NodeRef::Current),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_and_cur() {
        assert_eq!(parse_node_ref("current"), Some(NodeRef::Current));
        assert_eq!(parse_node_ref("cur"), Some(NodeRef::Current));
    }

    #[test]
    fn neighbors_long_and_short() {
        assert_eq!(parse_node_ref("cur.neighbors[1]"), Some(NodeRef::Neighbor(1)));
        assert_eq!(parse_node_ref("cur.nbrs[9]"), Some(NodeRef::Neighbor(9)));
        assert_eq!(
            parse_node_ref("current.neighbors[0]"),
            Some(NodeRef::Neighbor(0))
        );
    }

    #[test]
    fn rejects_missing_period() {
        assert_eq!(parse_node_ref("curneighbors[0]"), None);
    }

    #[test]
    fn rejects_non_integer_index() {
        assert_eq!(parse_node_ref("cur.neighbors[a]"), None);
    }

    #[test]
    fn rejects_arbitrary_words() {
        assert_eq!(parse_node_ref("dog"), None);
    }
}
