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

//! Token classification for log messages.
//!
//! A tag is an ordinary word; an id is something the user wants to pay more
//! attention to. Ids are currently UUIDs and URNs.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    Tag,
    Id,
}

static ID_TOKEN_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // UUIDs, e.g. 2cdd3a76-78fb-412b-bcf2-f09c3b0d9670
        Regex::new("^[a-f0-9]{8}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{12}$").unwrap(),
        // URNs, e.g. urn:foo:bar/baz
        Regex::new(r"^urn:\S+$").unwrap(),
    ]
});

/// Whether a token counts as an id rather than a plain tag.
pub fn is_id_token(token: &str) -> bool {
    ID_TOKEN_PATTERNS.iter().any(|re| re.is_match(token))
}

/// Split a message into classified tokens. Splits on whitespace; empty
/// tokens never appear.
pub fn tokenize(message: &str) -> Vec<(String, TokenKind)> {
    message
        .split_whitespace()
        .map(|token| {
            let kind = if is_id_token(token) {
                TokenKind::Id
            } else {
                TokenKind::Tag
            };
            (token.to_string(), kind)
        })
        .collect()
}
