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

//! Abstract syntax for the semex surface language.
//!
//! ```text
//! semex := filter | semex '|' semex | semex semex | semex '*'
//! ```

use std::fmt;

/// Parsed but not yet compiled semex syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemexAst {
    /// A named base filter (or `anything`).
    Base(String),
    Concat(Box<SemexAst>, Box<SemexAst>),
    Disjunct(Box<SemexAst>, Box<SemexAst>),
    Star(Box<SemexAst>),
}

impl fmt::Display for SemexAst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemexAst::Base(name) => write!(f, "{name}"),
            SemexAst::Concat(a, b) => write!(f, "({a} {b})"),
            SemexAst::Disjunct(a, b) => write!(f, "({a} | {b})"),
            SemexAst::Star(inner) => write!(f, "{inner}*"),
        }
    }
}
