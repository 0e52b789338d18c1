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

//! Semgraph Core
//!
//! Fundamental data structures for the semgraph workspace: the three vertex
//! kinds, log-line parsing, token classification, configuration, and the
//! shared error type.

pub mod config;
pub mod error;
pub mod logparse;
pub mod tokens;
pub mod vertex;

pub use config::{GraphConfig, QueryConfig, SemgraphConfig, DEFAULT_TIME_DECAY};
pub use error::{Result, SemgraphError};
pub use logparse::{parse_log, parse_log_file, parse_log_line, ParsedLog};
pub use tokens::{is_id_token, tokenize, TokenKind};
pub use vertex::{LogLineVertex, TagVertex, UniqueIdVertex, Vertex, VertexKind};
