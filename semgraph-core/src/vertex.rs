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

//! Vertex types for the log graph.
//!
//! A graph holds "data" vertices (log lines) and "meta" vertices (tags and
//! unique ids). Vertices are immutable value objects; their dense index is
//! not stored on the vertex but is its position in the graph arena, assigned
//! once when the graph is built.
//!
//! Kind dispatch is an explicit discriminant matched with `match` — an
//! earlier design that inspected types dynamically turned out far too
//! costly.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Discriminant for the three vertex kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VertexKind {
    LogLine,
    UniqueId,
    Tag,
}

/// A single log line: the data side of the graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogLineVertex {
    /// Untouched log line from the original file.
    pub line: String,
    /// Message portion of the line.
    pub message: String,
    /// Zero-based index in the original file.
    pub line_number: usize,
    /// Thread identifier, when the log format carries one.
    pub thread_id: String,
    pub time: NaiveDateTime,
}

// Identity of a log line is its raw text; line_number et al. are carried
// context, not identity.
impl PartialEq for LogLineVertex {
    fn eq(&self, other: &Self) -> bool {
        self.line == other.line
    }
}

impl Eq for LogLineVertex {}

impl Hash for LogLineVertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.line.hash(state);
    }
}

impl PartialOrd for LogLineVertex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLineVertex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line.cmp(&other.line)
    }
}

/// One occurrence of a word: the meta side of the graph. Tag vertices are
/// timestamped per occurrence, so the same word at two times is two
/// vertices. `thread` scopes the tag to a thread when thread-scoped tagging
/// is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagVertex {
    pub word: String,
    pub time: NaiveDateTime,
    pub thread: Option<String>,
}

impl PartialOrd for TagVertex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TagVertex {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.word, &self.thread, self.time).cmp(&(&other.word, &other.thread, other.time))
    }
}

/// An identifier worth tracking across lines (UUID, URN, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UniqueIdVertex {
    pub id: String,
}

/// A graph vertex. Equality, ordering and hashing are per kind; ordering
/// across kinds goes by the kind tag so mixed lists sort deterministically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Vertex {
    LogLine(LogLineVertex),
    UniqueId(UniqueIdVertex),
    Tag(TagVertex),
}

impl Vertex {
    pub fn log_line(
        line: impl Into<String>,
        message: impl Into<String>,
        line_number: usize,
        thread_id: impl Into<String>,
        time: NaiveDateTime,
    ) -> Self {
        Vertex::LogLine(LogLineVertex {
            line: line.into(),
            message: message.into(),
            line_number,
            thread_id: thread_id.into(),
            time,
        })
    }

    pub fn tag(word: impl Into<String>, time: NaiveDateTime) -> Self {
        Vertex::Tag(TagVertex {
            word: word.into(),
            time,
            thread: None,
        })
    }

    pub fn scoped_tag(
        word: impl Into<String>,
        time: NaiveDateTime,
        thread: impl Into<String>,
    ) -> Self {
        Vertex::Tag(TagVertex {
            word: word.into(),
            time,
            thread: Some(thread.into()),
        })
    }

    pub fn unique_id(id: impl Into<String>) -> Self {
        Vertex::UniqueId(UniqueIdVertex { id: id.into() })
    }

    pub fn kind(&self) -> VertexKind {
        match self {
            Vertex::LogLine(_) => VertexKind::LogLine,
            Vertex::UniqueId(_) => VertexKind::UniqueId,
            Vertex::Tag(_) => VertexKind::Tag,
        }
    }

    pub fn as_log_line(&self) -> Option<&LogLineVertex> {
        match self {
            Vertex::LogLine(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_tag(&self) -> Option<&TagVertex> {
        match self {
            Vertex::Tag(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_unique_id(&self) -> Option<&UniqueIdVertex> {
        match self {
            Vertex::UniqueId(v) => Some(v),
            _ => None,
        }
    }
}

impl PartialOrd for Vertex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Vertex {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Vertex::LogLine(a), Vertex::LogLine(b)) => a.cmp(b),
            (Vertex::UniqueId(a), Vertex::UniqueId(b)) => a.cmp(b),
            (Vertex::Tag(a), Vertex::Tag(b)) => a.cmp(b),
            _ => self.kind().cmp(&other.kind()),
        }
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vertex::LogLine(v) => write!(
                f,
                "{}: {} '{}' '{}' {}",
                v.line_number, v.line, v.thread_id, v.message, v.time
            ),
            Vertex::UniqueId(v) => write!(f, "<{}>", v.id),
            Vertex::Tag(v) => match &v.thread {
                Some(thread) => write!(f, "<{},{},{}>", v.word, thread, v.time),
                None => write!(f, "<{},{}>", v.word, v.time),
            },
        }
    }
}
