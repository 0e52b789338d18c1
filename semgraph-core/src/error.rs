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

//! Error types shared across the semgraph workspace.
//!
//! Dimension mismatches between operands are deliberately *not* represented
//! here: an operator built over one graph applied to another is a programmer
//! error and fails via assertion at construction time.

use thiserror::Error;

/// Workspace-wide error type.
#[derive(Error, Debug)]
pub enum SemgraphError {
    /// The iterative solve behind a star operator ran out of its iteration
    /// budget. The offending semex is named in its surface syntax.
    #[error("semex '{semex}': linear solve did not converge after {iterations} iterations (residual {residual:.3e})")]
    SolveDidNotConverge {
        semex: String,
        iterations: usize,
        residual: f64,
    },

    /// The geometric series behind a star operator does not contract; the
    /// chosen length or inner filter is degenerate for this graph.
    #[error("semex '{semex}': spectral radius estimate {radius:.4} exceeds stability limit {limit}")]
    SpectralRadiusExceeded {
        semex: String,
        radius: f64,
        limit: f64,
    },

    /// Dense inversion hit a pivot below working precision.
    #[error("matrix is singular to working precision")]
    SingularMatrix,

    /// Registry lookup for a name that was never added (or already removed).
    #[error("no semex named '{0}'")]
    NameNotFound(String),

    /// A neighbor reference past the end of the current position's
    /// neighbor list.
    #[error("neighbor index {index} out of bounds ({count} neighbors)")]
    NeighborOutOfBounds { index: usize, count: usize },

    /// Surface-syntax errors: semexes, node references, commands.
    #[error("parse error: {0}")]
    Parse(String),

    /// A semex names a filter the filter table does not know.
    #[error("unknown filter '{0}'")]
    UnknownFilter(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, SemgraphError>;
