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

//! Semgraph Graph
//!
//! The frozen log graph (vertex arena + weighted adjacency), its builders,
//! the CSR transition matrix derived from it, and the linear-operator
//! abstraction the semex algebra composes over.

pub mod build;
pub mod edge;
pub mod graph;
pub mod linop;
pub mod transition;

pub use build::build_log_graph;
pub use edge::{Edge, EdgeKind};
pub use graph::{GraphBuilder, LogGraph};
pub use linop::LinOp;
pub use transition::Transition;
