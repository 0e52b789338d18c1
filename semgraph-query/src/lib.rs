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

//! Semgraph Query
//!
//! The porcelain over the semex algebra: anchoring a semex at a concrete
//! start node, ranking walk endpoints, the named registry of active
//! semexes, and the navigation context the interactive shell drives.

pub mod context;
pub mod node_ref;
pub mod porcelain;
pub mod registry;

pub use context::{Context, NavigationView, Neighbor, RankedEndpoints};
pub use node_ref::{parse_node_ref, NodeRef};
pub use porcelain::{anchored_at, most_likely_endpoints, DEFAULT_NUM_CHOOSE};
pub use registry::{ActiveSemex, SemexRegistry};
