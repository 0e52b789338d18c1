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

//! "Start here" queries and endpoint ranking.
//!
//! Anchoring builds `Concat(one-hot(start), semex)`: the seed is baked into
//! the expression, so ranking probes with the all-ones vector and the
//! output reads directly as "weight of walks from the start ending here".

use ndarray::Array1;
use semgraph_core::Result;
use semgraph_graph::Transition;
use semgraph_semex::{ConcatSemex, FilterSemex, Semex};
use std::sync::Arc;

/// Endpoints returned by a ranking unless the caller asks otherwise.
pub const DEFAULT_NUM_CHOOSE: usize = 4;

/// Build `start-node semex`: the given semex with all starting mass at one
/// node.
pub fn anchored_at(transition: &Arc<Transition>, semex: &Arc<Semex>, start: usize) -> Arc<Semex> {
    let seed = Arc::new(FilterSemex::one_hot(transition.dim(), start));
    Arc::new(ConcatSemex::new(
        Arc::clone(transition),
        seed,
        Arc::clone(semex),
    ))
}

/// The `num_choose` heaviest endpoints of the semex's walk distribution,
/// as `(node_index, weight)` pairs, weight descending. Ties break toward
/// the lower node index, so identical inputs always rank identically.
pub fn most_likely_endpoints(semex: &Semex, num_choose: usize) -> Result<Vec<(usize, f64)>> {
    let probe = Array1::from_elem(semex.node_count(), 1.0);
    let values = semex.apply(&probe)?;

    let mut ranked: Vec<(usize, f64)> = values.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.truncate(num_choose);
    Ok(ranked)
}
