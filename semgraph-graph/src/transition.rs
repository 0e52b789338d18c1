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

//! The transition matrix: row-normalized edge weights in CSR form.
//!
//! Derived once from a frozen graph and never mutated. Rows follow the
//! arena order; columns within a row are sorted so the layout is
//! deterministic. Parallel edges between the same pair are accumulated
//! into one entry.

use crate::graph::LogGraph;
use crate::linop::LinOp;
use ndarray::{Array1, Array2};
use std::sync::Arc;

/// Compressed sparse row transition matrix over graph vertices.
#[derive(Debug, Clone)]
pub struct Transition {
    dim: usize,
    row_ptr: Vec<usize>,
    col_idx: Vec<usize>,
    weights: Vec<f64>,
}

impl Transition {
    pub fn from_graph(graph: &LogGraph) -> Self {
        let dim = graph.node_count();
        let mut row_ptr = Vec::with_capacity(dim + 1);
        let mut col_idx = Vec::new();
        let mut weights = Vec::new();

        row_ptr.push(0);
        for row in 0..dim {
            let mut entries: Vec<(usize, f64)> = Vec::with_capacity(graph.edges_from(row).len());
            for edge in graph.edges_from(row) {
                entries.push((edge.target, edge.weight));
            }
            entries.sort_by_key(|&(col, _)| col);
            // merge parallel edges
            let mut merged: Vec<(usize, f64)> = Vec::with_capacity(entries.len());
            for (col, w) in entries {
                match merged.last_mut() {
                    Some((last_col, last_w)) if *last_col == col => *last_w += w,
                    _ => merged.push((col, w)),
                }
            }
            for (col, w) in merged {
                col_idx.push(col);
                weights.push(w);
            }
            row_ptr.push(col_idx.len());
        }

        Self {
            dim,
            row_ptr,
            col_idx,
            weights,
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.col_idx.len()
    }

    /// Entries of one row as `(column, weight)` pairs.
    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let range = self.row_ptr[row]..self.row_ptr[row + 1];
        self.col_idx[range.clone()]
            .iter()
            .copied()
            .zip(self.weights[range].iter().copied())
    }

    /// One transition step on a row-vector distribution: `d ↦ d·T`.
    pub fn propagate(&self, dist: &Array1<f64>) -> Array1<f64> {
        assert_eq!(dist.len(), self.dim, "distribution/transition dimension mismatch");
        let mut out = Array1::zeros(self.dim);
        for row in 0..self.dim {
            let mass = dist[row];
            if mass == 0.0 {
                continue;
            }
            for (col, weight) in self.row(row) {
                out[col] += mass * weight;
            }
        }
        out
    }

    /// Dense materialization; verification paths and small graphs only.
    pub fn to_dense(&self) -> Array2<f64> {
        let mut dense = Array2::zeros((self.dim, self.dim));
        for row in 0..self.dim {
            for (col, weight) in self.row(row) {
                dense[[row, col]] = weight;
            }
        }
        dense
    }

    /// The operator form of one transition step.
    pub fn operator(self: &Arc<Self>) -> LinOp {
        let matrix = Arc::clone(self);
        LinOp::new(self.dim, move |v| Ok(matrix.propagate(v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::EdgeKind;
    use crate::graph::GraphBuilder;
    use chrono::NaiveDate;
    use ndarray::array;
    use semgraph_core::Vertex;

    fn tiny_graph() -> LogGraph {
        let ts = NaiveDate::from_ymd_opt(2012, 9, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let mut b = GraphBuilder::new();
        let a = b.push_vertex(Vertex::tag("a", ts));
        let c = b.push_vertex(Vertex::tag("c", ts));
        let d = b.push_vertex(Vertex::tag("d", ts));
        b.add_edge(a, c, 1.0, EdgeKind::MetaToMeta);
        b.add_edge(a, d, 1.0, EdgeKind::MetaToMeta);
        b.add_edge(c, a, 1.0, EdgeKind::MetaToMeta);
        b.add_edge(d, a, 1.0, EdgeKind::MetaToMeta);
        b.build()
    }

    #[test]
    fn propagate_matches_dense() {
        let t = Transition::from_graph(&tiny_graph());
        let dist = array![0.5, 0.25, 0.25];
        let sparse = t.propagate(&dist);
        let dense = dist.dot(&t.to_dense());
        for (a, b) in sparse.iter().zip(dense.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn propagate_splits_mass_by_weight() {
        let t = Transition::from_graph(&tiny_graph());
        let out = t.propagate(&array![1.0, 0.0, 0.0]);
        assert_eq!(out, array![0.0, 0.5, 0.5]);
    }

    #[test]
    fn operator_wraps_propagate() {
        let t = Arc::new(Transition::from_graph(&tiny_graph()));
        let op = t.operator();
        let dist = array![0.0, 1.0, 0.0];
        assert_eq!(op.apply(&dist).unwrap(), t.propagate(&dist));
    }
}
