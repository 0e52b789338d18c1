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

//! The frozen log graph and its generic builder.
//!
//! Vertices live in an arena; a vertex's dense index is its position in
//! that arena, fixed at build time. Outgoing weights are normalized to sum
//! to 1.0 when the graph is built (vertices without outgoing edges keep
//! sum 0). Connectivity is symmetric: construction always inserts edge
//! pairs, so every (u,v) has a (v,u) — weights need not match.

use crate::edge::{Edge, EdgeKind};
use semgraph_core::Vertex;
use tracing::info;

/// An immutable directed multigraph over log-derived vertices.
#[derive(Debug, Clone)]
pub struct LogGraph {
    vertices: Vec<Vertex>,
    adjacency: Vec<Vec<Edge>>,
}

impl LogGraph {
    pub fn node_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    pub fn vertex(&self, index: usize) -> &Vertex {
        &self.vertices[index]
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Outgoing edges in insertion order.
    pub fn edges_from(&self, index: usize) -> &[Edge] {
        &self.adjacency[index]
    }

    /// Outgoing edges sorted by target vertex (kind tag, then per-kind
    /// fields, then target index). This is the order neighbor indices in
    /// the query layer refer to, so it must be deterministic.
    pub fn sorted_neighbors(&self, index: usize) -> Vec<Edge> {
        let mut edges = self.adjacency[index].clone();
        edges.sort_by(|a, b| {
            self.vertices[a.target]
                .cmp(&self.vertices[b.target])
                .then(a.target.cmp(&b.target))
        });
        edges
    }

    /// Linear scan for a vertex's index. Intended for tests and one-off
    /// lookups, not hot paths.
    pub fn index_of(&self, vertex: &Vertex) -> Option<usize> {
        self.vertices.iter().position(|v| v == vertex)
    }

    pub fn out_weight_sum(&self, index: usize) -> f64 {
        self.adjacency[index].iter().map(|e| e.weight).sum()
    }
}

/// Mutable accumulator for a [`LogGraph`]. `build` normalizes and freezes.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    vertices: Vec<Vertex>,
    adjacency: Vec<Vec<Edge>>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex, returning its dense index.
    pub fn push_vertex(&mut self, vertex: Vertex) -> usize {
        self.vertices.push(vertex);
        self.adjacency.push(Vec::new());
        self.vertices.len() - 1
    }

    /// Add one directed edge. Weights must be non-negative; indices must
    /// refer to vertices already pushed.
    pub fn add_edge(&mut self, from: usize, to: usize, weight: f64, kind: EdgeKind) {
        assert!(from < self.vertices.len(), "edge source out of range");
        assert!(to < self.vertices.len(), "edge target out of range");
        assert!(weight >= 0.0, "edge weights must be non-negative");
        self.adjacency[from].push(Edge {
            target: to,
            weight,
            kind,
        });
    }

    /// Add a forward/backward edge pair with one weight.
    pub fn add_edge_pair(
        &mut self,
        a: usize,
        b: usize,
        weight: f64,
        kind_ab: EdgeKind,
        kind_ba: EdgeKind,
    ) {
        self.add_edge(a, b, weight, kind_ab);
        self.add_edge(b, a, weight, kind_ba);
    }

    /// Normalize outgoing weights row by row and freeze the graph.
    pub fn build(mut self) -> LogGraph {
        for edges in &mut self.adjacency {
            let total: f64 = edges.iter().map(|e| e.weight).sum();
            if total > 0.0 {
                let inv = 1.0 / total;
                for edge in edges.iter_mut() {
                    edge.weight *= inv;
                }
            }
        }
        let graph = LogGraph {
            vertices: self.vertices,
            adjacency: self.adjacency,
        };
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "froze graph"
        );
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use chrono::NaiveDateTime;

    fn ts(secs: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2012, 9, 1)
            .unwrap()
            .and_hms_opt(0, 0, secs)
            .unwrap()
    }

    #[test]
    fn build_normalizes_rows() {
        let mut b = GraphBuilder::new();
        let a = b.push_vertex(Vertex::tag("a", ts(0)));
        let c = b.push_vertex(Vertex::tag("c", ts(1)));
        let d = b.push_vertex(Vertex::tag("d", ts(2)));
        b.add_edge(a, c, 3.0, EdgeKind::MetaToMeta);
        b.add_edge(a, d, 1.0, EdgeKind::MetaToMeta);
        b.add_edge(c, a, 2.0, EdgeKind::MetaToMeta);
        let g = b.build();

        assert!((g.out_weight_sum(a) - 1.0).abs() < 1e-12);
        assert_eq!(g.edges_from(a)[0].weight, 0.75);
        assert_eq!(g.edges_from(a)[1].weight, 0.25);
        assert_eq!(g.edges_from(c)[0].weight, 1.0);
        // no outgoing edges stays all-zero
        assert_eq!(g.out_weight_sum(d), 0.0);
    }

    #[test]
    fn sorted_neighbors_orders_by_vertex() {
        let mut b = GraphBuilder::new();
        let ll = b.push_vertex(Vertex::log_line("x", "x", 0, "T", ts(0)));
        let tag = b.push_vertex(Vertex::tag("b", ts(0)));
        let id = b.push_vertex(Vertex::unique_id("urn:1"));
        // insert in an order that differs from vertex order
        b.add_edge(ll, tag, 1.0, EdgeKind::DataToMeta);
        b.add_edge(ll, id, 1.0, EdgeKind::DataToMeta);
        let g = b.build();

        let nbrs = g.sorted_neighbors(ll);
        // ids sort before tags (kind order: LogLine < UniqueId < Tag)
        assert_eq!(nbrs[0].target, id);
        assert_eq!(nbrs[1].target, tag);
    }
}
