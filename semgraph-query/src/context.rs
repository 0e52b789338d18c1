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

//! Session state: the frozen graph, the current position, and the semex
//! registry.
//!
//! Navigation produces a [`NavigationView`]: the new position's neighbors
//! (deterministically ordered, so neighbor indices are stable) plus every
//! active semex re-evaluated anchored at each of those neighbors. That
//! re-evaluation is the main recurring cost of an interactive step — each
//! anchored star application runs a fresh solve — and it all happens
//! synchronously inside the command.

use crate::node_ref::NodeRef;
use crate::porcelain::{anchored_at, most_likely_endpoints, DEFAULT_NUM_CHOOSE};
use crate::registry::SemexRegistry;
use semgraph_core::{Result, SemgraphError};
use semgraph_graph::{EdgeKind, LogGraph, Transition};
use std::sync::Arc;
use tracing::debug;

/// One entry of a position's neighbor listing.
#[derive(Debug, Clone, Copy)]
pub struct Neighbor {
    /// Arena index of the neighboring vertex.
    pub index: usize,
    /// Normalized transition weight from the position to this neighbor.
    pub weight: f64,
    pub kind: EdgeKind,
}

/// Ranked endpoints for one active semex anchored at one neighbor.
#[derive(Debug, Clone)]
pub struct RankedEndpoints {
    pub name: String,
    /// The neighbor the semex was anchored at.
    pub anchor: usize,
    /// `(node_index, weight)` pairs, weight descending.
    pub endpoints: Vec<(usize, f64)>,
}

/// Everything the display layer needs after a navigation step. Raw indices
/// and weights only; formatting belongs to the shell.
#[derive(Debug, Clone)]
pub struct NavigationView {
    pub position: usize,
    /// Adjacent-previous log line, when the position has one.
    pub previous: Option<usize>,
    /// Adjacent-next log line, when the position has one.
    pub next: Option<usize>,
    pub neighbors: Vec<Neighbor>,
    pub rankings: Vec<RankedEndpoints>,
}

/// The state one interactive session works with.
pub struct Context {
    graph: Arc<LogGraph>,
    transition: Arc<Transition>,
    position: usize,
    pub registry: SemexRegistry,
    num_choose: usize,
}

impl Context {
    pub fn new(graph: Arc<LogGraph>, position: usize) -> Self {
        assert!(position < graph.node_count(), "position out of range");
        let transition = Arc::new(Transition::from_graph(&graph));
        Self {
            graph,
            transition,
            position,
            registry: SemexRegistry::new(),
            num_choose: DEFAULT_NUM_CHOOSE,
        }
    }

    /// Override how many endpoints each ranking keeps.
    pub fn with_num_choose(mut self, num_choose: usize) -> Self {
        self.num_choose = num_choose;
        self
    }

    pub fn graph(&self) -> &Arc<LogGraph> {
        &self.graph
    }

    pub fn transition(&self) -> &Arc<Transition> {
        &self.transition
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// The current position's neighbors in their stable display order.
    pub fn neighbors(&self) -> Vec<Neighbor> {
        self.graph
            .sorted_neighbors(self.position)
            .into_iter()
            .map(|edge| Neighbor {
                index: edge.target,
                weight: edge.weight,
                kind: edge.kind,
            })
            .collect()
    }

    /// Resolve a node reference against the current position.
    pub fn resolve_node_ref(&self, node_ref: NodeRef) -> Result<usize> {
        match node_ref {
            NodeRef::Current => Ok(self.position),
            NodeRef::Neighbor(idx) => {
                let neighbors = self.neighbors();
                neighbors
                    .get(idx)
                    .map(|n| n.index)
                    .ok_or(SemgraphError::NeighborOutOfBounds {
                        index: idx,
                        count: neighbors.len(),
                    })
            }
        }
    }

    /// Move to the neighbor at the given display index and re-evaluate.
    pub fn go_to_neighbor(&mut self, idx: usize) -> Result<NavigationView> {
        let target = self.resolve_node_ref(NodeRef::Neighbor(idx))?;
        self.go_to(target)
    }

    /// Move straight to a vertex index and re-evaluate.
    pub fn go_to(&mut self, index: usize) -> Result<NavigationView> {
        assert!(index < self.graph.node_count(), "position out of range");
        self.position = index;
        self.view()
    }

    /// Build the display view for the current position: neighbors plus
    /// every active semex anchored at each neighbor.
    pub fn view(&self) -> Result<NavigationView> {
        let neighbors = self.neighbors();

        let mut previous = None;
        let mut next = None;
        for edge in self.graph.edges_from(self.position) {
            match edge.kind {
                EdgeKind::AdjacentPrev => previous = Some(edge.target),
                EdgeKind::AdjacentNext => next = Some(edge.target),
                _ => {}
            }
        }

        let mut rankings = Vec::new();
        for (name, entry) in self.registry.active() {
            for neighbor in &neighbors {
                let anchored = anchored_at(&self.transition, &entry.semex, neighbor.index);
                let endpoints = most_likely_endpoints(&anchored, self.num_choose)?;
                rankings.push(RankedEndpoints {
                    name: name.to_string(),
                    anchor: neighbor.index,
                    endpoints,
                });
            }
        }
        debug!(
            position = self.position,
            neighbors = neighbors.len(),
            rankings = rankings.len(),
            "rebuilt navigation view"
        );

        Ok(NavigationView {
            position: self.position,
            previous,
            next,
            neighbors,
            rankings,
        })
    }
}
