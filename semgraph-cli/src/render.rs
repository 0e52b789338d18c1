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

//! Plain-text rendering of vertices, neighbor listings and rankings.

use semgraph_graph::LogGraph;
use semgraph_query::{NavigationView, SemexRegistry};

const LINE_WIDTH: usize = 80;

/// Truncate to a display width, marking the cut.
pub fn shorten(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

pub fn print_location(graph: &LogGraph, view: &NavigationView) {
    if let Some(prev) = view.previous {
        println!("{}", shorten(&graph.vertex(prev).to_string(), LINE_WIDTH));
    }
    println!("{}", shorten(&graph.vertex(view.position).to_string(), LINE_WIDTH));
    if let Some(next) = view.next {
        println!("{}", shorten(&graph.vertex(next).to_string(), LINE_WIDTH));
    }
}

pub fn print_registry(registry: &SemexRegistry) {
    if registry.is_empty() {
        return;
    }
    println!("Semexes:");
    for (name, entry) in registry.iter() {
        let marker = if entry.active { "on " } else { "off" };
        println!("  [{marker}] {name}: {}", entry.source);
    }
}

pub fn print_neighbors(graph: &LogGraph, view: &NavigationView) {
    println!("{}", "_".repeat(10));
    for (i, neighbor) in view.neighbors.iter().enumerate() {
        println!(
            "{i} {:.6} {}",
            neighbor.weight,
            shorten(&graph.vertex(neighbor.index).to_string(), LINE_WIDTH)
        );
    }
}

pub fn print_rankings(graph: &LogGraph, view: &NavigationView) {
    for ranking in &view.rankings {
        println!(
            "{} @ {}:",
            ranking.name,
            shorten(&graph.vertex(ranking.anchor).to_string(), 40)
        );
        for (index, weight) in &ranking.endpoints {
            println!(
                "  {weight:.3e} {}",
                shorten(&graph.vertex(*index).to_string(), LINE_WIDTH - 12)
            );
        }
    }
}

pub fn print_view(graph: &LogGraph, view: &NavigationView, registry: &SemexRegistry) {
    print_location(graph, view);
    print_registry(registry);
    print_neighbors(graph, view);
    print_rankings(graph, view);
}
