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

//! Construction of the log graph from parsed log output.
//!
//! Structure:
//! - one data vertex per log line, chained to its neighbors in file order;
//! - one id vertex per unique id, linked to every line that mentions it;
//! - one tag vertex per *occurrence* of a tag, linked to its line, with
//!   consecutive occurrences chained under a time-decayed weight.
//!
//! Tag and id maps are iterated in sorted key order so dense indices are
//! reproducible run to run.

use crate::edge::EdgeKind;
use crate::graph::{GraphBuilder, LogGraph};
use chrono::NaiveDateTime;
use semgraph_core::{GraphConfig, ParsedLog, Vertex};

/// Build the frozen, row-normalized log graph.
pub fn build_log_graph(parsed: &ParsedLog, config: &GraphConfig) -> LogGraph {
    let mut builder = GraphBuilder::new();

    let line_indices: Vec<usize> = parsed
        .lines
        .iter()
        .map(|line| builder.push_vertex(Vertex::LogLine(line.clone())))
        .collect();

    // adjacent log lines
    for pair in line_indices.windows(2) {
        builder.add_edge(
            pair[0],
            pair[1],
            config.adjacent_line_weight,
            EdgeKind::AdjacentNext,
        );
        builder.add_edge(
            pair[1],
            pair[0],
            config.adjacent_line_weight,
            EdgeKind::AdjacentPrev,
        );
    }

    // one vertex per id, star-linked to its lines
    for (id, lines) in &parsed.id_map {
        let id_idx = builder.push_vertex(Vertex::unique_id(id.clone()));
        for &li in lines {
            builder.add_edge_pair(
                line_indices[li],
                id_idx,
                config.line_id_weight,
                EdgeKind::DataToMeta,
                EdgeKind::MetaToData,
            );
        }
    }

    // one vertex per tag occurrence, chained through time
    for (word, lines) in &parsed.tag_map {
        if config.scope_tags_by_thread {
            // chain separately per thread, preserving occurrence order
            let mut threads: Vec<&str> = lines
                .iter()
                .map(|&li| parsed.lines[li].thread_id.as_str())
                .collect();
            threads.sort_unstable();
            threads.dedup();
            for thread in threads {
                let scoped: Vec<usize> = lines
                    .iter()
                    .copied()
                    .filter(|&li| parsed.lines[li].thread_id == thread)
                    .collect();
                add_tag_chain(
                    &mut builder,
                    parsed,
                    config,
                    &line_indices,
                    word,
                    &scoped,
                    Some(thread),
                );
            }
        } else {
            add_tag_chain(
                &mut builder,
                parsed,
                config,
                &line_indices,
                word,
                lines,
                None,
            );
        }
    }

    builder.build()
}

fn add_tag_chain(
    builder: &mut GraphBuilder,
    parsed: &ParsedLog,
    config: &GraphConfig,
    line_indices: &[usize],
    word: &str,
    occurrences: &[usize],
    thread: Option<&str>,
) {
    let mut prev: Option<(usize, NaiveDateTime)> = None;
    for &li in occurrences {
        let time = parsed.lines[li].time;
        let vertex = match thread {
            Some(t) => Vertex::scoped_tag(word, time, t),
            None => Vertex::tag(word, time),
        };
        let tag_idx = builder.push_vertex(vertex);

        if let Some((prev_idx, prev_time)) = prev {
            let weight = config.time_weighting(time, prev_time);
            builder.add_edge_pair(
                tag_idx,
                prev_idx,
                weight,
                EdgeKind::MetaToMeta,
                EdgeKind::MetaToMeta,
            );
        }
        builder.add_edge_pair(
            line_indices[li],
            tag_idx,
            config.line_tag_weight,
            EdgeKind::DataToMeta,
            EdgeKind::MetaToData,
        );
        prev = Some((tag_idx, time));
    }
}
