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

//! Graph construction against literal edge tables.

use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use semgraph_core::{parse_log, GraphConfig, Vertex};
use semgraph_graph::{build_log_graph, EdgeKind, GraphBuilder, LogGraph};

/// Config whose tag-chain weighting is identically 1.0.
fn flat_config() -> GraphConfig {
    GraphConfig {
        time_decay: 0.0,
        ..GraphConfig::default()
    }
}

fn dt(minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2012, 9, 1)
        .unwrap()
        .and_hms_milli_opt(3, minute, 20, 305)
        .unwrap()
}

/// Assert a directed edge exists with the given weight and kind.
fn assert_edge(g: &LogGraph, from: &Vertex, to: &Vertex, weight: f64, kind: EdgeKind) {
    let from_idx = g.index_of(from).expect("source vertex in graph");
    let to_idx = g.index_of(to).expect("target vertex in graph");
    let edge = g
        .edges_from(from_idx)
        .iter()
        .find(|e| e.target == to_idx)
        .unwrap_or_else(|| panic!("missing edge {from} -> {to}"));
    assert!(
        (edge.weight - weight).abs() < 1e-12,
        "edge {from} -> {to}: weight {} != {weight}",
        edge.weight
    );
    assert_eq!(edge.kind, kind, "edge {from} -> {to}: wrong kind");
}

#[test]
fn one_line_one_tag() {
    let parsed = parse_log(["2012-09-01 03:21:20,305 INFO  [MyThread9] foo\n"]);
    let g = build_log_graph(&parsed, &flat_config());

    let line = Vertex::LogLine(parsed.lines[0].clone());
    let tag = Vertex::tag("foo", dt(21));

    assert_eq!(g.node_count(), 2);
    assert_eq!(g.edge_count(), 2);
    assert_edge(&g, &line, &tag, 1.0, EdgeKind::DataToMeta);
    assert_edge(&g, &tag, &line, 1.0, EdgeKind::MetaToData);
}

#[test]
fn two_lines_sharing_a_tag() {
    let parsed = parse_log([
        "2012-09-01 03:21:20,305 INFO  [MyThread9] foo\n",
        "2012-09-01 03:22:20,305 INFO  [MyThread10] foo\n",
    ]);
    let g = build_log_graph(&parsed, &flat_config());

    let line1 = Vertex::LogLine(parsed.lines[0].clone());
    let line2 = Vertex::LogLine(parsed.lines[1].clone());
    let tag1 = Vertex::tag("foo", dt(21));
    let tag2 = Vertex::tag("foo", dt(22));

    assert_eq!(g.node_count(), 4);
    assert_eq!(g.edge_count(), 8);

    // every edge of the expected table, each normalized to 0.5
    assert_edge(&g, &line1, &tag1, 0.5, EdgeKind::DataToMeta);
    assert_edge(&g, &tag1, &line1, 0.5, EdgeKind::MetaToData);
    assert_edge(&g, &line2, &tag2, 0.5, EdgeKind::DataToMeta);
    assert_edge(&g, &tag2, &line2, 0.5, EdgeKind::MetaToData);
    assert_edge(&g, &tag1, &tag2, 0.5, EdgeKind::MetaToMeta);
    assert_edge(&g, &tag2, &tag1, 0.5, EdgeKind::MetaToMeta);
    assert_edge(&g, &line1, &line2, 0.5, EdgeKind::AdjacentNext);
    assert_edge(&g, &line2, &line1, 0.5, EdgeKind::AdjacentPrev);
}

#[test]
fn two_lines_sharing_an_id() {
    let parsed = parse_log([
        "2012-09-01 03:21:20,305 INFO  [MyThread9] urn:9\n",
        "2012-09-01 03:22:20,305 INFO  [MyThread10] urn:9\n",
    ]);
    let g = build_log_graph(&parsed, &flat_config());

    let line1 = Vertex::LogLine(parsed.lines[0].clone());
    let line2 = Vertex::LogLine(parsed.lines[1].clone());
    let id = Vertex::unique_id("urn:9");

    assert_eq!(g.node_count(), 3);
    assert_eq!(g.edge_count(), 6);

    assert_edge(&g, &line1, &id, 0.5, EdgeKind::DataToMeta);
    assert_edge(&g, &id, &line1, 0.5, EdgeKind::MetaToData);
    assert_edge(&g, &line2, &id, 0.5, EdgeKind::DataToMeta);
    assert_edge(&g, &id, &line2, 0.5, EdgeKind::MetaToData);
    assert_edge(&g, &line1, &line2, 0.5, EdgeKind::AdjacentNext);
    assert_edge(&g, &line2, &line1, 0.5, EdgeKind::AdjacentPrev);
}

#[test]
fn thread_scoped_tags_stay_separate() {
    let config = GraphConfig {
        scope_tags_by_thread: true,
        time_decay: 0.0,
        ..GraphConfig::default()
    };
    let parsed = parse_log([
        "2012-09-01 03:21:20,305 INFO  [MyThread9] foo\n",
        "2012-09-01 03:22:20,305 INFO  [MyThread10] foo\n",
    ]);
    let g = build_log_graph(&parsed, &config);

    // two scoped tag vertices, never chained: no MetaToMeta edges at all
    assert_eq!(g.node_count(), 4);
    assert_eq!(g.edge_count(), 6);
    for idx in 0..g.node_count() {
        for edge in g.edges_from(idx) {
            assert_ne!(edge.kind, EdgeKind::MetaToMeta);
        }
    }
    let tag1 = Vertex::scoped_tag("foo", dt(21), "MyThread9");
    assert!(g.index_of(&tag1).is_some());
}

#[test]
fn tag_chain_weight_decays_with_time() {
    let config = GraphConfig {
        time_decay: 0.01,
        ..GraphConfig::default()
    };
    let parsed = parse_log([
        "2012-09-01 03:21:20,305 INFO  [MyThread9] foo\n",
        "2012-09-01 03:22:20,305 INFO  [MyThread10] foo\n",
    ]);
    let g = build_log_graph(&parsed, &config);

    let tag1 = g.index_of(&Vertex::tag("foo", dt(21))).unwrap();
    let tag2 = g.index_of(&Vertex::tag("foo", dt(22))).unwrap();
    let chain = g
        .edges_from(tag1)
        .iter()
        .find(|e| e.target == tag2)
        .unwrap();
    let back = g
        .edges_from(tag1)
        .iter()
        .find(|e| e.kind == EdgeKind::MetaToData)
        .unwrap();
    // 60s apart at decay 0.01: chain weight exp(-0.6) of the base, so after
    // row normalization the line edge outweighs the chain edge
    assert!(chain.weight < back.weight);
    let expected_ratio = (-0.6f64).exp();
    assert!((chain.weight / back.weight - expected_ratio).abs() < 1e-9);
}

proptest! {
    /// Every vertex's outgoing weights sum to 1.0 after normalization, or
    /// to 0.0 when it has no outgoing edges.
    #[test]
    fn rows_normalize_to_one_or_zero(
        edges in proptest::collection::vec((0usize..12, 0usize..12, 0.01f64..10.0), 0..60)
    ) {
        let ts = NaiveDate::from_ymd_opt(2012, 9, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let mut b = GraphBuilder::new();
        for i in 0..12 {
            b.push_vertex(Vertex::tag(format!("w{i}"), ts));
        }
        for (from, to, weight) in edges {
            b.add_edge(from, to, weight, EdgeKind::MetaToMeta);
            b.add_edge(to, from, weight, EdgeKind::MetaToMeta);
        }
        let g = b.build();
        for idx in 0..g.node_count() {
            let sum = g.out_weight_sum(idx);
            prop_assert!(
                sum == 0.0 || (sum - 1.0).abs() < 1e-9,
                "row {} sums to {}", idx, sum
            );
        }
    }
}
