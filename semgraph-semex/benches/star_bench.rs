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

//! Star operator benchmarks: one matrix-free application (a full GMRES
//! solve) against graph size.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::Array1;
use semgraph_core::Vertex;
use semgraph_graph::{EdgeKind, GraphBuilder, Transition};
use semgraph_semex::{StarSemex, TrivialSemex};
use std::sync::Arc;

fn ring_transition(n: usize) -> Arc<Transition> {
    let ts = chrono::NaiveDate::from_ymd_opt(2012, 9, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let mut b = GraphBuilder::new();
    for i in 0..n {
        b.push_vertex(Vertex::tag(format!("w{i}"), ts));
    }
    for i in 0..n {
        b.add_edge(i, (i + 1) % n, 1.0, EdgeKind::MetaToMeta);
        b.add_edge((i + 1) % n, i, 1.0, EdgeKind::MetaToMeta);
    }
    Arc::new(Transition::from_graph(&b.build()))
}

fn bench_star_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("star_apply");
    for &n in &[50usize, 200, 800] {
        let transition = ring_transition(n);
        let star = StarSemex::new(Arc::clone(&transition), Arc::new(TrivialSemex::new(n)), 3.0);
        let operator = star.compile_operator().expect("contractive star");
        let probe = Array1::from_elem(n, 1.0);
        group.bench_function(format!("n{n}"), |b| {
            b.iter(|| operator.apply(black_box(&probe)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_star_apply);
criterion_main!(benches);
