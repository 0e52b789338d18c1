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

//! AST → compiled semex, against a concrete graph.

use crate::ast::SemexAst;
use crate::filters::{FilterTable, ANYTHING_FILTER};
use crate::semex::{ConcatSemex, DisjunctSemex, FilterSemex, Semex, StarSemex, TrivialSemex};
use semgraph_core::{Result, SemgraphError};
use semgraph_graph::{LogGraph, Transition};
use std::sync::Arc;

/// Expected walk length used for stars when no other length is configured.
pub const DEFAULT_STAR_LENGTH: f64 = 3.0;

/// Compile an AST into a semex bound to `graph`/`transition`. Base names
/// resolve through `filters`, except [`ANYTHING_FILTER`], which compiles
/// to the identity.
pub fn ast_to_semex(
    ast: &SemexAst,
    graph: &LogGraph,
    transition: &Arc<Transition>,
    filters: &FilterTable,
    star_length: f64,
) -> Result<Arc<Semex>> {
    let semex = match ast {
        SemexAst::Base(name) if name == ANYTHING_FILTER => TrivialSemex::new(graph.node_count()),
        SemexAst::Base(name) => {
            let filter = filters
                .get(name)
                .ok_or_else(|| SemgraphError::UnknownFilter(name.clone()))?;
            FilterSemex::from_fn(name.clone(), graph, |v| filter(v))
        }
        SemexAst::Concat(a, b) => ConcatSemex::new(
            Arc::clone(transition),
            ast_to_semex(a, graph, transition, filters, star_length)?,
            ast_to_semex(b, graph, transition, filters, star_length)?,
        ),
        SemexAst::Disjunct(a, b) => DisjunctSemex::new(
            ast_to_semex(a, graph, transition, filters, star_length)?,
            ast_to_semex(b, graph, transition, filters, star_length)?,
        ),
        SemexAst::Star(inner) => StarSemex::new(
            Arc::clone(transition),
            ast_to_semex(inner, graph, transition, filters, star_length)?,
            star_length,
        ),
    };
    Ok(Arc::new(semex))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_semex;
    use chrono::NaiveDate;
    use semgraph_core::Vertex;
    use semgraph_graph::{EdgeKind, GraphBuilder};

    fn mixed_graph() -> (LogGraph, Arc<Transition>) {
        let ts = NaiveDate::from_ymd_opt(2012, 9, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let mut b = GraphBuilder::new();
        let line = b.push_vertex(Vertex::log_line("hello", "hello", 1, "threadid", ts));
        let id = b.push_vertex(Vertex::unique_id("ok"));
        b.add_edge(line, id, 1.0, EdgeKind::DataToMeta);
        b.add_edge(id, line, 1.0, EdgeKind::MetaToData);
        let g = b.build();
        let t = Arc::new(Transition::from_graph(&g));
        (g, t)
    }

    fn compile(text: &str) -> Result<Arc<Semex>> {
        let (g, t) = mixed_graph();
        let ast = parse_semex(text)?;
        ast_to_semex(&ast, &g, &t, &FilterTable::with_defaults(), DEFAULT_STAR_LENGTH)
    }

    #[test]
    fn anything_compiles_to_trivial() {
        let semex = compile("anything").unwrap();
        assert!(matches!(&*semex, Semex::Trivial(_)));
    }

    #[test]
    fn named_filter_compiles_to_diagonal() {
        let semex = compile("logline").unwrap();
        let Semex::Filter(f) = &*semex else {
            panic!("expected a filter");
        };
        assert_eq!(f.weights().to_vec(), vec![1.0, 0.0]);
    }

    #[test]
    fn combinators_map_one_to_one() {
        assert!(matches!(&*compile("logline id").unwrap(), Semex::Concat(_)));
        assert!(matches!(&*compile("logline | id").unwrap(), Semex::Disjunct(_)));
        assert!(matches!(&*compile("anything*").unwrap(), Semex::Star(_)));
    }

    #[test]
    fn unknown_filter_is_an_error() {
        assert!(matches!(
            compile("dog"),
            Err(SemgraphError::UnknownFilter(name)) if name == "dog"
        ));
    }

    #[test]
    fn compiled_semex_prints_its_source_shape() {
        assert_eq!(compile("logline tag*").unwrap().to_string(), "(logline tag*)");
    }
}
