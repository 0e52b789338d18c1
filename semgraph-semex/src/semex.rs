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

//! The semex algebra: compiled path-set expressions.
//!
//! Each variant compiles into a matrix (dense, verification path) and into
//! a linear operator (matrix-free, production path); both act on row-vector
//! distributions, `d ↦ d·M`. Operator composition therefore runs in the
//! reverse of matrix-product order; the two forms are kept honest against
//! each other by the algebra tests.
//!
//! Semexes are immutable once built. The one permitted mutation is the
//! operator cache: compiled lazily, set at most once, shared by every
//! later application. Children are reference-counted so a sub-semex reused
//! across expressions carries its compiled operator with it.

use crate::solve::{self, GmresOptions};
use ndarray::{Array1, Array2};
use once_cell::sync::OnceCell;
use semgraph_core::{Result, SemgraphError, Vertex};
use semgraph_graph::{LinOp, LogGraph, Transition};
use std::fmt;
use std::sync::Arc;

/// Contraction guard for the star's geometric series: the spectral radius
/// of `p_go·T·F` must sit at or below this before the solve is trusted.
pub const SPECTRAL_RADIUS_LIMIT: f64 = 0.9;

/// Power-iteration budget for the guard.
const RADIUS_ITERATIONS: usize = 100;

/// A compiled path-set expression.
#[derive(Debug)]
pub enum Semex {
    Trivial(TrivialSemex),
    Filter(FilterSemex),
    Disjunct(DisjunctSemex),
    Concat(ConcatSemex),
    Star(StarSemex),
}

impl Semex {
    /// Dimension of the distributions this semex acts on.
    pub fn node_count(&self) -> usize {
        match self {
            Semex::Trivial(s) => s.nnodes,
            Semex::Filter(s) => s.weights.len(),
            Semex::Disjunct(s) => s.left.node_count(),
            Semex::Concat(s) => s.first.node_count(),
            Semex::Star(s) => s.transition.dim(),
        }
    }

    /// Compile into a dense matrix. Verification path: star inverts a
    /// dense system, so keep this off large graphs.
    pub fn compile_matrix(&self) -> Result<Array2<f64>> {
        match self {
            Semex::Trivial(s) => Ok(Array2::eye(s.nnodes)),
            Semex::Filter(s) => {
                let mut m = Array2::zeros((s.weights.len(), s.weights.len()));
                for (i, w) in s.weights.iter().enumerate() {
                    m[[i, i]] = *w;
                }
                Ok(m)
            }
            Semex::Disjunct(s) => Ok(s.left.compile_matrix()? + s.right.compile_matrix()?),
            Semex::Concat(s) => {
                let m1 = s.first.compile_matrix()?;
                let m2 = s.second.compile_matrix()?;
                Ok(m1.dot(&s.transition.to_dense()).dot(&m2))
            }
            Semex::Star(s) => s.compile_matrix(),
        }
    }

    /// Compile into the operator form, memoized per semex node.
    pub fn compile_operator(&self) -> Result<LinOp> {
        match self {
            Semex::Trivial(s) => s
                .operator
                .get_or_try_init(|| Ok(LinOp::identity(s.nnodes)))
                .cloned(),
            Semex::Filter(s) => s
                .operator
                .get_or_try_init(|| {
                    let weights = s.weights.clone();
                    Ok(LinOp::new(weights.len(), move |v| Ok(v * &weights)))
                })
                .cloned(),
            Semex::Disjunct(s) => s
                .operator
                .get_or_try_init(|| {
                    Ok(s.left.compile_operator()?.add(&s.right.compile_operator()?))
                })
                .cloned(),
            Semex::Concat(s) => s
                .operator
                .get_or_try_init(|| {
                    // operators are transposed relative to matrices, so the
                    // matrix product M1·T·M2 becomes op1, then T, then op2
                    Ok(s.first
                        .compile_operator()?
                        .then(&s.transition.operator())
                        .then(&s.second.compile_operator()?))
                })
                .cloned(),
            Semex::Star(s) => s.operator.get_or_try_init(|| s.build_operator()).cloned(),
        }
    }

    /// Apply to a distribution. Everything except star is direct; star
    /// goes through its compiled operator and can fail (non-contractive
    /// series, non-convergent solve).
    pub fn apply(&self, dist: &Array1<f64>) -> Result<Array1<f64>> {
        match self {
            Semex::Trivial(_) => Ok(dist.clone()),
            Semex::Filter(s) => {
                assert_eq!(dist.len(), s.weights.len(), "distribution dimension mismatch");
                Ok(dist * &s.weights)
            }
            Semex::Disjunct(s) => Ok(s.left.apply(dist)? + s.right.apply(dist)?),
            Semex::Concat(s) => {
                let through_first = s.first.apply(dist)?;
                let stepped = s.transition.propagate(&through_first);
                s.second.apply(&stepped)
            }
            Semex::Star(_) => self.compile_operator()?.apply(dist),
        }
    }
}

impl fmt::Display for Semex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Semex::Trivial(_) => write!(f, "anything"),
            Semex::Filter(s) => write!(f, "{}", s.name),
            Semex::Disjunct(s) => write!(f, "({} | {})", s.left, s.right),
            Semex::Concat(s) => write!(f, "({} {})", s.first, s.second),
            Semex::Star(s) => write!(f, "{}*", s.inner),
        }
    }
}

/// The identity path set: any node, zero edges.
#[derive(Debug)]
pub struct TrivialSemex {
    nnodes: usize,
    operator: OnceCell<LinOp>,
}

impl TrivialSemex {
    pub fn new(nnodes: usize) -> Semex {
        Semex::Trivial(Self {
            nnodes,
            operator: OnceCell::new(),
        })
    }
}

/// A diagonal reweighting: zero-length paths, weighted per node.
#[derive(Debug)]
pub struct FilterSemex {
    name: String,
    weights: Array1<f64>,
    operator: OnceCell<LinOp>,
}

impl FilterSemex {
    /// Evaluate a filter function over the graph arena, in index order.
    pub fn from_fn<F>(name: impl Into<String>, graph: &LogGraph, filter: F) -> Semex
    where
        F: Fn(&Vertex) -> f64,
    {
        let weights = Array1::from_iter(graph.vertices().iter().map(filter));
        Self::from_vector(name, weights)
    }

    /// Wrap an explicit weight vector.
    pub fn from_vector(name: impl Into<String>, weights: Array1<f64>) -> Semex {
        debug_assert!(
            weights.iter().all(|w| *w >= 0.0),
            "filter weights must be non-negative"
        );
        Semex::Filter(Self {
            name: name.into(),
            weights,
            operator: OnceCell::new(),
        })
    }

    /// The seed filter for "start here" queries: all mass at one node.
    pub fn one_hot(nnodes: usize, index: usize) -> Semex {
        assert!(index < nnodes, "one-hot index out of range");
        let mut weights = Array1::zeros(nnodes);
        weights[index] = 1.0;
        Self::from_vector(format!("@{index}"), weights)
    }

    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }
}

/// Union of two path sets. Overlapping paths are counted twice: the
/// operator form is the sum, and ranking semantics downstream rely on
/// additive combination.
#[derive(Debug)]
pub struct DisjunctSemex {
    left: Arc<Semex>,
    right: Arc<Semex>,
    operator: OnceCell<LinOp>,
}

impl DisjunctSemex {
    pub fn new(left: Arc<Semex>, right: Arc<Semex>) -> Semex {
        assert_eq!(
            left.node_count(),
            right.node_count(),
            "disjunct operands must share a node count"
        );
        Semex::Disjunct(Self {
            left,
            right,
            operator: OnceCell::new(),
        })
    }
}

/// Paths from the first operand, one graph transition, paths from the
/// second.
#[derive(Debug)]
pub struct ConcatSemex {
    transition: Arc<Transition>,
    first: Arc<Semex>,
    second: Arc<Semex>,
    operator: OnceCell<LinOp>,
}

impl ConcatSemex {
    pub fn new(transition: Arc<Transition>, first: Arc<Semex>, second: Arc<Semex>) -> Semex {
        assert_eq!(
            first.node_count(),
            second.node_count(),
            "concat operands must share a node count"
        );
        assert_eq!(
            first.node_count(),
            transition.dim(),
            "concat operands must match the transition dimension"
        );
        Semex::Concat(Self {
            transition,
            first,
            second,
            operator: OnceCell::new(),
        })
    }
}

/// Zero or more repetitions of the inner path set, geometrically damped.
///
/// With expected length `L`, stop probability `p_stop = 1/L` and
/// continuation `p_go = 1 − p_stop`, the compiled form is
///
/// ```text
/// X = p_stop·F·(I + p_go·T·F + (p_go·T·F)² + …) = p_stop·F·(I − p_go·T·F)⁻¹
/// ```
///
/// which exists only while `p_go·T·F` is a contraction; both compile paths
/// verify that before returning anything usable.
#[derive(Debug)]
pub struct StarSemex {
    transition: Arc<Transition>,
    inner: Arc<Semex>,
    length: f64,
    p_stop: f64,
    p_go: f64,
    operator: OnceCell<LinOp>,
}

impl StarSemex {
    pub fn new(transition: Arc<Transition>, inner: Arc<Semex>, length: f64) -> Semex {
        assert!(length > 1.0, "star length must exceed 1");
        assert_eq!(
            inner.node_count(),
            transition.dim(),
            "star operand must match the transition dimension"
        );
        let p_stop = 1.0 / length;
        Semex::Star(Self {
            transition,
            inner,
            length,
            p_stop,
            p_go: 1.0 - p_stop,
            operator: OnceCell::new(),
        })
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    fn display(&self) -> String {
        format!("{}*", self.inner)
    }

    /// Dense path: build `Y = I − p_go·T·F` and invert it outright.
    fn compile_matrix(&self) -> Result<Array2<f64>> {
        let n = self.transition.dim();
        let fmat = self.inner.compile_matrix()?;
        let tmat = self.transition.to_dense();

        let ptf = tmat.dot(&fmat) * self.p_go;
        let radius = solve::spectral_radius_dense(&ptf, RADIUS_ITERATIONS);
        if radius > SPECTRAL_RADIUS_LIMIT {
            return Err(SemgraphError::SpectralRadiusExceeded {
                semex: self.display(),
                radius,
                limit: SPECTRAL_RADIUS_LIMIT,
            });
        }

        let y = Array2::eye(n) - &ptf;
        let y_inv = solve::invert(&y)?;
        Ok(fmat.dot(&y_inv) * self.p_stop)
    }

    /// Operator path: never invert; solve `x·Y = p_stop·(v·F)` per
    /// application, preconditioned by the first-order Neumann
    /// approximation `Y⁻¹ ≈ I + p_go·T·F`.
    fn build_operator(&self) -> Result<LinOp> {
        let n = self.transition.dim();
        let fop = self.inner.compile_operator()?;
        let top = self.transition.operator();

        // row-vector reading of p_go·T·F: step through T, then weight by F
        let pft = top.then(&fop).scale(self.p_go);

        let radius = solve::spectral_radius(&pft, RADIUS_ITERATIONS)?;
        tracing::debug!(radius, length = self.length, "star contraction estimate");
        if radius > SPECTRAL_RADIUS_LIMIT {
            return Err(SemgraphError::SpectralRadiusExceeded {
                semex: self.display(),
                radius,
                limit: SPECTRAL_RADIUS_LIMIT,
            });
        }

        let identity = LinOp::identity(n);
        let y = identity.sub(&pft);
        let precond = identity.add(&pft);
        let label = self.display();
        let p_stop = self.p_stop;
        let options = GmresOptions::default();

        Ok(LinOp::new(n, move |v| {
            let seeded = fop.apply(v)? * p_stop;
            solve::gmres(&y, &seeded, Some(&precond), &label, &options)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use semgraph_graph::{EdgeKind, GraphBuilder};

    fn ring(n: usize) -> (LogGraph, Arc<Transition>) {
        let ts = NaiveDate::from_ymd_opt(2012, 9, 1)
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
        let g = b.build();
        let t = Arc::new(Transition::from_graph(&g));
        (g, t)
    }

    #[test]
    fn operator_cache_is_set_once() {
        let (_, t) = ring(6);
        let star = StarSemex::new(Arc::clone(&t), Arc::new(TrivialSemex::new(6)), 3.0);
        let first = star.compile_operator().unwrap();
        let second = star.compile_operator().unwrap();
        // both handles share the cached closure
        assert_eq!(first.dim(), second.dim());
        let v = Array1::from_elem(6, 1.0);
        assert_eq!(first.apply(&v).unwrap(), second.apply(&v).unwrap());
    }

    #[test]
    fn display_round_trips_surface_syntax() {
        let (g, t) = ring(4);
        let tag = FilterSemex::from_fn("tag", &g, |_| 1.0);
        let star = StarSemex::new(Arc::clone(&t), Arc::new(TrivialSemex::new(4)), 3.0);
        let concat = ConcatSemex::new(Arc::clone(&t), Arc::new(tag), Arc::new(star));
        assert_eq!(concat.to_string(), "(tag anything*)");
    }

    #[test]
    #[should_panic(expected = "node count")]
    fn mismatched_disjunct_panics() {
        let a = TrivialSemex::new(3);
        let b = TrivialSemex::new(4);
        let _ = DisjunctSemex::new(Arc::new(a), Arc::new(b));
    }

    #[test]
    #[should_panic(expected = "length must exceed 1")]
    fn short_star_length_panics() {
        let (_, t) = ring(4);
        let _ = StarSemex::new(Arc::clone(&t), Arc::new(TrivialSemex::new(4)), 1.0);
    }
}
