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

//! Semgraph Semex
//!
//! The semex algebra: path-set expressions over the log graph, compiled to
//! linear operators on node distributions.
//!
//! A semex is one of:
//!
//! - a **filter** — a set of zero-length paths, weighted per node; a
//!   diagonal operator;
//! - a **disjunction** (`a | b`) — the union of two path sets, implemented
//!   as the operator sum (overlapping paths count twice; users should know
//!   this when crafting expressions);
//! - a **concatenation** (`a b`) — paths from `a`, one graph transition,
//!   paths from `b`; the product of the two operators around the
//!   transition matrix;
//! - a **star** (`a*`) — zero or more repetitions of `a`, geometrically
//!   damped so the infinite sum converges.
//!
//! Distributions are row vectors, as is standard for Markov chains, so the
//! operator form of a compound semex composes in the reverse of its
//! matrix-product order. Every semex compiles both ways: a dense matrix
//! (verification and small graphs) and a matrix-free operator (the
//! production path — star solves a linear system per application instead
//! of inverting).

pub mod ast;
pub mod compile;
pub mod filters;
pub mod parser;
pub mod semex;
pub mod solve;

pub use ast::SemexAst;
pub use compile::{ast_to_semex, DEFAULT_STAR_LENGTH};
pub use filters::{FilterFn, FilterTable, ANYTHING_FILTER};
pub use parser::parse_semex;
pub use semex::{
    ConcatSemex, DisjunctSemex, FilterSemex, Semex, StarSemex, TrivialSemex,
    SPECTRAL_RADIUS_LIMIT,
};
pub use solve::{gmres, invert, spectral_radius, spectral_radius_dense, GmresOptions};
