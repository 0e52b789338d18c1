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

//! Linear operators over node distributions.
//!
//! An operator applies "multiply by this matrix" to a distribution vector
//! without materializing the matrix. Distributions are row vectors; an
//! operator built from matrix `M` computes `v ↦ v·M`, so composing
//! operators runs in the reverse of matrix-product order. Application is
//! fallible because a star operator solves a linear system on every apply.
//!
//! Operators are cheap to clone and safe to share: the closure captures
//! only immutable state.

use ndarray::Array1;
use semgraph_core::Result;
use std::sync::Arc;

type ApplyFn = dyn Fn(&Array1<f64>) -> Result<Array1<f64>> + Send + Sync;

/// A square linear operator on distributions of a fixed dimension.
#[derive(Clone)]
pub struct LinOp {
    dim: usize,
    apply: Arc<ApplyFn>,
}

impl LinOp {
    pub fn new<F>(dim: usize, apply: F) -> Self
    where
        F: Fn(&Array1<f64>) -> Result<Array1<f64>> + Send + Sync + 'static,
    {
        Self {
            dim,
            apply: Arc::new(apply),
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Apply to a distribution. The vector length must match the operator
    /// dimension; a mismatch is a programmer error.
    pub fn apply(&self, dist: &Array1<f64>) -> Result<Array1<f64>> {
        assert_eq!(dist.len(), self.dim, "distribution/operator dimension mismatch");
        (self.apply)(dist)
    }

    pub fn identity(dim: usize) -> Self {
        Self::new(dim, |v| Ok(v.clone()))
    }

    /// Sequential composition: `a.then(b)` applies `a` first, then `b`.
    pub fn then(&self, next: &LinOp) -> LinOp {
        assert_eq!(self.dim, next.dim, "operator dimension mismatch");
        let first = self.clone();
        let second = next.clone();
        LinOp::new(self.dim, move |v| second.apply(&first.apply(v)?))
    }

    /// Pointwise sum of two operators.
    pub fn add(&self, other: &LinOp) -> LinOp {
        assert_eq!(self.dim, other.dim, "operator dimension mismatch");
        let a = self.clone();
        let b = other.clone();
        LinOp::new(self.dim, move |v| Ok(a.apply(v)? + b.apply(v)?))
    }

    /// Pointwise difference of two operators.
    pub fn sub(&self, other: &LinOp) -> LinOp {
        assert_eq!(self.dim, other.dim, "operator dimension mismatch");
        let a = self.clone();
        let b = other.clone();
        LinOp::new(self.dim, move |v| Ok(a.apply(v)? - b.apply(v)?))
    }

    /// Scalar multiple.
    pub fn scale(&self, factor: f64) -> LinOp {
        let a = self.clone();
        LinOp::new(self.dim, move |v| Ok(a.apply(v)? * factor))
    }
}

impl std::fmt::Debug for LinOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinOp").field("dim", &self.dim).finish()
    }
}
