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

//! Numerical routines behind the star operator.
//!
//! - restarted GMRES for the matrix-free solve (the system is
//!   non-symmetric, so CG is out);
//! - power iteration for the spectral-radius guard — the iterated matrix
//!   is entrywise non-negative, so its spectral radius is the Perron root
//!   and power iteration from a positive start vector reaches it;
//! - Gauss-Jordan inversion for the dense verification path.

use ndarray::{Array1, Array2};
use semgraph_core::{Result, SemgraphError};
use semgraph_graph::LinOp;
use tracing::{debug, trace};

/// Knobs for [`gmres`].
#[derive(Debug, Clone)]
pub struct GmresOptions {
    /// Krylov subspace size per restart cycle.
    pub restart: usize,
    /// Maximum restart cycles before giving up.
    pub max_restarts: usize,
    /// Relative residual target (against the preconditioned right-hand
    /// side).
    pub tol: f64,
}

impl Default for GmresOptions {
    fn default() -> Self {
        Self {
            restart: 30,
            max_restarts: 20,
            tol: 1e-10,
        }
    }
}

fn norm(v: &Array1<f64>) -> f64 {
    v.dot(v).sqrt()
}

/// Solve `x·A = b` (operators act on row vectors) by restarted GMRES with
/// an optional left preconditioner `m ≈ A⁻¹`.
///
/// Non-convergence within the iteration budget is a hard error carrying
/// `label`; no partial solution is returned.
pub fn gmres(
    a: &LinOp,
    b: &Array1<f64>,
    precond: Option<&LinOp>,
    label: &str,
    opts: &GmresOptions,
) -> Result<Array1<f64>> {
    let n = b.len();
    assert_eq!(a.dim(), n, "system/right-hand-side dimension mismatch");

    let apply_prec = |v: &Array1<f64>| -> Result<Array1<f64>> {
        match precond {
            Some(m) => m.apply(v),
            None => Ok(v.clone()),
        }
    };

    let mb = apply_prec(b)?;
    let b_norm = norm(&mb);
    if b_norm == 0.0 {
        return Ok(Array1::zeros(n));
    }
    let tol_abs = opts.tol * b_norm;
    let m = opts.restart.max(1).min(n);

    let mut x = Array1::<f64>::zeros(n);
    let mut total_iters = 0usize;
    let mut residual = f64::INFINITY;

    for cycle in 0..opts.max_restarts {
        let r = apply_prec(&(b - &a.apply(&x)?))?;
        let beta = norm(&r);
        if beta <= tol_abs {
            debug!(cycle, total_iters, "gmres converged at restart boundary");
            return Ok(x);
        }

        let mut basis: Vec<Array1<f64>> = Vec::with_capacity(m + 1);
        basis.push(&r / beta);
        let mut h = Array2::<f64>::zeros((m + 1, m));
        let mut cs = vec![0.0; m];
        let mut sn = vec![0.0; m];
        let mut g = vec![0.0; m + 1];
        g[0] = beta;

        let mut k_used = 0;
        let mut invariant = false;

        for j in 0..m {
            total_iters += 1;
            let mut w = apply_prec(&a.apply(&basis[j])?)?;
            // modified Gram-Schmidt
            for (i, q) in basis.iter().enumerate().take(j + 1) {
                let hij = w.dot(q);
                h[[i, j]] = hij;
                w.scaled_add(-hij, q);
            }
            let h_next = norm(&w);
            h[[j + 1, j]] = h_next;

            // fold previous rotations into the new column
            for i in 0..j {
                let tmp = cs[i] * h[[i, j]] + sn[i] * h[[i + 1, j]];
                h[[i + 1, j]] = -sn[i] * h[[i, j]] + cs[i] * h[[i + 1, j]];
                h[[i, j]] = tmp;
            }
            // new rotation annihilating the subdiagonal entry
            let denom = h[[j, j]].hypot(h[[j + 1, j]]);
            if denom == 0.0 {
                cs[j] = 1.0;
                sn[j] = 0.0;
            } else {
                cs[j] = h[[j, j]] / denom;
                sn[j] = h[[j + 1, j]] / denom;
            }
            h[[j, j]] = cs[j] * h[[j, j]] + sn[j] * h[[j + 1, j]];
            h[[j + 1, j]] = 0.0;
            g[j + 1] = -sn[j] * g[j];
            g[j] *= cs[j];

            k_used = j + 1;
            residual = g[j + 1].abs();
            trace!(cycle, j, residual, "gmres inner step");

            if h_next <= 1e-14 * beta {
                // Krylov space went invariant: the least-squares solution
                // is exact
                invariant = true;
                break;
            }
            basis.push(&w / h_next);
            if residual <= tol_abs {
                break;
            }
        }

        // back-substitute H y = g and accumulate the correction
        let mut y = vec![0.0; k_used];
        for i in (0..k_used).rev() {
            let mut sum = g[i];
            for jj in i + 1..k_used {
                sum -= h[[i, jj]] * y[jj];
            }
            y[i] = sum / h[[i, i]];
        }
        for (i, q) in basis.iter().enumerate().take(k_used) {
            x.scaled_add(y[i], q);
        }

        if invariant || residual <= tol_abs {
            debug!(cycle, total_iters, residual, "gmres converged");
            return Ok(x);
        }
    }

    Err(SemgraphError::SolveDidNotConverge {
        semex: label.to_string(),
        iterations: total_iters,
        residual: residual / b_norm,
    })
}

/// Estimate the spectral radius of an operator by power iteration from a
/// positive start vector. Exact only in the limit; adequate as a stability
/// guard for the non-negative matrices the star builds.
pub fn spectral_radius(op: &LinOp, iterations: usize) -> Result<f64> {
    let n = op.dim();
    if n == 0 {
        return Ok(0.0);
    }
    let mut v = Array1::from_elem(n, 1.0 / (n as f64).sqrt());
    let mut estimate = 0.0;
    for _ in 0..iterations {
        let w = op.apply(&v)?;
        let w_norm = norm(&w);
        if w_norm <= f64::MIN_POSITIVE {
            return Ok(0.0);
        }
        estimate = w_norm;
        v = w / w_norm;
    }
    Ok(estimate)
}

/// Dense twin of [`spectral_radius`], iterating `v ↦ v·M`.
pub fn spectral_radius_dense(matrix: &Array2<f64>, iterations: usize) -> f64 {
    let n = matrix.nrows();
    assert_eq!(n, matrix.ncols(), "spectral radius needs a square matrix");
    if n == 0 {
        return 0.0;
    }
    let mut v = Array1::from_elem(n, 1.0 / (n as f64).sqrt());
    let mut estimate = 0.0;
    for _ in 0..iterations {
        let w = v.dot(matrix);
        let w_norm = norm(&w);
        if w_norm <= f64::MIN_POSITIVE {
            return 0.0;
        }
        estimate = w_norm;
        v = w / w_norm;
    }
    estimate
}

/// Invert a dense matrix by Gauss-Jordan elimination with partial
/// pivoting. Small/verification graphs only; the production star path
/// never materializes an inverse.
pub fn invert(matrix: &Array2<f64>) -> Result<Array2<f64>> {
    let n = matrix.nrows();
    assert_eq!(n, matrix.ncols(), "inversion needs a square matrix");

    let mut a = matrix.clone();
    let mut inv = Array2::<f64>::eye(n);

    for col in 0..n {
        let mut pivot = col;
        for row in col + 1..n {
            if a[[row, col]].abs() > a[[pivot, col]].abs() {
                pivot = row;
            }
        }
        if a[[pivot, col]].abs() < 1e-12 {
            return Err(SemgraphError::SingularMatrix);
        }
        if pivot != col {
            for k in 0..n {
                a.swap([col, k], [pivot, k]);
                inv.swap([col, k], [pivot, k]);
            }
        }
        let d = a[[col, col]];
        for k in 0..n {
            a[[col, k]] /= d;
            inv[[col, k]] /= d;
        }
        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = a[[row, col]];
            if factor == 0.0 {
                continue;
            }
            for k in 0..n {
                let sub_a = factor * a[[col, k]];
                let sub_inv = factor * inv[[col, k]];
                a[[row, k]] -= sub_a;
                inv[[row, k]] -= sub_inv;
            }
        }
    }
    Ok(inv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn dense_op(m: Array2<f64>) -> LinOp {
        let dim = m.nrows();
        LinOp::new(dim, move |v| Ok(v.dot(&m)))
    }

    #[test]
    fn invert_round_trips() {
        let m = array![[4.0, 1.0, 0.0], [1.0, 3.0, 1.0], [0.0, 1.0, 2.0]];
        let inv = invert(&m).unwrap();
        let prod = m.dot(&inv);
        let eye = Array2::<f64>::eye(3);
        for (a, b) in prod.iter().zip(eye.iter()) {
            assert!((a - b).abs() < 1e-10);
        }
    }

    #[test]
    fn invert_rejects_singular() {
        let m = array![[1.0, 2.0], [2.0, 4.0]];
        assert!(matches!(invert(&m), Err(SemgraphError::SingularMatrix)));
    }

    #[test]
    fn gmres_matches_direct_solve() {
        let m = array![
            [2.0, 0.3, 0.0, 0.1],
            [0.0, 1.5, 0.2, 0.0],
            [0.1, 0.0, 1.8, 0.3],
            [0.0, 0.2, 0.0, 2.2]
        ];
        let b = array![1.0, -0.5, 2.0, 0.25];
        let x = gmres(&dense_op(m.clone()), &b, None, "test", &GmresOptions::default()).unwrap();
        // row-vector system: x·M = b
        let back = x.dot(&m);
        for (a, e) in back.iter().zip(b.iter()) {
            assert!((a - e).abs() < 1e-8, "{a} vs {e}");
        }
    }

    #[test]
    fn gmres_with_preconditioner_converges() {
        // diagonally dominant system with its diagonal inverse as precond
        let m = array![[10.0, 1.0], [2.0, 8.0]];
        let prec = dense_op(array![[0.1, 0.0], [0.0, 0.125]]);
        let b = array![3.0, 5.0];
        let x = gmres(&dense_op(m.clone()), &b, Some(&prec), "test", &GmresOptions::default())
            .unwrap();
        let back = x.dot(&m);
        for (a, e) in back.iter().zip(b.iter()) {
            assert!((a - e).abs() < 1e-8);
        }
    }

    #[test]
    fn gmres_zero_rhs_is_zero() {
        let m = array![[2.0, 0.0], [0.0, 2.0]];
        let x = gmres(
            &dense_op(m),
            &array![0.0, 0.0],
            None,
            "test",
            &GmresOptions::default(),
        )
        .unwrap();
        assert_eq!(x, array![0.0, 0.0]);
    }

    #[test]
    fn gmres_reports_nonconvergence() {
        let m = array![[1.0, 0.9], [0.9, 1.0]];
        let opts = GmresOptions {
            restart: 1,
            max_restarts: 1,
            tol: 1e-16,
        };
        let err = gmres(&dense_op(m), &array![1.0, 0.0], None, "stuck", &opts).unwrap_err();
        match err {
            SemgraphError::SolveDidNotConverge { semex, .. } => assert_eq!(semex, "stuck"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn spectral_radius_of_diagonal() {
        let op = dense_op(array![[0.5, 0.0], [0.0, 0.25]]);
        let r = spectral_radius(&op, 200).unwrap();
        assert!((r - 0.5).abs() < 1e-6);
    }

    #[test]
    fn spectral_radius_dense_matches_operator() {
        let m = array![[0.2, 0.6], [0.3, 0.1]];
        let from_dense = spectral_radius_dense(&m, 200);
        let from_op = spectral_radius(&dense_op(m), 200).unwrap();
        assert!((from_dense - from_op).abs() < 1e-9);
    }
}
