//! Coefficient form of lowered expressions.
//!
//! A `LinOp` tree flattens into `sum_i(A_i * x_i) + b`, with every output and
//! every variable flattened column-major.

use std::collections::HashMap;

use nalgebra::DVector;
use nalgebra_sparse::CscMatrix;

use super::lin_op::{LinOp, LinOpKind};
use crate::error::{CvxError, Result};
use crate::expr::{Array, ExprId, Shape};
use crate::settings::Settings;
use crate::sparse::{csc_identity, csc_scatter_rows, csc_to_dense};

/// A linear expression in standard form: sum_i(A_i * x_i) + b
///
/// Each term is a sparse coefficient matrix multiplied by a variable.
/// The constant term `b` is a dense vector.
#[derive(Debug, Clone)]
pub struct LinExpr {
    /// Coefficient matrices for each variable: var_id -> coefficient matrix.
    /// The coefficient matrix A_i has shape (output_size, var_size).
    pub coeffs: HashMap<ExprId, CscMatrix<f64>>,
    /// Constant term (offset), flattened column-major.
    pub constant: DVector<f64>,
    /// Output shape of this expression.
    pub shape: Shape,
}

impl LinExpr {
    /// Create a linear expression for a single variable (identity coefficient).
    pub fn variable(var_id: ExprId, shape: Shape) -> Self {
        let size = shape.size();
        let mut coeffs = HashMap::new();
        coeffs.insert(var_id, csc_identity(size));
        LinExpr {
            coeffs,
            constant: DVector::zeros(size),
            shape,
        }
    }

    /// Create a constant linear expression.
    pub fn constant(value: &Array) -> Self {
        LinExpr {
            coeffs: HashMap::new(),
            constant: DVector::from_vec(value.to_flat_vec()),
            shape: value.shape(),
        }
    }

    /// Check if this is a constant (no variables).
    pub fn is_constant(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Get the output size (flattened).
    pub fn size(&self) -> usize {
        self.shape.size()
    }

    /// Get all variable IDs in this expression.
    pub fn variables(&self) -> Vec<ExprId> {
        let mut vars: Vec<_> = self.coeffs.keys().copied().collect();
        vars.sort();
        vars
    }

    /// Build the coefficient form of a `LinOp` tree.
    pub fn from_lin_op(op: &LinOp) -> Result<Self> {
        Self::from_lin_op_with(op, &Settings::default())
    }

    /// Build the coefficient form of a `LinOp` tree, pruning coefficients
    /// at or below `settings.prune_tol`.
    pub fn from_lin_op_with(op: &LinOp, settings: &Settings) -> Result<Self> {
        let shape = op.shape.clone();
        let expr = match &op.kind {
            LinOpKind::Variable(id) => LinExpr::variable(*id, shape),
            LinOpKind::ScalarConst(v) => LinExpr {
                coeffs: HashMap::new(),
                constant: DVector::from_element(1, *v),
                shape,
            },
            LinOpKind::DenseConst(values) => LinExpr {
                coeffs: HashMap::new(),
                constant: values.clone(),
                shape,
            },
            LinOpKind::SparseConst(m) => LinExpr {
                coeffs: HashMap::new(),
                constant: DVector::from_column_slice(csc_to_dense(m).as_slice()),
                shape,
            },
            LinOpKind::Reshape => {
                let input = Self::unary_input(op, settings)?;
                if input.size() != shape.size() {
                    return Err(CvxError::shape_mismatch(
                        format!("{} elements", shape.size()),
                        &input.shape,
                    ));
                }
                LinExpr { shape, ..input }
            }
            LinOpKind::DiagVec => {
                // Input element i lands on (i, i), flat index i * (n + 1).
                let input = Self::unary_input(op, settings)?;
                let n = shape.rows();
                input.scatter(shape, settings.prune_tol, |r| (r < n).then(|| r * (n + 1)))
            }
            LinOpKind::DiagMat => {
                // Output element i reads (i, i) of the m-row input.
                let input = Self::unary_input(op, settings)?;
                let m = input.shape.rows();
                let n = shape.size();
                input.scatter(shape, settings.prune_tol, |r| {
                    (r % (m + 1) == 0 && r / (m + 1) < n).then(|| r / (m + 1))
                })
            }
        };
        Ok(expr)
    }

    fn unary_input(op: &LinOp, settings: &Settings) -> Result<LinExpr> {
        match op.args.as_slice() {
            [arg] => Self::from_lin_op_with(arg, settings),
            args => Err(CvxError::ArgumentCount {
                atom: op.kind.tag(),
                expected: 1,
                got: args.len(),
            }),
        }
    }

    /// Move output row `r` to row `map(r)` of an expression with `shape`.
    fn scatter(
        &self,
        shape: Shape,
        prune_tol: f64,
        map: impl Fn(usize) -> Option<usize>,
    ) -> LinExpr {
        let size = shape.size();
        let coeffs = self
            .coeffs
            .iter()
            .map(|(id, coeff)| (*id, csc_scatter_rows(coeff, size, prune_tol, &map)))
            .collect();

        let mut constant = DVector::zeros(size);
        for (r, v) in self.constant.iter().enumerate() {
            if let Some(target) = map(r).filter(|&t| t < size) {
                constant[target] = *v;
            }
        }

        LinExpr {
            coeffs,
            constant,
            shape,
        }
    }

    /// Evaluate `sum_i(A_i * x_i) + b` for the given variable values.
    pub fn evaluate(&self, values: &HashMap<ExprId, Array>) -> Result<Array> {
        let mut out = self.constant.clone();
        for (id, coeff) in &self.coeffs {
            let x = values
                .get(id)
                .ok_or(CvxError::MissingValue(*id))?
                .to_flat_vec();
            if x.len() != coeff.ncols() {
                return Err(CvxError::shape_mismatch(
                    format!("{} elements for {:?}", coeff.ncols(), id),
                    x.len(),
                ));
            }
            for (r, c, v) in coeff.triplet_iter() {
                out[r] += v * x[c];
            }
        }
        Array::from_flat(&self.shape, out.as_slice().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canon::lin_utils::{create_const, create_var, diag_mat, diag_vec, reshape};
    use nalgebra::DMatrix;

    #[test]
    fn test_lin_expr_variable() {
        let var_id = ExprId::new();
        let e = LinExpr::variable(var_id, Shape::vector(3));
        assert!(!e.is_constant());
        assert_eq!(e.size(), 3);
        assert_eq!(e.variables(), vec![var_id]);
    }

    #[test]
    fn test_lin_expr_constant() {
        let e = LinExpr::constant(&Array::from_vec(vec![1.0, 2.0]));
        assert!(e.is_constant());
        assert_eq!(e.constant.as_slice(), &[1.0, 2.0]);
    }

    #[test]
    fn test_diag_vec_coefficients() {
        let id = ExprId::new();
        let op = diag_vec(create_var(Shape::vector(3), id));
        let e = LinExpr::from_lin_op(&op).unwrap();
        assert_eq!(e.shape, Shape::matrix(3, 3));

        let a = csc_to_dense(&e.coeffs[&id]);
        assert_eq!(a.shape(), (9, 3));
        for i in 0..3 {
            assert_eq!(a[(i * 4, i)], 1.0);
        }
        assert_eq!(a.iter().filter(|&&v| v != 0.0).count(), 3);
    }

    #[test]
    fn test_diag_mat_coefficients() {
        let id = ExprId::new();
        let op = diag_mat(create_var(Shape::matrix(3, 3), id));
        let e = LinExpr::from_lin_op(&op).unwrap();
        assert_eq!(e.shape, Shape::vector(3));

        let a = csc_to_dense(&e.coeffs[&id]);
        assert_eq!(a.shape(), (3, 9));
        for i in 0..3 {
            assert_eq!(a[(i, i * 4)], 1.0);
        }
        assert_eq!(a.iter().filter(|&&v| v != 0.0).count(), 3);
    }

    #[test]
    fn test_constant_through_diag_mat() {
        let m = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let op = diag_mat(create_const(&Array::Dense(m)));
        let e = LinExpr::from_lin_op(&op).unwrap();
        assert!(e.is_constant());
        assert_eq!(e.constant.as_slice(), &[1.0, 4.0]);
    }

    #[test]
    fn test_reshape_checks_size() {
        let op = reshape(create_var(Shape::matrix(2, 2), ExprId::new()), Shape::vector(3));
        assert!(matches!(
            LinExpr::from_lin_op(&op),
            Err(CvxError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_missing_input_is_argument_count_error() {
        let op = LinOp::new(LinOpKind::DiagVec, Shape::matrix(2, 2), vec![]);
        assert!(matches!(
            LinExpr::from_lin_op(&op),
            Err(CvxError::ArgumentCount { atom: "diag_vec", expected: 1, got: 0 })
        ));
    }

    #[test]
    fn test_evaluate() {
        let id = ExprId::new();
        let op = diag_vec(create_var(Shape::vector(2), id));
        let e = LinExpr::from_lin_op(&op).unwrap();

        let values = HashMap::from([(id, Array::from_vec(vec![5.0, -1.0]))]);
        let out = e.evaluate(&values).unwrap();
        assert_eq!(out.shape(), Shape::matrix(2, 2));
        assert_eq!(out.to_flat_vec(), vec![5.0, 0.0, 0.0, -1.0]);

        assert!(matches!(
            e.evaluate(&HashMap::new()),
            Err(CvxError::MissingValue(v)) if v == id
        ));
    }
}
