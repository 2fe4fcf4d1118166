//! Builders for `LinOp` nodes.
//!
//! Each builder derives the output shape from its input, so callers only
//! pick the operation.

use nalgebra::DVector;

use super::lin_op::{LinOp, LinOpKind};
use crate::expr::{Array, ExprId, Shape};

/// A variable leaf.
pub fn create_var(shape: Shape, var_id: ExprId) -> LinOp {
    LinOp::new(LinOpKind::Variable(var_id), shape, vec![])
}

/// A constant leaf holding `value`.
pub fn create_const(value: &Array) -> LinOp {
    let kind = match value {
        Array::Scalar(v) => LinOpKind::ScalarConst(*v),
        Array::Sparse(m) => LinOpKind::SparseConst(m.clone()),
        Array::Vector(v) => LinOpKind::DenseConst(v.clone()),
        Array::Dense(_) | Array::Tensor { .. } => {
            LinOpKind::DenseConst(DVector::from_vec(value.to_flat_vec()))
        }
    };
    LinOp::new(kind, value.shape(), vec![])
}

/// Reinterpret `operator` under `shape`.
pub fn reshape(operator: LinOp, shape: Shape) -> LinOp {
    LinOp::new(LinOpKind::Reshape, shape, vec![operator])
}

/// Promote a length-n vector to an n x n diagonal matrix.
pub fn diag_vec(operator: LinOp) -> LinOp {
    let n = operator.shape.rows();
    LinOp::new(LinOpKind::DiagVec, Shape::matrix(n, n), vec![operator])
}

/// Extract the main diagonal of an n x n matrix as a length-n vector.
pub fn diag_mat(operator: LinOp) -> LinOp {
    let n = operator.shape.rows();
    LinOp::new(LinOpKind::DiagMat, Shape::vector(n), vec![operator])
}
