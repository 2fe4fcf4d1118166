//! Primitive linear operations.
//!
//! A `LinOp` tree is the lowered form of an expression: every node is one
//! linear map applied to the outputs of its children, leaves are variables
//! or constants.

use std::fmt;

use nalgebra::DVector;
use nalgebra_sparse::CscMatrix;

use crate::expr::{ExprId, Shape};

/// The operation a `LinOp` node performs.
#[derive(Debug, Clone)]
pub enum LinOpKind {
    /// A decision variable.
    Variable(ExprId),
    /// A scalar constant.
    ScalarConst(f64),
    /// A dense constant, flattened column-major.
    DenseConst(DVector<f64>),
    /// A sparse 2-D constant.
    SparseConst(CscMatrix<f64>),
    /// Reinterpret the input under the node's shape.
    Reshape,
    /// Place a vector on the diagonal of a square matrix.
    DiagVec,
    /// Take the main diagonal of a square matrix.
    DiagMat,
}

impl LinOpKind {
    /// Short tag naming the operation.
    pub fn tag(&self) -> &'static str {
        match self {
            LinOpKind::Variable(_) => "variable",
            LinOpKind::ScalarConst(_) => "scalar_const",
            LinOpKind::DenseConst(_) => "dense_const",
            LinOpKind::SparseConst(_) => "sparse_const",
            LinOpKind::Reshape => "reshape",
            LinOpKind::DiagVec => "diag_vec",
            LinOpKind::DiagMat => "diag_mat",
        }
    }

    /// Check if this is a constant leaf.
    pub fn is_constant(&self) -> bool {
        matches!(
            self,
            LinOpKind::ScalarConst(_) | LinOpKind::DenseConst(_) | LinOpKind::SparseConst(_)
        )
    }
}

impl fmt::Display for LinOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A node in the lowered representation.
#[derive(Debug, Clone)]
pub struct LinOp {
    /// What this node computes.
    pub kind: LinOpKind,
    /// Output shape.
    pub shape: Shape,
    /// Inputs, in order.
    pub args: Vec<LinOp>,
}

impl LinOp {
    /// Create a node.
    pub fn new(kind: LinOpKind, shape: Shape, args: Vec<LinOp>) -> Self {
        LinOp { kind, shape, args }
    }

    /// Check if no variable is reachable from this node.
    pub fn is_constant(&self) -> bool {
        !matches!(self.kind, LinOpKind::Variable(_)) && self.args.iter().all(LinOp::is_constant)
    }

    /// All variables reachable from this node, sorted and deduplicated.
    pub fn variables(&self) -> Vec<ExprId> {
        let mut vars = Vec::new();
        self.collect_variables(&mut vars);
        vars.sort();
        vars.dedup();
        vars
    }

    fn collect_variables(&self, vars: &mut Vec<ExprId>) {
        if let LinOpKind::Variable(id) = self.kind {
            vars.push(id);
        }
        for arg in &self.args {
            arg.collect_variables(vars);
        }
    }
}

/// An auxiliary constraint produced while lowering.
#[derive(Debug, Clone)]
pub enum LinConstraint {
    /// expr == 0
    Eq(LinOp),
    /// expr <= 0
    Leq(LinOp),
}

impl LinConstraint {
    /// The constrained expression.
    pub fn expr(&self) -> &LinOp {
        match self {
            LinConstraint::Eq(op) | LinConstraint::Leq(op) => op,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(n: usize) -> (ExprId, LinOp) {
        let id = ExprId::new();
        (id, LinOp::new(LinOpKind::Variable(id), Shape::vector(n), vec![]))
    }

    #[test]
    fn test_tags() {
        assert_eq!(LinOpKind::DiagVec.to_string(), "diag_vec");
        assert_eq!(LinOpKind::DiagMat.to_string(), "diag_mat");
        assert_eq!(LinOpKind::ScalarConst(1.0).tag(), "scalar_const");
    }

    #[test]
    fn test_is_constant() {
        let c = LinOp::new(LinOpKind::ScalarConst(2.0), Shape::scalar(), vec![]);
        assert!(c.is_constant());
        let wrapped = LinOp::new(LinOpKind::Reshape, Shape::vector(1), vec![c]);
        assert!(wrapped.is_constant());

        let (_, x) = var(3);
        let diag = LinOp::new(LinOpKind::DiagVec, Shape::matrix(3, 3), vec![x]);
        assert!(!diag.is_constant());
    }

    #[test]
    fn test_variables() {
        let (id, x) = var(2);
        let op = LinOp::new(LinOpKind::DiagVec, Shape::matrix(2, 2), vec![x]);
        assert_eq!(op.variables(), vec![id]);

        let constraint = LinConstraint::Eq(op);
        assert_eq!(constraint.expr().kind.tag(), "diag_vec");
    }
}
