//! The `diag` atom family.
//!
//! `diag` either promotes a vector to a diagonal matrix or extracts the main
//! diagonal of a square matrix. Which one happens is decided once, from the
//! argument's shape, when the node is built; afterwards the node answers
//! every query by matching on its [`DiagKind`].

use std::slice;
use std::sync::Arc;

use nalgebra::{DMatrix, DVector};

use super::affine::flatten;
use super::atom::{single, Atom};
use crate::canon::{lin_utils, CanonResult, LinOp};
use crate::error::{CvxError, Result};
use crate::expr::{cast_to_const, Array, Expr, IntoConstant, Shape};

/// Message of the error `diag` raises for arguments it cannot dispatch on.
pub const DIAG_ARGUMENT_ERROR: &str = "Argument to diag must be a vector or square matrix.";

/// Which direction a diag node goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagKind {
    /// Vector of length n to an n x n diagonal matrix.
    VectorToDiagonal,
    /// n x n matrix to the length-n vector of its diagonal.
    MatrixToDiagonal,
}

impl DiagKind {
    /// Atom name.
    pub fn name(self) -> &'static str {
        match self {
            DiagKind::VectorToDiagonal => "diag_vec",
            DiagKind::MatrixToDiagonal => "diag_mat",
        }
    }

    /// Output shape for an argument of shape `arg`.
    ///
    /// Only looks at the dimensions it needs: the first one for
    /// `VectorToDiagonal`, the row count of a 2-D argument for
    /// `MatrixToDiagonal`.
    pub fn shape_from_args(self, arg: &Shape) -> Result<Shape> {
        match self {
            DiagKind::VectorToDiagonal => match arg.dims().first() {
                Some(&n) => Ok(Shape::matrix(n, n)),
                None => Err(CvxError::shape_mismatch("at least one dimension", arg)),
            },
            DiagKind::MatrixToDiagonal => match arg.dims() {
                [rows, _] => Ok(Shape::vector(*rows)),
                _ => Err(CvxError::shape_mismatch("a 2-D argument", arg)),
            },
        }
    }
}

/// A diag node: one argument, a direction and the output shape.
#[derive(Debug, Clone)]
pub struct DiagAtom {
    kind: DiagKind,
    arg: Arc<Expr>,
    shape: Shape,
}

impl DiagAtom {
    /// Build a node of the given kind.
    ///
    /// The dispatch rule of [`diag`] is not applied here; only shape
    /// inference can fail.
    pub fn new(kind: DiagKind, arg: impl Into<Arc<Expr>>) -> Result<Self> {
        let arg = arg.into();
        let shape = kind.shape_from_args(&arg.shape())?;
        Ok(DiagAtom { kind, arg, shape })
    }

    /// Build a vector-to-diagonal node.
    pub fn vector_to_diagonal(arg: impl Into<Arc<Expr>>) -> Result<Self> {
        Self::new(DiagKind::VectorToDiagonal, arg)
    }

    /// Build a matrix-to-diagonal node.
    pub fn matrix_to_diagonal(arg: impl Into<Arc<Expr>>) -> Result<Self> {
        Self::new(DiagKind::MatrixToDiagonal, arg)
    }

    /// Direction of this node.
    pub fn kind(&self) -> DiagKind {
        self.kind
    }

    /// The single argument.
    pub fn arg(&self) -> &Arc<Expr> {
        &self.arg
    }
}

impl Atom for DiagAtom {
    fn name(&self) -> &'static str {
        self.kind.name()
    }

    fn args(&self) -> &[Arc<Expr>] {
        slice::from_ref(&self.arg)
    }

    fn shape(&self) -> &Shape {
        &self.shape
    }

    fn numeric(&self, values: &[Array]) -> Result<Array> {
        let value = single(self.name(), values)?;
        match self.kind {
            DiagKind::VectorToDiagonal => {
                let entries = value.to_vector()?;
                Ok(Array::Dense(DMatrix::from_diagonal(&entries)))
            }
            DiagKind::MatrixToDiagonal => {
                // Scalars, vectors and sparse input all go through one dense
                // layout. Non-square input yields its leading diagonal,
                // min(rows, cols) long; the result is always 1-D.
                let dense = value.to_dense()?;
                let len = dense.nrows().min(dense.ncols());
                Ok(Array::Vector(DVector::from_fn(len, |i, _| dense[(i, i)])))
            }
        }
    }

    fn graph_implementation(&self, arg_objs: Vec<LinOp>, _shape: &Shape) -> Result<CanonResult> {
        let input = single(self.name(), arg_objs)?;
        let op = match self.kind {
            DiagKind::VectorToDiagonal => lin_utils::diag_vec(input),
            DiagKind::MatrixToDiagonal => lin_utils::diag_mat(input),
        };
        Ok(CanonResult::unconstrained(op))
    }

    fn is_symmetric(&self) -> bool {
        match self.kind {
            DiagKind::VectorToDiagonal => true,
            DiagKind::MatrixToDiagonal => self.shape.is_unit(),
        }
    }

    // Declared for every vector-to-diagonal node, whatever the entries are.
    fn is_hermitian(&self) -> bool {
        match self.kind {
            DiagKind::VectorToDiagonal => true,
            DiagKind::MatrixToDiagonal => self.is_symmetric(),
        }
    }
}

/// Extract the diagonal of a square matrix, or turn a vector into a diagonal
/// matrix.
///
/// Raw numeric input is wrapped as a constant first. Vector-shaped input
/// (including scalars, `(n, 1)` and `(1, n)`) is flattened and promoted to a
/// diagonal matrix; square 2-D input has its diagonal extracted. Anything
/// else fails with [`CvxError::InvalidArgumentShape`].
///
/// ```
/// use cvxatoms::prelude::*;
///
/// let d = diag(vec![1.0, 2.0, 3.0]).unwrap();
/// assert_eq!(d.shape(), Shape::matrix(3, 3));
///
/// let x = variable((4, 4));
/// assert_eq!(diag(&x).unwrap().shape(), Shape::vector(4));
///
/// assert!(diag(&variable((2, 3))).is_err());
/// ```
#[tracing::instrument(level = "debug", skip_all)]
pub fn diag(expr: impl IntoConstant) -> Result<Expr> {
    let expr = cast_to_const(expr);
    let shape = expr.shape();

    if shape.is_vector() {
        tracing::debug!(%shape, "promoting vector to diagonal matrix");
        DiagAtom::vector_to_diagonal(flatten(&expr)).map(Expr::Diag)
    } else if shape.is_square() {
        tracing::debug!(%shape, "extracting diagonal of square matrix");
        DiagAtom::matrix_to_diagonal(expr).map(Expr::Diag)
    } else {
        tracing::debug!(%shape, "rejecting diag argument");
        Err(CvxError::InvalidArgumentShape(DIAG_ARGUMENT_ERROR.to_string()))
    }
}

/// Build a vector-to-diagonal node on `expr` without dispatching on its
/// shape.
pub fn diag_vec(expr: &Expr) -> Result<Expr> {
    DiagAtom::vector_to_diagonal(expr.clone()).map(Expr::Diag)
}

/// Build a matrix-to-diagonal node on `expr` without dispatching on its
/// shape.
pub fn diag_mat(expr: &Expr) -> Result<Expr> {
    DiagAtom::matrix_to_diagonal(expr.clone()).map(Expr::Diag)
}
