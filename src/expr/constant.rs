//! Constant expression creation and coercion.

use nalgebra::DMatrix;
use nalgebra_sparse::CscMatrix;

use super::array::Array;
use super::expression::{ConstantData, Expr, ExprId};
use super::shape::Shape;
use crate::error::Result;

/// Create a constant expression from an array.
pub fn constant_array(value: Array) -> Expr {
    Expr::Constant(ConstantData {
        id: ExprId::new(),
        value,
    })
}

/// Create a constant expression from a scalar.
pub fn constant(value: f64) -> Expr {
    constant_array(Array::Scalar(value))
}

/// Create a 1-D constant expression of shape `(n,)`.
pub fn constant_vec(values: Vec<f64>) -> Expr {
    constant_array(Array::from_vec(values))
}

/// Create a constant matrix from column-major values.
pub fn constant_matrix(values: Vec<f64>, rows: usize, cols: usize) -> Expr {
    constant_array(Array::Dense(DMatrix::from_vec(rows, cols, values)))
}

/// Create a constant expression from a nalgebra DMatrix.
pub fn constant_dmatrix(matrix: DMatrix<f64>) -> Expr {
    constant_array(Array::Dense(matrix))
}

/// Create a constant expression from a sparse CSC matrix.
pub fn constant_sparse(matrix: CscMatrix<f64>) -> Expr {
    constant_array(Array::Sparse(matrix))
}

/// Create a constant of any rank from column-major values.
pub fn constant_tensor(shape: impl Into<Shape>, values: Vec<f64>) -> Result<Expr> {
    Array::from_flat(&shape.into(), values).map(constant_array)
}

/// Create a zero constant with the given shape.
pub fn zeros(shape: impl Into<Shape>) -> Expr {
    constant_array(Array::filled(&shape.into(), 0.0))
}

/// Create an identity matrix constant.
pub fn eye(n: usize) -> Expr {
    constant_array(Array::Dense(DMatrix::identity(n, n)))
}

/// Conversion of raw values into expressions.
///
/// Expressions convert to themselves; numeric values become constant
/// leaves with the same shape.
pub trait IntoConstant {
    fn into_constant(self) -> Expr;
}

impl IntoConstant for Expr {
    fn into_constant(self) -> Expr {
        self
    }
}

impl IntoConstant for &Expr {
    fn into_constant(self) -> Expr {
        self.clone()
    }
}

impl IntoConstant for f64 {
    fn into_constant(self) -> Expr {
        constant(self)
    }
}

impl IntoConstant for i32 {
    fn into_constant(self) -> Expr {
        constant(self as f64)
    }
}

impl IntoConstant for Vec<f64> {
    fn into_constant(self) -> Expr {
        constant_vec(self)
    }
}

impl IntoConstant for &[f64] {
    fn into_constant(self) -> Expr {
        constant_vec(self.to_vec())
    }
}

impl IntoConstant for nalgebra::DVector<f64> {
    fn into_constant(self) -> Expr {
        constant_array(Array::Vector(self))
    }
}

impl IntoConstant for DMatrix<f64> {
    fn into_constant(self) -> Expr {
        constant_dmatrix(self)
    }
}

impl IntoConstant for CscMatrix<f64> {
    fn into_constant(self) -> Expr {
        constant_sparse(self)
    }
}

impl IntoConstant for Array {
    fn into_constant(self) -> Expr {
        constant_array(self)
    }
}

/// Coerce a value into an expression, wrapping raw numbers as constants.
pub fn cast_to_const(value: impl IntoConstant) -> Expr {
    value.into_constant()
}
