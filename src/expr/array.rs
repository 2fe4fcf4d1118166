//! Numeric storage for constant values and evaluation results.

use nalgebra::{DMatrix, DVector};
use nalgebra_sparse::CscMatrix;

use super::shape::Shape;
use crate::error::{CvxError, Result};
use crate::sparse::csc_to_dense;

/// Array storage (scalar, 1-D, dense, sparse or N-D).
#[derive(Debug, Clone)]
pub enum Array {
    /// Scalar value, shape `()`.
    Scalar(f64),
    /// One-dimensional storage, shape `(n,)`.
    Vector(DVector<f64>),
    /// Dense matrix storage.
    Dense(DMatrix<f64>),
    /// Sparse CSC matrix storage.
    Sparse(CscMatrix<f64>),
    /// Arrays with three or more dimensions, flattened column-major.
    Tensor { shape: Shape, data: Vec<f64> },
}

impl Array {
    /// Get the shape of the array.
    pub fn shape(&self) -> Shape {
        match self {
            Array::Scalar(_) => Shape::scalar(),
            Array::Vector(v) => Shape::vector(v.len()),
            Array::Dense(m) => Shape::matrix(m.nrows(), m.ncols()),
            Array::Sparse(m) => Shape::matrix(m.nrows(), m.ncols()),
            Array::Tensor { shape, .. } => shape.clone(),
        }
    }

    /// Get the total number of elements.
    pub fn size(&self) -> usize {
        match self {
            Array::Scalar(_) => 1,
            Array::Vector(v) => v.len(),
            Array::Dense(m) => m.nrows() * m.ncols(),
            Array::Sparse(m) => m.nrows() * m.ncols(),
            Array::Tensor { data, .. } => data.len(),
        }
    }

    /// Try to get as a scalar value.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Array::Scalar(v) => Some(*v),
            Array::Vector(v) if v.len() == 1 => Some(v[0]),
            Array::Dense(m) if m.nrows() == 1 && m.ncols() == 1 => Some(m[(0, 0)]),
            _ => None,
        }
    }

    /// Check if all elements are non-negative.
    pub fn is_nonneg(&self) -> bool {
        match self {
            Array::Scalar(v) => *v >= 0.0,
            Array::Vector(v) => v.iter().all(|&x| x >= 0.0),
            Array::Dense(m) => m.iter().all(|&x| x >= 0.0),
            // Implicit zeros are non-negative
            Array::Sparse(m) => m.values().iter().all(|&x| x >= 0.0),
            Array::Tensor { data, .. } => data.iter().all(|&x| x >= 0.0),
        }
    }

    /// Check if all elements are non-positive.
    pub fn is_nonpos(&self) -> bool {
        match self {
            Array::Scalar(v) => *v <= 0.0,
            Array::Vector(v) => v.iter().all(|&x| x <= 0.0),
            Array::Dense(m) => m.iter().all(|&x| x <= 0.0),
            Array::Sparse(m) => m.values().iter().all(|&x| x <= 0.0),
            Array::Tensor { data, .. } => data.iter().all(|&x| x <= 0.0),
        }
    }

    /// Check if the array equals its transpose within `tol`.
    ///
    /// Single-element arrays are symmetric; other non-square shapes are not.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        match self {
            Array::Scalar(_) => true,
            Array::Vector(v) => v.len() == 1,
            Array::Dense(m) => dense_is_symmetric(m, tol),
            Array::Sparse(m) => {
                m.nrows() == m.ncols() && dense_is_symmetric(&csc_to_dense(m), tol)
            }
            Array::Tensor { shape, .. } => shape.is_unit(),
        }
    }

    /// The elements in column-major order.
    pub fn to_flat_vec(&self) -> Vec<f64> {
        match self {
            Array::Scalar(v) => vec![*v],
            Array::Vector(v) => v.as_slice().to_vec(),
            Array::Dense(m) => m.as_slice().to_vec(),
            Array::Sparse(m) => csc_to_dense(m).as_slice().to_vec(),
            Array::Tensor { data, .. } => data.clone(),
        }
    }

    /// Build an array of the given shape from column-major data.
    pub fn from_flat(shape: &Shape, data: Vec<f64>) -> Result<Self> {
        if data.len() != shape.size() {
            return Err(CvxError::shape_mismatch(
                format!("{} elements for shape {}", shape.size(), shape),
                data.len(),
            ));
        }
        Ok(match shape.dims() {
            [] => Array::Scalar(data[0]),
            [_] => Array::Vector(DVector::from_vec(data)),
            [m, n] => Array::Dense(DMatrix::from_vec(*m, *n, data)),
            _ => Array::Tensor {
                shape: shape.clone(),
                data,
            },
        })
    }

    /// An array of the given shape with every element set to `value`.
    pub fn filled(shape: &Shape, value: f64) -> Self {
        match shape.dims() {
            [] => Array::Scalar(value),
            [n] => Array::Vector(DVector::from_element(*n, value)),
            [m, n] => Array::Dense(DMatrix::from_element(*m, *n, value)),
            _ => Array::Tensor {
                shape: shape.clone(),
                data: vec![value; shape.size()],
            },
        }
    }

    /// Reinterpret the elements under a new shape of the same size.
    pub fn reshape(&self, shape: &Shape) -> Result<Self> {
        if shape.size() != self.size() {
            return Err(CvxError::shape_mismatch(
                format!("{} elements", shape.size()),
                self.shape(),
            ));
        }
        Array::from_flat(shape, self.to_flat_vec())
    }

    /// Normalize into a dense 2-D matrix.
    ///
    /// Scalars become 1x1, vectors become n x 1 columns and sparse matrices
    /// are densified. Arrays with more than two dimensions are rejected.
    pub fn to_dense(&self) -> Result<DMatrix<f64>> {
        match self {
            Array::Scalar(v) => Ok(DMatrix::from_element(1, 1, *v)),
            Array::Vector(v) => Ok(DMatrix::from_column_slice(v.len(), 1, v.as_slice())),
            Array::Dense(m) => Ok(m.clone()),
            Array::Sparse(m) => Ok(csc_to_dense(m)),
            Array::Tensor { shape, .. } => {
                Err(CvxError::shape_mismatch("at most 2 dimensions", shape))
            }
        }
    }

    /// The elements of an effectively one-dimensional array as a vector.
    pub fn to_vector(&self) -> Result<DVector<f64>> {
        let shape = self.shape();
        if !shape.is_vector() {
            return Err(CvxError::shape_mismatch("a vector", shape));
        }
        match self {
            Array::Vector(v) => Ok(v.clone()),
            _ => Ok(DVector::from_vec(self.to_flat_vec())),
        }
    }

    /// Create from a scalar.
    pub fn from_scalar(v: f64) -> Self {
        Array::Scalar(v)
    }

    /// Create a 1-D array.
    pub fn from_vec(v: Vec<f64>) -> Self {
        Array::Vector(DVector::from_vec(v))
    }

    /// Create from a dense matrix.
    pub fn from_matrix(m: DMatrix<f64>) -> Self {
        Array::Dense(m)
    }
}

fn dense_is_symmetric(m: &DMatrix<f64>, tol: f64) -> bool {
    if m.nrows() != m.ncols() {
        return false;
    }
    let n = m.nrows();
    (0..n).all(|i| ((i + 1)..n).all(|j| (m[(i, j)] - m[(j, i)]).abs() <= tol))
}

impl From<f64> for Array {
    fn from(v: f64) -> Self {
        Array::Scalar(v)
    }
}

impl From<Vec<f64>> for Array {
    fn from(v: Vec<f64>) -> Self {
        Array::from_vec(v)
    }
}

impl From<DVector<f64>> for Array {
    fn from(v: DVector<f64>) -> Self {
        Array::Vector(v)
    }
}

impl From<DMatrix<f64>> for Array {
    fn from(m: DMatrix<f64>) -> Self {
        Array::Dense(m)
    }
}

impl From<CscMatrix<f64>> for Array {
    fn from(m: CscMatrix<f64>) -> Self {
        Array::Sparse(m)
    }
}
