//! Shape representation for expressions.
//!
//! Shapes follow NumPy conventions:
//! - `()` or `[]` is a scalar
//! - `(n,)` or `[n]` is a vector of length n
//! - `(m, n)` or `[m, n]` is an m x n matrix
//! - anything longer is an N-D array
//!
//! Flattening is column-major throughout the crate.

use std::fmt;

/// Shape of an expression.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Shape(Vec<usize>);

impl Shape {
    /// Create a scalar shape.
    pub fn scalar() -> Self {
        Shape(vec![])
    }

    /// Create a vector shape.
    pub fn vector(n: usize) -> Self {
        Shape(vec![n])
    }

    /// Create a matrix shape.
    pub fn matrix(m: usize, n: usize) -> Self {
        Shape(vec![m, n])
    }

    /// Create a shape from dimensions.
    pub fn from_dims(dims: impl Into<Vec<usize>>) -> Self {
        Shape(dims.into())
    }

    /// Total number of elements (1 for a scalar).
    pub fn size(&self) -> usize {
        self.0.iter().product()
    }

    /// Number of dimensions (0 for scalar, 1 for vector, 2 for matrix).
    pub fn ndim(&self) -> usize {
        self.0.len()
    }

    /// Get the dimensions as a slice.
    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    /// Check if this is a 0-D shape.
    pub fn is_scalar(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if every dimension is 1, i.e. the shape holds a single element.
    pub fn is_unit(&self) -> bool {
        self.0.iter().all(|&d| d == 1)
    }

    /// Check if the shape is effectively one-dimensional.
    ///
    /// True for scalars, 1-D shapes, and 2-D shapes with a unit dimension
    /// (`(n, 1)` and `(1, n)`). [`Shape::flattened`] maps exactly these shapes
    /// onto `(size,)` without reordering anything.
    pub fn is_vector(&self) -> bool {
        match self.0.as_slice() {
            [] | [_] => true,
            [m, n] => (*m).min(*n) == 1,
            _ => false,
        }
    }

    /// Check if this is a 2-D shape.
    pub fn is_matrix(&self) -> bool {
        self.0.len() == 2
    }

    /// Check if this is a 2-D shape with as many rows as columns.
    pub fn is_square(&self) -> bool {
        matches!(self.0.as_slice(), [m, n] if m == n)
    }

    /// Number of rows (1 for scalar, n for vector, m for matrix).
    pub fn rows(&self) -> usize {
        self.0.first().copied().unwrap_or(1)
    }

    /// Number of columns (1 for scalar and vector, n for matrix).
    pub fn cols(&self) -> usize {
        match self.0.len() {
            0 | 1 => 1,
            _ => self.0[1],
        }
    }

    /// The 1-D shape holding the same number of elements.
    pub fn flattened(&self) -> Self {
        Shape::vector(self.size())
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shape({:?})", self.0)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [] => write!(f, "()"),
            [n] => write!(f, "({},)", n),
            dims => {
                write!(f, "(")?;
                for (i, d) in dims.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", d)?;
                }
                write!(f, ")")
            }
        }
    }
}

// Conversion traits
impl From<()> for Shape {
    fn from(_: ()) -> Self {
        Shape::scalar()
    }
}

impl From<usize> for Shape {
    fn from(n: usize) -> Self {
        Shape::vector(n)
    }
}

impl From<(usize,)> for Shape {
    fn from((n,): (usize,)) -> Self {
        Shape::vector(n)
    }
}

impl From<(usize, usize)> for Shape {
    fn from((m, n): (usize, usize)) -> Self {
        Shape::matrix(m, n)
    }
}

impl From<(usize, usize, usize)> for Shape {
    fn from((a, b, c): (usize, usize, usize)) -> Self {
        Shape(vec![a, b, c])
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Shape(dims)
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Shape(dims.to_vec())
    }
}
