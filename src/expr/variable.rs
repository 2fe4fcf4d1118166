//! Variable leaves.
//!
//! Attributes set here are declarations, not constraints: sign flags feed
//! [`Expr::sign`] and the symmetric flag feeds [`Expr::is_symmetric`].

use super::expression::{Expr, ExprId, VariableData};
use super::shape::Shape;

/// Builder for variables with a name and structural attributes.
#[derive(Default)]
pub struct VariableBuilder {
    shape: Shape,
    name: Option<String>,
    nonneg: bool,
    nonpos: bool,
    symmetric: bool,
}

impl VariableBuilder {
    pub fn new(shape: impl Into<Shape>) -> Self {
        Self {
            shape: shape.into(),
            ..Default::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Declare every entry non-negative. Clears `nonpos`.
    pub fn nonneg(mut self) -> Self {
        self.nonneg = true;
        self.nonpos = false;
        self
    }

    /// Declare every entry non-positive. Clears `nonneg`.
    pub fn nonpos(mut self) -> Self {
        self.nonpos = true;
        self.nonneg = false;
        self
    }

    /// Declare the variable a symmetric matrix.
    ///
    /// Only square 2-D shapes can carry the declaration; on any other shape
    /// it is dropped at [`build`](Self::build).
    pub fn symmetric(mut self) -> Self {
        self.symmetric = true;
        self
    }

    pub fn build(self) -> Expr {
        let symmetric = self.symmetric && self.shape.is_square();
        Expr::Variable(VariableData {
            id: ExprId::new(),
            shape: self.shape,
            name: self.name,
            nonneg: self.nonneg,
            nonpos: self.nonpos,
            symmetric,
        })
    }
}

/// Create a variable with the given shape.
///
/// ```
/// use cvxatoms::expr::{variable, Shape};
///
/// assert_eq!(variable(()).shape(), Shape::scalar());
/// assert_eq!(variable(5).shape(), Shape::vector(5));
/// assert_eq!(variable((3, 4)).shape(), Shape::matrix(3, 4));
/// ```
pub fn variable(shape: impl Into<Shape>) -> Expr {
    VariableBuilder::new(shape).build()
}

pub fn named_variable(name: impl Into<String>, shape: impl Into<Shape>) -> Expr {
    VariableBuilder::new(shape).name(name).build()
}

pub fn nonneg_variable(shape: impl Into<Shape>) -> Expr {
    VariableBuilder::new(shape).nonneg().build()
}

pub fn nonpos_variable(shape: impl Into<Shape>) -> Expr {
    VariableBuilder::new(shape).nonpos().build()
}

/// An `n x n` variable declared symmetric.
pub fn symmetric_variable(n: usize) -> Expr {
    VariableBuilder::new((n, n)).symmetric().build()
}
