//! Reshaping atoms.
//!
//! `flatten` is the canonical way to turn any expression into a 1-D vector;
//! it agrees with [`Shape::is_vector`] so that vector detection and
//! flattening never disagree.

use std::slice;
use std::sync::Arc;

use super::atom::{single, Atom};
use crate::canon::{lin_utils, CanonResult, LinOp};
use crate::error::{CvxError, Result};
use crate::expr::{Array, Expr, Shape};

/// Column-major reshape of one argument.
#[derive(Debug, Clone)]
pub struct Reshape {
    arg: Arc<Expr>,
    shape: Shape,
}

impl Reshape {
    /// Reshape `arg` to `shape`; the element counts must agree.
    pub fn new(arg: impl Into<Arc<Expr>>, shape: impl Into<Shape>) -> Result<Self> {
        let arg = arg.into();
        let shape = shape.into();
        let arg_shape = arg.shape();
        if arg_shape.size() != shape.size() {
            return Err(CvxError::shape_mismatch(
                format!("{} elements", shape.size()),
                arg_shape,
            ));
        }
        Ok(Reshape { arg, shape })
    }
}

impl Atom for Reshape {
    fn name(&self) -> &'static str {
        "reshape"
    }

    fn args(&self) -> &[Arc<Expr>] {
        slice::from_ref(&self.arg)
    }

    fn shape(&self) -> &Shape {
        &self.shape
    }

    fn numeric(&self, values: &[Array]) -> Result<Array> {
        single(self.name(), values)?.reshape(&self.shape)
    }

    fn graph_implementation(&self, arg_objs: Vec<LinOp>, shape: &Shape) -> Result<CanonResult> {
        let input = single(self.name(), arg_objs)?;
        Ok(CanonResult::unconstrained(lin_utils::reshape(
            input,
            shape.clone(),
        )))
    }
}

/// Reshape an expression to a new shape with the same number of elements.
pub fn reshape(expr: &Expr, shape: impl Into<Shape>) -> Result<Expr> {
    Reshape::new(expr.clone(), shape).map(Expr::Reshape)
}

/// Flatten an expression to a 1-D vector (column-major).
///
/// Expressions that are already 1-D are returned unchanged.
pub fn flatten(expr: &Expr) -> Expr {
    let shape = expr.shape();
    if shape.ndim() == 1 {
        return expr.clone();
    }
    Expr::Reshape(Reshape {
        arg: Arc::new(expr.clone()),
        shape: shape.flattened(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{constant, constant_matrix, variable};

    #[test]
    fn test_reshape_shape() {
        let x = variable((3, 4));
        let r = reshape(&x, (6, 2)).unwrap();
        assert_eq!(r.shape(), Shape::matrix(6, 2));
        assert_eq!(r.args().len(), 1);
    }

    #[test]
    fn test_reshape_size_mismatch() {
        let x = variable((3, 4));
        assert!(matches!(
            reshape(&x, 5),
            Err(CvxError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_flatten_shapes() {
        assert_eq!(flatten(&variable((1, 4))).shape(), Shape::vector(4));
        assert_eq!(flatten(&variable((4, 1))).shape(), Shape::vector(4));
        assert_eq!(flatten(&constant(2.0)).shape(), Shape::vector(1));
        assert_eq!(flatten(&variable((2, 3, 2))).shape(), Shape::vector(12));
    }

    #[test]
    fn test_flatten_is_identity_on_vectors() {
        let x = variable(5);
        let flat = flatten(&x);
        assert!(flat.is_variable());
        assert_eq!(flat.variable_id(), x.variable_id());
    }

    #[test]
    fn test_flatten_numeric_is_column_major() {
        // [[1, 2], [3, 4]] stored column-major
        let m = constant_matrix(vec![1.0, 3.0, 2.0, 4.0], 2, 2);
        let flat = flatten(&m).value().unwrap();
        assert_eq!(flat.shape(), Shape::vector(4));
        assert_eq!(flat.to_flat_vec(), vec![1.0, 3.0, 2.0, 4.0]);
    }

    #[test]
    fn test_reshape_lowering() {
        let x = variable((2, 3));
        let r = reshape(&x, 6).unwrap();
        let lowered = r.canonical_form().unwrap();
        assert!(lowered.constraints.is_empty());
        assert_eq!(lowered.expr.kind.tag(), "reshape");
        assert_eq!(lowered.expr.shape, Shape::vector(6));
    }

    #[test]
    fn test_reshape_is_affine() {
        let x = variable((2, 2));
        assert!(reshape(&x, 4).unwrap().is_affine());
    }
}
