//! The contract every atom implements.

use std::collections::HashMap;
use std::sync::Arc;

use crate::canon::{CanonResult, LinOp};
use crate::error::{CvxError, Result};
use crate::expr::{Array, Expr, ExprId, Shape};

/// An operation node in an expression tree.
///
/// Atoms are built from a fixed argument list and infer their shape once,
/// from argument shapes only. Everything else is answered on demand:
/// numeric evaluation, lowering to `LinOp`s and algebraic properties.
pub trait Atom {
    /// Name used in logs and errors.
    fn name(&self) -> &'static str;

    /// The arguments, in order.
    fn args(&self) -> &[Arc<Expr>];

    /// Output shape, fixed at construction.
    fn shape(&self) -> &Shape;

    /// Compute the atom's value from the values of its arguments.
    fn numeric(&self, values: &[Array]) -> Result<Array>;

    /// Emit the `LinOp` for this atom given its lowered arguments, plus any
    /// auxiliary constraints.
    fn graph_implementation(&self, arg_objs: Vec<LinOp>, shape: &Shape) -> Result<CanonResult>;

    /// Whether the output is symmetric. Single-element outputs always are.
    fn is_symmetric(&self) -> bool {
        self.shape().is_unit()
    }

    /// Whether the output is Hermitian.
    fn is_hermitian(&self) -> bool {
        self.is_symmetric()
    }

    /// Evaluate the arguments under `values`, then this atom.
    ///
    /// A result whose shape differs from [`Atom::shape`] is a
    /// `ShapeMismatch`.
    fn value(&self, values: &HashMap<ExprId, Array>) -> Result<Array> {
        let arg_values = self
            .args()
            .iter()
            .map(|arg| arg.evaluate(values))
            .collect::<Result<Vec<_>>>()?;
        let result = self.numeric(&arg_values)?;
        if result.shape() != *self.shape() {
            return Err(CvxError::shape_mismatch(self.shape().to_string(), result.shape()));
        }
        Ok(result)
    }

    /// Lower the arguments, then this atom, collecting every constraint on
    /// the way.
    fn canonicalize(&self) -> Result<CanonResult> {
        let mut arg_objs = Vec::with_capacity(self.args().len());
        let mut constraints = Vec::new();
        for arg in self.args() {
            let lowered = arg.canonical_form()?;
            arg_objs.push(lowered.expr);
            constraints.extend(lowered.constraints);
        }

        let graph = self.graph_implementation(arg_objs, self.shape())?;
        tracing::trace!(
            atom = self.name(),
            op = %graph.expr.kind,
            shape = %graph.expr.shape,
            "lowered atom"
        );
        constraints.extend(graph.constraints);
        Ok(CanonResult {
            expr: graph.expr,
            constraints,
        })
    }
}

/// The single item of a unary atom's inputs.
pub(crate) fn single<T>(atom: &'static str, items: impl IntoIterator<Item = T>) -> Result<T> {
    let mut iter = items.into_iter();
    let first = iter.next();
    let extra = iter.count();
    let got = usize::from(first.is_some()) + extra;
    match first {
        Some(item) if extra == 0 => Ok(item),
        _ => Err(CvxError::ArgumentCount {
            atom,
            expected: 1,
            got,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::diag_vec;
    use crate::expr::{constant_matrix, variable};

    #[test]
    fn test_single() {
        assert_eq!(single("t", vec![3]).unwrap(), 3);
        assert!(matches!(
            single("t", Vec::<i32>::new()),
            Err(CvxError::ArgumentCount { got: 0, .. })
        ));
        assert!(matches!(
            single("t", [1, 2, 3].iter()),
            Err(CvxError::ArgumentCount { atom: "t", expected: 1, got: 3 })
        ));
    }

    #[test]
    fn test_value_checks_declared_shape() {
        // (1, 3) declares a 1x1 output from its first dimension, but the
        // numeric result spans all three entries.
        let d = diag_vec(&constant_matrix(vec![1.0, 2.0, 3.0], 1, 3)).unwrap();
        assert_eq!(d.shape(), Shape::matrix(1, 1));
        assert!(matches!(
            d.value(),
            Err(CvxError::ShapeMismatch { .. })
        ));

        let x = variable((3, 1));
        let d = diag_vec(&x).unwrap();
        let values = HashMap::from([(
            x.variable_id().unwrap(),
            Array::from_matrix(nalgebra::DMatrix::from_column_slice(3, 1, &[1.0, 2.0, 3.0])),
        )]);
        assert_eq!(d.evaluate(&values).unwrap().shape(), Shape::matrix(3, 3));
    }
}
