//! Expression canonicalization.
//!
//! Canonicalization lowers an expression tree into a `LinOp` tree plus any
//! auxiliary constraints the atoms introduce. Leaves map to `variable` and
//! constant LinOps; atoms lower their arguments first and then emit their
//! own graph implementation on top.

use super::lin_op::{LinConstraint, LinOp};
use super::lin_utils;
use crate::atoms::Atom;
use crate::error::Result;
use crate::expr::Expr;

/// Result of lowering an expression.
#[derive(Debug, Clone)]
pub struct CanonResult {
    /// The lowered expression.
    pub expr: LinOp,
    /// Auxiliary constraints introduced during lowering.
    pub constraints: Vec<LinConstraint>,
}

impl CanonResult {
    /// A lowered expression that needs no auxiliary constraints.
    pub fn unconstrained(expr: LinOp) -> Self {
        CanonResult {
            expr,
            constraints: Vec::new(),
        }
    }
}

/// Lower an expression into a `LinOp` tree.
#[tracing::instrument(level = "debug", skip_all, fields(shape = %expr.shape()))]
pub fn canonicalize(expr: &Expr) -> Result<CanonResult> {
    let result = expr.canonical_form()?;
    tracing::debug!(
        root = %result.expr.kind,
        constraints = result.constraints.len(),
        "canonicalization complete"
    );
    Ok(result)
}

impl Expr {
    /// The lowered form of this expression.
    pub fn canonical_form(&self) -> Result<CanonResult> {
        match self {
            Expr::Variable(v) => Ok(CanonResult::unconstrained(lin_utils::create_var(
                v.shape.clone(),
                v.id,
            ))),
            Expr::Constant(c) => Ok(CanonResult::unconstrained(lin_utils::create_const(
                &c.value,
            ))),
            Expr::Reshape(atom) => atom.canonicalize(),
            Expr::Diag(atom) => atom.canonicalize(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atoms::{diag, reshape};
    use crate::canon::LinOpKind;
    use crate::expr::{constant_vec, variable, Shape};

    #[test]
    fn test_canonicalize_variable() {
        let x = variable(5);
        let result = canonicalize(&x).unwrap();
        assert!(result.constraints.is_empty());
        assert!(matches!(result.expr.kind, LinOpKind::Variable(id) if Some(id) == x.variable_id()));
        assert_eq!(result.expr.shape, Shape::vector(5));
    }

    #[test]
    fn test_canonicalize_constant() {
        let c = constant_vec(vec![1.0, 2.0]);
        let result = canonicalize(&c).unwrap();
        assert!(result.expr.is_constant());
        assert!(result.constraints.is_empty());
    }

    #[test]
    fn test_canonicalize_nested_atoms() {
        // diag(reshape(x, (4,))) where x is 2x2: reshape lowers below diag_vec
        let x = variable((2, 2));
        let flat = reshape(&x, 4).unwrap();
        let d = diag(&flat).unwrap();

        let result = canonicalize(&d).unwrap();
        assert!(result.constraints.is_empty());
        assert!(matches!(result.expr.kind, LinOpKind::DiagVec));
        assert_eq!(result.expr.shape, Shape::matrix(4, 4));

        let inner = &result.expr.args[0];
        assert!(matches!(inner.kind, LinOpKind::Reshape));
        assert!(matches!(inner.args[0].kind, LinOpKind::Variable(_)));
    }
}
