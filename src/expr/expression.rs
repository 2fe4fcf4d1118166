//! Core expression types for cvxatoms.
//!
//! The `Expr` enum represents every node of an expression tree.
//! Expressions form an immutable DAG (directed acyclic graph) using `Arc` for
//! sharing: a child is only ever wrapped after it is fully built, so no node
//! can reach itself.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use nalgebra::{DMatrix, DVector};
use nalgebra_sparse::CscMatrix;

use super::array::Array;
use super::shape::Shape;
use crate::atoms::{Atom, DiagAtom, Reshape};
use crate::error::{CvxError, Result};
use crate::settings::Settings;

/// Unique identifier for expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(u64);

impl ExprId {
    /// Generate a new unique ID.
    pub fn new() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(0);
        ExprId(NEXT_ID.fetch_add(1, Ordering::SeqCst))
    }

    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for ExprId {
    fn default() -> Self {
        Self::new()
    }
}

/// Data for a variable expression.
#[derive(Debug, Clone)]
pub struct VariableData {
    /// Unique identifier.
    pub id: ExprId,
    /// Shape of the variable.
    pub shape: Shape,
    /// Optional name for display.
    pub name: Option<String>,
    /// Variable is constrained to be non-negative.
    pub nonneg: bool,
    /// Variable is constrained to be non-positive.
    pub nonpos: bool,
    /// Variable is a symmetric matrix.
    pub symmetric: bool,
}

/// Data for a constant expression.
#[derive(Debug, Clone)]
pub struct ConstantData {
    /// Unique identifier.
    pub id: ExprId,
    /// The constant value.
    pub value: Array,
}

impl ConstantData {
    /// Get the shape of the constant.
    pub fn shape(&self) -> Shape {
        self.value.shape()
    }
}

/// An expression node.
///
/// Leaves carry their own shape; atoms fix theirs when they are constructed
/// and never change it afterwards.
#[derive(Debug, Clone)]
pub enum Expr {
    // ========== Leaf nodes ==========
    /// A decision variable.
    Variable(VariableData),
    /// A constant value.
    Constant(ConstantData),

    // ========== Affine atoms ==========
    /// Column-major reshape.
    Reshape(Reshape),
    /// Vector-to-diagonal or matrix-to-diagonal.
    Diag(DiagAtom),
}

impl Expr {
    /// Get the shape of the expression.
    pub fn shape(&self) -> Shape {
        match self {
            Expr::Variable(v) => v.shape.clone(),
            Expr::Constant(c) => c.shape(),
            Expr::Reshape(atom) => atom.shape().clone(),
            Expr::Diag(atom) => atom.shape().clone(),
        }
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.shape().ndim()
    }

    /// Check if the expression is effectively one-dimensional.
    pub fn is_vector(&self) -> bool {
        self.shape().is_vector()
    }

    /// Check if the expression is 0-D.
    pub fn is_scalar(&self) -> bool {
        self.shape().is_scalar()
    }

    /// The atom behind this node, if it is not a leaf.
    pub fn as_atom(&self) -> Option<&dyn Atom> {
        match self {
            Expr::Variable(_) | Expr::Constant(_) => None,
            Expr::Reshape(atom) => Some(atom as &dyn Atom),
            Expr::Diag(atom) => Some(atom as &dyn Atom),
        }
    }

    /// Child expressions (empty for leaves).
    pub fn args(&self) -> &[Arc<Expr>] {
        match self.as_atom() {
            Some(atom) => atom.args(),
            None => &[],
        }
    }

    /// Get the unique ID if this is a variable.
    pub fn variable_id(&self) -> Option<ExprId> {
        match self {
            Expr::Variable(v) => Some(v.id),
            _ => None,
        }
    }

    /// Check if this expression is a constant.
    pub fn is_constant(&self) -> bool {
        matches!(self, Expr::Constant(_))
    }

    /// Check if this expression is a variable.
    pub fn is_variable(&self) -> bool {
        matches!(self, Expr::Variable(_))
    }

    /// Get the constant value if this is a constant expression.
    pub fn constant_value(&self) -> Option<&Array> {
        match self {
            Expr::Constant(c) => Some(&c.value),
            _ => None,
        }
    }

    /// Collect all variables in this expression.
    pub fn variables(&self) -> Vec<ExprId> {
        let mut vars = Vec::new();
        self.collect_variables(&mut vars);
        vars.sort();
        vars.dedup();
        vars
    }

    fn collect_variables(&self, vars: &mut Vec<ExprId>) {
        match self {
            Expr::Variable(v) => vars.push(v.id),
            _ => {
                for arg in self.args() {
                    arg.collect_variables(vars);
                }
            }
        }
    }

    /// Evaluate the expression with the given variable values.
    pub fn evaluate(&self, values: &HashMap<ExprId, Array>) -> Result<Array> {
        match self {
            Expr::Variable(v) => {
                let value = values.get(&v.id).ok_or(CvxError::MissingValue(v.id))?;
                if value.shape() != v.shape {
                    return Err(CvxError::shape_mismatch(v.shape.to_string(), value.shape()));
                }
                Ok(value.clone())
            }
            Expr::Constant(c) => Ok(c.value.clone()),
            Expr::Reshape(atom) => atom.value(values),
            Expr::Diag(atom) => atom.value(values),
        }
    }

    /// The value of a variable-free expression.
    ///
    /// Fails with `MissingValue` if the tree contains a variable, and with
    /// the underlying error if any node cannot be evaluated.
    pub fn value(&self) -> Result<Array> {
        self.evaluate(&HashMap::new())
    }

    /// Check if the expression is symmetric.
    pub fn is_symmetric(&self) -> bool {
        self.is_symmetric_with(&Settings::default())
    }

    /// Check if the expression is symmetric, comparing constants with the
    /// tolerance in `settings`.
    pub fn is_symmetric_with(&self, settings: &Settings) -> bool {
        match self {
            Expr::Variable(v) => v.symmetric || v.shape.is_unit(),
            Expr::Constant(c) => c.value.is_symmetric(settings.symmetry_tol),
            Expr::Reshape(atom) => atom.is_symmetric(),
            Expr::Diag(atom) => atom.is_symmetric(),
        }
    }

    /// Check if the expression is Hermitian.
    ///
    /// Leaves hold real data, where Hermitian and symmetric coincide. Atoms
    /// report their own declaration.
    pub fn is_hermitian(&self) -> bool {
        match self {
            Expr::Variable(_) | Expr::Constant(_) => self.is_symmetric(),
            Expr::Reshape(atom) => atom.is_hermitian(),
            Expr::Diag(atom) => atom.is_hermitian(),
        }
    }
}

// Convenient From implementations for automatic conversion
impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        crate::expr::constant(value)
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        crate::expr::constant(value as f64)
    }
}

impl From<Vec<f64>> for Expr {
    fn from(values: Vec<f64>) -> Self {
        crate::expr::constant_vec(values)
    }
}

impl From<DVector<f64>> for Expr {
    fn from(values: DVector<f64>) -> Self {
        crate::expr::constant_array(Array::Vector(values))
    }
}

impl From<DMatrix<f64>> for Expr {
    fn from(matrix: DMatrix<f64>) -> Self {
        crate::expr::constant_dmatrix(matrix)
    }
}

impl From<CscMatrix<f64>> for Expr {
    fn from(matrix: CscMatrix<f64>) -> Self {
        crate::expr::constant_sparse(matrix)
    }
}

impl From<Array> for Expr {
    fn from(value: Array) -> Self {
        crate::expr::constant_array(value)
    }
}

impl From<&Expr> for Expr {
    fn from(expr: &Expr) -> Self {
        expr.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{constant_matrix, constant_vec, variable};

    #[test]
    fn test_expr_id() {
        let id1 = ExprId::new();
        let id2 = ExprId::new();
        assert_ne!(id1, id2);
        assert!(id1 < id2);
    }

    #[test]
    fn test_variable_shape() {
        let var = Expr::Variable(VariableData {
            id: ExprId::new(),
            shape: Shape::vector(5),
            name: Some("x".to_string()),
            nonneg: false,
            nonpos: false,
            symmetric: false,
        });
        assert_eq!(var.shape(), Shape::vector(5));
        assert_eq!(var.ndim(), 1);
        assert!(var.is_variable());
        assert!(var.args().is_empty());
    }

    #[test]
    fn test_constant_shape() {
        let c = Expr::Constant(ConstantData {
            id: ExprId::new(),
            value: Array::from_vec(vec![1.0, 2.0, 3.0]),
        });
        assert_eq!(c.shape(), Shape::vector(3));
        assert!(c.is_constant());
        assert!(c.is_vector());
    }

    #[test]
    fn test_evaluate_variable() {
        let x = variable(2);
        let id = x.variable_id().unwrap();

        let missing = x.evaluate(&HashMap::new()).unwrap_err();
        assert!(matches!(missing, CvxError::MissingValue(v) if v == id));

        let values = HashMap::from([(id, Array::from_vec(vec![1.0, 2.0]))]);
        assert_eq!(x.evaluate(&values).unwrap().to_flat_vec(), vec![1.0, 2.0]);

        let wrong = HashMap::from([(id, Array::from_vec(vec![1.0]))]);
        assert!(matches!(
            x.evaluate(&wrong),
            Err(CvxError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_constant_value() {
        let c = constant_vec(vec![4.0, 5.0]);
        assert_eq!(c.value().unwrap().to_flat_vec(), vec![4.0, 5.0]);
        assert!(matches!(
            variable(3).value(),
            Err(CvxError::MissingValue(_))
        ));
    }

    #[test]
    fn test_leaf_symmetry() {
        let sym = constant_matrix(vec![1.0, 2.0, 2.0, 3.0], 2, 2);
        assert!(sym.is_symmetric());
        assert!(sym.is_hermitian());

        let asym = constant_matrix(vec![1.0, 2.0, 0.0, 3.0], 2, 2);
        assert!(!asym.is_symmetric());

        assert!(!variable((2, 2)).is_symmetric());
        assert!(variable(()).is_symmetric());
    }

    #[test]
    fn test_symmetry_tolerance() {
        let nearly = constant_matrix(vec![1.0, 2.0, 2.0 + 1e-6, 3.0], 2, 2);
        assert!(!nearly.is_symmetric());
        let loose = Settings {
            symmetry_tol: 1e-3,
            ..Settings::default()
        };
        assert!(nearly.is_symmetric_with(&loose));
    }
}
