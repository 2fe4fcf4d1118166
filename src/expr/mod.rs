//! Expression types and creation utilities.
//!
//! This module provides the core expression types:
//! - `Expr` - The expression enum (leaves and atom nodes)
//! - `Shape` - Shape information for expressions
//! - `Array` - Numeric values of constants and evaluation results
//! - Variable creation via `variable()` and `VariableBuilder`
//! - Constant creation and coercion via `constant()`, `cast_to_const()` and related functions

pub mod array;
pub mod constant;
pub mod expression;
pub mod shape;
pub mod variable;

// Re-export main types
pub use array::Array;
pub use constant::{
    cast_to_const, constant, constant_array, constant_dmatrix, constant_matrix, constant_sparse,
    constant_tensor, constant_vec, eye, zeros, IntoConstant,
};
pub use expression::{ConstantData, Expr, ExprId, VariableData};
pub use shape::Shape;
pub use variable::{
    named_variable, nonneg_variable, nonpos_variable, symmetric_variable, variable,
    VariableBuilder,
};
