//! Canonicalization lowers expressions into primitive linear operations.
//!
//! This module provides:
//! - `LinOp` trees, the lowered form every atom emits
//! - `lin_utils` builders for individual LinOp nodes
//! - `canonicalize` for whole expression trees
//! - `LinExpr`, the coefficient form of a LinOp tree

pub mod canonicalizer;
pub mod lin_expr;
pub mod lin_op;
pub mod lin_utils;

pub use canonicalizer::{canonicalize, CanonResult};
pub use lin_expr::LinExpr;
pub use lin_op::{LinConstraint, LinOp, LinOpKind};
