//! # cvxatoms
//!
//! Expression atoms for Disciplined Convex Programming (DCP).
//!
//! cvxatoms builds immutable expression trees over variables and constants,
//! evaluates them numerically and lowers them into trees of primitive linear
//! operations (`LinOp`s) that a modeling layer can hand to a solver.
//!
//! ## Quick Start
//!
//! ```
//! use cvxatoms::prelude::*;
//!
//! // A 3x3 diagonal matrix from a vector constant
//! let d = diag(vec![1.0, 2.0, 3.0])?;
//! assert_eq!(d.shape(), Shape::matrix(3, 3));
//! assert!(d.is_symmetric());
//!
//! // The diagonal of a square variable, lowered to a LinOp tree
//! let x = variable((3, 3));
//! let lowered = canonicalize(&diag(&x)?)?;
//! assert_eq!(lowered.expr.kind.tag(), "diag_mat");
//! assert!(lowered.constraints.is_empty());
//! # Ok::<(), cvxatoms::CvxError>(())
//! ```
//!
//! ## Supported Atoms
//!
//! - Structural: `reshape`, `flatten`
//! - Diagonal: `diag`, with the directed forms `diag_vec` and `diag_mat`
//!
//! All of them are affine and sign-preserving.
//!
//! ## Architecture
//!
//! - **Expression trees** built using the `Expr` enum with `Arc` sharing
//! - **Atoms** implement the `Atom` trait: shape inference, numeric
//!   evaluation, lowering and structural properties
//! - **DCP analysis** via curvature and sign tracking
//! - **Canonicalization** lowers trees to `LinOp`s, which `LinExpr` turns
//!   into sparse coefficient form

pub mod atoms;
pub mod canon;
pub mod dcp;
pub mod error;
pub mod expr;
pub mod settings;
pub mod sparse;

/// Prelude module for convenient imports.
///
/// ```
/// use cvxatoms::prelude::*;
/// ```
pub mod prelude {
    // Expression types
    pub use crate::expr::{
        cast_to_const, constant, constant_dmatrix, constant_matrix, constant_sparse,
        constant_tensor, constant_vec, eye, nonneg_variable, nonpos_variable, symmetric_variable,
        variable, zeros, Array, Expr, ExprId, IntoConstant, Shape, VariableBuilder,
    };

    // Atoms
    pub use crate::atoms::{diag, diag_mat, diag_vec, flatten, reshape, Atom, DiagKind};

    // Canonicalization
    pub use crate::canon::{canonicalize, CanonResult, LinExpr, LinOp, LinOpKind};

    // DCP
    pub use crate::dcp::{Curvature, Sign};

    // Configuration and errors
    pub use crate::error::{CvxError, Result};
    pub use crate::settings::Settings;
}

// Re-export main types at crate root
pub use error::{CvxError, Result};
pub use settings::Settings;
