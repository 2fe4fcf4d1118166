//! Atom functions for building expressions.
//!
//! - **`Atom`**: the contract every operation node implements
//! - **Reshaping**: `reshape`, `flatten`
//! - **Diagonal**: `diag` and its two directed variants

pub mod affine;
pub mod atom;
pub mod diag;

pub use affine::{flatten, reshape, Reshape};
pub use atom::Atom;
pub use diag::{diag, diag_mat, diag_vec, DiagAtom, DiagKind, DIAG_ARGUMENT_ERROR};
