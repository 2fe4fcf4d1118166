//! Curvature tracking for DCP (Disciplined Convex Programming).
//!
//! Every atom in this crate is affine, so curvature only ever moves between
//! `Constant` and `Affine`; the other variants exist so callers can compose
//! these results with their own rules.

use crate::expr::Expr;

/// Curvature of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Curvature {
    /// Constant value (most restrictive).
    Constant,
    /// Affine function (both convex and concave).
    Affine,
    /// Convex function.
    Convex,
    /// Concave function.
    Concave,
    /// Unknown curvature (not DCP-compliant).
    Unknown,
}

impl Curvature {
    /// Check if the curvature is convex (constant, affine, or convex).
    pub fn is_convex(self) -> bool {
        matches!(self, Curvature::Constant | Curvature::Affine | Curvature::Convex)
    }

    /// Check if the curvature is concave (constant, affine, or concave).
    pub fn is_concave(self) -> bool {
        matches!(self, Curvature::Constant | Curvature::Affine | Curvature::Concave)
    }

    /// Check if the curvature is affine (constant or affine).
    pub fn is_affine(self) -> bool {
        matches!(self, Curvature::Constant | Curvature::Affine)
    }

    pub fn is_constant(self) -> bool {
        matches!(self, Curvature::Constant)
    }
}

/// Curvature of an affine atom applied to an argument of curvature `arg`.
///
/// Constants stay constant and affine stays affine. Anything else loses its
/// guarantee, since a linear map may mix convex and concave entries.
pub fn affine_curvature(arg: Curvature) -> Curvature {
    match arg {
        Curvature::Constant => Curvature::Constant,
        Curvature::Affine => Curvature::Affine,
        _ => Curvature::Unknown,
    }
}

impl Expr {
    /// Get the curvature of this expression.
    pub fn curvature(&self) -> Curvature {
        match self {
            Expr::Variable(_) => Curvature::Affine,
            Expr::Constant(_) => Curvature::Constant,
            Expr::Reshape(_) | Expr::Diag(_) => self
                .args()
                .iter()
                .map(|arg| affine_curvature(arg.curvature()))
                .fold(Curvature::Constant, combine),
        }
    }

    /// Check if this expression is convex.
    pub fn is_convex(&self) -> bool {
        self.curvature().is_convex()
    }

    /// Check if this expression is concave.
    pub fn is_concave(&self) -> bool {
        self.curvature().is_concave()
    }

    /// Check if this expression is affine.
    pub fn is_affine(&self) -> bool {
        self.curvature().is_affine()
    }
}

// Joint curvature of the arguments of an affine atom.
fn combine(acc: Curvature, next: Curvature) -> Curvature {
    match (acc, next) {
        (Curvature::Constant, x) | (x, Curvature::Constant) => x,
        (Curvature::Affine, Curvature::Affine) => Curvature::Affine,
        _ => Curvature::Unknown,
    }
}
