//! Sign tracking for DCP (Disciplined Convex Programming).
//!
//! This module tracks whether expressions are non-negative, non-positive,
//! or have unknown sign.

use std::sync::Arc;

use crate::atoms::Atom;
use crate::expr::Expr;

/// Sign of an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    /// Expression is always >= 0.
    Nonnegative,
    /// Expression is always <= 0.
    Nonpositive,
    /// Expression is always == 0.
    Zero,
    /// Sign is unknown.
    Unknown,
}

impl Sign {
    /// Check if the sign is non-negative (>= 0).
    pub fn is_nonneg(self) -> bool {
        matches!(self, Sign::Nonnegative | Sign::Zero)
    }

    /// Check if the sign is non-positive (<= 0).
    pub fn is_nonpos(self) -> bool {
        matches!(self, Sign::Nonpositive | Sign::Zero)
    }

    pub fn is_zero(self) -> bool {
        matches!(self, Sign::Zero)
    }
}

impl Expr {
    /// Get the sign of this expression.
    pub fn sign(&self) -> Sign {
        match self {
            Expr::Variable(v) => {
                if v.nonneg {
                    Sign::Nonnegative
                } else if v.nonpos {
                    Sign::Nonpositive
                } else {
                    Sign::Unknown
                }
            }
            Expr::Constant(c) => {
                if c.value.is_nonneg() && c.value.is_nonpos() {
                    Sign::Zero
                } else if c.value.is_nonneg() {
                    Sign::Nonnegative
                } else if c.value.is_nonpos() {
                    Sign::Nonpositive
                } else {
                    Sign::Unknown
                }
            }
            // Both only move entries around or fill with zeros.
            Expr::Reshape(atom) => atom_arg_sign(atom.args()),
            Expr::Diag(atom) => atom_arg_sign(atom.args()),
        }
    }

    /// Check if this expression is non-negative.
    pub fn is_nonneg(&self) -> bool {
        self.sign().is_nonneg()
    }

    /// Check if this expression is non-positive.
    pub fn is_nonpos(&self) -> bool {
        self.sign().is_nonpos()
    }
}

fn atom_arg_sign(args: &[Arc<Expr>]) -> Sign {
    match args {
        [arg] => arg.sign(),
        _ => Sign::Unknown,
    }
}
