//! Tunable tolerances for property checks and coefficient extraction.

/// Settings shared by property queries and canonicalization.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Largest |a_ij - a_ji| still treated as symmetric for constant values.
    pub symmetry_tol: f64,
    /// Coefficients with magnitude at or below this are dropped from
    /// coefficient matrices.
    pub prune_tol: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            symmetry_tol: 1e-10,
            prune_tol: 1e-15,
        }
    }
}
