//! arcfit-core — iterative circle fitting for noisy arc samples.
//!
//! Fits a circle (center + radius) to an ordered set of 2D points sampled
//! along an arc, using a greedy local search instead of a closed-form
//! least-squares solution. The stages are:
//!
//! 1. **Points** – validated, read-only sample container ([`PointSet`]).
//! 2. **Tactic** – interchangeable scoring strategies ([`Tactic::Angle`],
//!    [`Tactic::Radius`]) judging how well a candidate circle explains the
//!    samples.
//! 3. **Search** – coordinate-descent refinement with a multiplicatively
//!    shrinking step ([`fit_circle`]), reporting how it terminated
//!    ([`FitStatus`]).
//! 4. **Generate** – seeded synthetic arc samples for tests and demos.

pub mod circle;
pub mod generate;
pub mod point;
pub mod search;
pub mod tactic;

pub use circle::Circle;
pub use generate::{generate_arc, GenerateConfig};
pub use point::PointSet;
pub use search::{fit_circle, FitResult, FitStatus, SearchConfig};
pub use tactic::Tactic;

/// Errors that can occur when setting up a circle fit.
///
/// A search that merely fails to converge is not an error; it terminates
/// with [`FitStatus::MaxIterations`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FitError {
    /// Too few points for the requested operation.
    TooFewPoints { needed: usize, got: usize },
    /// All points coincide; a zero-radius circle would fit but carries no
    /// information about the arc.
    DegenerateGeometry,
}

impl std::fmt::Display for FitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooFewPoints { needed, got } => {
                write!(f, "too few points: need {}, got {}", needed, got)
            }
            Self::DegenerateGeometry => {
                write!(f, "all points coincide; a circle fit is not meaningful")
            }
        }
    }
}

impl std::error::Error for FitError {}
