//! Greedy coordinate-descent search over circle parameters.
//!
//! The search starts from the centroid of the samples, evaluates six
//! deterministic perturbations of the current candidate per iteration
//! (±step on each of `cx`, `cy`, `r`), accepts the best strictly-improving
//! one, and shrinks the step multiplicatively whenever no perturbation
//! improves. It terminates when the step falls below a threshold, when the
//! iteration cap is hit, or when an optional wall-clock budget elapses.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::circle::Circle;
use crate::point::PointSet;
use crate::tactic::Tactic;
use crate::FitError;

/// Configuration for the circle search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Initial perturbation step. When `None`, half the bounding-box span of
    /// the points is used.
    pub initial_step: Option<f64>,
    /// Multiplicative step shrink applied when no perturbation improves.
    /// Must lie in (0, 1) for step-based convergence; the iteration cap
    /// bounds the search regardless.
    pub shrink_factor: f64,
    /// Step size below which the search is considered converged.
    pub min_step: f64,
    /// Maximum number of search iterations.
    pub max_iters: usize,
    /// Optional wall-clock budget, checked once per iteration.
    pub time_budget: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            initial_step: None,
            shrink_factor: 0.5,
            min_step: 1e-7,
            max_iters: 10_000,
            time_budget: None,
        }
    }
}

/// How the search terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitStatus {
    /// The step shrank below [`SearchConfig::min_step`]; no further
    /// meaningful refinement is possible.
    Converged,
    /// The iteration cap was reached first.
    MaxIterations,
    /// The wall-clock budget elapsed first.
    TimeBudgetExceeded,
}

/// Result of a circle fit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitResult {
    /// Best circle found.
    pub circle: Circle,
    /// Terminal state of the search.
    pub status: FitStatus,
    /// Score of the best circle under the active tactic.
    pub score: f64,
    /// Score of the starting candidate, for comparison.
    pub initial_score: f64,
    /// Number of search iterations performed.
    pub iterations: usize,
    /// Number of tactic evaluations performed.
    pub evaluations: usize,
}

/// Fit a circle to the points under the given tactic.
///
/// The starting candidate sits at the centroid of the points with radius
/// equal to the mean centroid distance. Fails with
/// [`FitError::DegenerateGeometry`] when all points coincide: a zero-radius
/// circle would fit exactly but tells the caller nothing about the arc.
pub fn fit_circle(
    points: &PointSet,
    tactic: Tactic,
    config: &SearchConfig,
) -> Result<FitResult, FitError> {
    let start = Instant::now();

    if points.span() == 0.0 {
        return Err(FitError::DegenerateGeometry);
    }

    let centroid = points.centroid();
    let mut best = Circle::new(centroid[0], centroid[1], points.mean_distance(centroid));
    let mut best_score = tactic.score(&best, points);
    let initial_score = best_score;
    let mut evaluations = 1usize;

    let mut step = config.initial_step.unwrap_or_else(|| 0.5 * points.span());
    let mut iterations = 0usize;

    let status = loop {
        if step < config.min_step {
            break FitStatus::Converged;
        }
        if iterations >= config.max_iters {
            break FitStatus::MaxIterations;
        }
        if let Some(budget) = config.time_budget {
            if start.elapsed() >= budget {
                break FitStatus::TimeBudgetExceeded;
            }
        }
        iterations += 1;

        let mut candidate = best;
        let mut candidate_score = best_score;
        for neighbor in neighbors(&best, step) {
            let score = tactic.score(&neighbor, points);
            evaluations += 1;
            if score < candidate_score {
                candidate = neighbor;
                candidate_score = score;
            }
        }

        // Ties retain the current candidate; only strict improvement moves.
        if candidate_score < best_score {
            best = candidate;
            best_score = candidate_score;
            if !tactic.uses_radius() {
                // Angle scoring is radius-invariant; keep the candidate's
                // radius at the expected radius for its center.
                best.r = points.mean_distance(best.center());
            }
        } else {
            step *= config.shrink_factor;
        }
    };

    tracing::debug!(
        "fit finished: {:?} after {} iterations, score {:.3e} -> {:.3e}",
        status,
        iterations,
        initial_score,
        best_score,
    );

    Ok(FitResult {
        circle: best,
        status,
        score: best_score,
        initial_score,
        iterations,
        evaluations,
    })
}

/// The six axis-aligned perturbations of a candidate, radius clamped to
/// non-negative.
fn neighbors(c: &Circle, step: f64) -> [Circle; 6] {
    [
        Circle::new(c.cx - step, c.cy, c.r),
        Circle::new(c.cx + step, c.cy, c.r),
        Circle::new(c.cx, c.cy - step, c.r),
        Circle::new(c.cx, c.cy + step, c.r),
        Circle::new(c.cx, c.cy, (c.r - step).max(0.0)),
        Circle::new(c.cx, c.cy, c.r + step),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn fit(points: Vec<[f64; 2]>, tactic: Tactic) -> FitResult {
        let points = PointSet::new(points).unwrap();
        fit_circle(&points, tactic, &SearchConfig::default()).unwrap()
    }

    #[test]
    fn test_four_point_unit_circle_radius_tactic() {
        let result = fit(
            vec![[1.0, 0.0], [0.0, 1.0], [-1.0, 0.0], [0.0, -1.0]],
            Tactic::Radius,
        );
        assert_eq!(result.status, FitStatus::Converged);
        assert_relative_eq!(result.circle.cx, 0.0, epsilon = 1e-3);
        assert_relative_eq!(result.circle.cy, 0.0, epsilon = 1e-3);
        assert_relative_eq!(result.circle.r, 1.0, epsilon = 1e-3);
        assert!(result.score < 1e-6, "score should be ~0, got {}", result.score);
    }

    #[test]
    fn test_three_point_unit_circle_both_tactics() {
        for tactic in [Tactic::Angle, Tactic::Radius] {
            let result = fit(vec![[1.0, 0.0], [0.0, 1.0], [-1.0, 0.0]], tactic);
            assert_relative_eq!(result.circle.cx, 0.0, epsilon = 1e-3);
            assert_relative_eq!(result.circle.cy, 0.0, epsilon = 1e-3);
            assert_relative_eq!(result.circle.r, 1.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_exact_circle_recovered_from_dense_samples() {
        let truth = Circle::new(12.0, -7.0, 4.0);
        let pts = truth.sample_points(60);
        for tactic in [Tactic::Angle, Tactic::Radius] {
            let result = fit(pts.clone(), tactic);
            assert_relative_eq!(result.circle.cx, truth.cx, epsilon = 1e-3);
            assert_relative_eq!(result.circle.cy, truth.cy, epsilon = 1e-3);
            assert_relative_eq!(result.circle.r, truth.r, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_partial_arc_fit() {
        // Third of a circle only; centroid starts well off-center.
        let truth = Circle::new(5.0, 5.0, 10.0);
        let pts: Vec<[f64; 2]> = (0..40)
            .map(|i| {
                let t = 2.0 * std::f64::consts::PI * 0.3 * (i as f64) / 40.0;
                [truth.cx + truth.r * t.cos(), truth.cy + truth.r * t.sin()]
            })
            .collect();
        let result = fit(pts, Tactic::Radius);
        assert_relative_eq!(result.circle.cx, truth.cx, epsilon = 1e-2);
        assert_relative_eq!(result.circle.cy, truth.cy, epsilon = 1e-2);
        assert_relative_eq!(result.circle.r, truth.r, epsilon = 1e-2);
    }

    #[test]
    fn test_score_never_worse_than_initial() {
        let truth = Circle::new(-3.0, 8.0, 6.0);
        let pts: Vec<[f64; 2]> = (0..30)
            .map(|i| {
                let t = 2.0 * std::f64::consts::PI * 0.4 * (i as f64) / 30.0;
                [truth.cx + truth.r * t.cos(), truth.cy + truth.r * t.sin()]
            })
            .collect();
        for tactic in [Tactic::Angle, Tactic::Radius] {
            let result = fit(pts.clone(), tactic);
            assert!(
                result.score <= result.initial_score,
                "{:?}: {} > {}",
                tactic,
                result.score,
                result.initial_score
            );
        }
    }

    #[test]
    fn test_degenerate_points_rejected() {
        let points = PointSet::new(vec![[3.0, 3.0]; 7]).unwrap();
        let err = fit_circle(&points, Tactic::Radius, &SearchConfig::default()).unwrap_err();
        assert_eq!(err, FitError::DegenerateGeometry);
    }

    #[test]
    fn test_iteration_cap_respected() {
        let points =
            PointSet::new(vec![[1.0, 0.0], [0.0, 1.0], [-1.0, 0.0], [0.0, -1.0]]).unwrap();
        let config = SearchConfig {
            max_iters: 5,
            min_step: 1e-12,
            ..SearchConfig::default()
        };
        let result = fit_circle(&points, Tactic::Radius, &config).unwrap();
        assert_eq!(result.status, FitStatus::MaxIterations);
        assert_eq!(result.iterations, 5);
    }

    #[test]
    fn test_time_budget_respected() {
        let points =
            PointSet::new(vec![[1.0, 0.0], [0.0, 1.0], [-1.0, 0.0], [0.0, -1.0]]).unwrap();
        let config = SearchConfig {
            time_budget: Some(Duration::ZERO),
            ..SearchConfig::default()
        };
        let result = fit_circle(&points, Tactic::Radius, &config).unwrap();
        assert_eq!(result.status, FitStatus::TimeBudgetExceeded);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_noisy_arc_converges_near_truth() {
        let config = crate::GenerateConfig {
            center: [2.0, -4.0],
            radius: 10.0,
            n_points: 50,
            arc_fraction: 0.5,
            jitter_ratio: 0.05,
            seed: 7,
        };
        let points = PointSet::new(crate::generate_arc(&config)).unwrap();
        let result = fit_circle(&points, Tactic::Radius, &SearchConfig::default()).unwrap();
        // Jitter bounds the achievable accuracy; the fit should still land
        // close to the generating circle.
        assert_relative_eq!(result.circle.cx, 2.0, epsilon = 0.5);
        assert_relative_eq!(result.circle.cy, -4.0, epsilon = 0.5);
        assert_relative_eq!(result.circle.r, 10.0, epsilon = 0.5);
    }

    #[test]
    fn test_result_serializes() {
        let result = fit(
            vec![[1.0, 0.0], [0.0, 1.0], [-1.0, 0.0], [0.0, -1.0]],
            Tactic::Radius,
        );
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"converged\""));
    }
}
