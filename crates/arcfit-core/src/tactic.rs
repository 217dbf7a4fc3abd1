//! Scoring tactics for judging candidate circle quality.
//!
//! Either comparing the normal direction of each local line segment with the
//! direction toward a proposed center, or comparing the distance from each
//! point to a proposed center with the candidate radius, can be used to
//! determine the best fit. The radius tactic aggregates a population
//! statistic and copes better with noisy samples; the angle tactic rewards
//! local tangent consistency and is more sensitive to jitter in consecutive
//! points.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::circle::Circle;
use crate::point::PointSet;

/// Segments (and center directions) shorter than this are treated as
/// degenerate and skipped.
const MIN_LENGTH_SQ: f64 = 1e-24;

/// Strategy for scoring how well a candidate circle explains the samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tactic {
    /// Mean angular deviation between segment normals and the directions
    /// from segment midpoints to the candidate center.
    Angle,
    /// Mean squared deviation of point distances from the candidate radius.
    Radius,
}

impl Tactic {
    /// Score a candidate against the point set. Lower is better; an exact
    /// fit scores zero under both tactics.
    pub fn score(&self, circle: &Circle, points: &PointSet) -> f64 {
        match self {
            Tactic::Angle => angle_score(circle, points.points()),
            Tactic::Radius => radius_score(circle, points.points()),
        }
    }

    /// Whether the score depends on the candidate radius.
    pub(crate) fn uses_radius(self) -> bool {
        matches!(self, Tactic::Radius)
    }
}

/// Mean angular deviation across consecutive point pairs.
///
/// Each pair forms a local line segment of the arc; on a well-fitting circle
/// the segment's normal points at the center. The raw angle between the
/// normal and the midpoint-to-center direction lies in [0, π]; point ordering
/// fixes no outward orientation for the normal, so the deviation is folded
/// into [0, π/2] and an inward- or outward-pointing normal scores alike.
///
/// Zero-length segments (duplicate consecutive points) and segments whose
/// midpoint coincides with the center are skipped.
fn angle_score(circle: &Circle, points: &[[f64; 2]]) -> f64 {
    let mut sum = 0.0;
    let mut n_segments = 0usize;

    for pair in points.windows(2) {
        let (p0, p1) = (pair[0], pair[1]);
        let segment = Vector2::new(p1[0] - p0[0], p1[1] - p0[1]);
        if segment.norm_squared() <= MIN_LENGTH_SQ {
            continue;
        }

        let normal = Vector2::new(-segment.y, segment.x);
        let mid = [(p0[0] + p1[0]) * 0.5, (p0[1] + p1[1]) * 0.5];
        let to_center = Vector2::new(circle.cx - mid[0], circle.cy - mid[1]);
        if to_center.norm_squared() <= MIN_LENGTH_SQ {
            continue;
        }

        let theta = normal.angle(&to_center);
        sum += theta.min(std::f64::consts::PI - theta);
        n_segments += 1;
    }

    if n_segments == 0 {
        return f64::MAX;
    }
    sum / n_segments as f64
}

/// Mean squared radial residual.
///
/// For a fixed center the minimizing radius is the mean of the center
/// distances, so at the optimum this equals the spread of the distances
/// around their mean.
fn radius_score(circle: &Circle, points: &[[f64; 2]]) -> f64 {
    let sum_sq: f64 = points
        .iter()
        .map(|&p| {
            let r = circle.residual(p);
            r * r
        })
        .sum();
    sum_sq / points.len() as f64
}
