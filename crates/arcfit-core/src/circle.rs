//! Circle hypothesis type.

use serde::{Deserialize, Serialize};

/// A candidate circle: center and radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Center x.
    pub cx: f64,
    /// Center y.
    pub cy: f64,
    /// Radius, always non-negative.
    pub r: f64,
}

impl Circle {
    pub fn new(cx: f64, cy: f64, r: f64) -> Self {
        Self { cx, cy, r }
    }

    pub fn center(&self) -> [f64; 2] {
        [self.cx, self.cy]
    }

    /// Check basic validity: finite values, non-negative radius.
    pub fn is_valid(&self) -> bool {
        self.cx.is_finite() && self.cy.is_finite() && self.r.is_finite() && self.r >= 0.0
    }

    /// Distance from the center to a point.
    pub fn center_distance(&self, p: [f64; 2]) -> f64 {
        ((p[0] - self.cx).powi(2) + (p[1] - self.cy).powi(2)).sqrt()
    }

    /// Signed radial residual of a point: center distance minus radius.
    pub fn residual(&self, p: [f64; 2]) -> f64 {
        self.center_distance(p) - self.r
    }

    /// Sample `n` points on the circle boundary, counterclockwise from +x.
    pub fn sample_points(&self, n: usize) -> Vec<[f64; 2]> {
        (0..n)
            .map(|i| {
                let t = 2.0 * std::f64::consts::PI * (i as f64) / (n as f64);
                [self.cx + self.r * t.cos(), self.cy + self.r * t.sin()]
            })
            .collect()
    }
}
