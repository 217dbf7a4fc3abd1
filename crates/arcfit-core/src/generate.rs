//! Synthetic arc sample generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Configuration for synthetic arc sampling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Center of the generating circle.
    pub center: [f64; 2],
    /// Radius of the generating circle.
    pub radius: f64,
    /// Number of points sampled along the arc.
    pub n_points: usize,
    /// Fraction of the full circle covered by the arc, clamped to (0, 1].
    pub arc_fraction: f64,
    /// Jitter amplitude as a fraction of the spacing between consecutive
    /// points along the arc. Zero produces exact circle points.
    pub jitter_ratio: f64,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            center: [0.0, 0.0],
            radius: 10.0,
            n_points: 50,
            arc_fraction: 0.3,
            jitter_ratio: 0.05,
            seed: 42,
        }
    }
}

/// Sample points along an arc, perturbing each coordinate with uniform
/// jitter scaled to the point spacing.
pub fn generate_arc(config: &GenerateConfig) -> Vec<[f64; 2]> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let n = config.n_points.max(1);
    let arc_fraction = config.arc_fraction.clamp(f64::MIN_POSITIVE, 1.0);
    let arc_span = 2.0 * std::f64::consts::PI * arc_fraction;

    // Spacing between consecutive samples along the arc sets the jitter
    // scale, so noise stays proportional to the local geometry.
    let spacing = config.radius * arc_span / n as f64;
    let amplitude = config.jitter_ratio * spacing;

    let [cx, cy] = config.center;
    (0..n)
        .map(|i| {
            let t = arc_span * (i as f64) / (n as f64);
            let jx = if amplitude > 0.0 {
                rng.gen_range(-amplitude..amplitude)
            } else {
                0.0
            };
            let jy = if amplitude > 0.0 {
                rng.gen_range(-amplitude..amplitude)
            } else {
                0.0
            };
            [
                cx + config.radius * t.cos() + jx,
                cy + config.radius * t.sin() + jy,
            ]
        })
        .collect()
}
