//! Rejection-sampling placement.
//!
//! For each node, in order, candidates are drawn uniformly inside the
//! bounds minus the margins (x, then y, then a palette color) until one
//! clears every already placed circle by `separation`. A single budget of
//! `max_iterations` rejected candidates is shared by all nodes; the
//! rejection that exhausts it stops placement, and that node plus every
//! later one is reported unplaced.

use std::collections::BTreeMap;

use tracing::{debug, instrument, warn};

use super::{Bounds, Circle, Layout, LayoutError, PALETTE, Placement};
use crate::config::Config;
use crate::rng::RandomSource;

/// Placement parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutEngine {
    pub radius: f64,
    pub separation: f64,
    pub x_offset: f64,
    pub y_offset: f64,
    pub max_iterations: usize,
}

impl From<&Config> for LayoutEngine {
    fn from(config: &Config) -> Self {
        Self {
            radius: config.radius,
            separation: config.separation,
            x_offset: config.x_offset,
            y_offset: config.y_offset,
            max_iterations: config.max_iterations,
        }
    }
}

impl LayoutEngine {
    /// Place every label in `nodes` inside `bounds`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::BoundsTooSmall`] when the margins leave an
    /// empty sampling area. Running out of retries is not an error; it
    /// yields [`Placement::Partial`].
    #[instrument(skip_all, fields(nodes = nodes.len()))]
    pub fn place<S, R>(
        &self,
        nodes: &[S],
        bounds: Bounds,
        rng: &mut R,
    ) -> Result<Placement, LayoutError>
    where
        S: AsRef<str>,
        R: RandomSource + ?Sized,
    {
        let x_hi = bounds.width - self.x_offset;
        let y_hi = bounds.height - self.y_offset;
        if !(x_hi >= self.x_offset && y_hi >= self.y_offset) {
            return Err(LayoutError::BoundsTooSmall {
                width: bounds.width,
                height: bounds.height,
                x_offset: self.x_offset,
                y_offset: self.y_offset,
            });
        }

        let mut circles: BTreeMap<String, Circle> = BTreeMap::new();
        let mut rejected = 0_usize;

        for (i, label) in nodes.iter().enumerate() {
            loop {
                let candidate = Circle {
                    x: rng.uniform(self.x_offset, x_hi),
                    y: rng.uniform(self.y_offset, y_hi),
                    r: self.radius,
                    color: PALETTE[rng.below(PALETTE.len())],
                };
                if circles
                    .values()
                    .all(|other| candidate.clears(other, self.separation))
                {
                    circles.insert(label.as_ref().to_string(), candidate);
                    break;
                }

                rejected += 1;
                if rejected >= self.max_iterations {
                    let unplaced: Vec<String> =
                        nodes[i..].iter().map(|s| s.as_ref().to_string()).collect();
                    warn!(
                        budget = self.max_iterations,
                        placed = circles.len(),
                        ?unplaced,
                        "layout retry budget exhausted"
                    );
                    return Ok(Placement::Partial {
                        layout: Layout { circles, rejected },
                        unplaced,
                    });
                }
            }
        }

        debug!(placed = circles.len(), rejected, "layout complete");
        Ok(Placement::Complete(Layout { circles, rejected }))
    }
}
