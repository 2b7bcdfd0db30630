//! Non-overlapping node placement by bounded rejection sampling.
//!
//! Placement is independent of edge structure: it only needs the node
//! labels, the drawing bounds and a [`RandomSource`]. The result is a
//! [`Placement`], which is either complete or lists the nodes that could not
//! be placed before the retry budget ran out.
//!
//! [`RandomSource`]: crate::rng::RandomSource

pub mod engine;

use std::collections::BTreeMap;

use serde::Serialize;

pub use engine::LayoutEngine;

/// Node fill colors, drawn uniformly per node.
pub const PALETTE: [&str; 5] = ["#8b5cf6", "#3b82f6", "#0ea5e9", "#10b981", "#f97316"];

/// Width and height of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A placed node marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub r: f64,
    pub color: &'static str,
}

impl Circle {
    /// Euclidean distance between the two centres.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// `true` when the rims are at least `separation` apart.
    #[must_use]
    pub fn clears(&self, other: &Self, separation: f64) -> bool {
        self.distance_to(other) >= self.r + other.r + separation
    }
}

/// Circles that were placed, keyed by node label.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    pub circles: BTreeMap<String, Circle>,
    /// Candidates rejected for overlapping an already placed circle.
    pub rejected: usize,
}

impl Layout {
    /// The circle for `label`, if it was placed.
    #[must_use]
    pub fn circle(&self, label: &str) -> Option<&Circle> {
        self.circles.get(label)
    }
}

/// Outcome of a layout pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Placement {
    /// Every node received a circle.
    Complete(Layout),
    /// The retry budget ran out; `unplaced` lists the remaining nodes in
    /// placement order.
    Partial { layout: Layout, unplaced: Vec<String> },
}

impl Placement {
    /// The placed circles, whether or not placement finished.
    #[must_use]
    pub const fn layout(&self) -> &Layout {
        match self {
            Self::Complete(layout) | Self::Partial { layout, .. } => layout,
        }
    }

    /// Labels left without a circle; empty when complete.
    #[must_use]
    pub fn unplaced(&self) -> &[String] {
        match self {
            Self::Complete(_) => &[],
            Self::Partial { unplaced, .. } => unplaced,
        }
    }

    /// `true` for [`Placement::Complete`].
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }
}

/// Errors from layout.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// The margins leave no room to sample from.
    #[error("bounds {width}x{height} are smaller than the margins {x_offset}/{y_offset}")]
    BoundsTooSmall {
        width: f64,
        height: f64,
        x_offset: f64,
        y_offset: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circle(x: f64, y: f64) -> Circle {
        Circle {
            x,
            y,
            r: 25.0,
            color: PALETTE[0],
        }
    }

    #[test]
    fn clearance_includes_both_radii_and_gap() {
        let a = circle(0.0, 0.0);
        assert!(a.clears(&circle(100.0, 0.0), 50.0));
        assert!(!a.clears(&circle(99.9, 0.0), 50.0));
        assert!((a.distance_to(&circle(3.0, 4.0)) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_placement_reports_unplaced() {
        let placement = Placement::Partial {
            layout: Layout::default(),
            unplaced: vec!["B".into()],
        };
        assert!(!placement.is_complete());
        assert_eq!(placement.unplaced(), ["B".to_string()]);

        let json = serde_json::to_value(&placement).expect("serialize");
        assert_eq!(json["status"], "partial");
        assert_eq!(json["unplaced"], serde_json::json!(["B"]));
    }
}
