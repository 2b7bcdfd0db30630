//! Drawing a graph, its layout and a highlighted route onto a [`Canvas`].
//!
//! The crate never owns a drawing surface. Callers pass a `Canvas`
//! implementation in; the CLI ships an SVG one.

use crate::graph::{EdgeKey, Graph};
use crate::layout::{Circle, Layout};
use crate::path::Route;

/// Canvas background.
pub const BACKGROUND_COLOR: &str = "#cbd5e1";
/// Regular edge lines and their weight labels.
pub const EDGE_COLOR: &str = "#ffffff";
/// Edges on the highlighted route.
pub const HIGHLIGHT_COLOR: &str = "#04bc2f";
/// Node label text.
pub const LABEL_COLOR: &str = "#ffffff";

const LABEL_SIZE: f64 = 22.0;
const WEIGHT_SIZE: f64 = 16.0;
const STROKE_WIDTH: f64 = 1.2;

/// A 2D drawing surface.
pub trait Canvas {
    fn background(&mut self, color: &str);
    fn circle(&mut self, x: f64, y: f64, r: f64, fill: &str);
    fn line(&mut self, from: (f64, f64), to: (f64, f64), stroke: &str, width: f64);
    /// Text centred on `(x, y)`.
    fn text(&mut self, x: f64, y: f64, size: f64, fill: &str, content: &str);
}

/// Line endpoints between two circles, pulled back to each rim plus
/// `adjust`.
#[must_use]
pub fn edge_endpoints(a: &Circle, b: &Circle, adjust: f64) -> ((f64, f64), (f64, f64)) {
    let angle = (a.y - b.y).atan2(a.x - b.x);
    let (sin, cos) = angle.sin_cos();
    let ra = a.r + adjust;
    let rb = b.r + adjust;
    (
        (ra.mul_add(-cos, a.x), ra.mul_add(-sin, a.y)),
        (rb.mul_add(cos, b.x), rb.mul_add(sin, b.y)),
    )
}

/// Weight label text: whole numbers without decimals, others with two.
#[must_use]
pub fn format_weight(w: f64) -> String {
    if w.fract() == 0.0 {
        format!("{w:.0}")
    } else {
        format!("{w:.2}")
    }
}

/// Draw the full scene: background, every edge with its weight, every
/// placed circle with its label, then `highlight` on top.
///
/// Edges touching an unplaced node are skipped.
pub fn render_scene<C: Canvas + ?Sized>(
    canvas: &mut C,
    graph: &Graph,
    layout: &Layout,
    highlight: Option<&Route>,
    draw_adjust: f64,
) {
    canvas.background(BACKGROUND_COLOR);

    for (key, w) in graph.edges() {
        if let Some((a, b)) = endpoints_for(layout, key) {
            let (from, to) = edge_endpoints(a, b, draw_adjust);
            canvas.line(from, to, EDGE_COLOR, STROKE_WIDTH);
            canvas.text(
                (a.x + b.x) / 2.0,
                (a.y + b.y) / 2.0,
                WEIGHT_SIZE,
                EDGE_COLOR,
                &format_weight(w),
            );
        }
    }

    for (label, circle) in &layout.circles {
        canvas.circle(circle.x, circle.y, circle.r, circle.color);
        canvas.text(circle.x, circle.y, LABEL_SIZE, LABEL_COLOR, label);
    }

    if let Some(route) = highlight {
        for key in &route.edges {
            if let Some((a, b)) = endpoints_for(layout, key) {
                let (from, to) = edge_endpoints(a, b, draw_adjust);
                canvas.line(from, to, HIGHLIGHT_COLOR, STROKE_WIDTH);
            }
        }
    }
}

fn endpoints_for<'l>(layout: &'l Layout, key: &EdgeKey) -> Option<(&'l Circle, &'l Circle)> {
    let (u, v) = key.endpoints();
    Some((layout.circle(u)?, layout.circle(v)?))
}
