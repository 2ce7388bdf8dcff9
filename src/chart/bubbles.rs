use crate::braille::BrailleCanvas;
use crate::chart::geometry::{draw_ring, fill_disc};
use crate::chart::projection::Viewport;
use crate::format::format_value;
use crate::metric::PlotPoint;

/// Canvas width (in dots) at which a bubble's `r` is drawn 1:1
const REFERENCE_WIDTH: f64 = 800.0;

/// Bubbles at or under this many dots are drawn solid
const SOLID_RADIUS: i32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    pub title: String,
    pub label: String,
}

/// One rendered chart: the plot points it was built from and the order
/// they are painted in. Built fresh for every metric update.
pub struct BubbleChart {
    points: Vec<PlotPoint>,
    /// Indices into `points`, largest bubble first
    draw_order: Vec<usize>,
}

impl BubbleChart {
    pub fn new(points: Vec<PlotPoint>) -> Self {
        let mut draw_order: Vec<usize> = (0..points.len()).collect();
        draw_order.sort_by(|&a, &b| points[b].r.total_cmp(&points[a].r));
        Self { points, draw_order }
    }

    pub fn points(&self) -> &[PlotPoint] {
        &self.points
    }

    /// Bubble radius in canvas dots; never below one dot
    pub fn dot_radius(r: f64, viewport: &Viewport) -> i32 {
        let dots = (r * viewport.width as f64 / REFERENCE_WIDTH).round();
        (dots as i32).max(1)
    }

    pub fn draw(&self, canvas: &mut BrailleCanvas, viewport: &Viewport) {
        for &idx in &self.draw_order {
            self.draw_point(canvas, viewport, idx);
        }
    }

    /// Paint a single bubble, e.g. onto a highlight layer
    pub fn draw_point(&self, canvas: &mut BrailleCanvas, viewport: &Viewport, idx: usize) {
        let Some(point) = self.points.get(idx) else {
            return;
        };
        let (px, py) = viewport.project(point.x, point.y);
        let radius = Self::dot_radius(point.r, viewport);
        if !viewport.circle_visible(px, py, radius) {
            return;
        }

        if radius <= SOLID_RADIUS {
            fill_disc(canvas, px, py, radius);
        } else {
            draw_ring(canvas, px, py, radius);
            canvas.set(px, py);
        }
    }

    /// The bubble under a canvas dot. When bubbles overlap the smallest
    /// one wins, since it is the one drawn on top.
    pub fn hit_test(&self, viewport: &Viewport, px: i32, py: i32) -> Option<usize> {
        self.draw_order
            .iter()
            .rev()
            .copied()
            .find(|&idx| {
                let point = &self.points[idx];
                let (cx, cy) = viewport.project(point.x, point.y);
                let radius = Self::dot_radius(point.r, viewport) as i64;
                let (dx, dy) = ((px - cx) as i64, (py - cy) as i64);
                dx * dx + dy * dy <= radius * radius
            })
    }

    pub fn tooltip(&self, idx: usize) -> Option<Tooltip> {
        let point = self.points.get(idx)?;
        let title = if point.flag.is_empty() {
            point.name.clone()
        } else {
            format!("{} {}", point.flag, point.name)
        };
        Some(Tooltip {
            title,
            label: format!("{}: {}", point.header, format_value(point.value)),
        })
    }
}
