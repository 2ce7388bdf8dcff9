use crate::braille::BrailleCanvas;
use crate::chart::geometry::draw_line;
use crate::chart::projection::Viewport;

/// A geographic polyline in (lon, lat)
pub type LineString = Vec<(f64, f64)>;

/// Level of detail for coastline data
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lod {
    Low,    // 110m
    Medium, // 50m
    High,   // 10m
}

impl Lod {
    pub fn from_zoom(zoom: f64) -> Self {
        if zoom < 2.0 {
            Lod::Low
        } else if zoom < 8.0 {
            Lod::Medium
        } else {
            Lod::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Lod::Low => "110m",
            Lod::Medium => "50m",
            Lod::High => "10m",
        }
    }
}

/// Coastline outlines drawn behind the bubbles
#[derive(Default)]
pub struct Backdrop {
    low: Vec<LineString>,
    medium: Vec<LineString>,
    high: Vec<LineString>,
    pub visible: bool,
}

impl Backdrop {
    pub fn new() -> Self {
        Self {
            visible: true,
            ..Default::default()
        }
    }

    pub fn add_coastline(&mut self, line: LineString, lod: Lod) {
        match lod {
            Lod::Low => self.low.push(line),
            Lod::Medium => self.medium.push(line),
            Lod::High => self.high.push(line),
        }
    }

    pub fn has_data(&self) -> bool {
        !self.low.is_empty() || !self.medium.is_empty() || !self.high.is_empty()
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Most detailed loaded set at or below the requested LOD
    fn lines_for(&self, lod: Lod) -> &[LineString] {
        let sets = [&self.low, &self.medium, &self.high];
        let order: &[usize] = match lod {
            Lod::High => &[2, 1, 0],
            Lod::Medium => &[1, 0],
            Lod::Low => &[0, 1, 2],
        };
        order
            .iter()
            .map(|&i| sets[i])
            .find(|set| !set.is_empty())
            .map(|set| set.as_slice())
            .unwrap_or(&[])
    }

    pub fn draw(&self, canvas: &mut BrailleCanvas, viewport: &Viewport) {
        if !self.visible {
            return;
        }
        for line in self.lines_for(Lod::from_zoom(viewport.zoom)) {
            draw_polyline(canvas, line, viewport);
        }
    }
}

fn draw_polyline(canvas: &mut BrailleCanvas, line: &[(f64, f64)], viewport: &Viewport) {
    let mut prev: Option<(i32, i32)> = None;
    for &(lon, lat) in line {
        let p = viewport.project(lon, lat);
        if let Some(q) = prev {
            // Segments spanning most of the screen cross the antimeridian
            let span = ((p.0 - q.0).abs() + (p.1 - q.1).abs()) as usize;
            if span < viewport.width && viewport.segment_visible(q, p) {
                draw_line(canvas, q.0, q.1, p.0, p.1);
            }
        }
        prev = Some(p);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lod_fallback() {
        let mut backdrop = Backdrop::new();
        backdrop.add_coastline(vec![(0.0, 0.0), (1.0, 1.0)], Lod::Low);
        assert_eq!(backdrop.lines_for(Lod::High).len(), 1);
        backdrop.add_coastline(vec![(0.0, 0.0), (2.0, 2.0)], Lod::High);
        backdrop.add_coastline(vec![(0.0, 0.0), (3.0, 3.0)], Lod::High);
        assert_eq!(backdrop.lines_for(Lod::High).len(), 2);
        assert_eq!(backdrop.lines_for(Lod::Medium).len(), 1);
    }

    #[test]
    fn test_hidden_backdrop_draws_nothing() {
        let mut backdrop = Backdrop::new();
        backdrop.add_coastline(vec![(-50.0, 0.0), (50.0, 0.0)], Lod::Low);
        let viewport = Viewport::new(0.0, 0.0, 1.0, 80, 40);

        let mut canvas = BrailleCanvas::new(40, 10);
        backdrop.draw(&mut canvas, &viewport);
        assert!(canvas.glyphs().count() > 0);

        backdrop.toggle();
        let mut canvas = BrailleCanvas::new(40, 10);
        backdrop.draw(&mut canvas, &viewport);
        assert_eq!(canvas.glyphs().count(), 0);
    }
}
