use std::f64::consts::PI;

const MIN_ZOOM: f64 = 0.5;
const MAX_ZOOM: f64 = 40.0;
const ZOOM_STEP: f64 = 1.5;
/// Web Mercator is undefined at the poles
const MAX_LAT: f64 = 85.0;

/// Normalized Web Mercator coordinates in [0, 1] x [0, 1]
#[inline]
fn mercator(lon: f64, lat: f64) -> (f64, f64) {
    let lat_rad = lat.clamp(-MAX_LAT, MAX_LAT).to_radians();
    let x = (lon + 180.0) / 360.0;
    let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0;
    (x, y)
}

/// Visible region of the chart in dot coordinates
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    pub center_lon: f64,
    pub center_lat: f64,
    pub zoom: f64,
    /// Canvas width in dots
    pub width: usize,
    /// Canvas height in dots
    pub height: usize,
}

impl Viewport {
    pub fn new(center_lon: f64, center_lat: f64, zoom: f64, width: usize, height: usize) -> Self {
        Self {
            center_lon,
            center_lat,
            zoom,
            width,
            height,
        }
    }

    /// Whole-world view, nudged north where most countries sit
    pub fn world(width: usize, height: usize) -> Self {
        Self::new(0.0, 20.0, 1.0, width, height)
    }

    fn scale(&self) -> f64 {
        self.zoom * self.width.max(1) as f64
    }

    pub fn project(&self, lon: f64, lat: f64) -> (i32, i32) {
        let (x, y) = mercator(lon, lat);
        let (cx, cy) = mercator(self.center_lon, self.center_lat);
        let scale = self.scale();
        let px = (x - cx) * scale + self.width as f64 / 2.0;
        let py = (y - cy) * scale + self.height as f64 / 2.0;
        (px.round() as i32, py.round() as i32)
    }

    pub fn unproject(&self, px: i32, py: i32) -> (f64, f64) {
        let (cx, cy) = mercator(self.center_lon, self.center_lat);
        let scale = self.scale();
        let x = (px as f64 - self.width as f64 / 2.0) / scale + cx;
        let y = (py as f64 - self.height as f64 / 2.0) / scale + cy;
        let lon = x * 360.0 - 180.0;
        let lat = (PI * (1.0 - 2.0 * y)).sinh().atan().to_degrees();
        (lon, lat)
    }

    pub fn pan(&mut self, dx: i32, dy: i32) {
        let degrees_per_dot = 360.0 / self.scale();
        self.center_lon += dx as f64 * degrees_per_dot;
        self.center_lat -= dy as f64 * degrees_per_dot * 0.5;

        if self.center_lon > 180.0 {
            self.center_lon -= 360.0;
        } else if self.center_lon < -180.0 {
            self.center_lon += 360.0;
        }
        self.center_lat = self.center_lat.clamp(-MAX_LAT, MAX_LAT);
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * ZOOM_STEP).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / ZOOM_STEP).max(MIN_ZOOM);
    }

    /// Zoom keeping the geographic point under (px, py) fixed on screen
    pub fn zoom_at(&mut self, px: i32, py: i32, zoom_in: bool) {
        let anchor = self.unproject(px, py);
        if zoom_in {
            self.zoom_in();
        } else {
            self.zoom_out();
        }
        let (nx, ny) = self.project(anchor.0, anchor.1);
        self.pan(nx - px, ny - py);
    }

    /// Segment bounding box intersects the canvas
    pub fn segment_visible(&self, a: (i32, i32), b: (i32, i32)) -> bool {
        a.0.max(b.0) >= 0
            && a.0.min(b.0) < self.width as i32
            && a.1.max(b.1) >= 0
            && a.1.min(b.1) < self.height as i32
    }

    /// Circle of `radius` dots around (px, py) touches the canvas
    pub fn circle_visible(&self, px: i32, py: i32, radius: i32) -> bool {
        self.segment_visible((px - radius, py - radius), (px + radius, py + radius))
    }
}
