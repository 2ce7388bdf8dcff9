use crate::braille::BrailleCanvas;

/// Bresenham line between two dots
pub fn draw_line(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        canvas.set(x, y);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Midpoint circle outline
pub fn draw_ring(canvas: &mut BrailleCanvas, cx: i32, cy: i32, radius: i32) {
    if radius <= 0 {
        canvas.set(cx, cy);
        return;
    }

    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;

    while x >= y {
        for (ox, oy) in [(x, y), (y, x), (-y, x), (-x, y), (-x, -y), (-y, -x), (y, -x), (x, -y)] {
            canvas.set(cx + ox, cy + oy);
        }
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// Filled disc
pub fn fill_disc(canvas: &mut BrailleCanvas, cx: i32, cy: i32, radius: i32) {
    let r2 = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= r2 {
                canvas.set(cx + dx, cy + dy);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_line_fills_row() {
        let mut canvas = BrailleCanvas::new(5, 1);
        draw_line(&mut canvas, 0, 0, 9, 0);
        assert_eq!(canvas.to_string(), "⠉⠉⠉⠉⠉");
    }

    #[test]
    fn test_vertical_line() {
        let mut canvas = BrailleCanvas::new(1, 2);
        draw_line(&mut canvas, 0, 0, 0, 7);
        assert_eq!(canvas.to_string(), "⡇\n⡇");
    }

    #[test]
    fn test_ring_is_hollow() {
        let mut canvas = BrailleCanvas::new(10, 5);
        draw_ring(&mut canvas, 10, 10, 6);
        let mut filled = BrailleCanvas::new(10, 5);
        fill_disc(&mut filled, 10, 10, 6);
        // The centre cell stays empty for a ring
        assert!(canvas.glyphs().all(|(col, row, _)| (col, row) != (5, 2)));
        assert!(filled.glyphs().any(|(col, row, _)| (col, row) == (5, 2)));
    }

    #[test]
    fn test_zero_radius_ring_is_a_dot() {
        let mut canvas = BrailleCanvas::new(1, 1);
        draw_ring(&mut canvas, 0, 0, 0);
        assert_eq!(canvas.to_string(), "⠁");
    }
}
