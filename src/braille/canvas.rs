/// Dot bits for each (x % 2, y % 4) position inside a Braille cell.
/// Unicode Braille patterns live at U+2800..=U+28FF.
const DOT_BITS: [[u8; 4]; 2] = [[0x01, 0x02, 0x04, 0x40], [0x08, 0x10, 0x20, 0x80]];

const BLANK: u32 = 0x2800;

/// Braille canvas sized in terminal cells, addressed in dots.
/// Each cell holds a 2x4 dot grid, so a `w x h` canvas is `2w x 4h` dots.
pub struct BrailleCanvas {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl BrailleCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    /// Width in dots
    pub fn dot_width(&self) -> usize {
        self.width * 2
    }

    /// Height in dots
    pub fn dot_height(&self) -> usize {
        self.height * 4
    }

    /// Set a dot; anything outside the canvas (including negatives) is ignored
    pub fn set(&mut self, x: i32, y: i32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        let (cx, cy) = (x / 2, y / 4);
        if cx >= self.width || cy >= self.height {
            return;
        }
        self.cells[cy * self.width + cx] |= DOT_BITS[x % 2][y % 4];
    }

    /// Iterate non-blank cells as (column, row, glyph)
    pub fn glyphs(&self) -> impl Iterator<Item = (usize, usize, char)> + '_ {
        self.cells.iter().enumerate().filter_map(|(idx, &bits)| {
            if bits == 0 {
                return None;
            }
            let ch = char::from_u32(BLANK + bits as u32)?;
            Some((idx % self.width, idx / self.width, ch))
        })
    }

    #[cfg(test)]
    pub fn to_string(&self) -> String {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| {
                row.iter()
                    .map(|&b| char::from_u32(BLANK + b as u32).unwrap_or(' '))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
