//! Terminal renderer: rasterizes hulls and particles into a character grid

use drift_core::Vec2;
use drift_polygons::{PolygonDrawData, Renderer};

const EMPTY: u8 = b' ';
const EDGE: u8 = b'*';
const VERTEX: u8 = b'#';
const PARTICLE_ACTIVE: u8 = b'o';
const PARTICLE_DECAYING: u8 = b'.';
const FOCUS: u8 = b'@';

/// Character grid centered on the focus, y pointing up
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    /// World units per column; rows are twice as tall
    scale: f32,
    focus: Vec2,
    cells: Vec<u8>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize, scale: f32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            scale: if scale > 0.0 { scale } else { 1.0 },
            focus: Vec2::ZERO,
            cells: vec![EMPTY; width * height],
        }
    }

    /// Grid cell of a world position, if it falls on the grid
    fn cell(&self, p: Vec2) -> Option<(i64, i64)> {
        let col = ((p.x - self.focus.x) / self.scale + self.width as f32 / 2.0).floor();
        let row = (self.height as f32 / 2.0 - (p.y - self.focus.y) / (self.scale * 2.0)).floor();
        if !(col.is_finite() && row.is_finite()) {
            return None;
        }
        Some((col as i64, row as i64))
    }

    fn plot(&mut self, col: i64, row: i64, ch: u8) {
        if col < 0 || row < 0 || col >= self.width as i64 || row >= self.height as i64 {
            return;
        }
        self.cells[row as usize * self.width + col as usize] = ch;
    }

    /// Bresenham line between two cells
    fn line(&mut self, from: (i64, i64), to: (i64, i64), ch: u8) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;
        // Bounded so a far off-screen edge cannot stall the frame
        let max_steps = (self.width + self.height) as i64 * 4;
        for _ in 0..max_steps {
            self.plot(x, y, ch);
            if (x, y) == to {
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

    /// The current grid as newline-separated rows
    pub fn frame_text(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.cells.chunks(self.width) {
            out.push_str(&String::from_utf8_lossy(row));
            out.push('\n');
        }
        out
    }
}

impl Renderer for AsciiRenderer {
    fn begin_frame(&mut self, _frame: u64, focus: Vec2) {
        self.focus = focus;
        self.cells.fill(EMPTY);
    }

    fn draw_polygon(&mut self, polygon: &PolygonDrawData<'_>) {
        let vertices: Vec<(i64, i64)> = polygon.hull.iter().filter_map(|v| self.cell(*v)).collect();
        if vertices.len() >= 2 {
            for i in 0..vertices.len() {
                self.line(vertices[i], vertices[(i + 1) % vertices.len()], EDGE);
            }
        }

        let mark = if polygon.in_range {
            PARTICLE_ACTIVE
        } else {
            PARTICLE_DECAYING
        };
        for inst in polygon.instances {
            if let Some((c, r)) = self.cell(Vec2::from_array(inst.position)) {
                self.plot(c, r, mark);
            }
        }

        for (c, r) in vertices {
            self.plot(c, r, VERTEX);
        }
    }

    fn end_frame(&mut self) {
        if let Some((c, r)) = self.cell(self.focus) {
            self.plot(c, r, FOCUS);
        }
    }
}
