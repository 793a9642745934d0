use crate::field::GroundField;

/// One endpoint of a ground line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineVertex {
    pub position: [f32; 3],
}

/// Wireframe grid generator for the rippling ground.
///
/// Every cell of the `2N × 2N` grid contributes its four edges as separate
/// line segments (bottom, right, top, left), each endpoint lifted to the field
/// height at that corner. Shared edges are emitted twice.
pub struct WireGrid {
    field: GroundField,
    vertex_count: usize,
}

impl WireGrid {
    /// Panics if `tile_size` is not positive or the line count overflows
    /// `usize`; a validated `DemoConfig` rules out both.
    pub fn new(field: GroundField) -> Self {
        assert!(field.tile_size > 0.0, "tile_size must be positive");
        let vertex_count = (field.num_tiles as usize)
            .checked_mul(2)
            .and_then(|side| side.checked_mul(side))
            .and_then(|cells| cells.checked_mul(8))
            .unwrap_or_else(|| panic!("{} tiles per side overflow the line count", field.num_tiles));
        Self {
            field,
            vertex_count,
        }
    }

    pub fn field(&self) -> &GroundField {
        &self.field
    }

    /// Cells along one side of the grid.
    pub fn cells_per_side(&self) -> usize {
        2 * self.field.num_tiles as usize
    }

    /// Vertices produced per frame: 4 edges × 2 endpoints per cell.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Build the line list for animation time `time`.
    pub fn lines(&self, time: f32) -> Vec<LineVertex> {
        let mut out = Vec::with_capacity(self.vertex_count());
        self.lines_into(time, &mut out);
        out
    }

    /// Like [`lines`](Self::lines) but reuses `out`, clearing it first.
    pub fn lines_into(&self, time: f32, out: &mut Vec<LineVertex>) {
        out.clear();
        out.reserve(self.vertex_count());

        let n = self.field.num_tiles as i32;
        let size = self.field.tile_size;
        let v = |x: f32, z: f32| LineVertex {
            position: [x, self.field.height(time, x, z), z],
        };

        for iz in -n..n {
            let z0 = iz as f32 * size;
            let z1 = z0 + size;
            for ix in -n..n {
                let x0 = ix as f32 * size;
                let x1 = x0 + size;

                let (a, b, c, d) = (v(x0, z0), v(x1, z0), v(x1, z1), v(x0, z1));
                out.extend_from_slice(&[a, b, b, c, c, d, d, a]);
            }
        }

        tracing::trace!(vertices = out.len(), time, "ground lines rebuilt");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_field() -> GroundField {
        GroundField {
            num_tiles: 2,
            ..GroundField::default()
        }
    }

    #[test]
    fn vertex_count_matches_cells() {
        let grid = WireGrid::new(small_field());
        assert_eq!(grid.cells_per_side(), 4);
        assert_eq!(grid.vertex_count(), 4 * 4 * 8);
        assert_eq!(grid.lines(0.0).len(), grid.vertex_count());
    }

    #[test]
    fn stock_grid_size() {
        let grid = WireGrid::new(GroundField::default());
        assert_eq!(grid.vertex_count(), 128 * 128 * 8);
    }

    #[test]
    #[should_panic(expected = "overflow the line count")]
    fn oversized_grid_is_rejected_up_front() {
        WireGrid::new(GroundField {
            num_tiles: u32::MAX,
            ..GroundField::default()
        });
    }

    #[test]
    fn grid_spans_half_extent() {
        let grid = WireGrid::new(small_field());
        let lines = grid.lines(0.0);
        let min_x = lines.iter().map(|v| v.position[0]).fold(f32::MAX, f32::min);
        let max_x = lines.iter().map(|v| v.position[0]).fold(f32::MIN, f32::max);
        let min_z = lines.iter().map(|v| v.position[2]).fold(f32::MAX, f32::min);
        let max_z = lines.iter().map(|v| v.position[2]).fold(f32::MIN, f32::max);
        assert_eq!((min_x, max_x), (-32.0, 32.0));
        assert_eq!((min_z, max_z), (-32.0, 32.0));
    }

    #[test]
    fn first_cell_edges_in_order() {
        let grid = WireGrid::new(small_field());
        let lines = grid.lines(0.0);
        let xz = |i: usize| (lines[i].position[0], lines[i].position[2]);
        // bottom
        assert_eq!(xz(0), (-32.0, -32.0));
        assert_eq!(xz(1), (-16.0, -32.0));
        // right
        assert_eq!(xz(2), (-16.0, -32.0));
        assert_eq!(xz(3), (-16.0, -16.0));
        // top
        assert_eq!(xz(4), (-16.0, -16.0));
        assert_eq!(xz(5), (-32.0, -16.0));
        // left
        assert_eq!(xz(6), (-32.0, -16.0));
        assert_eq!(xz(7), (-32.0, -32.0));
    }

    #[test]
    fn heights_come_from_field() {
        let field = small_field();
        let grid = WireGrid::new(field);
        for v in grid.lines(1.5) {
            let [x, y, z] = v.position;
            assert_eq!(y, field.height(1.5, x, z));
        }
    }

    #[test]
    fn origin_corner_sits_on_plateau() {
        let grid = WireGrid::new(small_field());
        let origin = grid
            .lines(3.0)
            .into_iter()
            .find(|v| v.position[0] == 0.0 && v.position[2] == 0.0)
            .unwrap();
        assert_eq!(origin.position[1], 56.0);
    }

    #[test]
    fn animates_with_time() {
        let grid = WireGrid::new(small_field());
        assert_ne!(grid.lines(0.0), grid.lines(0.4));
    }

    #[test]
    fn lines_into_reuses_buffer() {
        let grid = WireGrid::new(small_field());
        let mut buf = Vec::new();
        grid.lines_into(0.0, &mut buf);
        grid.lines_into(1.0, &mut buf);
        assert_eq!(buf.len(), grid.vertex_count());
        assert_eq!(buf, grid.lines(1.0));
    }

    #[test]
    #[should_panic(expected = "tile_size must be positive")]
    fn zero_tile_size_panics() {
        WireGrid::new(GroundField {
            tile_size: 0.0,
            ..GroundField::default()
        });
    }
}
