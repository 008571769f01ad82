use super::*;

impl Field {
    // === Dimensions ===
    #[inline]
    pub fn resolution(&self) -> u32 { self.resolution }

    #[inline]
    pub fn len(&self) -> usize { self.cells.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.cells.is_empty() }

    // === Index conversion ===
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.resolution as usize) + (x as usize)
    }

    #[inline]
    pub fn coords(&self, idx: usize) -> (u32, u32) {
        let n = self.resolution as usize;
        ((idx % n) as u32, (idx / n) as u32)
    }

    #[inline]
    pub fn is_border(&self, x: u32, y: u32) -> bool {
        is_border_cell(x, y, self.resolution)
    }

    // === Cell access ===
    #[inline]
    pub fn at(&self, x: u32, y: u32) -> Cell {
        self.cells[self.index(x, y)]
    }

    /// Neighbour lookup with coordinates clamped onto the grid.
    #[inline(always)]
    pub fn at_clamped(&self, x: i32, y: i32) -> Cell {
        let max = self.resolution as i32 - 1;
        let cx = x.clamp(0, max) as u32;
        let cy = y.clamp(0, max) as u32;
        *fast!(self.cells, [self.index(cx, cy)])
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: Cell) {
        let idx = self.index(x, y);
        self.cells[idx] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_and_coords_round_trip_row_major() {
        let field = Field::zeroed(8).unwrap();
        assert_eq!(field.index(3, 2), 2 * 8 + 3);
        assert_eq!(field.coords(19), (3, 2));
        assert!(field.is_border(7, 3));
        assert!(!field.is_border(3, 2));
    }

    #[test]
    fn clamped_lookup_reads_edge_cells() {
        let mut field = Field::zeroed(4).unwrap();
        field.set(0, 2, Vec4::splat(1.0));
        field.set(3, 3, Vec4::splat(2.0));
        assert_eq!(field.at_clamped(-5, 2), Vec4::splat(1.0));
        assert_eq!(field.at_clamped(9, 9), Vec4::splat(2.0));
    }
}
