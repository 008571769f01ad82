use super::*;

impl Field {
    /// Bilinear sample at a fractional grid position, clamped to the grid.
    pub fn bilinear(&self, x: f32, y: f32) -> Cell {
        let max = (self.resolution.saturating_sub(1)) as f32;
        let x = x.clamp(0.0, max);
        let y = y.clamp(0.0, max);

        let x0 = x.floor();
        let y0 = y.floor();
        let tx = x - x0;
        let ty = y - y0;
        let ix = x0 as i32;
        let iy = y0 as i32;

        let bottom = self.at_clamped(ix, iy).lerp(self.at_clamped(ix + 1, iy), tx);
        let top = self.at_clamped(ix, iy + 1).lerp(self.at_clamped(ix + 1, iy + 1), tx);
        bottom.lerp(top, ty)
    }

    /// Largest absolute component over the whole field.
    pub fn max_abs(&self) -> f32 {
        self.cells
            .iter()
            .map(|c| c.abs().max_element())
            .fold(0.0, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bilinear_interpolates_between_cells() {
        let mut field = Field::zeroed(4).unwrap();
        field.set(1, 1, Vec4::new(1.0, 0.0, 0.0, 0.0));
        field.set(2, 1, Vec4::new(3.0, 0.0, 0.0, 0.0));

        let mid = field.bilinear(1.5, 1.0);
        assert!((mid.x - 2.0).abs() < 1e-6);

        let exact = field.bilinear(2.0, 1.0);
        assert!((exact.x - 3.0).abs() < 1e-6);

        let half_up = field.bilinear(1.0, 1.5);
        assert!((half_up.x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn bilinear_clamps_outside_the_grid() {
        let field = Field::filled(4, Vec4::splat(0.75)).unwrap();
        assert_eq!(field.bilinear(-10.0, 2.0), Vec4::splat(0.75));
        assert_eq!(field.bilinear(2.0, 99.0), Vec4::splat(0.75));
    }

    #[test]
    fn max_abs_sees_negative_components() {
        let mut field = Field::zeroed(4).unwrap();
        field.set(2, 2, Vec4::new(0.1, -0.9, 0.0, 0.0));
        assert!((field.max_abs() - 0.9).abs() < 1e-6);
    }
}
