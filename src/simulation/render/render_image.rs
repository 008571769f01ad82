use glam::Vec4;

use crate::core::dispatch::{Dispatcher, KernelId};
use crate::core::field::Field;
use crate::domain::error::SimError;

/// Host-owned pixel target, packed ABGR (`0xAABBGGRR`, canvas byte order).
/// Row 0 is the top of the picture.
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Surface {
            width,
            height,
            pixels: vec![0u32; (width as usize) * (height as usize)],
        }
    }

    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u32>) -> Result<Self, SimError> {
        check_surface_len(pixels.len(), width, height)?;
        Ok(Surface { width, height, pixels })
    }

    pub fn width(&self) -> u32 { self.width }

    pub fn height(&self) -> u32 { self.height }

    pub fn pixels(&self) -> &[u32] { &self.pixels }

    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        self.pixels[(y as usize) * (self.width as usize) + (x as usize)]
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [u32] { &mut self.pixels }
}

pub(crate) fn check_surface_len(len: usize, width: u32, height: u32) -> Result<(), SimError> {
    let expected = (width as usize) * (height as usize);
    if len != expected {
        return Err(SimError::SurfaceSize { expected, actual: len });
    }
    Ok(())
}

/// Dye colour → packed ABGR. RGB is clamped to [0, 1]; alpha is opaque.
#[inline]
pub fn pack_abgr(colour: Vec4) -> u32 {
    let c = (colour.clamp(Vec4::ZERO, Vec4::ONE) * 255.0 + Vec4::splat(0.5)).as_uvec4();
    0xFF00_0000 | (c.z << 16) | (c.y << 8) | c.x
}

/// `buffer_to_texture`: one packed pixel per grid cell, grid row order.
pub(crate) fn dye_to_image(d: &Dispatcher, dye: &Field, image: &mut [u32]) {
    let n = dye.resolution();
    d.dispatch_grid(KernelId::BufferToTexture, image, |x, y, px| {
        if x >= n || y >= n {
            return;
        }
        *px = pack_abgr(dye.at(x, y));
    });
}

/// Nearest-neighbour scale of the N×N image onto a `width`×`height` target.
/// Grid y points up, target rows go down, so rows are flipped.
pub(crate) fn blit_nearest(image: &[u32], resolution: u32, dest: &mut [u32], width: u32, height: u32) {
    if width == 0 || height == 0 || resolution == 0 {
        return;
    }
    let n = resolution as u64;
    for (sy, row) in dest.chunks_mut(width as usize).take(height as usize).enumerate() {
        let gy = n - 1 - (sy as u64 * n / height as u64);
        let src_row = (gy * n) as usize;
        for (sx, px) in row.iter_mut().enumerate() {
            let gx = (sx as u64 * n / width as u64) as usize;
            *px = *fast!(image, [src_row + gx]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packing_is_abgr_with_opaque_alpha() {
        assert_eq!(pack_abgr(Vec4::new(1.0, 0.0, 0.0, 0.0)), 0xFF00_00FF);
        assert_eq!(pack_abgr(Vec4::new(0.0, 0.0, 1.0, 1.0)), 0xFFFF_0000);
        assert_eq!(pack_abgr(Vec4::new(2.0, -1.0, 0.5, 0.3)), 0xFF80_00FF);
        assert_eq!(pack_abgr(Vec4::ZERO), 0xFF00_0000);
    }

    #[test]
    fn surface_size_is_checked() {
        assert!(Surface::from_pixels(4, 4, vec![0; 16]).is_ok());
        assert_eq!(
            Surface::from_pixels(4, 4, vec![0; 15]),
            Err(SimError::SurfaceSize { expected: 16, actual: 15 })
        );
    }

    #[test]
    fn blit_scales_and_flips_rows() {
        // 2x2 image: bottom row (y = 0) is [1, 2], top row is [3, 4].
        let image = [1u32, 2, 3, 4];
        let mut dest = vec![0u32; 4 * 4];
        blit_nearest(&image, 2, &mut dest, 4, 4);

        assert_eq!(&dest[0..4], &[3, 3, 4, 4]);
        assert_eq!(&dest[4..8], &[3, 3, 4, 4]);
        assert_eq!(&dest[8..12], &[1, 1, 2, 2]);
        assert_eq!(&dest[12..16], &[1, 1, 2, 2]);
    }

    #[test]
    fn dye_image_has_one_pixel_per_cell() {
        let d = Dispatcher::new(16).unwrap();
        let mut dye = Field::zeroed(16).unwrap();
        dye.set(3, 4, Vec4::new(1.0, 1.0, 1.0, 1.0));
        let mut image = vec![0u32; 256];

        dye_to_image(&d, &dye, &mut image);

        assert_eq!(image[4 * 16 + 3], 0xFFFF_FFFF);
        assert_eq!(image[0], 0xFF00_0000);
    }
}
