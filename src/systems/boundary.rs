//! Boundary stage - closed box walls
//!
//! Every border cell of the target buffer is set to zero. Used on velocity
//! and dye after diffusion, and on pressure around every Jacobi round.

use glam::Vec4;

use crate::core::dispatch::{Dispatcher, KernelId};
use crate::core::field::Field;

pub fn enforce_boundary(d: &Dispatcher, field: &mut Field) {
    d.dispatch_border(KernelId::Boundary, field.cells_mut(), |_, _, cell| {
        *cell = Vec4::ZERO;
    });
}

/// True when every border cell is exactly zero.
pub fn border_is_closed(field: &Field) -> bool {
    field.cells().iter().enumerate().all(|(idx, cell)| {
        let (x, y) = field.coords(idx);
        !field.is_border(x, y) || *cell == Vec4::ZERO
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noisy(n: u32) -> Field {
        let mut field = Field::zeroed(n).unwrap();
        let mut seed = 12345u32;
        for c in field.cells_mut() {
            seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
            let v = (seed >> 16) as f32 / 65536.0 - 0.5;
            *c = Vec4::new(v, -v, v * 2.0, 1.0);
        }
        field
    }

    #[test]
    fn boundary_zeroes_the_ring_and_keeps_the_interior() {
        let d = Dispatcher::new(32).unwrap();
        let mut field = noisy(32);
        let before = field.clone();
        assert!(!border_is_closed(&field));

        enforce_boundary(&d, &mut field);

        assert!(border_is_closed(&field));
        for y in 1..31 {
            for x in 1..31 {
                assert_eq!(field.at(x, y), before.at(x, y));
            }
        }
    }

    #[test]
    fn boundary_is_idempotent() {
        let d = Dispatcher::new(16).unwrap();
        let mut field = noisy(16);
        enforce_boundary(&d, &mut field);
        let once = field.clone();
        enforce_boundary(&d, &mut field);
        assert_eq!(field, once);
    }
}
