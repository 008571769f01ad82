//! Forcing stage - pointer force and ink injection
//!
//! Both kernels update interior cells in place with a Gaussian splat centred
//! on the current pointer. Each thread reads and writes only its own cell.
//! Border cells are left alone so the walls stay closed.

use glam::{Vec2, Vec4};

use crate::core::dispatch::{Dispatcher, KernelId};
use crate::core::field::{is_border_cell, Field};

/// Gaussian footprint around a grid position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Splat {
    pub centre: Vec2,
    pub radius: f32,
}

impl Splat {
    /// `exp(-d² / r²)` for the cell at (x, y).
    #[inline]
    pub fn weight(&self, x: u32, y: u32) -> f32 {
        let d2 = Vec2::new(x as f32, y as f32).distance_squared(self.centre);
        (-d2 / (self.radius * self.radius)).exp()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ForceParams {
    pub splat: Splat,
    /// Pointer displacement times force scale.
    pub impulse: Vec2,
}

#[derive(Clone, Copy, Debug)]
pub struct InkParams {
    pub splat: Splat,
    pub colour: Vec4,
}

/// `add_force_mouse`: `v.xy += impulse · w`.
pub fn add_user_force(d: &Dispatcher, velocity: &mut Field, params: ForceParams) {
    let n = velocity.resolution();
    d.dispatch_grid(KernelId::AddForceMouse, velocity.cells_mut(), |x, y, cell| {
        if x >= n || y >= n || is_border_cell(x, y, n) {
            return;
        }
        let push = params.impulse * params.splat.weight(x, y);
        cell.x += push.x;
        cell.y += push.y;
    });
}

/// `add_ink`: blend each cell toward the dye colour by the splat weight.
pub fn add_ink(d: &Dispatcher, dye: &mut Field, params: InkParams) {
    let n = dye.resolution();
    d.dispatch_grid(KernelId::AddInk, dye.cells_mut(), |x, y, cell| {
        if x >= n || y >= n || is_border_cell(x, y, n) {
            return;
        }
        let w = params.splat.weight(x, y);
        *cell += (params.colour - *cell) * w;
    });
}
