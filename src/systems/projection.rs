//! Projection stage - pressure solve and gradient subtraction
//!
//! 1. divergence of the field into `divergence.x`
//! 2. clear pressure
//! 3. Jacobi rounds between pressure and temp, walls enforced on the current
//!    guess before each round
//! 4. walls on the final pressure
//! 5. subtract the pressure gradient from interior cells into temp, copy back
//!
//! Applied to velocity and (optionally) to dye, which gives the ink its
//! swirly look even though dye has no physical divergence constraint.

use glam::Vec4;

use crate::core::dispatch::{Dispatcher, KernelId};
use crate::core::field::{is_border_cell, Field, FieldStore, ProjectionViews, Quantity};
use crate::domain::config::PingPongPolicy;

use super::boundary::enforce_boundary;
use super::buffers::{clear_field, copy_field};
use super::ping_pong::{PingPong, Role};

#[derive(Clone, Copy, Debug)]
pub struct ProjectParams {
    pub iterations: u32,
    pub policy: PingPongPolicy,
}

#[inline]
fn central_divergence(field: &Field, x: i32, y: i32) -> f32 {
    let l = field.at_clamped(x - 1, y);
    let r = field.at_clamped(x + 1, y);
    let b = field.at_clamped(x, y - 1);
    let t = field.at_clamped(x, y + 1);
    0.5 * ((r.x - l.x) + (t.y - b.y))
}

/// `divergence`: `0.5 · ((R.x − L.x) + (T.y − B.y))` into `x`.
pub fn compute_divergence(d: &Dispatcher, field: &Field, divergence: &mut Field) {
    let n = field.resolution();
    d.dispatch_grid(KernelId::Divergence, divergence.cells_mut(), |x, y, cell| {
        if x >= n || y >= n {
            return;
        }
        *cell = Vec4::new(central_divergence(field, x as i32, y as i32), 0.0, 0.0, 0.0);
    });
}

/// `jacobi_pressure`: `p = (pL + pR + pB + pT − div) / 4` into `x`.
pub fn jacobi_pressure_round(d: &Dispatcher, guess: &Field, divergence: &Field, out: &mut Field) {
    let n = guess.resolution();
    d.dispatch_grid(KernelId::JacobiPressure, out.cells_mut(), |x, y, cell| {
        if x >= n || y >= n {
            return;
        }
        let (xi, yi) = (x as i32, y as i32);
        let sum = guess.at_clamped(xi - 1, yi).x
            + guess.at_clamped(xi + 1, yi).x
            + guess.at_clamped(xi, yi - 1).x
            + guess.at_clamped(xi, yi + 1).x;
        let p = (sum - divergence.at(x, y).x) * 0.25;
        *cell = Vec4::new(p, 0.0, 0.0, 0.0);
    });
}

/// `remove_divergence`: interior cells lose half the central pressure
/// difference; border cells pass through unchanged.
pub fn subtract_gradient(d: &Dispatcher, field: &Field, pressure: &Field, out: &mut Field) {
    let n = field.resolution();
    d.dispatch_grid(KernelId::RemoveDivergence, out.cells_mut(), |x, y, cell| {
        if x >= n || y >= n {
            return;
        }
        let w = field.at(x, y);
        if is_border_cell(x, y, n) {
            *cell = w;
            return;
        }
        let gx = pressure.at(x + 1, y).x - pressure.at(x - 1, y).x;
        let gy = pressure.at(x, y + 1).x - pressure.at(x, y - 1).x;
        *cell = w - Vec4::new(gx, gy, 0.0, 0.0) * 0.5;
    });
}

/// Full projection pass over the given views. Returns where the Jacobi loop
/// left the final pressure.
pub fn project_fields(d: &Dispatcher, views: ProjectionViews<'_>, params: ProjectParams) -> Role {
    let ProjectionViews { field, divergence, pressure, temp } = views;

    compute_divergence(d, field, divergence);
    clear_field(d, pressure);

    let divergence: &Field = divergence;
    let role = {
        let mut pp = PingPong::new(&mut *pressure, &mut *temp);
        for _ in 0..params.iterations {
            enforce_boundary(d, pp.latest_mut());
            pp.round(|read, write| jacobi_pressure_round(d, read, divergence, write));
        }
        pp.finish(d, params.policy)
    };
    enforce_boundary(d, pressure);

    subtract_gradient(d, field, pressure, temp);
    copy_field(d, temp, field);
    role
}

pub fn project(d: &Dispatcher, store: &mut FieldStore, quantity: Quantity, params: ProjectParams) -> Role {
    project_fields(d, store.projection_views(quantity), params)
}

/// Divergence magnitude at an interior cell, same stencil as the kernel.
pub fn divergence_at(field: &Field, x: u32, y: u32) -> f32 {
    central_divergence(field, x as i32, y as i32).abs()
}

/// Sum of |divergence| over interior cells.
pub fn divergence_residual(field: &Field) -> f32 {
    interior_divergence(field).sum()
}

/// Largest |divergence| over interior cells.
pub fn divergence_peak(field: &Field) -> f32 {
    interior_divergence(field).fold(0.0, f32::max)
}

fn interior_divergence(field: &Field) -> impl Iterator<Item = f32> + '_ {
    let last = field.resolution().saturating_sub(1);
    (1..last).flat_map(move |y| (1..last).map(move |x| divergence_at(field, x, y)))
}
