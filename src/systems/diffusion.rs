//! Diffusion stage - implicit viscosity by Jacobi relaxation
//!
//! Solves `(I - ν·dt·∇²) x = b` with a fixed number of Jacobi rounds,
//! ping-ponging between the field and temp. There is no convergence check.

use crate::core::dispatch::{Dispatcher, KernelId};
use crate::core::field::{Field, FieldStore, Quantity};
use crate::domain::config::PingPongPolicy;

use super::ping_pong::{PingPong, Role};

#[derive(Clone, Copy, Debug)]
pub struct DiffuseParams {
    pub viscosity: f32,
    pub time_step: f32,
    pub iterations: u32,
    pub policy: PingPongPolicy,
}

impl DiffuseParams {
    /// Centre weight `1 / (ν·dt)`.
    #[inline]
    pub fn alpha(&self) -> f32 {
        1.0 / (self.viscosity * self.time_step)
    }
}

/// One Jacobi round: `out = (gL + gR + gB + gT + α·c) / (4 + α)`.
pub fn jacobi_diffusion_round(d: &Dispatcher, current: &Field, guess: &Field, out: &mut Field, alpha: f32) {
    let n = current.resolution();
    let inv = 1.0 / (4.0 + alpha);

    d.dispatch_grid(KernelId::JacobiDiffusion, out.cells_mut(), |x, y, cell| {
        if x >= n || y >= n {
            return;
        }
        let (xi, yi) = (x as i32, y as i32);
        let l = guess.at_clamped(xi - 1, yi);
        let r = guess.at_clamped(xi + 1, yi);
        let b = guess.at_clamped(xi, yi - 1);
        let t = guess.at_clamped(xi, yi + 1);
        *cell = (l + r + b + t + current.at(x, y) * alpha) * inv;
    });
}

/// Diffuse `field` using `temp` as the second ping-pong buffer.
/// Returns the buffer that holds the result.
pub fn diffuse_field(d: &Dispatcher, field: &mut Field, temp: &mut Field, params: DiffuseParams) -> Role {
    let alpha = params.alpha();
    let mut pp = PingPong::new(field, temp);
    for _ in 0..params.iterations {
        pp.round(|read, write| jacobi_diffusion_round(d, read, read, write, alpha));
    }
    pp.finish(d, params.policy)
}

pub fn diffuse(d: &Dispatcher, store: &mut FieldStore, quantity: Quantity, params: DiffuseParams) -> Role {
    let (field, temp) = store.with_temp(quantity);
    diffuse_field(d, field, temp, params)
}
