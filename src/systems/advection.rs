//! Advection stage - semi-Lagrangian transport
//!
//! For each cell, trace back along the velocity by one time step, sample the
//! source bilinearly at the departure point and scale by the dissipation
//! factor. Results go to temp and are copied back afterwards, so every read
//! sees the field as it was on entry.

use crate::core::dispatch::{Dispatcher, KernelId};
use crate::core::field::{Field, FieldStore, Quantity};

use super::buffers::copy_field;

pub struct AdvectParams<'a> {
    pub source: &'a Field,
    pub velocity: &'a Field,
    pub out: &'a mut Field,
    pub dissipation: f32,
    pub time_step: f32,
}

/// Run the advection kernel into `params.out`.
pub fn advect_into(d: &Dispatcher, params: AdvectParams<'_>) {
    let AdvectParams { source, velocity, out, dissipation, time_step } = params;
    let n = source.resolution();

    d.dispatch_grid(KernelId::Advection, out.cells_mut(), |x, y, cell| {
        if x >= n || y >= n {
            return;
        }
        let v = velocity.at(x, y);
        let px = x as f32 - time_step * v.x;
        let py = y as f32 - time_step * v.y;
        *cell = source.bilinear(px, py) * dissipation;
    });
}

/// Advect one quantity by the current velocity, in place.
pub fn advect(d: &Dispatcher, store: &mut FieldStore, quantity: Quantity, dissipation: f32, time_step: f32) {
    {
        let (source, velocity, temp) = store.advection_views(quantity);
        advect_into(d, AdvectParams { source, velocity, out: temp, dissipation, time_step });
    }
    let (target, temp) = store.with_temp(quantity);
    copy_field(d, temp, target);
}
