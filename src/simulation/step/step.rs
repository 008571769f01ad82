use crate::core::field::Quantity;
use crate::systems::advection::advect;
use crate::systems::boundary::enforce_boundary;
use crate::systems::diffusion::{diffuse, DiffuseParams};
use crate::systems::forcing::{add_ink, add_user_force, ForceParams, InkParams, Splat};
use crate::systems::projection::{project, ProjectParams};

use super::perf_timer::start_if;
use super::pointer::pointer_to_grid;
use super::FluidCore;

/// One simulation tick. Stage order is fixed:
/// advect (dye, velocity), diffuse (dye, velocity), walls (dye, velocity),
/// pointer force, ink, project (dye, velocity).
pub(super) fn step(core: &mut FluidCore) {
    let perf_on = core.perf_enabled;
    if perf_on {
        core.perf_stats.reset();
        core.perf_stats.grid_size = core.fields.resolution().saturating_mul(core.fields.resolution());
        core.perf_stats.memory_bytes = u32::try_from(core.memory_bytes()).unwrap_or(u32::MAX);
    }
    let dispatches_before = core.dispatcher.dispatch_count();
    let step_start = start_if(perf_on);

    let n = core.fields.resolution();
    core.mouse.advance(pointer_to_grid(core.pointer, n));

    let cfg = &core.config;
    let d = &core.dispatcher;
    let fields = &mut core.fields;
    let stats = &mut core.perf_stats;
    let dt = cfg.time_step;

    // === ADVECT ===
    let t0 = start_if(perf_on);
    advect(d, fields, Quantity::Dye, cfg.ink_dissipation, dt);
    advect(d, fields, Quantity::Velocity, cfg.velocity_dissipation, dt);
    if let Some(t0) = t0 {
        stats.advect_ms = t0.elapsed_ms();
    }

    // === DIFFUSE ===
    let diffusion = DiffuseParams {
        viscosity: cfg.viscosity,
        time_step: dt,
        iterations: cfg.jacobi_iterations,
        policy: cfg.ping_pong,
    };
    let t0 = start_if(perf_on);
    diffuse(d, fields, Quantity::Dye, diffusion);
    diffuse(d, fields, Quantity::Velocity, diffusion);
    if let Some(t0) = t0 {
        stats.diffuse_ms = t0.elapsed_ms();
    }

    let t0 = start_if(perf_on);
    enforce_boundary(d, &mut fields.dye);
    enforce_boundary(d, &mut fields.velocity);
    if let Some(t0) = t0 {
        stats.boundary_ms = t0.elapsed_ms();
    }

    // === FORCE ===
    // Splat follows the current pointer; force uses this tick's displacement.
    let splat = Splat {
        centre: core.mouse.current().unwrap_or_default(),
        radius: cfg.splat_radius,
    };
    let t0 = start_if(perf_on);
    add_user_force(d, &mut fields.velocity, ForceParams {
        splat,
        impulse: core.mouse.displacement() * cfg.force_scale,
    });
    add_ink(d, &mut fields.dye, InkParams { splat, colour: cfg.dye_colour() });
    if let Some(t0) = t0 {
        stats.force_ms = t0.elapsed_ms();
    }

    // === PROJECT ===
    let projection = ProjectParams { iterations: cfg.jacobi_iterations, policy: cfg.ping_pong };
    let t0 = start_if(perf_on);
    if cfg.project_dye {
        project(d, fields, Quantity::Dye, projection);
    }
    project(d, fields, Quantity::Velocity, projection);
    if let Some(t0) = t0 {
        stats.project_ms = t0.elapsed_ms();
    }

    if let Some(t0) = step_start {
        let projections = if cfg.project_dye { 2 } else { 1 };
        stats.jacobi_rounds = cfg.jacobi_iterations.saturating_mul(2 + projections);
        stats.dispatches = u32::try_from(d.dispatch_count() - dispatches_before).unwrap_or(u32::MAX);
        stats.step_ms = t0.elapsed_ms();
    }

    core.frame += 1;
}
