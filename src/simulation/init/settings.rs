use crate::domain::config::FluidConfig;
use crate::domain::error::SimError;

use super::perf_stats::PerfStats;
use super::FluidCore;

pub(super) fn enable_perf_metrics(core: &mut FluidCore, enabled: bool) {
    core.perf_enabled = enabled;
    if !enabled {
        core.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(core: &FluidCore) -> PerfStats {
    core.perf_stats.clone()
}

/// Apply a change to a copy of the config and keep it only if it validates.
fn update_config<F>(core: &mut FluidCore, change: F) -> Result<(), SimError>
where
    F: FnOnce(&mut FluidConfig),
{
    let mut next = core.config.clone();
    change(&mut next);
    if let Err(e) = next.validate() {
        log::warn!("ignored setting change: {}", e);
        return Err(e);
    }
    core.config = next;
    Ok(())
}

pub(super) fn set_viscosity(core: &mut FluidCore, viscosity: f32) -> Result<(), SimError> {
    update_config(core, |c| c.viscosity = viscosity)
}

pub(super) fn set_dissipation(core: &mut FluidCore, ink: f32, velocity: f32) -> Result<(), SimError> {
    update_config(core, |c| {
        c.ink_dissipation = ink;
        c.velocity_dissipation = velocity;
    })
}

pub(super) fn set_dye_colour(core: &mut FluidCore, colour: [f32; 4]) -> Result<(), SimError> {
    update_config(core, |c| c.dye_colour = colour)
}

pub(super) fn set_jacobi_iterations(core: &mut FluidCore, iterations: u32) -> Result<(), SimError> {
    update_config(core, |c| c.jacobi_iterations = iterations)
}

pub(super) fn set_splat(core: &mut FluidCore, radius: f32, force_scale: f32) -> Result<(), SimError> {
    update_config(core, |c| {
        c.splat_radius = radius;
        c.force_scale = force_scale;
    })
}
