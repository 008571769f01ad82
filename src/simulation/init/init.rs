use crate::core::dispatch::Dispatcher;
use crate::core::field::{cell_count, FieldStore};
use crate::domain::config::FluidConfig;
use crate::domain::error::SimError;

use super::perf_stats::PerfStats;
use super::pointer::{MouseState, POINTER_CENTRE};
use super::FluidCore;

pub(super) fn create_fluid_core(config: FluidConfig) -> Result<FluidCore, SimError> {
    if let Err(e) = config.validate() {
        log::warn!("rejected fluid config: {}", e);
        return Err(e);
    }
    let resolution = config.resolution;
    let dispatcher = Dispatcher::new(resolution)?;
    let fields = FieldStore::new(resolution)?;

    let pixels = cell_count(resolution, std::mem::size_of::<u32>())?;
    let mut image = Vec::new();
    image
        .try_reserve_exact(pixels)
        .map_err(|_| SimError::Allocation { field: "image", cells: pixels })?;
    image.resize(pixels, 0u32);

    log::info!(
        "fluid core ready: {}x{} grid, {} jacobi iterations, {} KiB of fields",
        resolution,
        resolution,
        config.jacobi_iterations,
        fields.memory_bytes() / 1024
    );

    Ok(FluidCore {
        config,
        dispatcher,
        fields,
        pointer: POINTER_CENTRE,
        mouse: MouseState::new(),
        image,
        frame: 0,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    })
}
