//! Simulation - the fluid core and its host facade
//!
//! `FluidCore` owns the field store, the kernel dispatcher and the pointer
//! state, and runs the fixed stage sequence once per tick:
//! - step/     - tick orchestration
//! - init/     - construction and runtime settings
//! - pointer/  - host pointer → grid coordinates
//! - render/   - dye → packed image → host surface
//! - perf/     - per-stage timings
//! - facade    - `#[wasm_bindgen] World`

use glam::Vec2;

use crate::core::dispatch::Dispatcher;
use crate::core::field::FieldStore;
use crate::domain::config::FluidConfig;
use crate::domain::error::SimError;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "pointer/pointer.rs"]
mod pointer;
#[path = "render/render_image.rs"]
mod render_image;
#[path = "step/step.rs"]
mod step;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
mod facade;

pub use facade::World;
pub use perf_stats::PerfStats;
pub use pointer::{pointer_to_grid, MouseState, POINTER_CENTRE};
pub use render_image::{pack_abgr, Surface};

use perf_timer::start_if;

/// The stable-fluids simulation.
pub struct FluidCore {
    config: FluidConfig,
    dispatcher: Dispatcher,
    fields: FieldStore,

    // Host input, normalized; read once per tick
    pointer: Vec2,
    mouse: MouseState,

    // Packed ABGR, N×N, grid row order
    image: Vec<u32>,

    frame: u64,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl FluidCore {
    /// Validate the config and allocate every buffer.
    pub fn new(config: FluidConfig) -> Result<Self, SimError> {
        init::create_fluid_core(config)
    }

    pub fn with_resolution(resolution: u32) -> Result<Self, SimError> {
        Self::new(FluidConfig::with_resolution(resolution))
    }

    pub fn from_json(json: &str) -> Result<Self, SimError> {
        Self::new(FluidConfig::from_json(json)?)
    }

    /// Advance the simulation by one time step.
    pub fn tick(&mut self) {
        step::step(self);
    }

    /// Latest host pointer position in normalized [0, 1] coordinates
    /// (y up). Non-finite input is ignored.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        if !(x.is_finite() && y.is_finite()) {
            log::debug!("ignoring non-finite pointer ({}, {})", x, y);
            return;
        }
        self.pointer = Vec2::new(x, y);
    }

    pub fn pointer(&self) -> Vec2 { self.pointer }

    /// Run `buffer_to_texture` and blit the result onto `surface`.
    pub fn render_image(&mut self, surface: &mut Surface) {
        let (width, height) = (surface.width(), surface.height());
        self.render_pixels(surface.pixels_mut(), width, height);
    }

    /// Same as `render_image` for a raw host buffer of `width * height`
    /// packed pixels.
    pub fn render_into(&mut self, pixels: &mut [u32], width: u32, height: u32) -> Result<(), SimError> {
        render_image::check_surface_len(pixels.len(), width, height)?;
        self.render_pixels(pixels, width, height);
        Ok(())
    }

    fn render_pixels(&mut self, pixels: &mut [u32], width: u32, height: u32) {
        let t0 = start_if(self.perf_enabled);
        self.update_image();
        render_image::blit_nearest(&self.image, self.resolution(), pixels, width, height);
        if let Some(t0) = t0 {
            t0.add_to(&mut self.perf_stats.render_ms);
        }
    }

    /// Refresh the N×N packed dye image without blitting.
    pub fn update_image(&mut self) {
        render_image::dye_to_image(&self.dispatcher, &self.fields.dye, &mut self.image);
    }

    /// N×N packed image from the last render, grid row order (row 0 is the
    /// bottom of the domain).
    pub fn image(&self) -> &[u32] { &self.image }

    pub fn image_ptr(&self) -> *const u32 { self.image.as_ptr() }

    pub fn image_len(&self) -> usize { self.image.len() }

    /// Free every buffer. Consumes the core.
    pub fn release_resources(self) {
        log::info!(
            "releasing fluid core after {} frames ({} bytes)",
            self.frame,
            self.memory_bytes()
        );
        drop(self);
    }

    // === Accessors ===
    pub fn resolution(&self) -> u32 { self.fields.resolution() }

    pub fn frame(&self) -> u64 { self.frame }

    pub fn config(&self) -> &FluidConfig { &self.config }

    pub fn fields(&self) -> &FieldStore { &self.fields }

    pub fn fields_mut(&mut self) -> &mut FieldStore { &mut self.fields }

    pub fn dispatcher(&self) -> &Dispatcher { &self.dispatcher }

    pub fn mouse(&self) -> &MouseState { &self.mouse }

    pub fn memory_bytes(&self) -> usize {
        self.fields.memory_bytes() + self.image.len() * std::mem::size_of::<u32>()
    }

    // === Settings ===
    /// Enable or disable per-tick perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    pub fn perf_enabled(&self) -> bool { self.perf_enabled }

    /// Last tick's perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    pub fn set_viscosity(&mut self, viscosity: f32) -> Result<(), SimError> {
        settings::set_viscosity(self, viscosity)
    }

    pub fn set_dissipation(&mut self, ink: f32, velocity: f32) -> Result<(), SimError> {
        settings::set_dissipation(self, ink, velocity)
    }

    pub fn set_dye_colour(&mut self, colour: [f32; 4]) -> Result<(), SimError> {
        settings::set_dye_colour(self, colour)
    }

    pub fn set_jacobi_iterations(&mut self, iterations: u32) -> Result<(), SimError> {
        settings::set_jacobi_iterations(self, iterations)
    }

    pub fn set_splat(&mut self, radius: f32, force_scale: f32) -> Result<(), SimError> {
        settings::set_splat(self, radius, force_scale)
    }

    /// Zero every field and forget the pointer history.
    pub fn reset(&mut self) {
        self.fields.clear();
        self.mouse = MouseState::new();
        self.image.fill(0);
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
