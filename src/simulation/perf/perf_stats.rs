use wasm_bindgen::prelude::*;

/// Snapshot of the last tick's timings and counters (zeros when perf is off).
#[wasm_bindgen]
#[derive(Clone, Debug, Default)]
pub struct PerfStats {
    pub(super) step_ms: f64,
    pub(super) advect_ms: f64,
    pub(super) diffuse_ms: f64,
    pub(super) boundary_ms: f64,
    pub(super) force_ms: f64,
    pub(super) project_ms: f64,
    pub(super) render_ms: f64,
    pub(super) dispatches: u32,
    pub(super) jacobi_rounds: u32,
    pub(super) grid_size: u32,
    pub(super) memory_bytes: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn advect_ms(&self) -> f64 { self.advect_ms }
    #[wasm_bindgen(getter)]
    pub fn diffuse_ms(&self) -> f64 { self.diffuse_ms }
    #[wasm_bindgen(getter)]
    pub fn boundary_ms(&self) -> f64 { self.boundary_ms }
    #[wasm_bindgen(getter)]
    pub fn force_ms(&self) -> f64 { self.force_ms }
    #[wasm_bindgen(getter)]
    pub fn project_ms(&self) -> f64 { self.project_ms }
    #[wasm_bindgen(getter)]
    pub fn render_ms(&self) -> f64 { self.render_ms }
    #[wasm_bindgen(getter)]
    pub fn dispatches(&self) -> u32 { self.dispatches }
    #[wasm_bindgen(getter)]
    pub fn jacobi_rounds(&self) -> u32 { self.jacobi_rounds }
    #[wasm_bindgen(getter)]
    pub fn grid_size(&self) -> u32 { self.grid_size }
    #[wasm_bindgen(getter)]
    pub fn memory_bytes(&self) -> u32 { self.memory_bytes }
}
