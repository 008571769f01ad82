use wasm_bindgen::prelude::*;

use crate::domain::config::FluidConfig;
use crate::domain::error::SimError;

use super::perf_stats::PerfStats;
use super::FluidCore;

const RELEASED: &str = "resources released";

fn js_err(e: SimError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct World {
    core: Option<FluidCore>,
}

impl World {
    fn core(&self) -> Result<&FluidCore, JsValue> {
        self.core.as_ref().ok_or_else(|| JsValue::from_str(RELEASED))
    }

    fn core_mut(&mut self) -> Result<&mut FluidCore, JsValue> {
        self.core.as_mut().ok_or_else(|| JsValue::from_str(RELEASED))
    }
}

#[wasm_bindgen]
impl World {
    /// Create a simulation on an N×N grid with default settings
    #[wasm_bindgen(constructor)]
    pub fn new(resolution: u32) -> Result<World, JsValue> {
        let core = FluidCore::with_resolution(resolution).map_err(js_err)?;
        Ok(World { core: Some(core) })
    }

    /// Create a simulation from a JSON config (camelCase, every field optional)
    #[wasm_bindgen(js_name = newWithConfig)]
    pub fn new_with_config(json: String) -> Result<World, JsValue> {
        let config = FluidConfig::from_json(&json).map_err(js_err)?;
        let core = FluidCore::new(config).map_err(js_err)?;
        Ok(World { core: Some(core) })
    }

    pub fn resolution(&self) -> Result<u32, JsValue> {
        Ok(self.core()?.resolution())
    }

    pub fn frame(&self) -> Result<u64, JsValue> {
        Ok(self.core()?.frame())
    }

    #[wasm_bindgen(js_name = configJson)]
    pub fn config_json(&self) -> Result<String, JsValue> {
        Ok(self.core()?.config().to_json())
    }

    pub fn tick(&mut self) -> Result<(), JsValue> {
        self.core_mut()?.tick();
        Ok(())
    }

    /// Pointer position in normalized viewport coordinates (y up)
    pub fn set_pointer(&mut self, x: f32, y: f32) -> Result<(), JsValue> {
        self.core_mut()?.set_pointer(x, y);
        Ok(())
    }

    /// Render the dye into a `width * height` packed ABGR buffer
    pub fn render_image(&mut self, dest: &mut [u32], width: u32, height: u32) -> Result<(), JsValue> {
        self.core_mut()?.render_into(dest, width, height).map_err(js_err)
    }

    /// Refresh the N×N image behind `image_ptr` without blitting
    pub fn update_image(&mut self) -> Result<(), JsValue> {
        self.core_mut()?.update_image();
        Ok(())
    }

    /// Pointer to the N×N packed dye image (zero-copy view from JS)
    pub fn image_ptr(&self) -> Result<*const u32, JsValue> {
        Ok(self.core()?.image_ptr())
    }

    pub fn image_len(&self) -> Result<usize, JsValue> {
        Ok(self.core()?.image_len())
    }

    /// Free every buffer. Later calls fail instead of touching freed memory.
    pub fn release_resources(&mut self) -> Result<(), JsValue> {
        let core = self.core.take().ok_or_else(|| JsValue::from_str(RELEASED))?;
        core.release_resources();
        Ok(())
    }

    pub fn is_released(&self) -> bool {
        self.core.is_none()
    }

    /// Enable or disable per-tick perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) -> Result<(), JsValue> {
        self.core_mut()?.enable_perf_metrics(enabled);
        Ok(())
    }

    /// Get last tick perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> Result<PerfStats, JsValue> {
        Ok(self.core()?.get_perf_stats())
    }

    pub fn set_viscosity(&mut self, viscosity: f32) -> Result<(), JsValue> {
        self.core_mut()?.set_viscosity(viscosity).map_err(js_err)
    }

    pub fn set_dissipation(&mut self, ink: f32, velocity: f32) -> Result<(), JsValue> {
        self.core_mut()?.set_dissipation(ink, velocity).map_err(js_err)
    }

    pub fn set_dye_colour(&mut self, r: f32, g: f32, b: f32, a: f32) -> Result<(), JsValue> {
        self.core_mut()?.set_dye_colour([r, g, b, a]).map_err(js_err)
    }

    pub fn set_jacobi_iterations(&mut self, iterations: u32) -> Result<(), JsValue> {
        self.core_mut()?.set_jacobi_iterations(iterations).map_err(js_err)
    }

    pub fn set_splat(&mut self, radius: f32, force_scale: f32) -> Result<(), JsValue> {
        self.core_mut()?.set_splat(radius, force_scale).map_err(js_err)
    }

    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.core_mut()?.reset();
        Ok(())
    }
}
