//! Fluid configuration - fixed at construction, loadable from JSON
//!
//! Every field is optional in JSON; missing fields take the defaults below.

use glam::Vec4;
use serde::{Deserialize, Serialize};

use super::error::SimError;

pub const DEFAULT_RESOLUTION: u32 = 672;
/// Largest accepted grid edge. Five 4096² fields already take 1.25 GiB.
pub const MAX_RESOLUTION: u32 = 4096;
pub const DEFAULT_JACOBI_ITERATIONS: u32 = 100;
pub const DEFAULT_VISCOSITY: f32 = 0.01;
pub const DEFAULT_INK_DISSIPATION: f32 = 0.99;
pub const DEFAULT_VELOCITY_DISSIPATION: f32 = 0.999;
pub const DEFAULT_TIME_STEP: f32 = 1.0;
pub const DEFAULT_DYE_COLOUR: [f32; 4] = [0.3, 0.4, 0.6, 1.0];
pub const DEFAULT_SPLAT_RADIUS: f32 = 12.0;
pub const DEFAULT_FORCE_SCALE: f32 = 1.0;

/// Where a Jacobi ping-pong loop leaves its result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PingPongPolicy {
    /// Copy the result back into the caller's buffer whatever the parity.
    #[default]
    Normalize,
    /// Leave the result wherever the last round wrote it. Odd iteration
    /// counts then end in the scratch buffer.
    SourceParity,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct FluidConfig {
    pub resolution: u32,
    pub jacobi_iterations: u32,
    pub viscosity: f32,
    pub ink_dissipation: f32,
    pub velocity_dissipation: f32,
    pub time_step: f32,
    pub dye_colour: [f32; 4],
    /// Gaussian radius of the pointer splat, in cells.
    pub splat_radius: f32,
    pub force_scale: f32,
    /// Run pressure projection on the dye too (swirlier ink).
    pub project_dye: bool,
    pub ping_pong: PingPongPolicy,
}

impl Default for FluidConfig {
    fn default() -> Self {
        FluidConfig {
            resolution: DEFAULT_RESOLUTION,
            jacobi_iterations: DEFAULT_JACOBI_ITERATIONS,
            viscosity: DEFAULT_VISCOSITY,
            ink_dissipation: DEFAULT_INK_DISSIPATION,
            velocity_dissipation: DEFAULT_VELOCITY_DISSIPATION,
            time_step: DEFAULT_TIME_STEP,
            dye_colour: DEFAULT_DYE_COLOUR,
            splat_radius: DEFAULT_SPLAT_RADIUS,
            force_scale: DEFAULT_FORCE_SCALE,
            project_dye: true,
            ping_pong: PingPongPolicy::Normalize,
        }
    }
}

impl FluidConfig {
    pub fn with_resolution(resolution: u32) -> Self {
        FluidConfig { resolution, ..FluidConfig::default() }
    }

    pub fn from_json(json: &str) -> Result<Self, SimError> {
        serde_json::from_str(json).map_err(|e| SimError::Config(e.to_string()))
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn dye_colour(&self) -> Vec4 {
        Vec4::from_array(self.dye_colour)
    }

    /// Reject settings that would make the solver silently misbehave.
    ///
    /// Group-size divisibility of the resolution is checked by the
    /// dispatcher, which owns the kernel table.
    pub fn validate(&self) -> Result<(), SimError> {
        let bad = |msg: String| Err(SimError::Misconfigured(msg));

        if self.resolution < 3 {
            return bad(format!("resolution {} leaves no interior cells", self.resolution));
        }
        if self.resolution > MAX_RESOLUTION {
            return bad(format!(
                "resolution {} exceeds the maximum of {}",
                self.resolution, MAX_RESOLUTION
            ));
        }
        if self.ping_pong == PingPongPolicy::SourceParity && self.jacobi_iterations % 2 != 0 {
            return bad(format!(
                "jacobiIterations must be even under sourceParity (got {})",
                self.jacobi_iterations
            ));
        }
        if !(self.viscosity.is_finite() && self.viscosity > 0.0) {
            return bad(format!("viscosity must be positive (got {})", self.viscosity));
        }
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return bad(format!("timeStep must be positive (got {})", self.time_step));
        }
        for (name, value) in [
            ("inkDissipation", self.ink_dissipation),
            ("velocityDissipation", self.velocity_dissipation),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return bad(format!("{} must be in (0, 1] (got {})", name, value));
            }
        }
        if !(self.splat_radius.is_finite() && self.splat_radius > 0.0) {
            return bad(format!("splatRadius must be positive (got {})", self.splat_radius));
        }
        if !self.force_scale.is_finite() || !self.dye_colour.iter().all(|c| c.is_finite()) {
            return bad("forceScale and dyeColour must be finite".to_string());
        }
        Ok(())
    }
}
