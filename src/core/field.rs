//! Field - N×N grids of Vec4 cells
//!
//! Every buffer the solver touches (velocity, divergence, pressure, temp, dye)
//! is a `Field` of identical shape. Cells are stored row-major, `y * N + x`,
//! four f32 per cell (16-byte stride). Scalar fields (divergence, pressure)
//! live in the `x` channel.
//!
//! Stages never write the buffer they read: kernel inputs are `&Field`, the
//! output is `&mut Field`, and `FieldStore` hands out disjoint borrows.

use glam::Vec4;

use crate::domain::error::SimError;

mod indexing;
mod sampling;
mod store;

pub use store::{FieldStore, ProjectionViews};

/// One grid cell: four 32-bit floats.
pub type Cell = Vec4;

/// Size of one cell in bytes.
pub const CELL_STRIDE: usize = std::mem::size_of::<Cell>();

/// Stable identity of the five shared buffers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldId {
    Velocity,
    Divergence,
    Pressure,
    Temp,
    Dye,
}

impl FieldId {
    pub const ALL: [FieldId; 5] = [
        FieldId::Velocity,
        FieldId::Divergence,
        FieldId::Pressure,
        FieldId::Temp,
        FieldId::Dye,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FieldId::Velocity => "velocity",
            FieldId::Divergence => "divergence",
            FieldId::Pressure => "pressure",
            FieldId::Temp => "temp",
            FieldId::Dye => "dye",
        }
    }
}

/// Quantity that advection, diffusion and projection can act on.
///
/// Keeping this separate from `FieldId` means a stage can never be pointed
/// at its own scratch buffers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quantity {
    Velocity,
    Dye,
}

impl Quantity {
    pub fn field_id(self) -> FieldId {
        match self {
            Quantity::Velocity => FieldId::Velocity,
            Quantity::Dye => FieldId::Dye,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    resolution: u32,
    cells: Vec<Cell>,
}

impl Field {
    /// Allocate an N×N field of zero cells.
    ///
    /// Uses fallible reservation so a host that cannot provide the memory gets
    /// `SimError::Allocation` instead of an abort.
    pub fn zeroed(resolution: u32) -> Result<Self, SimError> {
        Self::filled(resolution, Vec4::ZERO)
    }

    pub fn filled(resolution: u32, value: Cell) -> Result<Self, SimError> {
        let len = cell_count(resolution, CELL_STRIDE)?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| SimError::Allocation { field: "field", cells: len })?;
        cells.resize(len, value);
        Ok(Self { resolution, cells })
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn fill(&mut self, value: Cell) {
        self.cells.fill(value);
    }

    pub fn size_bytes(&self) -> usize {
        self.cells.len() * CELL_STRIDE
    }
}

/// Cells in an N×N grid of `stride`-byte elements. Fails when the grid
/// would not fit in the address space.
pub(crate) fn cell_count(resolution: u32, stride: usize) -> Result<usize, SimError> {
    let n = resolution as usize;
    n.checked_mul(n)
        .filter(|cells| cells.checked_mul(stride).is_some())
        .ok_or_else(|| {
            SimError::Misconfigured(format!("a {0}x{0} grid does not fit in memory", resolution))
        })
}

/// True when (x, y) lies on the outermost ring of an N×N grid.
#[inline]
pub fn is_border_cell(x: u32, y: u32, resolution: u32) -> bool {
    x == 0 || y == 0 || x + 1 == resolution || y + 1 == resolution
}
