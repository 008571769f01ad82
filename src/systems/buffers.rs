//! Whole-buffer kernels: copy and clear

use glam::Vec4;

use crate::core::dispatch::{Dispatcher, KernelId};
use crate::core::field::Field;

/// `copy_temp`: dst[i] = src[i] for every cell.
pub fn copy_field(d: &Dispatcher, src: &Field, dst: &mut Field) {
    assert_eq!(src.len(), dst.len(), "copy_field: buffer size mismatch");
    let src_cells = src.cells();
    d.dispatch_linear(KernelId::CopyTemp, dst.cells_mut(), |i, out| {
        *out = *fast!(src_cells, [i]);
    });
}

/// `clear_buffer`: zero every cell.
pub fn clear_field(d: &Dispatcher, field: &mut Field) {
    d.dispatch_linear(KernelId::ClearBuffer, field.cells_mut(), |_, out| {
        *out = Vec4::ZERO;
    });
}
