//! Utilities shared by every kernel (must be declared first for macro export)

#[macro_use]
pub mod safety;
pub mod console;
