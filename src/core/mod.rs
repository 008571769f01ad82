//! Core - field storage and kernel dispatch
//!
//! - utils/     - `fast!` indexing macro, console `log` backend
//! - field      - Five N×N Vec4 grids and their accessors
//! - dispatch   - Kernel table, group sizing and parallel execution

#[macro_use]
pub mod utils;
pub mod field;
pub mod dispatch;
