//! Systems - the solver stages
//!
//! Each stage is a set of kernels over `Field`s plus a store-level entry
//! point that picks the right buffers for a `Quantity`.

pub mod advection;
pub mod boundary;
pub mod buffers;
pub mod diffusion;
pub mod forcing;
pub mod ping_pong;
pub mod projection;
