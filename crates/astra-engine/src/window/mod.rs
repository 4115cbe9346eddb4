//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single application window, and wires
//! them to the GPU layer and input subsystem.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
