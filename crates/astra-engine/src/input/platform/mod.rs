//! Window-system event translation.

pub mod winit;
