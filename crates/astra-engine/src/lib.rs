//! Astra engine crate.
//!
//! Owns the platform + GPU runtime pieces and the renderer-agnostic geometry
//! used by `astra-ui`.

pub mod device;
pub mod window;
pub mod input;
pub mod core;

pub mod logging;
pub mod coords;
pub mod geom;
pub mod render;
pub mod paint;
pub mod scene;
