//! CPU-side geometry: shape outlines and their triangulation.
//!
//! Everything here works in logical pixels and is renderer-agnostic; the mesh
//! renderer only ever sees the triangles produced by [`tess`].

pub mod star;
pub mod tess;

pub use star::StarShape;
pub use tess::Triangle;
