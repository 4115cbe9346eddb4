//! Rating math: pointer-to-value mapping, quantization, per-star fill, and
//! the gesture state machine driving the callbacks.
//!
//! Nothing here touches the widget tree, so every rule is testable on its own.

mod geometry;
mod gesture;

pub use geometry::{fill_fraction, step_sized, RatingGeometry};
pub use gesture::{Emission, GesturePhase, RatingGesture};
