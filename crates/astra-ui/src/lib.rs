//! Astra UI: retained widget tree on top of `astra-engine`, centered on a
//! fractional star rating control.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use astra_ui::prelude::*;
//!
//! Application::new()
//!     .title("Rate it")
//!     .run_widget(|| {
//!         Column::new()
//!             .padding_all(24.0)
//!             .child(RatingBar::new()
//!                 .num_stars(10)
//!                 .step_mode(true)
//!                 .on_rating_changed(|v| println!("rated {v}")))
//!             .into()
//!     });
//! ```

pub mod app;
pub mod constraints;
pub mod event;
pub mod focus;
pub mod gesture;
pub mod painter;
pub mod rating;
pub mod scene;
pub mod widget;
pub mod widgets;

pub use app::Application;

/// Everything you need to build and extend UI; import this in your component files.
pub mod prelude {
    pub use crate::app::Application;
    pub use crate::constraints::{Constraints, Edges, LayoutCtx, LayoutDirection};
    pub use crate::event::{EventResult, UiEvent};
    pub use crate::focus::FocusId;
    pub use crate::painter::Painter;
    pub use crate::scene::{UiInput, UiScene};
    pub use crate::widget::{Element, Widget};
    pub use crate::widgets::{
        flex::{Align, Column},
        rating_bar::RatingBar,
    };

    // Re-export the engine primitives everyone needs.
    pub use astra_engine::coords::{Rect, Vec2};
    pub use astra_engine::geom::StarShape;
    pub use astra_engine::paint::Color;
    pub use astra_engine::scene::Border;
}
