use winit::dpi::LogicalSize;

use astra_engine::coords::Vec2;
use astra_engine::core::{App as EngineApp, AppControl, FrameCtx};
use astra_engine::device::GpuInit;
use astra_engine::input::MouseButton;
use astra_engine::paint::Color;
use astra_engine::render::shapes::mesh::MeshRenderer;
use astra_engine::window::{Runtime, RuntimeConfig};

use crate::constraints::LayoutDirection;
use crate::scene::{UiInput, UiScene};
use crate::widget::Element;

// ── Application ───────────────────────────────────────────────────────────

/// Top-level UI application builder.
///
/// Configure the window, then start the event loop with [`run_widget`](Self::run_widget).
///
/// ```rust,ignore
/// Application::new()
///     .title("Ratings")
///     .size(480.0, 320.0)
///     .run_widget(|| RatingBar::new().num_stars(5).into());
/// ```
pub struct Application {
    title:       String,
    width:       f64,
    height:      f64,
    clear_color: Color,
    direction:   LayoutDirection,
}

impl Application {
    pub fn new() -> Self {
        Self {
            title:       "astra".to_string(),
            width:       640.0,
            height:      480.0,
            clear_color: Color::from_straight(0.07, 0.07, 0.09, 1.0),
            direction:   LayoutDirection::Ltr,
        }
    }

    /// Set the window title.
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width  = width;
        self.height = height;
        self
    }

    pub fn clear_color(mut self, c: Color) -> Self {
        self.clear_color = c;
        self
    }

    /// Layout direction inherited by the whole widget tree.
    pub fn direction(mut self, d: LayoutDirection) -> Self {
        self.direction = d;
        self
    }

    /// Start the event loop with a custom root widget.
    ///
    /// `build` is called once; the returned [`Element`] persists across
    /// frames and is mutated in place via `on_event`.
    ///
    /// This never returns.
    pub fn run_widget<F>(self, build: F) -> !
    where
        F: FnOnce() -> Element,
    {
        let config = RuntimeConfig {
            title:        self.title.clone(),
            initial_size: LogicalSize::new(self.width, self.height),
        };
        let state = UiAppState {
            clear_color:   self.clear_color,
            ui_scene:      UiScene::new().with_direction(self.direction),
            mesh_renderer: MeshRenderer::new(),
            root:          build(),
        };
        if let Err(e) = Runtime::run(config, GpuInit::default(), state) {
            log::error!("runtime stopped: {e:#}");
            eprintln!("astra runtime error: {e}");
            std::process::exit(1);
        }
        std::process::exit(0);
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

// ── UiAppState ────────────────────────────────────────────────────────────

/// Implements the engine's `App`; user code never sees this type.
struct UiAppState {
    clear_color:   Color,
    ui_scene:      UiScene,
    mesh_renderer: MeshRenderer,
    root:          Element,
}

impl EngineApp for UiAppState {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let (w, h) = ctx.window.logical_size();
        let viewport = Vec2::new(w, h);

        let ui_input = UiInput {
            mouse_pos:      ctx.input.pointer_pos.map(|(x, y)| Vec2::new(x, y)),
            mouse_down:     ctx.input.button_down(MouseButton::Left),
            mouse_pressed:  ctx.input_frame.buttons_pressed.contains(&MouseButton::Left),
            mouse_released: ctx.input_frame.buttons_released.contains(&MouseButton::Left),
            keys_pressed:   ctx.input_frame.keys_pressed.clone(),
            modifiers:      ctx.input.modifiers,
            pointer_left:   ctx.input_frame.pointer_left,
            focus_lost:     ctx.input_frame.focus_lost,
        };

        // ── Layout + paint + events ───────────────────────────────────────
        self.ui_scene.scale = ctx.window.scale_factor();
        let _ = self.ui_scene.frame_ref(&mut self.root, viewport, &ui_input);
        if self.ui_scene.needs_repaint() {
            ctx.window.request_redraw();
        }

        // ── Render ────────────────────────────────────────────────────────
        let dl   = &mut self.ui_scene.draw_list;
        let mesh = &mut self.mesh_renderer;
        ctx.render(self.clear_color, |rctx, target| {
            mesh.render(rctx, target, dl);
        })
    }
}
