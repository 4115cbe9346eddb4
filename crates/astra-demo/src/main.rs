use astra_engine::logging::{init_logging, LoggingConfig};
use astra_ui::prelude::*;

/// A bar that logs every proposal at debug and every commit at info.
fn logged(label: &'static str, bar: RatingBar) -> RatingBar {
    bar.on_value_change(move |v| log::debug!("{label}: proposed {v}"))
        .on_rating_changed(move |v| log::info!("{label}: rated {v}"))
}

fn main() {
    init_logging(LoggingConfig::default());
    log::info!("Tab / arrows move focus; Left/Right, Home/End rate the focused bar");

    let gold = Color::from_srgb_u8(255, 193, 7, 255);
    let grey = Color::from_srgb_u8(110, 115, 125, 255);

    Application::new()
        .title("Astra ratings")
        .size(520.0, 320.0)
        .run_widget(move || {
            Column::new()
                .padding_all(24.0)
                .spacing(20.0)
                .child(logged("movie", RatingBar::new()
                    .num_stars(10)
                    .star_size(36.0)
                    .step_mode(true)
                    .value(6.5)
                    .active_color(gold)
                    .inactive_color(grey)))
                .child(logged("episode", RatingBar::new()
                    .num_stars(5)
                    .star_size(40.0)
                    .star_padding(4.0)
                    .value(3.0)
                    .active_color(gold)))
                .child(logged("critics", RatingBar::new()
                    .num_stars(5)
                    .star_size(28.0)
                    .value(4.5)
                    .enabled(false)))
                .child(logged("rtl", RatingBar::new()
                    .num_stars(5)
                    .star_size(36.0)
                    .step_mode(true)
                    .value(2.5)
                    .fill_inactive(true)
                    .inactive_color(Color::from_srgb_u8(60, 64, 72, 255))
                    .direction(LayoutDirection::Rtl)))
                .into()
        });
}
