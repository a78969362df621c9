//! On-screen overlay: control hints, the now-playing line and asset errors

use macroquad::prelude::*;

use crate::assets::Assets;
use crate::audio::Radio;
use crate::config::CANVAS_WIDTH;

pub fn draw(radio: &Radio, assets: &Assets) {
    let hint = Color::new(1.0, 1.0, 1.0, 0.75);
    draw_text("Left/Right: speed", 8.0, 16.0, 14.0, hint);
    draw_text("R: radio  M: next track", 8.0, 30.0, 14.0, hint);

    if radio.is_on() {
        let line = format!("On air: {}", radio.current_track_name());
        let width = measure_text(&line, None, 14, 1.0).width;
        draw_text(&line, CANVAS_WIDTH - width - 8.0, 16.0, 14.0, hint);
    }

    // Decode failures stack up in red under the hints
    for (i, err) in assets.errors.iter().enumerate() {
        draw_text(
            err,
            8.0,
            48.0 + i as f32 * 12.0,
            12.0,
            Color::new(1.0, 0.35, 0.35, 0.9),
        );
    }
}
