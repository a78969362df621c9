//! ROADSIDE: an endless desert-highway diorama
//!
//! A truck rolls past parallax scenery through a looping day/night cycle.
//! Arrow keys drive, R and M work the radio; everything else just happens:
//! the UFO comes out at night, the biplane by day, rain, fog and lightning
//! on their own schedule.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod assets;
mod audio;
mod config;
mod hud;
mod input;
mod scene;

use macroquad::prelude::*;

use assets::Assets;
use audio::AudioOutput;
use config::{SceneConfig, CANVAS_HEIGHT, CANVAS_WIDTH};
use input::InputState;
use scene::Scene;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("ROADSIDE v{}", VERSION),
        window_width: 1200,
        window_height: 500,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    macroquad::rand::srand(miniquad::date::now() as u64);

    let assets = Assets::load().await;
    let cfg = SceneConfig::load("assets/scene.ron");
    let audio = AudioOutput::open();
    let mut scene = Scene::new(cfg, audio, &assets);
    let input = InputState::new();

    // The scene is drawn at a fixed logical size and letterboxed to the window
    let canvas = render_target(CANVAS_WIDTH as u32, CANVAS_HEIGHT as u32);
    canvas.texture.set_filter(FilterMode::Nearest);
    let camera = Camera2D {
        render_target: Some(canvas.clone()),
        ..Camera2D::from_display_rect(Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT))
    };

    loop {
        // Clamp dt so a dragged window doesn't teleport everything
        let dt = get_frame_time().min(0.1);

        let frame = input.frame();
        scene.update(dt, frame, &assets);

        set_camera(&camera);
        scene.draw(&assets);
        hud::draw(&scene.radio, &assets);
        set_default_camera();

        clear_background(BLACK);
        let scale = (screen_width() / CANVAS_WIDTH).min(screen_height() / CANVAS_HEIGHT);
        let dest_w = CANVAS_WIDTH * scale;
        let dest_h = CANVAS_HEIGHT * scale;
        draw_texture_ex(
            &canvas.texture,
            (screen_width() - dest_w) / 2.0,
            (screen_height() - dest_h) / 2.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(dest_w, dest_h)),
                ..Default::default()
            },
        );

        next_frame().await;
    }
}
