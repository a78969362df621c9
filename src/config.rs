//! Scene configuration
//!
//! All tuning constants for the animation live in one serde struct so the
//! whole scene can be reskinned from `assets/scene.ron` without recompiling.
//! Missing or malformed files fall back to the built-in defaults.

use macroquad::prelude::Color;
use serde::{Deserialize, Serialize};

/// Logical canvas width in pixels (the scene is letterboxed to the window)
pub const CANVAS_WIDTH: f32 = 600.0;
/// Logical canvas height in pixels
pub const CANVAS_HEIGHT: f32 = 250.0;

/// RGB triple as stored in the config file
pub type Rgb = [u8; 3];

/// Convert a config color to a macroquad color with full opacity
pub fn rgb(c: Rgb) -> Color {
    Color::from_rgba(c[0], c[1], c[2], 255)
}

/// Convert a config color to a macroquad color with the given alpha (0-1)
pub fn rgba(c: Rgb, alpha: f32) -> Color {
    Color::new(
        c[0] as f32 / 255.0,
        c[1] as f32 / 255.0,
        c[2] as f32 / 255.0,
        alpha,
    )
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TruckTuning {
    /// Speed gained per frame-at-60fps while accelerating
    pub acceleration: f32,
    /// Speed lost per frame-at-60fps while braking
    pub deceleration: f32,
    pub max_speed: f32,
    pub min_speed: f32,
    /// Drift back toward cruise speed (1.0) when no key is held
    pub natural_deceleration: f32,
}

impl Default for TruckTuning {
    fn default() -> Self {
        Self {
            acceleration: 0.03,
            deceleration: 0.05,
            max_speed: 2.5,
            min_speed: 0.2,
            natural_deceleration: 0.01,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub day_sky: Rgb,
    pub sunset_sky: Rgb,
    pub night_sky: Rgb,
    pub sun: Rgb,
    pub moon: Rgb,
    pub moon_crater: Rgb,
    pub scenery: Rgb,
    pub cloud_day: Rgb,
    pub cloud_night: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            day_sky: [0x00, 0x96, 0x88],
            sunset_sky: [0xff, 0xb8, 0xb8],
            night_sky: [0x2c, 0x3e, 0x50],
            sun: [0xfd, 0xd8, 0x35],
            moon: [0xf5, 0xf5, 0xf5],
            moon_crater: [0xbd, 0xc3, 0xc7],
            scenery: [0x4d, 0xb6, 0xac],
            cloud_day: [255, 255, 255],
            cloud_night: [160, 160, 160],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Seconds for one full day/night cycle
    pub cycle_duration: f32,
    pub palette: Palette,
    pub truck: TruckTuning,
    pub cloud_count: usize,
    pub tree_count: usize,
    pub cow_count: usize,
    pub critter_count: usize,
    pub raindrop_count: usize,
    pub star_count: usize,
    /// Text towed behind the biplane
    pub banner_text: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            cycle_duration: 20.0,
            palette: Palette::default(),
            truck: TruckTuning::default(),
            cloud_count: 3,
            tree_count: 4,
            cow_count: 3,
            critter_count: 2,
            raindrop_count: 200,
            star_count: 100,
            banner_text: "Dulce".to_string(),
        }
    }
}

impl SceneConfig {
    /// Load from a RON file, falling back to defaults if it is missing or broken
    pub fn load(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => match ron::from_str::<SceneConfig>(&text) {
                Ok(cfg) => {
                    println!("Loaded scene config from {}", path);
                    cfg
                }
                Err(e) => {
                    eprintln!("Bad scene config {}: {} (using defaults)", path, e);
                    SceneConfig::default()
                }
            },
            Err(_) => SceneConfig::default(),
        }
    }
}

/// Linear interpolation
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Blend two config colors into a draw color
pub fn lerp_rgb(a: Rgb, b: Rgb, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    Color::from_rgba(
        lerp(a[0] as f32, b[0] as f32, t) as u8,
        lerp(a[1] as f32, b[1] as f32, t) as u8,
        lerp(a[2] as f32, b[2] as f32, t) as u8,
        255,
    )
}
