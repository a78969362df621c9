//! Sky, sun, moon and stars
//!
//! The whole day/night mood comes from `cycle_progress` in [0,1): day until
//! 0.45, sunset blend to 0.55, night until 0.95, dawn blend back to day.

use macroquad::prelude::*;
use macroquad::rand::gen_range;

use crate::config::{lerp, lerp_rgb, rgb, SceneConfig, CANVAS_HEIGHT, CANVAS_WIDTH};

pub const NIGHT_START: f32 = 0.55;
pub const NIGHT_END: f32 = 0.95;
pub const SUNSET_START: f32 = 0.45;

/// True while the scene is in its night window
pub fn is_night(cycle_progress: f32) -> bool {
    cycle_progress > NIGHT_START && cycle_progress < NIGHT_END
}

/// How deep into the night we are, 0 at dusk to 1 at the end of night
pub fn night_progress(cycle_progress: f32) -> f32 {
    ((cycle_progress - NIGHT_START) / (NIGHT_END - NIGHT_START)).clamp(0.0, 1.0)
}

/// Flat sky color for the current moment in the cycle
pub fn sky_color(cycle_progress: f32, cfg: &SceneConfig) -> Color {
    let p = &cfg.palette;
    if cycle_progress > SUNSET_START && cycle_progress < NIGHT_START {
        let t = (cycle_progress - SUNSET_START) / (NIGHT_START - SUNSET_START);
        lerp_rgb(p.day_sky, p.sunset_sky, t)
    } else if is_night(cycle_progress) {
        rgb(p.night_sky)
    } else if cycle_progress >= NIGHT_END {
        let t = (cycle_progress - NIGHT_END) / (1.0 - NIGHT_END);
        lerp_rgb(p.night_sky, p.day_sky, t)
    } else {
        rgb(p.day_sky)
    }
}

/// Sun x position while it is up (progress 0-0.5)
pub fn sun_x(cycle_progress: f32) -> Option<f32> {
    if cycle_progress < 0.5 {
        Some(lerp(-40.0, CANVAS_WIDTH + 40.0, cycle_progress / 0.5))
    } else {
        None
    }
}

/// Moon x position while it is up (progress 0.55-1.0)
pub fn moon_x(cycle_progress: f32) -> Option<f32> {
    if cycle_progress > NIGHT_START {
        let t = (cycle_progress - NIGHT_START) / (1.0 - NIGHT_START);
        Some(lerp(CANVAS_WIDTH + 40.0, -40.0, t))
    } else {
        None
    }
}

struct Star {
    x: f32,
    y: f32,
    radius: f32,
    alpha: f32,
    twinkle_speed: f32,
}

pub struct Sky {
    stars: Vec<Star>,
}

impl Sky {
    pub fn new(cfg: &SceneConfig) -> Self {
        let stars = (0..cfg.star_count)
            .map(|_| Star {
                x: gen_range(0.0, CANVAS_WIDTH),
                y: gen_range(0.0, CANVAS_HEIGHT * 0.8),
                radius: gen_range(0.3, 1.5),
                alpha: gen_range(0.0, 1.0),
                twinkle_speed: gen_range(0.5, 3.0),
            })
            .collect();
        Self { stars }
    }

    pub fn update(&mut self, dt: f32) {
        for star in &mut self.stars {
            star.alpha += star.twinkle_speed * dt;
            if star.alpha > 1.0 {
                star.alpha = 1.0;
                star.twinkle_speed = -star.twinkle_speed;
            } else if star.alpha < 0.0 {
                star.alpha = 0.0;
                star.twinkle_speed = -star.twinkle_speed;
            }
        }
    }

    pub fn draw(&self, cycle_progress: f32, cfg: &SceneConfig) {
        draw_rectangle(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT, sky_color(cycle_progress, cfg));
        self.draw_sun_moon(cycle_progress, cfg);
    }

    fn draw_sun_moon(&self, cycle_progress: f32, cfg: &SceneConfig) {
        let p = &cfg.palette;
        if let Some(x) = sun_x(cycle_progress) {
            let sun = rgb(p.sun);
            // Layered discs stand in for the glow
            draw_circle(x, 40.0, 28.0, Color::new(sun.r, sun.g, sun.b, 0.25));
            draw_circle(x, 40.0, 23.0, Color::new(sun.r, sun.g, sun.b, 0.5));
            draw_circle(x, 40.0, 20.0, sun);
        } else if let Some(x) = moon_x(cycle_progress) {
            draw_circle(x, 40.0, 20.0, rgb(p.moon));
            // Offset disc carves the crescent
            draw_circle(x - 8.0, 32.0, 20.0, rgb(p.moon_crater));
        }
    }

    /// Stars fade in over the night and back out before dawn
    pub fn draw_stars(&self, cycle_progress: f32) {
        if !is_night(cycle_progress) {
            return;
        }
        let envelope = (night_progress(cycle_progress) * std::f32::consts::PI).sin();
        for star in &self.stars {
            draw_circle(
                star.x,
                star.y,
                star.radius,
                Color::new(1.0, 1.0, 1.0, star.alpha * envelope),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_night_window() {
        assert!(!is_night(0.0));
        assert!(!is_night(0.55));
        assert!(is_night(0.56));
        assert!(is_night(0.94));
        assert!(!is_night(0.95));
        assert!(!is_night(0.99));
    }

    #[test]
    fn test_night_progress_endpoints() {
        assert!((night_progress(0.55) - 0.0).abs() < 0.001);
        assert!((night_progress(0.75) - 0.5).abs() < 0.001);
        assert!((night_progress(0.95) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_sky_color_phases() {
        let cfg = SceneConfig::default();
        let day = sky_color(0.2, &cfg);
        let night = sky_color(0.7, &cfg);
        assert_eq!(day, rgb(cfg.palette.day_sky));
        assert_eq!(night, rgb(cfg.palette.night_sky));

        // Middle of sunset should differ from both endpoints
        let sunset = sky_color(0.5, &cfg);
        assert_ne!(sunset, day);
        assert_ne!(sunset, rgb(cfg.palette.sunset_sky));

        // Dawn ends back at the day color
        let almost_day = sky_color(0.9999, &cfg);
        assert!((almost_day.r - day.r).abs() < 0.01);
    }

    #[test]
    fn test_sun_and_moon_never_overlap() {
        for i in 0..100 {
            let p = i as f32 / 100.0;
            assert!(!(sun_x(p).is_some() && moon_x(p).is_some()), "both up at {}", p);
        }
    }

    #[test]
    fn test_sun_crosses_the_sky() {
        let start = sun_x(0.0).unwrap();
        let end = sun_x(0.4999).unwrap();
        assert!(start < 0.0);
        assert!(end > CANVAS_WIDTH);
    }

    #[test]
    fn test_moon_travels_right_to_left() {
        let early = moon_x(0.6).unwrap();
        let late = moon_x(0.99).unwrap();
        assert!(early > late);
    }
}
