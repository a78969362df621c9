//! Wind, fog and lightning
//!
//! Wind is a slow oscillation that pushes smoke, steam and the truck antenna.
//! Fog rolls in around dawn and burns off shortly after sunrise; while it is
//! up the truck switches its fog lights on. Storms only strike at night, as
//! a brief full-screen flash.

use macroquad::prelude::*;
use macroquad::rand::gen_range;

use crate::config::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Fog starts building at this point in the cycle
const FOG_IN_START: f32 = 0.93;
/// Fog is fully gone by this point after dawn
const FOG_OUT_END: f32 = 0.07;

pub struct Weather {
    pub wind: f32,
    pub fog: f32,
    clock: f32,
}

impl Weather {
    pub fn new() -> Self {
        Self {
            wind: 0.0,
            fog: 0.0,
            clock: 0.0,
        }
    }

    pub fn update(&mut self, dt: f32, cycle_progress: f32) {
        self.clock += dt;
        self.wind = wind_at(self.clock);
        self.fog = fog_at(cycle_progress);
    }

    /// Ground-hugging translucent bands; denser near the road
    pub fn draw_fog(&self) {
        if self.fog <= 0.0 {
            return;
        }
        let bands = 3;
        for i in 0..bands {
            let height = 18.0 + i as f32 * 10.0;
            let alpha = self.fog * 0.28 * (1.0 - i as f32 / bands as f32);
            draw_rectangle(
                0.0,
                CANVAS_HEIGHT - height,
                CANVAS_WIDTH,
                height,
                Color::new(0.85, 0.87, 0.88, alpha),
            );
        }
    }
}

/// Wind strength in px/s^2-ish units, always blowing against travel
pub fn wind_at(clock: f32) -> f32 {
    let base = 14.0 + 10.0 * (clock * 0.3).sin();
    let gust = 6.0 * (clock * 1.7).sin();
    (base + gust).max(0.0)
}

/// Fog intensity 0-1 for the given cycle position
pub fn fog_at(cycle_progress: f32) -> f32 {
    if cycle_progress >= FOG_IN_START {
        // Building up toward dawn
        (cycle_progress - FOG_IN_START) / (1.0 - FOG_IN_START)
    } else if cycle_progress <= FOG_OUT_END {
        // Burning off after sunrise
        1.0 - cycle_progress / FOG_OUT_END
    } else {
        0.0
    }
}

/// Night-time lightning strikes, rendered as a whole-canvas flash
pub struct Lightning {
    pub alpha: f32,
    cooldown: f32,
}

impl Lightning {
    pub fn new() -> Self {
        Self {
            alpha: 0.0,
            cooldown: gen_range(3.0, 8.0),
        }
    }

    pub fn update(&mut self, dt: f32, is_night: bool) {
        if self.alpha > 0.0 {
            self.alpha = (self.alpha - dt * 4.0).max(0.0);
        }
        if !is_night {
            return;
        }
        self.cooldown -= dt;
        if self.cooldown <= 0.0 {
            self.alpha = 1.0;
            self.cooldown = gen_range(5.0, 13.0);
        }
    }

    /// Drawn over everything except the HUD
    pub fn draw(&self) {
        if self.alpha <= 0.0 {
            return;
        }
        draw_rectangle(
            0.0,
            0.0,
            CANVAS_WIDTH,
            CANVAS_HEIGHT,
            Color::new(1.0, 1.0, 1.0, self.alpha * 0.8),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fog_absent_during_day_and_night() {
        assert_eq!(fog_at(0.3), 0.0);
        assert_eq!(fog_at(0.7), 0.0);
        assert_eq!(fog_at(0.5), 0.0);
    }

    #[test]
    fn test_fog_peaks_at_dawn() {
        assert!(fog_at(0.97) > 0.5);
        assert!((fog_at(0.0) - 1.0).abs() < 0.001);
        assert!(fog_at(0.03) > 0.0);
        assert!(fog_at(0.03) < 1.0);
        assert_eq!(fog_at(FOG_OUT_END + 0.001), 0.0);
    }

    #[test]
    fn test_wind_never_negative() {
        for i in 0..500 {
            assert!(wind_at(i as f32 * 0.1) >= 0.0);
        }
    }

    #[test]
    fn test_wind_varies() {
        let a = wind_at(0.0);
        let b = wind_at(3.0);
        assert!((a - b).abs() > 0.1);
    }

    #[test]
    fn test_lightning_only_strikes_at_night() {
        macroquad::rand::srand(50);
        let mut storm = Lightning::new();
        for _ in 0..1000 {
            storm.update(0.016, false);
            assert_eq!(storm.alpha, 0.0);
        }
        let mut struck = false;
        for _ in 0..1000 {
            storm.update(0.016, true);
            if storm.alpha > 0.0 {
                struck = true;
                break;
            }
        }
        assert!(struck, "cooldown tops out at 13s");
    }

    #[test]
    fn test_flash_decays_quickly() {
        let mut storm = Lightning::new();
        storm.alpha = 1.0;
        storm.cooldown = 100.0;
        for _ in 0..20 {
            storm.update(0.016, true);
        }
        assert!(storm.alpha < 0.1);
    }
}
