//! Nuclear plant
//!
//! Two cooling towers with steam plumes, a reactor dome and a blinking red
//! beacon at night. Spawns rarely - the respawn offset can put it several
//! screens away.

use macroquad::prelude::*;
use macroquad::rand::gen_range;

use super::particles::{ParticleRng, SteamParticle};
use crate::config::{CANVAS_HEIGHT, CANVAS_WIDTH};

const SCALE: f32 = 0.8;
const PLANT_WIDTH: f32 = 300.0 * SCALE;
const PLANT_HEIGHT: f32 = 250.0 * SCALE;
const PARALLAX_SPEED: f32 = 80.0;
const STEAM_INTERVAL: f32 = 0.1;
const BLINK_INTERVAL: f32 = 1.0;

pub struct NuclearPlant {
    pub x: f32,
    pub y: f32,
    steam: Vec<SteamParticle>,
    steam_timer: f32,
    blink_timer: f32,
    blink_on: bool,
    rng: ParticleRng,
}

impl NuclearPlant {
    pub fn new() -> Self {
        let mut plant = Self {
            x: 0.0,
            y: CANVAS_HEIGHT - PLANT_HEIGHT,
            steam: Vec::new(),
            steam_timer: 0.0,
            blink_timer: 0.0,
            blink_on: false,
            rng: ParticleRng::new(0xBEEF),
        };
        plant.reset();
        plant
    }

    pub fn reset(&mut self) {
        self.x = CANVAS_WIDTH + gen_range(0.0, CANVAS_WIDTH * 5.0);
        self.steam.clear();
    }

    pub fn update(&mut self, dt: f32, speed_multiplier: f32, wind: f32) {
        self.x -= PARALLAX_SPEED * speed_multiplier * dt;
        if self.x < -PLANT_WIDTH {
            self.reset();
        }

        self.steam_timer += dt;
        if self.steam_timer > STEAM_INTERVAL {
            self.steam_timer = 0.0;
            let top_y = self.y + 50.0 * SCALE;
            self.steam.push(SteamParticle::new(self.x + 70.0 * SCALE, top_y, &mut self.rng));
            self.steam.push(SteamParticle::new(self.x + 230.0 * SCALE, top_y, &mut self.rng));
        }
        for p in &mut self.steam {
            p.update(dt, wind);
        }
        self.steam.retain(|p| p.alive());

        self.blink_timer += dt;
        if self.blink_timer > BLINK_INTERVAL {
            self.blink_timer = 0.0;
            self.blink_on = !self.blink_on;
        }
    }

    pub fn draw(&self, is_night: bool) {
        // Steam goes behind the towers
        for p in &self.steam {
            p.draw();
        }

        let base_y = self.y + PLANT_HEIGHT;
        self.draw_cooling_tower(self.x + 30.0 * SCALE, base_y);
        self.draw_cooling_tower(self.x + 190.0 * SCALE, base_y);

        // Reactor dome: centered on the ground line, lower half hangs below
        // the canvas so only the dome shows
        let radius = 45.0 * SCALE;
        let cx = self.x + 150.0 * SCALE;
        let cy = base_y;
        draw_circle(cx, cy, radius, Color::from_rgba(190, 195, 200, 255));
        draw_circle_lines(cx, cy, radius, 2.0, Color::from_rgba(86, 101, 115, 255));

        if is_night && self.blink_on {
            let light_y = cy - radius;
            let red = Color::from_rgba(255, 51, 51, 255);
            draw_circle(cx, light_y, 7.0 * SCALE, Color::new(1.0, 0.2, 0.2, 0.35));
            draw_circle(cx, light_y, 4.0 * SCALE, red);
        }
    }

    /// Hyperboloid silhouette approximated with horizontal slices
    fn draw_cooling_tower(&self, x: f32, base_y: f32) {
        let width = 80.0 * SCALE;
        let height = 200.0 * SCALE;
        let top_width = 50.0 * SCALE;
        let top_y = base_y - height;
        let shade = Color::from_rgba(205, 210, 214, 255);

        let slices = 12;
        for i in 0..slices {
            let t0 = i as f32 / slices as f32;
            let t1 = (i + 1) as f32 / slices as f32;
            let w0 = tower_width_at(t0, width, top_width);
            let w1 = tower_width_at(t1, width, top_width);
            let y0 = base_y - height * t0;
            let y1 = base_y - height * t1;
            let c0 = x + width / 2.0 - w0 / 2.0;
            let c1 = x + width / 2.0 - w1 / 2.0;
            draw_triangle(vec2(c0, y0), vec2(c0 + w0, y0), vec2(c1, y1), shade);
            draw_triangle(vec2(c1, y1), vec2(c1 + w1, y1), vec2(c0 + w0, y0), shade);
        }

        // Rim
        draw_ellipse(x + width / 2.0, top_y, top_width / 2.0, 4.0 * SCALE, 0.0, Color::from_rgba(149, 165, 166, 255));
    }
}

/// Tower width at height fraction t (0 = base, 1 = top): pinched waist at 0.7
fn tower_width_at(t: f32, base_width: f32, top_width: f32) -> f32 {
    let waist = 0.7;
    let waist_width = top_width * 1.05;
    if t < waist {
        let k = t / waist;
        // Ease toward the waist
        base_width + (waist_width - base_width) * (k * (2.0 - k))
    } else {
        let k = (t - waist) / (1.0 - waist);
        waist_width + (top_width - waist_width) * k
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tower_profile_narrows_then_flares() {
        let base = tower_width_at(0.0, 80.0, 50.0);
        let waist = tower_width_at(0.7, 80.0, 50.0);
        let top = tower_width_at(1.0, 80.0, 50.0);
        assert!((base - 80.0).abs() < 0.001);
        assert!(waist < base);
        assert!((top - 50.0).abs() < 0.001);
    }

    #[test]
    fn test_plant_emits_steam_and_blinks() {
        macroquad::rand::srand(30);
        let mut plant = NuclearPlant::new();
        plant.x = 300.0;
        assert!(plant.steam.is_empty());

        plant.update(0.15, 1.0, 10.0);
        assert_eq!(plant.steam.len(), 2, "one puff per tower");

        let before = plant.blink_on;
        plant.update(1.1, 1.0, 10.0);
        assert_ne!(plant.blink_on, before);
    }

    #[test]
    fn test_plant_respawns_far_right() {
        macroquad::rand::srand(31);
        let mut plant = NuclearPlant::new();
        plant.x = -PLANT_WIDTH - 1.0;
        plant.steam.push(SteamParticle::new(0.0, 0.0, &mut ParticleRng::new(1)));
        plant.update(0.016, 1.0, 0.0);
        assert!(plant.x >= CANVAS_WIDTH);
        assert!(plant.steam.is_empty(), "steam clears on respawn");
    }
}
