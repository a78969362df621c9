//! Drifting clouds

use macroquad::prelude::*;
use macroquad::rand::gen_range;

use crate::config::{rgba, SceneConfig, CANVAS_WIDTH};

pub struct Cloud {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    /// Own drift in px/s, independent of the truck
    speed: f32,
}

impl Cloud {
    pub fn new() -> Self {
        let mut cloud = Self {
            x: 0.0,
            y: gen_range(10.0, 90.0),
            scale: gen_range(0.5, 1.0),
            speed: gen_range(15.0, 35.0),
        };
        cloud.reset();
        cloud
    }

    pub fn reset(&mut self) {
        self.x = CANVAS_WIDTH + gen_range(0.0, 300.0);
    }

    pub fn update(&mut self, dt: f32) {
        self.x -= self.speed * dt;
        if self.x < -150.0 * self.scale {
            self.reset();
        }
    }

    /// Three overlapping puffs
    pub fn draw(&self, is_night: bool, cfg: &SceneConfig) {
        let color = if is_night {
            rgba(cfg.palette.cloud_night, 0.8)
        } else {
            rgba(cfg.palette.cloud_day, 0.8)
        };
        let s = self.scale;
        draw_circle(self.x, self.y, 30.0 * s, color);
        draw_circle(self.x + 40.0 * s, self.y - 15.0 * s, 40.0 * s, color);
        draw_circle(self.x + 80.0 * s, self.y, 35.0 * s, color);
    }
}
