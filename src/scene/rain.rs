//! Night rain
//!
//! A fixed pool of raindrops with a fake depth coordinate: deeper drops are
//! longer, faster, wider and brighter. Hitting the ground bursts a drop into
//! a handful of gravity-bound droplets before it recycles to the top.

use macroquad::prelude::*;
use macroquad::rand::gen_range;

use crate::config::{CANVAS_HEIGHT, CANVAS_WIDTH};

const DROPLET_GRAVITY: f32 = 720.0;
const DROPLET_DECAY: f32 = 1.8;

struct Droplet {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    life: f32,
}

struct Raindrop {
    x: f32,
    y: f32,
    z: f32,
    splashing: bool,
    droplets: Vec<Droplet>,
}

impl Raindrop {
    fn new() -> Self {
        Self {
            x: gen_range(-50.0, CANVAS_WIDTH + 50.0),
            y: gen_range(-CANVAS_HEIGHT, 0.0),
            z: gen_range(0.0, 1.0),
            splashing: false,
            droplets: Vec::new(),
        }
    }

    fn length(&self) -> f32 {
        self.z * 15.0 + 10.0
    }

    fn fall_speed(&self) -> f32 {
        (self.z * 8.0 + 4.0) * 60.0
    }

    fn update(&mut self, dt: f32, wind: f32) {
        if self.splashing {
            for d in &mut self.droplets {
                d.x += d.vx * dt;
                d.y += d.vy * dt;
                d.vy += DROPLET_GRAVITY * dt;
                d.life -= DROPLET_DECAY * dt;
            }
            self.droplets.retain(|d| d.life > 0.0);
            if self.droplets.is_empty() {
                self.reset();
            }
            return;
        }

        self.y += self.fall_speed() * dt;
        self.x -= wind * self.z * dt;
        if self.y > CANVAS_HEIGHT {
            self.splash();
        }
    }

    fn splash(&mut self) {
        self.splashing = true;
        let n = gen_range(5, 10);
        self.droplets = (0..n)
            .map(|_| Droplet {
                x: self.x,
                y: CANVAS_HEIGHT,
                vx: gen_range(-70.0, 70.0),
                vy: gen_range(-220.0, -80.0),
                life: 1.0,
            })
            .collect();
    }

    fn reset(&mut self) {
        self.x = gen_range(-50.0, CANVAS_WIDTH + 50.0);
        self.y = gen_range(-100.0, -10.0);
        self.z = gen_range(0.0, 1.0);
        self.splashing = false;
        self.droplets.clear();
    }

    fn draw(&self, wind: f32) {
        let color = |a: f32| Color::new(0.69, 0.82, 0.93, a);
        if self.splashing {
            for d in &self.droplets {
                draw_circle(d.x, d.y, 1.0 + self.z * 0.8, color(d.life * 0.6));
            }
            return;
        }
        // Slant the streak with the wind
        let slant = -wind * self.z * 0.05;
        draw_line(
            self.x,
            self.y,
            self.x + slant,
            self.y + self.length(),
            self.z * 1.2 + 0.5,
            color(self.z * 0.3 + 0.2),
        );
    }
}

pub struct Rain {
    drops: Vec<Raindrop>,
}

impl Rain {
    pub fn new(count: usize) -> Self {
        Self {
            drops: (0..count).map(|_| Raindrop::new()).collect(),
        }
    }

    pub fn update(&mut self, dt: f32, is_night: bool, wind: f32) {
        if !is_night {
            return;
        }
        for drop in &mut self.drops {
            drop.update(dt, wind);
        }
    }

    pub fn draw(&self, is_night: bool, wind: f32) {
        if !is_night {
            return;
        }
        for drop in &self.drops {
            drop.draw(wind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_scales_speed_and_length() {
        macroquad::rand::srand(70);
        let mut near = Raindrop::new();
        let mut far = Raindrop::new();
        near.z = 1.0;
        far.z = 0.0;
        assert!(near.fall_speed() > far.fall_speed());
        assert!(near.length() > far.length());
    }

    #[test]
    fn test_drop_splashes_at_ground_then_recycles() {
        macroquad::rand::srand(71);
        let mut drop = Raindrop::new();
        drop.y = CANVAS_HEIGHT - 1.0;
        drop.z = 1.0;
        drop.update(0.05, 0.0);
        assert!(drop.splashing);
        assert!(drop.droplets.len() >= 5);

        // Droplets die off and the drop returns to the top
        let mut guard = 0;
        while drop.splashing {
            drop.update(0.05, 0.0);
            guard += 1;
            assert!(guard < 200, "splash should die out");
        }
        assert!(drop.y < 0.0);
    }

    #[test]
    fn test_rain_frozen_by_day() {
        macroquad::rand::srand(72);
        let mut rain = Rain::new(10);
        let y0: Vec<f32> = rain.drops.iter().map(|d| d.y).collect();
        rain.update(0.5, false, 10.0);
        for (drop, y) in rain.drops.iter().zip(y0) {
            assert_eq!(drop.y, y);
        }
    }
}
