//! Small roadside animals
//!
//! A rabbit or fox dashes along the verge at dusk, night and dawn. Rabbits
//! hop; foxes run flat out. Each respawn rerolls the species.

use macroquad::prelude::*;
use macroquad::rand::gen_range;

use crate::config::{CANVAS_HEIGHT, CANVAS_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CritterKind {
    Rabbit,
    Fox,
}

impl CritterKind {
    fn base_speed(self) -> f32 {
        match self {
            CritterKind::Rabbit => 220.0,
            CritterKind::Fox => 260.0,
        }
    }

    fn base_size(self) -> (f32, f32) {
        match self {
            CritterKind::Rabbit => (16.0, 14.0),
            CritterKind::Fox => (26.0, 12.0),
        }
    }
}

pub struct Critter {
    pub kind: CritterKind,
    pub x: f32,
    pub y: f32,
    pub visible: bool,
    speed: f32,
    width: f32,
    height: f32,
    hop_angle: f32,
}

impl Critter {
    pub fn new() -> Self {
        let mut critter = Self {
            kind: CritterKind::Rabbit,
            x: 0.0,
            y: 0.0,
            visible: false,
            speed: 0.0,
            width: 0.0,
            height: 0.0,
            hop_angle: 0.0,
        };
        critter.reset();
        critter
    }

    pub fn reset(&mut self) {
        self.kind = if gen_range(0.0, 1.0) < 0.6 {
            CritterKind::Rabbit
        } else {
            CritterKind::Fox
        };
        let (w, h) = self.kind.base_size();
        let jitter = gen_range(0.9, 1.1);
        self.width = w * jitter;
        self.height = h * jitter;
        self.speed = self.kind.base_speed() * gen_range(0.8, 1.2);
        self.x = CANVAS_WIDTH + gen_range(0.0, CANVAS_WIDTH * 3.0);
        self.y = CANVAS_HEIGHT - self.height - 5.0;
        self.hop_angle = gen_range(0.0, std::f32::consts::TAU);
        self.visible = true;
    }

    pub fn update(&mut self, dt: f32, speed_multiplier: f32, cycle_progress: f32) {
        // Active from dusk through dawn
        self.visible = cycle_progress > 0.45 || cycle_progress < 0.05;
        if !self.visible {
            // Park it offscreen so it doesn't pop in mid-canvas later
            if self.x < CANVAS_WIDTH {
                self.x = CANVAS_WIDTH + 100.0;
            }
            return;
        }

        self.x -= self.speed * speed_multiplier * dt;
        if self.x < -self.width {
            self.reset();
        }

        if self.kind == CritterKind::Rabbit {
            self.hop_angle += dt * 12.0 * (self.speed / 200.0);
        }
    }

    pub fn draw(&self) {
        if !self.visible {
            return;
        }
        let mut y = self.y;
        if self.kind == CritterKind::Rabbit {
            y -= self.hop_angle.sin().abs() * 8.0;
        }

        match self.kind {
            CritterKind::Rabbit => {
                let fur = Color::from_rgba(205, 195, 180, 255);
                draw_ellipse(self.x + self.width * 0.4, y + self.height * 0.6, self.width * 0.4, self.height * 0.4, 0.0, fur);
                draw_circle(self.x + self.width * 0.8, y + self.height * 0.35, self.height * 0.25, fur);
                // Ears
                draw_line(self.x + self.width * 0.78, y + self.height * 0.2, self.x + self.width * 0.72, y - self.height * 0.25, 2.0, fur);
                draw_line(self.x + self.width * 0.88, y + self.height * 0.2, self.x + self.width * 0.92, y - self.height * 0.25, 2.0, fur);
            }
            CritterKind::Fox => {
                let fur = Color::from_rgba(200, 100, 40, 255);
                draw_ellipse(self.x + self.width * 0.45, y + self.height * 0.5, self.width * 0.42, self.height * 0.38, 0.0, fur);
                draw_circle(self.x + self.width * 0.9, y + self.height * 0.35, self.height * 0.28, fur);
                // Brushy tail
                draw_ellipse(self.x, y + self.height * 0.4, self.width * 0.22, self.height * 0.22, 0.4, fur);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_critter_hidden_by_day() {
        macroquad::rand::srand(12);
        let mut critter = Critter::new();
        critter.update(0.016, 1.0, 0.25);
        assert!(!critter.visible);
        assert!(critter.x >= CANVAS_WIDTH, "parked offscreen while hidden");
    }

    #[test]
    fn test_critter_active_windows() {
        macroquad::rand::srand(13);
        let mut critter = Critter::new();
        for p in [0.5, 0.7, 0.99, 0.01] {
            critter.update(0.016, 1.0, p);
            assert!(critter.visible, "expected active at {}", p);
        }
    }

    #[test]
    fn test_critter_respawns_with_new_roll() {
        macroquad::rand::srand(14);
        let mut critter = Critter::new();
        critter.x = -critter.width - 1.0;
        critter.update(0.016, 1.0, 0.7);
        assert!(critter.x >= CANVAS_WIDTH);
    }
}
