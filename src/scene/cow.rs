//! Grazing cows
//!
//! Cows walk left with the ground layer. Abduction is driven entirely by the
//! UFO, which sets the flags and moves the cow; the cow itself only scrolls
//! and respawns.

use macroquad::prelude::*;
use macroquad::rand::gen_range;

use crate::config::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Fallback sprite size when no texture is present
const COW_WIDTH: f32 = 120.0;
const COW_HEIGHT: f32 = 80.0;

const WALK_SPEED: f32 = 150.0;

pub struct Cow {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub is_abducted: bool,
    pub abduction_progress: f32,
    pub visible: bool,
}

impl Cow {
    pub fn new(texture: Option<&Texture2D>) -> Self {
        let scale = gen_range(0.15, 0.25);
        let height = texture.map_or(COW_HEIGHT, |t| t.height()) * scale;
        let mut cow = Self {
            x: 0.0,
            y: CANVAS_HEIGHT - height + 5.0,
            scale,
            is_abducted: false,
            abduction_progress: 0.0,
            visible: true,
        };
        cow.reset(texture);
        cow
    }

    pub fn reset(&mut self, texture: Option<&Texture2D>) {
        self.x = CANVAS_WIDTH + gen_range(0.0, CANVAS_WIDTH * 1.5);
        let height = texture.map_or(COW_HEIGHT, |t| t.height()) * self.scale;
        self.y = CANVAS_HEIGHT - height + 5.0;
        self.is_abducted = false;
        self.abduction_progress = 0.0;
        self.visible = true;
    }

    pub fn update(&mut self, dt: f32, speed_multiplier: f32, texture: Option<&Texture2D>) {
        if !self.is_abducted {
            self.x -= WALK_SPEED * speed_multiplier * dt;
            if self.x < -100.0 {
                self.reset(texture);
            }
        }
    }

    /// Scale after the abduction shrink is applied
    pub fn current_scale(&self) -> f32 {
        self.scale * (1.0 - self.abduction_progress)
    }

    pub fn size(&self, texture: Option<&Texture2D>) -> (f32, f32) {
        let s = self.current_scale();
        match texture {
            Some(t) => (t.width() * s, t.height() * s),
            None => (COW_WIDTH * s, COW_HEIGHT * s),
        }
    }

    pub fn draw(&self, texture: Option<&Texture2D>) {
        if !self.visible {
            return;
        }
        let (w, h) = self.size(texture);
        // Abducted cows hang centered under the beam
        let x = if self.is_abducted { self.x - w / 2.0 } else { self.x };

        match texture {
            Some(t) => draw_texture_ex(
                t,
                x,
                self.y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(w, h)),
                    ..Default::default()
                },
            ),
            None => {
                // Body, head, legs, patches
                let body = WHITE;
                let patch = Color::from_rgba(40, 40, 40, 255);
                draw_ellipse(x + w * 0.45, self.y + h * 0.45, w * 0.38, h * 0.3, 0.0, body);
                draw_circle(x + w * 0.85, self.y + h * 0.35, h * 0.18, body);
                draw_ellipse(x + w * 0.4, self.y + h * 0.4, w * 0.14, h * 0.12, 0.0, patch);
                draw_ellipse(x + w * 0.6, self.y + h * 0.55, w * 0.11, h * 0.1, 0.0, patch);
                for leg in 0..4 {
                    draw_rectangle(
                        x + w * (0.2 + leg as f32 * 0.15),
                        self.y + h * 0.65,
                        w * 0.05,
                        h * 0.35,
                        body,
                    );
                }
            }
        }
    }
}
