//! Roadside trees
//!
//! Trees scroll with the ground layer, with a per-tree speed tied to scale.
//! A tree hit by the UFO's laser burns down over 1.5 seconds, then respawns
//! off the right edge.

use macroquad::prelude::*;
use macroquad::rand::gen_range;

use crate::config::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Fallback sprite size when no texture is present
const TREE_WIDTH: f32 = 36.0;
const TREE_HEIGHT: f32 = 60.0;

const BURN_DURATION: f32 = 1.5;
const BASE_SPEED: f32 = 150.0;

pub struct Tree {
    pub x: f32,
    pub scale: f32,
    speed: f32,
    pub is_burning: bool,
    pub burn_progress: f32,
}

impl Tree {
    pub fn new() -> Self {
        let scale = gen_range(0.8, 1.2);
        let mut tree = Self {
            x: 0.0,
            scale,
            speed: BASE_SPEED * (2.0 - scale),
            is_burning: false,
            burn_progress: 0.0,
        };
        tree.reset();
        tree
    }

    pub fn reset(&mut self) {
        self.x = CANVAS_WIDTH + gen_range(0.0, CANVAS_WIDTH);
        self.is_burning = false;
        self.burn_progress = 0.0;
    }

    pub fn update(&mut self, dt: f32, speed_multiplier: f32) {
        if self.is_burning {
            self.burn_progress += dt / BURN_DURATION;
            if self.burn_progress >= 1.0 {
                self.reset();
            }
        } else {
            self.x -= self.speed * speed_multiplier * dt;
            if self.x < -100.0 {
                self.reset();
            }
        }
    }

    /// Current sprite footprint (shrinks while burning)
    pub fn size(&self, texture: Option<&Texture2D>) -> (f32, f32) {
        let scale = self.scale * (1.0 - self.burn_progress);
        match texture {
            Some(t) => (t.width() * scale, t.height() * scale),
            None => (TREE_WIDTH * scale, TREE_HEIGHT * scale),
        }
    }

    /// X of the canopy center, used by the UFO to aim
    pub fn center_x(&self, texture: Option<&Texture2D>) -> f32 {
        self.x + self.size(texture).0 / 2.0
    }

    /// Y of the canopy top
    pub fn top_y(&self, texture: Option<&Texture2D>) -> f32 {
        CANVAS_HEIGHT - self.size(texture).1
    }

    pub fn draw(&self, texture: Option<&Texture2D>) {
        let (w, h) = self.size(texture);
        let y = CANVAS_HEIGHT - h;
        // Burning trees glow hot and shrink away
        let tint = if self.is_burning {
            Color::new(1.0, 0.35 + 0.4 * self.burn_progress, 0.1, 1.0)
        } else {
            WHITE
        };

        match texture {
            Some(t) => draw_texture_ex(
                t,
                self.x,
                y,
                tint,
                DrawTextureParams {
                    dest_size: Some(vec2(w, h)),
                    ..Default::default()
                },
            ),
            None => {
                let trunk = if self.is_burning {
                    Color::new(0.4, 0.15, 0.05, 1.0)
                } else {
                    Color::from_rgba(92, 61, 33, 255)
                };
                let canopy = if self.is_burning {
                    tint
                } else {
                    Color::from_rgba(46, 125, 50, 255)
                };
                draw_rectangle(self.x + w * 0.42, y + h * 0.6, w * 0.16, h * 0.4, trunk);
                draw_circle(self.x + w / 2.0, y + h * 0.38, w * 0.5, canopy);
                draw_circle(self.x + w * 0.3, y + h * 0.52, w * 0.35, canopy);
                draw_circle(self.x + w * 0.7, y + h * 0.52, w * 0.35, canopy);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_is_tied_to_scale() {
        macroquad::rand::srand(4);
        let tree = Tree::new();
        assert!((tree.speed - BASE_SPEED * (2.0 - tree.scale)).abs() < 0.001);
    }

    #[test]
    fn test_tree_scrolls_and_respawns() {
        macroquad::rand::srand(5);
        let mut tree = Tree::new();
        tree.x = -99.0;
        tree.update(0.1, 1.0);
        assert!(tree.x >= CANVAS_WIDTH, "should respawn off the right edge");
    }

    #[test]
    fn test_burn_down_lifecycle() {
        macroquad::rand::srand(6);
        let mut tree = Tree::new();
        tree.x = 300.0;
        tree.is_burning = true;

        // While burning the tree stops scrolling
        tree.update(0.5, 2.0);
        assert!((tree.x - 300.0).abs() < f32::EPSILON);
        assert!(tree.burn_progress > 0.3);

        // Finishes burning in 1.5s total and respawns fresh
        tree.update(1.1, 2.0);
        assert!(!tree.is_burning);
        assert_eq!(tree.burn_progress, 0.0);
        assert!(tree.x >= CANVAS_WIDTH);
    }

    #[test]
    fn test_burning_tree_shrinks() {
        macroquad::rand::srand(7);
        let mut tree = Tree::new();
        let (w0, h0) = tree.size(None);
        tree.is_burning = true;
        tree.burn_progress = 0.5;
        let (w1, h1) = tree.size(None);
        assert!(w1 < w0 && h1 < h0);
    }
}
