//! Roadside billboard
//!
//! A sign on two posts with a painted fallback face, lit by a spotlight at
//! night. Parallax depth comes from the random scale.

use macroquad::prelude::*;
use macroquad::rand::gen_range;

use crate::config::{CANVAS_HEIGHT, CANVAS_WIDTH};

const FACE_WIDTH: f32 = 300.0;
const FACE_HEIGHT: f32 = 150.0;

pub struct Billboard {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    scale: f32,
    speed: f32,
}

impl Billboard {
    pub fn new(texture: Option<&Texture2D>) -> Self {
        let scale = gen_range(0.1, 0.2);
        let base_speed = gen_range(100.0, 150.0);
        let (tw, th) = match texture {
            Some(t) => (t.width(), t.height()),
            None => (FACE_WIDTH, FACE_HEIGHT),
        };
        let mut board = Self {
            x: 0.0,
            y: 0.0,
            width: tw * scale,
            height: th * scale,
            scale,
            // Smaller (farther) boards drift slower
            speed: base_speed * (1.5 - scale),
        };
        board.reset();
        board
    }

    pub fn reset(&mut self) {
        self.x = CANVAS_WIDTH + gen_range(0.0, CANVAS_WIDTH * 2.5);
        self.y = CANVAS_HEIGHT - self.height - gen_range(30.0, 50.0);
    }

    pub fn update(&mut self, dt: f32, speed_multiplier: f32) {
        self.x -= self.speed * speed_multiplier * dt;
        if self.x < -self.width {
            self.reset();
        }
    }

    pub fn draw(&self, texture: Option<&Texture2D>, is_night: bool) {
        let pole_width = 8.0 * self.scale * 4.0;
        let pole_height = CANVAS_HEIGHT - (self.y + self.height);
        let pole_offset = self.width * 0.3;
        let center = self.x + self.width / 2.0;

        // Posts
        let pole_color = Color::from_rgba(92, 61, 33, 255);
        draw_rectangle(center - pole_offset - pole_width / 2.0, self.y + self.height, pole_width, pole_height, pole_color);
        draw_rectangle(center + pole_offset - pole_width / 2.0, self.y + self.height, pole_width, pole_height, pole_color);

        // Drop shadow, face, frame
        draw_rectangle(self.x + 2.0, self.y + 2.0, self.width, self.height, Color::new(0.0, 0.0, 0.0, 0.4));
        draw_rectangle(self.x, self.y, self.width, self.height, Color::from_rgba(240, 240, 240, 255));
        match texture {
            Some(t) => draw_texture_ex(
                t,
                self.x,
                self.y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(self.width, self.height)),
                    ..Default::default()
                },
            ),
            None => {
                // Painted placeholder ad: sunset stripes and a dot
                draw_rectangle(self.x, self.y, self.width, self.height * 0.5, Color::from_rgba(255, 183, 77, 255));
                draw_rectangle(self.x, self.y + self.height * 0.5, self.width, self.height * 0.5, Color::from_rgba(77, 182, 172, 255));
                draw_circle(self.x + self.width * 0.7, self.y + self.height * 0.4, self.height * 0.2, Color::from_rgba(255, 241, 118, 255));
            }
        }
        draw_rectangle_lines(self.x, self.y, self.width, self.height, 2.0, Color::from_rgba(51, 51, 51, 255));

        if is_night {
            self.draw_spotlight(center);
        }
    }

    /// Spotlight at the base of the sign, cone opening upward
    fn draw_spotlight(&self, light_x: f32) {
        let light_size = (8.0 * self.scale * 4.0).max(3.0);
        let light_y = self.y + self.height + 2.0 + light_size / 2.0;
        let warm = |a: f32| Color::new(1.0, 1.0, 0.88, a);

        let cone_half = self.width * 0.4;
        // Wider, fainter halo behind the main cone
        draw_triangle(
            vec2(light_x, light_y),
            vec2(light_x - cone_half - 10.0, self.y),
            vec2(light_x + cone_half + 10.0, self.y),
            warm(0.1),
        );
        draw_triangle(
            vec2(light_x, light_y),
            vec2(light_x - cone_half, self.y),
            vec2(light_x + cone_half, self.y),
            warm(0.22),
        );

        // Fixture and bulb
        draw_rectangle(light_x - light_size / 2.0, light_y - light_size / 2.0, light_size, light_size, Color::from_rgba(34, 34, 34, 255));
        draw_circle(light_x, light_y, light_size * 0.3, warm(0.9));

        // Warm wash over the face
        draw_rectangle(self.x, self.y, self.width, self.height, warm(0.25));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_billboard_sits_above_ground() {
        macroquad::rand::srand(20);
        let board = Billboard::new(None);
        assert!(board.y + board.height < CANVAS_HEIGHT);
        assert!(board.x >= CANVAS_WIDTH);
    }

    #[test]
    fn test_billboard_wraps() {
        macroquad::rand::srand(21);
        let mut board = Billboard::new(None);
        board.x = -board.width - 1.0;
        board.update(0.016, 1.0);
        assert!(board.x >= CANVAS_WIDTH);
    }
}
